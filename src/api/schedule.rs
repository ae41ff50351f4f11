use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::calendar::WeekId;
use crate::error::Error;
use crate::model::schedule::WeekSchedule;
use crate::schedule::service::Scheduler;
use crate::store::business::BusinessStore;

#[derive(Deserialize, ToSchema)]
pub struct PublishScheduleRequest {
    pub schedule: WeekSchedule,
}

/// Get the published schedule for a week
#[utoipa::path(
    get,
    path = "/business/schedule/{week}",
    params(
        ("week", Path, description = "Week id, the Monday date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Published week schedule", body = WeekSchedule),
        (status = 404, description = "Nothing published for that week")
    ),
    tag = "Schedule"
)]
pub async fn get_week_schedule(
    store: web::Data<BusinessStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let week: WeekId = path.into_inner().parse()?;
    let schedule = store
        .schedule_for_week(week)
        .await?
        .ok_or_else(|| Error::not_found(format!("schedule for week {week}")))?;
    Ok(HttpResponse::Ok().json(schedule))
}

/// Publish a proposed schedule for a week
///
/// The proposal is untrusted regardless of origin (manual edit or suggestion
/// engine) and is re-validated against the current timetable and the current
/// availability. On success the whole week is replaced; on rejection the
/// response carries the full violation list and nothing changes.
#[utoipa::path(
    put,
    path = "/business/schedule/{week}",
    params(
        ("week", Path, description = "Week id, the Monday date (YYYY-MM-DD)")
    ),
    request_body = PublishScheduleRequest,
    responses(
        (status = 201, description = "Week published", body = WeekSchedule),
        (status = 400, description = "Proposal does not line up with the timetable"),
        (status = 404, description = "No default timetable set yet"),
        (status = 422, description = "Constraint violations, nothing persisted")
    ),
    tag = "Schedule"
)]
pub async fn put_week_schedule(
    scheduler: web::Data<Scheduler>,
    path: web::Path<String>,
    payload: web::Json<PublishScheduleRequest>,
) -> Result<HttpResponse, Error> {
    let week: WeekId = path.into_inner().parse()?;
    let published = scheduler
        .reconcile_week(week, payload.into_inner().schedule)
        .await?;
    Ok(HttpResponse::Created().json(published))
}
