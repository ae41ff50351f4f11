use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::calendar::{self, WeekId};
use crate::config::Config;
use crate::error::Error;
use crate::model::timetable::Timetable;
use crate::schedule::timetable::validate_timetable;
use crate::store::business::BusinessStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct HorizonQuery {
    /// Start date; defaults to today. The horizon begins at that week's Monday.
    pub from: Option<NaiveDate>,
    /// Page offset into the week sequence; defaults to 0 when only `count` is
    /// given. Paging is off when both are absent.
    pub offset: Option<i64>,
    /// Page length; defaults to the configured page size when only `offset`
    /// is given.
    pub count: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct WeekTimetableView {
    #[serde(rename = "weekStr")]
    #[schema(example = "Week 36")]
    pub label: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub timetable: Timetable,
}

#[derive(Serialize, ToSchema)]
pub struct TimetableView {
    #[serde(rename = "firstWeekDate")]
    pub first_week_date: Option<WeekId>,
    #[schema(value_type = Object)]
    pub weeks: BTreeMap<WeekId, WeekTimetableView>,
}

/// Get the default timetable
#[utoipa::path(
    get,
    path = "/business/timetable/default",
    responses(
        (status = 200, description = "The recurring week template", body = Timetable),
        (status = 404, description = "No default timetable set yet")
    ),
    tag = "Timetable"
)]
pub async fn get_default_timetable(
    store: web::Data<BusinessStore>,
) -> Result<HttpResponse, Error> {
    let timetable = store
        .default_timetable()
        .await?
        .ok_or_else(|| Error::not_found("default timetable"))?;
    Ok(HttpResponse::Ok().json(timetable))
}

/// Set the default timetable
///
/// The intake point for extraction-service output: whatever produced the
/// candidate, it is validated here before it becomes the default. Replaces
/// the previous default wholesale; weeks already published keep the template
/// they were validated against.
#[utoipa::path(
    put,
    path = "/business/timetable/default",
    request_body = Timetable,
    responses(
        (status = 200, description = "Default timetable replaced", body = Object, example = json!({
            "message": "Default timetable set"
        })),
        (status = 400, description = "Overlapping shifts, reversed windows or zero required employees")
    ),
    tag = "Timetable"
)]
pub async fn set_default_timetable(
    store: web::Data<BusinessStore>,
    payload: web::Json<Timetable>,
) -> Result<HttpResponse, Error> {
    let timetable = payload.into_inner();
    validate_timetable(&timetable)?;
    store.set_default_timetable(&timetable).await?;

    info!("default timetable replaced");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Default timetable set"
    })))
}

/// Browse the week horizon with the default timetable applied
///
/// Projects the default template onto every week of the horizon, optionally
/// paged with `offset`/`count`.
#[utoipa::path(
    get,
    path = "/business/timetable",
    params(
        ("from", Query, description = "Start date, defaults to today"),
        ("offset", Query, description = "Page offset into the week sequence, defaults to 0 when count is given"),
        ("count", Query, description = "Page length, defaults to the configured page size when offset is given")
    ),
    responses(
        (status = 200, description = "Weeks of the horizon with the template applied", body = TimetableView),
        (status = 400, description = "Offset outside the horizon"),
        (status = 404, description = "No default timetable set yet")
    ),
    tag = "Timetable"
)]
pub async fn get_timetable_weeks(
    store: web::Data<BusinessStore>,
    config: web::Data<Config>,
    query: web::Query<HorizonQuery>,
) -> Result<HttpResponse, Error> {
    let timetable = store
        .default_timetable()
        .await?
        .ok_or_else(|| Error::not_found("default timetable"))?;

    let start = query.from.unwrap_or_else(|| Local::now().date_naive());
    let horizon = calendar::weeks_from(start, config.horizon_months);

    let selected = if query.offset.is_some() || query.count.is_some() {
        calendar::page(
            &horizon,
            query.offset.unwrap_or(0),
            query.count.unwrap_or(config.week_page_size),
        )?
    } else {
        &horizon[..]
    };

    let weeks: BTreeMap<WeekId, WeekTimetableView> = selected
        .iter()
        .map(|week| {
            (
                week.id,
                WeekTimetableView {
                    label: week.label.clone(),
                    timetable: timetable.clone(),
                },
            )
        })
        .collect();

    Ok(HttpResponse::Ok().json(TimetableView {
        first_week_date: selected.first().map(|w| w.id),
        weeks,
    }))
}
