use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::calendar::WeekId;
use crate::error::Error;
use crate::model::availability::{DayAvailability, WeekAvailability};
use crate::model::employee::Employee;
use crate::schedule::service::Scheduler;
use crate::store::employees::EmployeeStore;

#[derive(Serialize, ToSchema)]
pub struct EmployeesWeekAvailability {
    #[schema(value_type = Object)]
    pub employees: BTreeMap<String, WeekAvailability>,
}

/// Create Employee
#[utoipa::path(
    put,
    path = "/employee",
    request_body = Employee,
    responses(
        (status = 201, description = "Employee created, availability seeded", body = Object, example = json!({
            "message": "Employee created"
        })),
        (status = 409, description = "Email already registered"),
        (status = 400, description = "Malformed employee record")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<EmployeeStore>,
    payload: web::Json<Employee>,
) -> Result<HttpResponse, Error> {
    let employee = payload.into_inner();
    if !employee.email.contains('@') {
        return Err(Error::bad_request(format!(
            "{:?} is not an email address",
            employee.email
        )));
    }
    if employee.name.trim().is_empty() {
        return Err(Error::bad_request("employee name must not be empty"));
    }

    store.create(&employee).await.map_err(|e| {
        if !matches!(e, Error::Conflict { .. }) {
            error!(error = %e, email = %employee.email, "failed to create employee");
        }
        e
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created"
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees, ordered by email", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<EmployeeStore>) -> Result<HttpResponse, Error> {
    let employees = store.all().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by email
#[utoipa::path(
    get,
    path = "/employee/{email}",
    params(
        ("email", Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let email = path.into_inner();
    let employee = store
        .get(&email)
        .await?
        .ok_or_else(|| Error::not_found(format!("employee {email}")))?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Also purges the employee's availability document.
#[utoipa::path(
    delete,
    path = "/employee/{email}",
    params(
        ("email", Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Employee and availability removed", body = Object, example = json!({
            "message": "Employee deleted"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let email = path.into_inner();
    if !store.delete(&email).await? {
        return Err(Error::not_found(format!("employee {email}")));
    }

    debug!(%email, "employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted"
    })))
}

/// Get an employee's availability across the whole horizon
#[utoipa::path(
    get,
    path = "/employee/{email}/availability",
    params(
        ("email", Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Availability document, keyed by week"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Availability"
)]
pub async fn get_availability(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let email = path.into_inner();
    let availability = store
        .availability(&email)
        .await?
        .ok_or_else(|| Error::not_found(format!("employee {email}")))?;
    Ok(HttpResponse::Ok().json(availability))
}

/// Update one day of an employee's availability
///
/// Replaces exactly the day matching the body's date; the other six days of
/// the week stay untouched. Replaying the same update is a no-op.
#[utoipa::path(
    put,
    path = "/employee/{email}/availability/{week}",
    params(
        ("email", Path, description = "Employee email"),
        ("week", Path, description = "Week id, the Monday date (YYYY-MM-DD)")
    ),
    request_body = DayAvailability,
    responses(
        (status = 200, description = "Updated week", body = WeekAvailability),
        (status = 400, description = "Invalid window or date outside the week"),
        (status = 404, description = "Unknown employee or week")
    ),
    tag = "Availability"
)]
pub async fn put_availability_day(
    scheduler: web::Data<Scheduler>,
    path: web::Path<(String, String)>,
    payload: web::Json<DayAvailability>,
) -> Result<HttpResponse, Error> {
    let (email, week) = path.into_inner();
    let week: WeekId = week.parse()?;
    let day = payload.into_inner();

    let updated = scheduler
        .update_availability(&email, week, day.date, day.availability)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Availability of every employee for one week
///
/// The shape handed to the suggestion engine alongside the timetable.
#[utoipa::path(
    get,
    path = "/employees/availability/week/{week}",
    params(
        ("week", Path, description = "Week id, the Monday date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Week availability by employee email", body = EmployeesWeekAvailability)
    ),
    tag = "Availability"
)]
pub async fn week_availability_for_all(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let week: WeekId = path.into_inner().parse()?;
    let employees = store.all_for_week(week).await?;
    Ok(HttpResponse::Ok().json(EmployeesWeekAvailability { employees }))
}
