use crate::api::employee::EmployeesWeekAvailability;
use crate::api::schedule::PublishScheduleRequest;
use crate::api::timetable::{TimetableView, WeekTimetableView};
use crate::calendar::{WeekId, WeekRef};
use crate::model::availability::{Availability, DayAvailability, EmployeeAvailability, WeekAvailability};
use crate::model::employee::Employee;
use crate::model::schedule::{DaySchedule, ShiftAssignment, WeekSchedule};
use crate::model::timetable::{DayTemplate, ShiftTemplate, Timetable};
use crate::schedule::validator::{Violation, ViolationKind};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shiftdock API",
        version = "1.0.0",
        description = r#"
## Workforce Calendar & Scheduling

This API manages employees, their week-by-week availability, the business's
recurring shift timetable, and the published weekly schedules.

### Key Features
- **Employee Management**
  - Create, list, view and delete employees (email is the identity key)
- **Availability**
  - Per-day availability (available / unavailable / partial window),
    edited one day at a time across a 12-month week horizon
- **Timetable**
  - One recurring default template per business, validated before it is set
- **Schedule Reconciliation**
  - Proposed week schedules (manual or machine-suggested) are validated
    against the timetable and availability; a week is either published
    wholesale or rejected with a structured violation list

### Response Format
- JSON-based RESTful responses
- Rejected schedules answer `422` with a `violations` array

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::get_availability,
        crate::api::employee::put_availability_day,
        crate::api::employee::week_availability_for_all,

        crate::api::timetable::get_default_timetable,
        crate::api::timetable::set_default_timetable,
        crate::api::timetable::get_timetable_weeks,

        crate::api::schedule::get_week_schedule,
        crate::api::schedule::put_week_schedule
    ),
    components(
        schemas(
            Employee,
            Availability,
            DayAvailability,
            WeekAvailability,
            EmployeeAvailability,
            EmployeesWeekAvailability,
            ShiftTemplate,
            DayTemplate,
            Timetable,
            ShiftAssignment,
            DaySchedule,
            WeekSchedule,
            PublishScheduleRequest,
            TimetableView,
            WeekTimetableView,
            WeekId,
            WeekRef,
            Violation,
            ViolationKind
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Availability", description = "Per-employee availability APIs"),
        (name = "Timetable", description = "Recurring timetable APIs"),
        (name = "Schedule", description = "Week schedule reconciliation APIs"),
    )
)]
pub struct ApiDoc;
