use actix_web::{HttpResponse, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use derive_more::Display;
use serde_json::json;

use crate::calendar::WeekId;
use crate::schedule::validator::Violation;

/// Domain error taxonomy. Everything a handler can surface maps onto one of
/// these; `Transient` is the only retryable kind.
#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "invalid time window: from {} must be before to {}", from, to)]
    InvalidWindow { from: NaiveTime, to: NaiveTime },

    #[display(fmt = "malformed week: {}", reason)]
    MalformedWeek { reason: String },

    #[display(fmt = "date {} does not belong to week {}", date, week)]
    DateNotInWeek { date: NaiveDate, week: WeekId },

    #[display(fmt = "invalid timetable: {}", reason)]
    InvalidTimetable { reason: String },

    #[display(fmt = "bad request: {}", reason)]
    BadRequest { reason: String },

    #[display(fmt = "schedule rejected with {} violation(s)", "violations.len()")]
    Rejected { violations: Vec<Violation> },

    #[display(fmt = "{} not found", what)]
    NotFound { what: String },

    #[display(fmt = "{} already exists", what)]
    Conflict { what: String },

    #[display(fmt = "offset {} out of range for {} week(s)", offset, len)]
    OutOfRange { offset: i64, len: usize },

    #[display(fmt = "transient failure: {}", reason)]
    Transient { reason: String },
}

impl Error {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Error::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }

    pub fn transient(reason: impl Into<String>) -> Self {
        Error::Transient {
            reason: reason.into(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::InvalidWindow { .. } => "invalid_window",
            Error::MalformedWeek { .. } => "malformed_week",
            Error::DateNotInWeek { .. } => "date_not_in_week",
            Error::InvalidTimetable { .. } => "invalid_timetable",
            Error::BadRequest { .. } => "bad_request",
            Error::Rejected { .. } => "rejected",
            Error::NotFound { .. } => "not_found",
            Error::Conflict { .. } => "conflict",
            Error::OutOfRange { .. } => "out_of_range",
            Error::Transient { .. } => "transient",
        }
    }
}

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidWindow { .. }
            | Error::MalformedWeek { .. }
            | Error::DateNotInWeek { .. }
            | Error::InvalidTimetable { .. }
            | Error::BadRequest { .. }
            | Error::OutOfRange { .. } => StatusCode::BAD_REQUEST,
            Error::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Transient { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let Error::Rejected { violations } = self {
            body["violations"] = serde_json::to_value(violations).unwrap_or_default();
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
