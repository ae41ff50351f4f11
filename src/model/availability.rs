use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::{WeekId, Weekday};
use crate::model::timefmt;

/// Whether an employee can work on a given day. `Partial` always carries its
/// window, so "partial without times" cannot be represented at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "availability", rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
    Partial {
        #[serde(with = "timefmt")]
        from: NaiveTime,
        #[serde(with = "timefmt")]
        to: NaiveTime,
    },
}

/// Availability of one employee on one concrete calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "date": "2026-08-31",
        "availability": "partial",
        "from": "09:00",
        "to": "17:00"
    })
)]
pub struct DayAvailability {
    #[schema(example = "2026-08-31", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub availability: Availability,
}

/// One employee's availability for one week: exactly seven days, Monday
/// through Sunday, each carrying its concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekAvailability {
    pub week: WeekId,
    pub monday: DayAvailability,
    pub tuesday: DayAvailability,
    pub wednesday: DayAvailability,
    pub thursday: DayAvailability,
    pub friday: DayAvailability,
    pub saturday: DayAvailability,
    pub sunday: DayAvailability,
}

impl WeekAvailability {
    /// A fully available week for the given week id, the state a freshly
    /// created employee starts from.
    pub fn all_available(week: WeekId) -> Self {
        let day = |d: Weekday| DayAvailability {
            date: week.date_of(d),
            availability: Availability::Available,
        };
        WeekAvailability {
            week,
            monday: day(Weekday::Monday),
            tuesday: day(Weekday::Tuesday),
            wednesday: day(Weekday::Wednesday),
            thursday: day(Weekday::Thursday),
            friday: day(Weekday::Friday),
            saturday: day(Weekday::Saturday),
            sunday: day(Weekday::Sunday),
        }
    }

    pub fn day(&self, day: Weekday) -> &DayAvailability {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayAvailability {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }
}

/// Availability document for one employee across the whole horizon, keyed by
/// week. Stored under the employee's email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmployeeAvailability {
    #[schema(value_type = Object)]
    pub weeks: BTreeMap<WeekId, WeekAvailability>,
}
