use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::Weekday;
use crate::model::timefmt;

/// Employees placed on one shift slot. The employee set deduplicates on the
/// way in, so the same person can never hold one slot twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "from": "08:00",
        "to": "16:00",
        "employees": ["alice@example.com"]
    })
)]
pub struct ShiftAssignment {
    #[serde(with = "timefmt")]
    #[schema(example = "08:00", value_type = String)]
    pub from: NaiveTime,
    #[serde(with = "timefmt")]
    #[schema(example = "16:00", value_type = String)]
    pub to: NaiveTime,
    #[schema(value_type = Vec<String>)]
    pub employees: BTreeSet<String>,
}

/// Assignments for one day, index-aligned with the day's template: slot `i`
/// answers to shift `i` of the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub shifts: Vec<ShiftAssignment>,
}

/// The resolved schedule of one week, stored wholesale under its week id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeekSchedule {
    pub fn day(&self, day: Weekday) -> &DaySchedule {
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

    /// Every employee referenced anywhere in the week, deduplicated.
    pub fn assigned_employees(&self) -> BTreeSet<String> {
        use strum::IntoEnumIterator;

        let mut all = BTreeSet::new();
        for day in Weekday::iter() {
            for shift in &self.day(day).shifts {
                all.extend(shift.employees.iter().cloned());
            }
        }
        all
    }
}
