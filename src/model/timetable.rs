use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::Weekday;
use crate::model::timefmt;

/// One recurring shift of the default timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({ "from": "08:00", "to": "16:00", "requiredEmployees": 2 })
)]
pub struct ShiftTemplate {
    #[serde(with = "timefmt")]
    #[schema(example = "08:00", value_type = String)]
    pub from: NaiveTime,
    #[serde(with = "timefmt")]
    #[schema(example = "16:00", value_type = String)]
    pub to: NaiveTime,
    #[schema(example = 2, minimum = 1)]
    pub required_employees: u32,
}

impl ShiftTemplate {
    /// Two shifts conflict when their half-open windows intersect.
    pub fn overlaps(&self, other: &ShiftTemplate) -> bool {
        self.from.max(other.from) < self.to.min(other.to)
    }
}

/// The shifts of one weekday, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayTemplate {
    pub shifts: Vec<ShiftTemplate>,
}

/// The recurring shape of the business week. Applies to every week of the
/// horizon; changing it never rewrites already published schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Timetable {
    pub monday: DayTemplate,
    pub tuesday: DayTemplate,
    pub wednesday: DayTemplate,
    pub thursday: DayTemplate,
    pub friday: DayTemplate,
    pub saturday: DayTemplate,
    pub sunday: DayTemplate,
}

impl Timetable {
    pub fn day(&self, day: Weekday) -> &DayTemplate {
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
}
