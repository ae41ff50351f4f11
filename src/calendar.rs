use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday as ChronoWeekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use strum_macros::{Display, EnumIter};
use utoipa::ToSchema;

use crate::error::Error;

/// Weekday of the business week, Monday first.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 0 for Monday through 6 for Sunday.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            ChronoWeekday::Mon => Weekday::Monday,
            ChronoWeekday::Tue => Weekday::Tuesday,
            ChronoWeekday::Wed => Weekday::Wednesday,
            ChronoWeekday::Thu => Weekday::Thursday,
            ChronoWeekday::Fri => Weekday::Friday,
            ChronoWeekday::Sat => Weekday::Saturday,
            ChronoWeekday::Sun => Weekday::Sunday,
        }
    }
}

/// Identifier of a business week: the ISO date of its Monday, e.g.
/// `2026-08-31`. Sortable as a plain string and invertible back to the
/// Monday date, which is what the schedule and availability documents are
/// keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema)]
#[schema(value_type = String, example = "2026-08-31")]
pub struct WeekId(NaiveDate);

impl WeekId {
    /// The week containing `date`, i.e. the Monday on or before it. The
    /// representable calendar starts mid-week, so its first few days map
    /// forward to the first full week instead.
    pub fn for_date(date: NaiveDate) -> Self {
        let back = date.weekday().num_days_from_monday() as u64;
        match date.checked_sub_days(Days::new(back)) {
            Some(monday) => WeekId(monday),
            None => WeekId(date + Days::new(7 - back)),
        }
    }

    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    /// Human label shown in the week picker, `Week <iso week number>`.
    pub fn label(&self) -> String {
        format!("Week {}", self.0.iso_week().week())
    }

    pub fn date_of(&self, day: Weekday) -> NaiveDate {
        self.0
            .checked_add_days(Days::new(day.index() as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.0
            && self
                .0
                .checked_add_days(Days::new(7))
                .is_none_or(|end| date < end)
    }

    /// The following week, `None` past the end of the representable calendar.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(7)).map(WeekId)
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for WeekId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::bad_request(format!("invalid week date {s:?}: {e}")))?;
        if date.weekday() != ChronoWeekday::Mon {
            return Err(Error::bad_request(format!(
                "week identifier {s} is not a Monday"
            )));
        }
        if date.checked_add_days(Days::new(6)).is_none() {
            return Err(Error::bad_request(format!(
                "week {s} runs past the end of the supported calendar"
            )));
        }
        Ok(WeekId(date))
    }
}

impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One entry of the browsable week horizon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeekRef {
    #[schema(example = "2026-08-31")]
    pub id: WeekId,
    #[schema(example = "2026-08-31", value_type = String, format = "date")]
    pub monday: NaiveDate,
    #[serde(rename = "weekStr")]
    #[schema(example = "Week 36")]
    pub label: String,
}

/// All weeks from the Monday on or before `start` through
/// `start + horizon_months`, the partial final week included. Consecutive,
/// Monday-aligned and strictly increasing by seven days.
pub fn weeks_from(start: NaiveDate, horizon_months: u32) -> Vec<WeekRef> {
    let end = start
        .checked_add_months(Months::new(horizon_months))
        .unwrap_or(NaiveDate::MAX);

    let mut weeks = Vec::new();
    let mut week = WeekId::for_date(start);
    while week.monday() <= end {
        weeks.push(WeekRef {
            id: week,
            monday: week.monday(),
            label: week.label(),
        });
        // The walk stops at the end of the representable calendar.
        match week.next() {
            Some(next) => week = next,
            None => break,
        }
    }
    weeks
}

/// Contiguous page of the week sequence. The tail page may be shorter than
/// `count`; an offset outside the sequence is an error.
pub fn page<T>(weeks: &[T], offset: i64, count: usize) -> Result<&[T], Error> {
    if offset < 0 || offset as usize >= weeks.len() {
        return Err(Error::OutOfRange {
            offset,
            len: weeks.len(),
        });
    }
    let from = offset as usize;
    let to = (from + count).min(weeks.len());
    Ok(&weeks[from..to])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_id_snaps_to_monday() {
        // 2026-08-27 is a Thursday
        let id = WeekId::for_date(date(2026, 8, 27));
        assert_eq!(id.monday(), date(2026, 8, 24));
        // A Monday maps to itself
        assert_eq!(WeekId::for_date(date(2026, 8, 24)), id);
    }

    #[test]
    fn week_id_round_trips_through_string() {
        for week in weeks_from(date(2026, 1, 15), 12) {
            let parsed: WeekId = week.id.to_string().parse().unwrap();
            assert_eq!(parsed, week.id);
            assert_eq!(parsed.monday(), week.monday);
        }
    }

    #[test]
    fn week_id_rejects_non_monday() {
        assert!("2026-08-27".parse::<WeekId>().is_err());
        assert!("not-a-date".parse::<WeekId>().is_err());
    }

    #[test]
    fn horizon_is_monday_aligned_and_consecutive() {
        let weeks = weeks_from(date(2026, 8, 27), 12);
        assert!(weeks.len() >= 52);
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].monday, pair[0].monday + Days::new(7));
        }
        for week in &weeks {
            assert_eq!(week.monday.weekday(), ChronoWeekday::Mon);
        }
        // Partial final week is included
        let last = weeks.last().unwrap();
        assert!(last.monday <= date(2027, 8, 27));
        assert!(last.monday + Days::new(7) > date(2027, 8, 27));
    }

    #[test]
    fn horizon_near_the_calendar_edge_stops_instead_of_overflowing() {
        let start = NaiveDate::from_ymd_opt(262142, 1, 1).unwrap();
        let weeks = weeks_from(start, 12);
        assert!(!weeks.is_empty());
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].monday, pair[0].monday + Days::new(7));
        }
        for week in &weeks {
            assert_eq!(week.monday.weekday(), ChronoWeekday::Mon);
        }
        // The last representable week has no successor.
        assert!(weeks.last().unwrap().id.next().is_none());
    }

    #[test]
    fn first_days_of_the_calendar_map_forward_to_a_full_week() {
        let id = WeekId::for_date(NaiveDate::MIN);
        assert_eq!(id.monday().weekday(), ChronoWeekday::Mon);
        assert!(id.monday() >= NaiveDate::MIN);
    }

    #[test]
    fn dates_of_week_cover_all_seven_days() {
        let id = WeekId::for_date(date(2026, 8, 24));
        assert_eq!(id.date_of(Weekday::Monday), date(2026, 8, 24));
        assert_eq!(id.date_of(Weekday::Sunday), date(2026, 8, 30));
        assert!(id.contains(date(2026, 8, 30)));
        assert!(!id.contains(date(2026, 8, 31)));
    }

    #[test]
    fn paging_clamps_the_tail_and_rejects_bad_offsets() {
        let weeks: Vec<u32> = (0..10).collect();
        assert_eq!(page(&weeks, 0, 4).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(page(&weeks, 8, 4).unwrap(), &[8, 9]);
        assert!(matches!(
            page(&weeks, -1, 4),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            page(&weeks, 10, 4),
            Err(Error::OutOfRange { .. })
        ));
    }
}
