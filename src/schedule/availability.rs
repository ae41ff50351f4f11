use chrono::Days;
use strum::IntoEnumIterator;

use crate::calendar::Weekday;
use crate::error::Error;
use crate::model::availability::{Availability, DayAvailability, WeekAvailability};

/// A day entry is well formed when a partial window runs forward in time.
/// Whole-day states carry nothing to check.
pub fn validate_day(day: &DayAvailability) -> Result<(), Error> {
    if let Availability::Partial { from, to } = day.availability {
        if from >= to {
            return Err(Error::InvalidWindow { from, to });
        }
    }
    Ok(())
}

/// A week entry must hold seven valid days with consecutive dates starting on
/// the Monday named by its week id.
pub fn validate_week(week: &WeekAvailability) -> Result<(), Error> {
    for day in Weekday::iter() {
        let entry = week.day(day);
        validate_day(entry)?;

        let expected = week.week.monday() + Days::new(day.index() as u64);
        if entry.date != expected {
            return Err(Error::MalformedWeek {
                reason: format!(
                    "{} should fall on {} but carries {}",
                    day, expected, entry.date
                ),
            });
        }
    }
    Ok(())
}

/// Replace the single day of `week` matching `date`. The rest of the week is
/// untouched, so applying the same update twice is a no-op the second time.
pub fn merge_update(
    week: &WeekAvailability,
    date: chrono::NaiveDate,
    availability: Availability,
) -> Result<WeekAvailability, Error> {
    let updated_day = DayAvailability { date, availability };
    validate_day(&updated_day)?;

    if !week.week.contains(date) {
        return Err(Error::DateNotInWeek {
            date,
            week: week.week,
        });
    }

    let mut updated = week.clone();
    *updated.day_mut(Weekday::of(date)) = updated_day;
    Ok(updated)
}
