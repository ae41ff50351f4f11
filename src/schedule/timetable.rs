use strum::IntoEnumIterator;

use crate::calendar::Weekday;
use crate::error::Error;
use crate::model::timetable::Timetable;

/// A timetable is acceptable as the default when every shift runs forward in
/// time, asks for at least one employee, and no two shifts of the same day
/// overlap.
pub fn validate_timetable(timetable: &Timetable) -> Result<(), Error> {
    for day in Weekday::iter() {
        let shifts = &timetable.day(day).shifts;

        for (i, shift) in shifts.iter().enumerate() {
            if shift.from >= shift.to {
                return Err(Error::InvalidTimetable {
                    reason: format!(
                        "{day}: shift {i} window {}..{} runs backwards",
                        shift.from.format("%H:%M"),
                        shift.to.format("%H:%M")
                    ),
                });
            }
            if shift.required_employees < 1 {
                return Err(Error::InvalidTimetable {
                    reason: format!("{day}: shift {i} requires no employees"),
                });
            }
            for (j, earlier) in shifts.iter().enumerate().take(i) {
                if shift.overlaps(earlier) {
                    return Err(Error::InvalidTimetable {
                        reason: format!("{day}: shifts {j} and {i} overlap"),
                    });
                }
            }
        }
    }
    Ok(())
}
