use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::calendar::{WeekId, Weekday};
use crate::error::Error;
use crate::model::availability::{Availability, WeekAvailability};
use crate::model::schedule::{DaySchedule, WeekSchedule};
use crate::model::timetable::{DayTemplate, Timetable};

/// One reason a proposed schedule cannot be published. Violations are data,
/// not errors: the caller (a human editor or the suggestion engine) is
/// expected to revise the proposal and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    #[schema(example = "2026-08-31", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// More employees on a slot than the template asks for. Understaffing is
    /// deliberately not flagged; the business may publish a thin week.
    OverCapacity {
        slot: usize,
        assigned: usize,
        required: usize,
    },
    /// The same employee sits on two slots whose windows intersect.
    DoubleBooked {
        employee: String,
        first_slot: usize,
        second_slot: usize,
    },
    /// The employee's availability for that date does not cover the slot.
    NotAvailable { employee: String, slot: usize },
    /// The assigned identity matches no employee on record.
    UnknownEmployee { employee: String, slot: usize },
}

impl Availability {
    /// Whether this state covers the half-open window `[from, to)`.
    fn permits(&self, from: chrono::NaiveTime, to: chrono::NaiveTime) -> bool {
        match self {
            Availability::Available => true,
            Availability::Unavailable => false,
            Availability::Partial {
                from: own_from,
                to: own_to,
            } => *own_from <= from && to <= *own_to,
        }
    }
}

/// Check one proposed day against its template. Every check runs, so one pass
/// reports every violation; the result is ordered by slot, then by violation
/// kind, then by employee, which keeps repeated runs diffable.
///
/// A proposal whose slots do not line up with the template at all (wrong
/// count, or shift windows that differ from the template's) is malformed
/// input rather than a constraint violation and fails fast.
pub fn validate_day(
    template: &DayTemplate,
    proposed: &DaySchedule,
    date: NaiveDate,
    availability: &BTreeMap<String, Availability>,
    known_employees: &BTreeSet<String>,
) -> Result<Vec<Violation>, Error> {
    if proposed.shifts.len() != template.shifts.len() {
        return Err(Error::bad_request(format!(
            "{date}: proposal has {} slot(s), template has {}",
            proposed.shifts.len(),
            template.shifts.len()
        )));
    }

    for (i, (slot, tpl)) in proposed.shifts.iter().zip(&template.shifts).enumerate() {
        if slot.from != tpl.from || slot.to != tpl.to {
            return Err(Error::bad_request(format!(
                "{date}: slot {i} window {}..{} does not match template {}..{}",
                slot.from.format("%H:%M"),
                slot.to.format("%H:%M"),
                tpl.from.format("%H:%M"),
                tpl.to.format("%H:%M")
            )));
        }
    }

    let mut violations = Vec::new();

    for (i, (slot, tpl)) in proposed.shifts.iter().zip(&template.shifts).enumerate() {
        let mut double_booked = Vec::new();
        let mut not_available = Vec::new();
        let mut unknown = Vec::new();

        if slot.employees.len() > tpl.required_employees as usize {
            violations.push(Violation {
                date,
                kind: ViolationKind::OverCapacity {
                    slot: i,
                    assigned: slot.employees.len(),
                    required: tpl.required_employees as usize,
                },
            });
        }

        for employee in &slot.employees {
            if !known_employees.contains(employee) {
                unknown.push(Violation {
                    date,
                    kind: ViolationKind::UnknownEmployee {
                        employee: employee.clone(),
                        slot: i,
                    },
                });
                continue;
            }

            for (j, earlier) in template.shifts.iter().enumerate().take(i) {
                let also_there = proposed.shifts[j].employees.contains(employee);
                if also_there && tpl.overlaps(earlier) {
                    double_booked.push(Violation {
                        date,
                        kind: ViolationKind::DoubleBooked {
                            employee: employee.clone(),
                            first_slot: j,
                            second_slot: i,
                        },
                    });
                }
            }

            let permitted = availability
                .get(employee)
                .is_some_and(|a| a.permits(tpl.from, tpl.to));
            if !permitted {
                not_available.push(Violation {
                    date,
                    kind: ViolationKind::NotAvailable {
                        employee: employee.clone(),
                        slot: i,
                    },
                });
            }
        }

        violations.extend(double_booked);
        violations.extend(not_available);
        violations.extend(unknown);
    }

    Ok(violations)
}

/// Check a whole proposed week against the timetable and each assigned
/// employee's availability, day by day in Monday-to-Sunday order.
pub fn validate_week(
    timetable: &Timetable,
    proposed: &WeekSchedule,
    week: WeekId,
    availability: &BTreeMap<String, WeekAvailability>,
    known_employees: &BTreeSet<String>,
) -> Result<Vec<Violation>, Error> {
    let mut violations = Vec::new();

    for day in Weekday::iter() {
        let date = week.date_of(day);
        let by_employee: BTreeMap<String, Availability> = availability
            .iter()
            .map(|(email, week_ava)| (email.clone(), week_ava.day(day).availability.clone()))
            .collect();

        violations.extend(validate_day(
            timetable.day(day),
            proposed.day(day),
            date,
            &by_employee,
            known_employees,
        )?);
    }

    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::ShiftAssignment;
    use crate::model::timetable::ShiftTemplate;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    fn template(slots: &[((u32, u32), (u32, u32), u32)]) -> DayTemplate {
        DayTemplate {
            shifts: slots
                .iter()
                .map(|&(from, to, required)| ShiftTemplate {
                    from: time(from.0, from.1),
                    to: time(to.0, to.1),
                    required_employees: required,
                })
                .collect(),
        }
    }

    fn proposal(template: &DayTemplate, slots: &[&[&str]]) -> DaySchedule {
        DaySchedule {
            shifts: template
                .shifts
                .iter()
                .zip(slots)
                .map(|(tpl, employees)| ShiftAssignment {
                    from: tpl.from,
                    to: tpl.to,
                    employees: employees.iter().map(|e| e.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn known(emails: &[&str]) -> BTreeSet<String> {
        emails.iter().map(|e| e.to_string()).collect()
    }

    fn availability(entries: &[(&str, Availability)]) -> BTreeMap<String, Availability> {
        entries
            .iter()
            .map(|(email, a)| (email.to_string(), a.clone()))
            .collect()
    }

    #[test]
    fn covered_partial_window_is_accepted() {
        // Monday 08:00-16:00 x2; alice's partial window covers the whole
        // slot, bob is fully available.
        let tpl = template(&[((8, 0), (16, 0), 2)]);
        let ava = availability(&[
            (
                "alice@x.com",
                Availability::Partial {
                    from: time(8, 0),
                    to: time(17, 0),
                },
            ),
            ("bob@x.com", Availability::Available),
        ]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["alice@x.com", "bob@x.com"]]),
            date(),
            &ava,
            &known(&["alice@x.com", "bob@x.com"]),
        )
        .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn uncovered_partial_and_unavailable_are_flagged() {
        let tpl = template(&[((8, 0), (16, 0), 2)]);
        let ava = availability(&[
            (
                "alice@x.com",
                Availability::Partial {
                    from: time(9, 0),
                    to: time(17, 0),
                },
            ),
            ("bob@x.com", Availability::Unavailable),
        ]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["alice@x.com", "bob@x.com"]]),
            date(),
            &ava,
            &known(&["alice@x.com", "bob@x.com"]),
        )
        .unwrap();
        assert_eq!(
            violations
                .iter()
                .map(|v| v.kind.clone())
                .collect::<Vec<_>>(),
            vec![
                ViolationKind::NotAvailable {
                    employee: "alice@x.com".into(),
                    slot: 0,
                },
                ViolationKind::NotAvailable {
                    employee: "bob@x.com".into(),
                    slot: 0,
                },
            ]
        );
    }

    #[test]
    fn over_capacity_names_the_offending_slot_only() {
        let tpl = template(&[((8, 0), (16, 0), 2), ((16, 0), (22, 0), 1)]);
        let ava = availability(&[
            ("alice@x.com", Availability::Available),
            ("carol@x.com", Availability::Available),
            ("dave@x.com", Availability::Available),
        ]);
        let violations = validate_day(
            &tpl,
            &proposal(
                &tpl,
                &[&["alice@x.com", "carol@x.com", "dave@x.com"], &["alice@x.com"]],
            ),
            date(),
            &ava,
            &known(&["alice@x.com", "carol@x.com", "dave@x.com"]),
        )
        .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::OverCapacity {
                slot: 0,
                assigned: 3,
                required: 2,
            }
        );
    }

    #[test]
    fn unknown_employee_is_flagged_without_availability_noise() {
        let tpl = template(&[((8, 0), (16, 0), 2)]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["ghost@x.com"]]),
            date(),
            &availability(&[]),
            &known(&["alice@x.com"]),
        )
        .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownEmployee {
                employee: "ghost@x.com".into(),
                slot: 0,
            }
        );
    }

    #[test]
    fn known_employee_without_availability_is_not_available() {
        let tpl = template(&[((8, 0), (16, 0), 1)]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["alice@x.com"]]),
            date(),
            &availability(&[]),
            &known(&["alice@x.com"]),
        )
        .unwrap();
        assert_eq!(
            violations[0].kind,
            ViolationKind::NotAvailable {
                employee: "alice@x.com".into(),
                slot: 0,
            }
        );
    }

    #[test]
    fn double_booking_across_overlapping_slots_is_flagged() {
        let tpl = template(&[((8, 0), (16, 0), 1), ((15, 0), (22, 0), 1)]);
        let ava = availability(&[("alice@x.com", Availability::Available)]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["alice@x.com"], &["alice@x.com"]]),
            date(),
            &ava,
            &known(&["alice@x.com"]),
        )
        .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::DoubleBooked {
                employee: "alice@x.com".into(),
                first_slot: 0,
                second_slot: 1,
            }
        );
    }

    #[test]
    fn same_employee_on_disjoint_slots_is_fine() {
        let tpl = template(&[((8, 0), (12, 0), 1), ((12, 0), (16, 0), 1)]);
        let ava = availability(&[("alice@x.com", Availability::Available)]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["alice@x.com"], &["alice@x.com"]]),
            date(),
            &ava,
            &known(&["alice@x.com"]),
        )
        .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn slot_count_mismatch_is_malformed_input() {
        let tpl = template(&[((8, 0), (16, 0), 1)]);
        let result = validate_day(
            &tpl,
            &DaySchedule { shifts: vec![] },
            date(),
            &availability(&[]),
            &known(&[]),
        );
        assert!(matches!(result, Err(Error::BadRequest { .. })));
    }

    #[test]
    fn violations_come_out_in_slot_then_kind_order() {
        let tpl = template(&[((8, 0), (16, 0), 1), ((16, 0), (22, 0), 1)]);
        let ava = availability(&[("bob@x.com", Availability::Unavailable)]);
        let violations = validate_day(
            &tpl,
            &proposal(&tpl, &[&["bob@x.com", "ghost@x.com"], &["ghost@x.com"]]),
            date(),
            &ava,
            &known(&["bob@x.com"]),
        )
        .unwrap();
        // Slot 0: over capacity, then bob not available, then ghost unknown;
        // slot 1: ghost unknown again.
        assert!(matches!(
            violations[0].kind,
            ViolationKind::OverCapacity { slot: 0, .. }
        ));
        assert!(matches!(
            violations[1].kind,
            ViolationKind::NotAvailable { slot: 0, .. }
        ));
        assert!(matches!(
            violations[2].kind,
            ViolationKind::UnknownEmployee { slot: 0, .. }
        ));
        assert!(matches!(
            violations[3].kind,
            ViolationKind::UnknownEmployee { slot: 1, .. }
        ));
        assert_eq!(violations.len(), 4);
    }
}
