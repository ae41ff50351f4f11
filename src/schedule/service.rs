use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::calendar::WeekId;
use crate::error::Error;
use crate::model::availability::{Availability, WeekAvailability};
use crate::model::schedule::WeekSchedule;
use crate::schedule::{availability as reconciler, validator};
use crate::store::business::BusinessStore;
use crate::store::employees::EmployeeStore;
use crate::utils::locks::KeyedLocks;

/// Orchestrates schedule publication and availability edits. A week is either
/// replaced wholesale after a clean validation pass or left exactly as it
/// was; there is no partially published state to observe.
pub struct Scheduler {
    employees: EmployeeStore,
    business: BusinessStore,
    schedule_locks: KeyedLocks,
    availability_locks: KeyedLocks,
    op_timeout: Duration,
}

impl Scheduler {
    pub fn new(employees: EmployeeStore, business: BusinessStore, op_timeout: Duration) -> Self {
        Scheduler {
            employees,
            business,
            schedule_locks: KeyedLocks::new(),
            availability_locks: KeyedLocks::new(),
            op_timeout,
        }
    }

    /// Validate a proposed week against the current timetable and the current
    /// availability, and publish it only if no violation remains. Proposals
    /// for the same week are serialized; a loser re-validates against the
    /// winner's published state on its own turn.
    pub async fn reconcile_week(
        &self,
        week: WeekId,
        proposal: WeekSchedule,
    ) -> Result<WeekSchedule, Error> {
        timeout(self.op_timeout, async {
            let _guard = self.schedule_locks.acquire(week.to_string()).await;
            self.reconcile_locked(week, proposal).await
        })
        .await
        .unwrap_or_else(|_| Err(Error::transient(format!("reconciliation of {week} timed out"))))
    }

    async fn reconcile_locked(
        &self,
        week: WeekId,
        proposal: WeekSchedule,
    ) -> Result<WeekSchedule, Error> {
        let timetable = self
            .business
            .default_timetable()
            .await?
            .ok_or_else(|| Error::not_found("default timetable"))?;

        let known: BTreeSet<String> = self
            .employees
            .all()
            .await?
            .into_iter()
            .map(|e| e.email)
            .collect();

        let assigned = proposal.assigned_employees();
        let lookups = assigned
            .iter()
            .filter(|email| known.contains(*email))
            .map(|email| async move {
                let week_availability = self.employees.week_availability(email, week).await?;
                Ok::<_, Error>((email.clone(), week_availability))
            });

        let mut availability = std::collections::BTreeMap::new();
        for result in join_all(lookups).await {
            let (email, week_availability) = result?;
            if let Some(week_availability) = week_availability {
                availability.insert(email, week_availability);
            }
        }

        let violations =
            validator::validate_week(&timetable, &proposal, week, &availability, &known)?;
        if !violations.is_empty() {
            info!(%week, count = violations.len(), "proposal rejected");
            return Err(Error::Rejected { violations });
        }

        self.business.put_schedule_for_week(week, &proposal).await?;
        info!(%week, employees = assigned.len(), "schedule published");
        Ok(proposal)
    }

    /// Replace one day of one employee's availability for one week. Edits to
    /// the same employee and week are serialized so concurrent single-day
    /// updates cannot lose each other.
    pub async fn update_availability(
        &self,
        email: &str,
        week: WeekId,
        date: NaiveDate,
        state: Availability,
    ) -> Result<WeekAvailability, Error> {
        timeout(self.op_timeout, async {
            let _guard = self
                .availability_locks
                .acquire(format!("{email}/{week}"))
                .await;
            self.update_availability_locked(email, week, date, state)
                .await
        })
        .await
        .unwrap_or_else(|_| {
            Err(Error::transient(format!(
                "availability update for {email} timed out"
            )))
        })
    }

    async fn update_availability_locked(
        &self,
        email: &str,
        week: WeekId,
        date: NaiveDate,
        state: Availability,
    ) -> Result<WeekAvailability, Error> {
        let current = self
            .employees
            .week_availability(email, week)
            .await?
            .ok_or_else(|| Error::not_found(format!("availability of {email} for week {week}")))?;

        let updated = reconciler::merge_update(&current, date, state)?;
        self.employees
            .put_week_availability(email, week, updated.clone())
            .await?;

        debug!(%email, %week, %date, "availability day updated");
        Ok(updated)
    }
}
