use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::calendar::{self, WeekId};
use crate::error::Error;
use crate::model::availability::{EmployeeAvailability, WeekAvailability};
use crate::model::employee::Employee;
use crate::store::{Bucket, storage_err};

const EMPLOYEES: &str = "employees";
const AVAILABILITY: &str = "availability";

/// Employee directory plus the per-employee availability documents, both
/// keyed by email. Deleting an employee purges the availability document in
/// the same operation.
#[derive(Clone)]
pub struct EmployeeStore {
    bucket: Bucket,
    horizon_months: u32,
}

impl EmployeeStore {
    pub fn new(bucket: Bucket, horizon_months: u32) -> Self {
        EmployeeStore {
            bucket,
            horizon_months,
        }
    }

    /// Create the employee and seed a fully available horizon for them.
    /// A second create for the same email is a conflict.
    pub async fn create(&self, employee: &Employee) -> Result<(), Error> {
        let created = self
            .bucket
            .insert(EMPLOYEES, &employee.email, employee)
            .await
            .map_err(storage_err)?;
        if !created {
            return Err(Error::Conflict {
                what: format!("employee {}", employee.email),
            });
        }

        let seeded = self.seed_availability(Local::now().date_naive());
        self.bucket
            .upsert(AVAILABILITY, &employee.email, &seeded)
            .await
            .map_err(storage_err)?;

        debug!(email = %employee.email, weeks = seeded.weeks.len(), "employee created");
        Ok(())
    }

    fn seed_availability(&self, today: NaiveDate) -> EmployeeAvailability {
        let weeks = calendar::weeks_from(today, self.horizon_months)
            .into_iter()
            .map(|week| (week.id, WeekAvailability::all_available(week.id)))
            .collect();
        EmployeeAvailability { weeks }
    }

    pub async fn get(&self, email: &str) -> Result<Option<Employee>, Error> {
        self.bucket.get(EMPLOYEES, email).await.map_err(storage_err)
    }

    /// All employees, ordered by email.
    pub async fn all(&self) -> Result<Vec<Employee>, Error> {
        let docs = self
            .bucket
            .all::<Employee>(EMPLOYEES)
            .await
            .map_err(storage_err)?;
        Ok(docs.into_iter().map(|(_, e)| e).collect())
    }

    /// Remove the employee and their availability. `false` when the email was
    /// unknown. Published schedules are left as they are; a stale reference
    /// shows up as an unknown employee on the next reconciliation.
    pub async fn delete(&self, email: &str) -> Result<bool, Error> {
        let removed = self
            .bucket
            .remove(EMPLOYEES, email)
            .await
            .map_err(storage_err)?;
        self.bucket
            .remove(AVAILABILITY, email)
            .await
            .map_err(storage_err)?;
        Ok(removed)
    }

    pub async fn availability(&self, email: &str) -> Result<Option<EmployeeAvailability>, Error> {
        self.bucket
            .get(AVAILABILITY, email)
            .await
            .map_err(storage_err)
    }

    pub async fn week_availability(
        &self,
        email: &str,
        week: WeekId,
    ) -> Result<Option<WeekAvailability>, Error> {
        let Some(availability) = self.availability(email).await? else {
            return Ok(None);
        };
        Ok(availability.weeks.get(&week).cloned())
    }

    /// Replace one week of the employee's availability document.
    pub async fn put_week_availability(
        &self,
        email: &str,
        week: WeekId,
        updated: WeekAvailability,
    ) -> Result<(), Error> {
        let mut availability = self
            .availability(email)
            .await?
            .ok_or_else(|| Error::not_found(format!("employee {email}")))?;
        availability.weeks.insert(week, updated);
        self.bucket
            .upsert(AVAILABILITY, email, &availability)
            .await
            .map_err(storage_err)
    }

    /// Availability of every employee for one week, keyed by email. Employees
    /// whose document does not cover the week are skipped.
    pub async fn all_for_week(
        &self,
        week: WeekId,
    ) -> Result<BTreeMap<String, WeekAvailability>, Error> {
        let employees = self.all().await?;
        let lookups = employees
            .iter()
            .map(|e| self.week_availability(&e.email, week));

        let mut by_employee = BTreeMap::new();
        for (employee, result) in employees.iter().zip(join_all(lookups).await) {
            match result? {
                Some(week_availability) => {
                    by_employee.insert(employee.email.clone(), week_availability);
                }
                None => {
                    warn!(email = %employee.email, %week, "no availability for week");
                }
            }
        }
        Ok(by_employee)
    }
}
