use crate::calendar::WeekId;
use crate::error::Error;
use crate::model::schedule::WeekSchedule;
use crate::model::timetable::Timetable;
use crate::store::{Bucket, storage_err};

const CONFIGS: &str = "business-configs";
const SCHEDULES: &str = "business-schedule";

const DEFAULT_TIMETABLE_KEY: &str = "default-timetable";

/// Business-owned documents: the default timetable and the published week
/// schedules, the latter keyed by week id and always replaced wholesale.
#[derive(Clone)]
pub struct BusinessStore {
    bucket: Bucket,
}

impl BusinessStore {
    pub fn new(bucket: Bucket) -> Self {
        BusinessStore { bucket }
    }

    pub async fn default_timetable(&self) -> Result<Option<Timetable>, Error> {
        self.bucket
            .get(CONFIGS, DEFAULT_TIMETABLE_KEY)
            .await
            .map_err(storage_err)
    }

    /// Replace the default timetable. Callers validate first; already
    /// published weeks keep the template they were published under.
    pub async fn set_default_timetable(&self, timetable: &Timetable) -> Result<(), Error> {
        self.bucket
            .upsert(CONFIGS, DEFAULT_TIMETABLE_KEY, timetable)
            .await
            .map_err(storage_err)
    }

    pub async fn schedule_for_week(&self, week: WeekId) -> Result<Option<WeekSchedule>, Error> {
        self.bucket
            .get(SCHEDULES, &week.to_string())
            .await
            .map_err(storage_err)
    }

    pub async fn put_schedule_for_week(
        &self,
        week: WeekId,
        schedule: &WeekSchedule,
    ) -> Result<(), Error> {
        self.bucket
            .upsert(SCHEDULES, &week.to_string(), schedule)
            .await
            .map_err(storage_err)
    }
}
