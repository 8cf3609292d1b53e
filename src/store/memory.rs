//! In-memory [`AttendanceStore`] used by the session and handler tests.
//! Mirrors the merge semantics of the MySQL implementation and can be told
//! to fail writes so retry contracts can be exercised.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::StoreError;
use crate::model::attendance::DailyRecord;
use crate::store::AttendanceStore;

#[derive(Default)]
pub struct MemoryAttendanceStore {
    days: Mutex<HashMap<NaiveDate, DailyRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(date: NaiveDate, record: DailyRecord) -> Self {
        let store = Self::default();
        store.days.lock().unwrap().insert(date, record);
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn saved(&self, date: NaiveDate) -> Option<DailyRecord> {
        self.days.lock().unwrap().get(&date).cloned()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn get_by_date(&self, date: NaiveDate) -> Result<DailyRecord, StoreError> {
        Ok(self
            .days
            .lock()
            .unwrap()
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_by_date(&self, date: NaiveDate, record: &DailyRecord) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }

        let mut days = self.days.lock().unwrap();
        days.entry(date)
            .or_default()
            .extend(record.iter().map(|(id, status)| (*id, *status)));
        Ok(())
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<NaiveDate, DailyRecord>, StoreError> {
        Ok(self
            .days
            .lock()
            .unwrap()
            .iter()
            .filter(|(date, _)| **date >= start && **date <= end)
            .map(|(date, record)| (*date, record.clone()))
            .collect())
    }
}
