//! In-memory record store for tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::RecordStore;
use crate::{error::AppResult, models::attendance::AttendanceRecord};

/// Record store keeping rows in memory, keyed like the real table
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<(String, NaiveDate), AttendanceRecord>>,
}

impl MemoryStore {
    pub fn with(records: Vec<AttendanceRecord>) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for r in records {
                rows.insert((r.student_id.clone(), r.record_date), r);
            }
        }
        store
    }

    pub fn snapshot(&self) -> BTreeMap<(String, NaiveDate), AttendanceRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query_range(
        &self,
        student_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.student_id == student_id && r.record_date >= start && r.record_date <= end)
            // Reverse to make sure callers do not rely on store ordering
            .rev()
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: &AttendanceRecord) -> AppResult<()> {
        self.rows
            .lock()
            .unwrap()
            .insert((record.student_id.clone(), record.record_date), record.clone());
        Ok(())
    }
}
