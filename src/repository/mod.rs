//! Repository layer for database operations

pub mod attendance;
#[cfg(test)]
pub mod memory;
pub mod users;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::attendance::AttendanceRecord};

/// Persistence contract for attendance records, keyed by (student_id, date)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records of `student_id` with `start <= date <= end`, in any order
    async fn query_range(
        &self,
        student_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>>;

    /// Insert the record, or overwrite every non-key field of the existing one
    async fn upsert(&self, record: &AttendanceRecord) -> AppResult<()>;

    /// Upsert records in order, stopping at the first failure
    async fn upsert_batch(&self, records: &[AttendanceRecord]) -> AppResult<()> {
        let total = records.len();
        for (i, record) in records.iter().enumerate() {
            if let Err(e) = self.upsert(record).await {
                tracing::error!(
                    student_id = %record.student_id,
                    date = %record.record_date,
                    "Upsert of record {} of {} failed: {}",
                    i + 1,
                    total,
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub attendance: attendance::AttendanceRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            attendance: attendance::AttendanceRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
