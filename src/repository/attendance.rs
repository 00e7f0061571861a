//! Attendance records repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::attendance::AttendanceRecord};

use super::RecordStore;

const UPSERT_SQL: &str = r#"
    INSERT INTO attendance_records (student_id, record_date, breakfast, lunch, dinner, overnight, note)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (student_id, record_date) DO UPDATE SET
        breakfast = EXCLUDED.breakfast,
        lunch = EXCLUDED.lunch,
        dinner = EXCLUDED.dinner,
        overnight = EXCLUDED.overnight,
        note = EXCLUDED.note,
        updated_at = CURRENT_TIMESTAMP
"#;

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: Pool<Postgres>,
}

impl AttendanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn upsert_query(record: &AttendanceRecord) -> sqlx::query::Query<'_, Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(UPSERT_SQL)
            .bind(&record.student_id)
            .bind(record.record_date)
            .bind(record.breakfast)
            .bind(record.lunch)
            .bind(record.dinner)
            .bind(record.overnight)
            .bind(&record.note)
    }
}

#[async_trait]
impl RecordStore for AttendanceRepository {
    async fn query_range(
        &self,
        student_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT student_id, record_date, breakfast, lunch, dinner, overnight,
                   COALESCE(note, '') AS note
            FROM attendance_records
            WHERE student_id = $1 AND record_date >= $2 AND record_date <= $3
            ORDER BY record_date ASC
            "#,
        )
        .bind(student_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn upsert(&self, record: &AttendanceRecord) -> AppResult<()> {
        Self::upsert_query(record).execute(&self.pool).await?;
        Ok(())
    }

    /// All records land in one transaction; a failure rolls the batch back
    async fn upsert_batch(&self, records: &[AttendanceRecord]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let total = records.len();

        for (i, record) in records.iter().enumerate() {
            if let Err(e) = Self::upsert_query(record).execute(&mut *tx).await {
                tracing::error!(
                    student_id = %record.student_id,
                    date = %record.record_date,
                    "Upsert of record {} of {} failed, rolling back: {}",
                    i + 1,
                    total,
                    e
                );
                return Err(e.into());
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
