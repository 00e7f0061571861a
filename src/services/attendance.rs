//! Weekly attendance reconciliation
//!
//! Persisted records are sparse: a student only has rows for the dates they
//! (or an administrator) submitted. Reads always materialize a full week,
//! filling gaps with the default record; writes upsert all seven dates.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::attendance::{week_dates, week_end, AttendanceField, AttendanceRecord, WeekView},
    repository::RecordStore,
};

/// Submitted values for a week, looked up per field and date
pub trait WeekEdits: Send + Sync {
    /// Whether the checkbox `field` was checked for `date`
    fn has_flag(&self, field: AttendanceField, date: NaiveDate) -> bool;

    /// Note submitted for `date`, empty when absent
    fn get_note(&self, date: NaiveDate) -> String;
}

/// How a checked meal checkbox is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxSemantics {
    /// Checked means "will eat" (student submission)
    Attendance,
    /// Checked means "will skip" (admin bulk edit)
    Skip,
}

impl CheckboxSemantics {
    fn meal_value(self, checked: bool) -> bool {
        match self {
            CheckboxSemantics::Attendance => checked,
            CheckboxSemantics::Skip => !checked,
        }
    }
}

/// Build the seven records a submission stores. Overnight is never inverted.
fn build_week_records(
    student_id: &str,
    reference_date: NaiveDate,
    edits: &dyn WeekEdits,
    semantics: CheckboxSemantics,
) -> Vec<AttendanceRecord> {
    week_dates(reference_date)
        .map(|date| AttendanceRecord {
            student_id: student_id.to_string(),
            record_date: date,
            breakfast: semantics.meal_value(edits.has_flag(AttendanceField::Breakfast, date)),
            lunch: semantics.meal_value(edits.has_flag(AttendanceField::Lunch, date)),
            dinner: semantics.meal_value(edits.has_flag(AttendanceField::Dinner, date)),
            overnight: edits.has_flag(AttendanceField::Overnight, date),
            note: edits.get_note(date),
        })
        .collect()
}

/// Merge persisted rows into a full week, defaults filling the gaps
fn merge_week(
    student_id: &str,
    reference_date: NaiveDate,
    end: NaiveDate,
    persisted: Vec<AttendanceRecord>,
) -> WeekView {
    let mut by_date: HashMap<NaiveDate, AttendanceRecord> = persisted
        .into_iter()
        .map(|record| (record.record_date, record))
        .collect();

    let days = week_dates(reference_date)
        .map(|date| {
            by_date
                .remove(&date)
                .unwrap_or_else(|| AttendanceRecord::default_for(student_id, date))
        })
        .collect();

    WeekView {
        start: reference_date,
        end,
        days,
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn RecordStore>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Seven records for `[reference_date, reference_date + 6]`
    pub async fn fetch_week(&self, student_id: &str, reference_date: NaiveDate) -> AppResult<WeekView> {
        require_student_id(student_id)?;
        let end = require_full_week(reference_date)?;

        let persisted = self
            .store
            .query_range(student_id, reference_date, end)
            .await?;

        tracing::debug!(
            student_id,
            persisted = persisted.len(),
            "Fetched week starting {}",
            reference_date
        );

        Ok(merge_week(student_id, reference_date, end, persisted))
    }

    /// Store the week with checked meal boxes meaning "will eat"
    pub async fn apply_week_as_attendance(
        &self,
        student_id: &str,
        reference_date: NaiveDate,
        edits: &dyn WeekEdits,
    ) -> AppResult<()> {
        self.apply_week(student_id, reference_date, edits, CheckboxSemantics::Attendance)
            .await
    }

    /// Store the week with checked meal boxes meaning "will skip"
    pub async fn apply_week_as_skip(
        &self,
        student_id: &str,
        reference_date: NaiveDate,
        edits: &dyn WeekEdits,
    ) -> AppResult<()> {
        self.apply_week(student_id, reference_date, edits, CheckboxSemantics::Skip)
            .await
    }

    async fn apply_week(
        &self,
        student_id: &str,
        reference_date: NaiveDate,
        edits: &dyn WeekEdits,
        semantics: CheckboxSemantics,
    ) -> AppResult<()> {
        require_student_id(student_id)?;
        require_full_week(reference_date)?;

        let records = build_week_records(student_id, reference_date, edits, semantics);
        self.store.upsert_batch(&records).await?;

        tracing::info!(
            student_id,
            ?semantics,
            "Stored week starting {}",
            reference_date
        );
        Ok(())
    }
}

fn require_student_id(student_id: &str) -> AppResult<()> {
    if student_id.trim().is_empty() {
        return Err(AppError::Validation("Student id is required".to_string()));
    }
    Ok(())
}

/// Last date of the week, rejecting reference dates without seven days ahead
fn require_full_week(reference_date: NaiveDate) -> AppResult<NaiveDate> {
    week_end(reference_date).ok_or_else(|| {
        AppError::Validation(format!("No full week starts at {}", reference_date))
    })
}
