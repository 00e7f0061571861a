//! Attendance records and the derived weekly view

use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Date key format used for lookups and form field suffixes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days shown and edited at once
pub const WEEK_LENGTH: usize = 7;

/// One student's declaration for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub student_id: String,
    /// Calendar date (YYYY-MM-DD)
    #[serde(rename = "date")]
    pub record_date: NaiveDate,
    /// `true` when the student eats breakfast
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    /// `true` when the student stays away overnight
    pub overnight: bool,
    pub note: String,
}

impl AttendanceRecord {
    /// Record used for a date nobody has declared anything for:
    /// every meal eaten, home overnight, no note.
    pub fn default_for(student_id: &str, record_date: NaiveDate) -> Self {
        Self {
            student_id: student_id.to_string(),
            record_date,
            breakfast: true,
            lunch: true,
            dinner: true,
            overnight: false,
            note: String::new(),
        }
    }
}

/// Per-date checkbox fields of the weekly form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceField {
    Breakfast,
    Lunch,
    Dinner,
    Overnight,
}

impl AttendanceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceField::Breakfast => "breakfast",
            AttendanceField::Lunch => "lunch",
            AttendanceField::Dinner => "dinner",
            AttendanceField::Overnight => "overnight",
        }
    }

    /// Form field name for this flag on `date`, e.g. `breakfast-2025-01-01`
    pub fn form_key(&self, date: NaiveDate) -> String {
        format!("{}-{}", self.as_str(), date_key(date))
    }
}

/// Form field name of the note for `date`
pub fn note_key(date: NaiveDate) -> String {
    format!("note-{}", date_key(date))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

/// Dates of the week starting at `reference`, ascending.
/// Yields fewer than seven dates when `week_end` is `None`.
pub fn week_dates(reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    reference.iter_days().take(WEEK_LENGTH)
}

/// Last date of the week starting at `reference` (inclusive), `None` when
/// the week would run past the last representable date
pub fn week_end(reference: NaiveDate) -> Option<NaiveDate> {
    reference.checked_add_days(Days::new(WEEK_LENGTH as u64 - 1))
}

/// Seven consecutive days of records starting at `start`, ascending by date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<AttendanceRecord>,
}

impl WeekView {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttendanceRecord> {
        self.days.iter()
    }

    /// Record for a given date, if it falls inside the week
    pub fn day(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.days.iter().find(|r| r.record_date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date_key(s).unwrap()
    }

    #[test]
    fn test_week_dates_span_seven_days() {
        let dates: Vec<_> = week_dates(date("2024-12-29")).collect();
        assert_eq!(dates.len(), WEEK_LENGTH);
        assert_eq!(dates[0], date("2024-12-29"));
        assert_eq!(dates[3], date("2025-01-01"));
        assert_eq!(dates[6], date("2025-01-04"));
        assert_eq!(week_end(date("2024-12-29")), Some(date("2025-01-04")));
    }

    #[test]
    fn test_week_end_at_calendar_limit() {
        let last_full = NaiveDate::MAX - Days::new(6);
        assert_eq!(week_end(last_full), Some(NaiveDate::MAX));
        assert_eq!(week_dates(last_full).count(), WEEK_LENGTH);

        assert_eq!(week_end(NaiveDate::MAX - Days::new(2)), None);
    }

    #[test]
    fn test_form_keys() {
        let d = date("2025-01-01");
        assert_eq!(AttendanceField::Breakfast.form_key(d), "breakfast-2025-01-01");
        assert_eq!(AttendanceField::Overnight.form_key(d), "overnight-2025-01-01");
        assert_eq!(note_key(d), "note-2025-01-01");
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(date("2025-03-07")), "2025-03-07");
        assert!(parse_date_key("2025-3-7x").is_none());
    }

    #[test]
    fn test_default_record() {
        let r = AttendanceRecord::default_for("s1", date("2025-01-01"));
        assert!(r.breakfast && r.lunch && r.dinner);
        assert!(!r.overnight);
        assert!(r.note.is_empty());
    }

    #[test]
    fn test_record_serializes_date_key() {
        let r = AttendanceRecord::default_for("s1", date("2025-01-01"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["student_id"], "s1");
    }
}
