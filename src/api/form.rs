//! Weekly form input adapter
//!
//! Browsers only submit checked checkboxes, so a flag is set exactly when
//! its `{field}-{YYYY-MM-DD}` key is present with the value `on`.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    models::attendance::{note_key, AttendanceField},
    services::attendance::WeekEdits,
};

const CHECKED: &str = "on";

/// Decoded `application/x-www-form-urlencoded` weekly form
#[derive(Debug, Clone, Default)]
pub struct FormEdits {
    fields: HashMap<String, String>,
}

impl FormEdits {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl From<HashMap<String, String>> for FormEdits {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}

impl WeekEdits for FormEdits {
    fn has_flag(&self, field: AttendanceField, date: NaiveDate) -> bool {
        self.fields
            .get(&field.form_key(date))
            .is_some_and(|value| value == CHECKED)
    }

    fn get_note(&self, date: NaiveDate) -> String {
        self.fields.get(&note_key(date)).cloned().unwrap_or_default()
    }
}
