//! Students list loader and its table model.

use super::Completion;
use crate::api::SchoolApi;
use crate::api::types::StudentRecord;
use crate::consts::cli_consts::display::{MISSING_PHONE, REPLACEMENT_CHAR};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventSender, EventType, Source};

/// One rendered table row. Every field is display-safe text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub roll_number: String,
    pub name: String,
    pub class_id: String,
    pub phone: String,
    pub status: String,
}

impl StudentRow {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            roll_number: sanitize_text(&record.roll_number),
            name: sanitize_text(&record.name),
            class_id: sanitize_text(&record.class_id),
            phone: match record.phone.as_deref() {
                Some(phone) if !phone.is_empty() => sanitize_text(phone),
                _ => MISSING_PHONE.to_string(),
            },
            status: sanitize_text(&record.status),
        }
    }

    /// Badge tone for the status cell.
    pub fn status_tone(&self) -> StatusTone {
        match self.status.to_lowercase().as_str() {
            "active" | "paid" | "present" => StatusTone::Positive,
            "inactive" | "overdue" | "absent" | "suspended" => StatusTone::Negative,
            _ => StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Negative,
    Neutral,
}

/// Body of the students table. Only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentsTable {
    rows: Vec<StudentRow>,
}

impl StudentsTable {
    /// Clear the table and append one row per record, in order.
    pub fn replace(&mut self, records: &[StudentRecord]) {
        self.rows = records.iter().map(StudentRow::from_record).collect();
    }

    pub fn rows(&self) -> &[StudentRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Neutralize server-provided text for terminal output.
///
/// Control characters (ESC, CR, BEL, ...) could rewrite the screen, so they
/// are replaced; everything else, including `<` and `>`, is kept as literal
/// text because cells are only ever built from plain spans.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { REPLACEMENT_CHAR } else { c })
        .collect()
}

/// Issue one students request. Failures are logged here and passed on
/// untouched; the caller decides whether to render.
pub(super) async fn fetch(api: &dyn SchoolApi, seq: u64, events: &EventSender) -> Completion {
    events
        .send(
            Source::StudentsLoader,
            format!("Requesting students (#{})", seq),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .await;

    let result = api.students().await;
    match &result {
        Ok(records) => {
            events
                .send(
                    Source::StudentsLoader,
                    format!("Loaded {} students", records.len()),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }
        Err(e) => {
            let level = ErrorClassifier::new().classify_load_error(e);
            events
                .send(
                    Source::StudentsLoader,
                    format!("Failed to load students: {}", e),
                    EventType::Error,
                    level,
                )
                .await;
        }
    }

    Completion::Students { seq, result }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(roll: &str, name: &str, phone: Option<&str>) -> StudentRecord {
        StudentRecord {
            roll_number: roll.to_string(),
            name: name.to_string(),
            class_id: "C1".to_string(),
            phone: phone.map(str::to_string),
            status: "active".to_string(),
        }
    }

    #[test]
    fn missing_or_empty_phone_renders_dash() {
        assert_eq!(StudentRow::from_record(&record("R1", "Asha", None)).phone, "-");
        assert_eq!(StudentRow::from_record(&record("R1", "Asha", Some(""))).phone, "-");
        assert_eq!(
            StudentRow::from_record(&record("R1", "Asha", Some("98450 12345"))).phone,
            "98450 12345"
        );
    }

    #[test]
    fn replace_is_a_full_rebuild() {
        let mut table = StudentsTable::default();
        table.replace(&[record("R1", "Asha", None), record("R2", "Ravi", None)]);
        assert_eq!(table.len(), 2);

        table.replace(&[record("R3", "Mina", None)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].roll_number, "R3");

        table.replace(&[]);
        assert!(table.is_empty());
    }

    #[test]
    fn markup_is_kept_as_literal_text() {
        let row = StudentRow::from_record(&record("R1", "<script>x</script>", None));
        assert_eq!(row.name, "<script>x</script>");
    }

    #[test]
    fn control_characters_are_neutralized() {
        let cleaned = sanitize_text("Asha\x1b[2J\r\n");
        assert!(!cleaned.chars().any(char::is_control));
        assert!(cleaned.starts_with("Asha"));
        assert!(cleaned.contains("[2J"));
    }

    #[test]
    fn status_tone_follows_status_text() {
        let mut r = record("R1", "Asha", None);
        assert_eq!(StudentRow::from_record(&r).status_tone(), StatusTone::Positive);
        r.status = "Inactive".to_string();
        assert_eq!(StudentRow::from_record(&r).status_tone(), StatusTone::Negative);
        r.status = "transferred".to_string();
        assert_eq!(StudentRow::from_record(&r).status_tone(), StatusTone::Neutral);
    }
}
