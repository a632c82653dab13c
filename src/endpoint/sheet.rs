use crate::domain::model::IntakeRecord;
use crate::domain::ports::SheetStore;
use crate::utils::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const HEADERS: [&str; 13] = [
    "Timestamp",
    "Full Name",
    "Age",
    "Email",
    "Phone",
    "School",
    "Grade",
    "Zone",
    "Career Interests",
    "Goals",
    "Additional Notes",
    "Parent/Guardian Contact",
    "Submitted At",
];

/// One sheet row in header order. `Timestamp` is the server's receive time.
pub fn row_for(record: &IntakeRecord, received_at: DateTime<Utc>) -> Vec<String> {
    vec![
        received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        record.full_name.clone(),
        record.age.clone(),
        record.email.clone(),
        record.phone.clone(),
        record.school.clone(),
        record.grade.clone(),
        record.zone.clone(),
        record.interests.clone(),
        record.goals.clone(),
        record.notes.clone(),
        record.parent_contact.clone(),
        record.submitted_at.clone(),
    ]
}

/// Append-only CSV file standing in for the submissions spreadsheet.
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header row if the file is missing or empty.
    pub fn ensure_created(&self) -> Result<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => return Ok(false),
            Ok(_) => tracing::warn!("Sheet {} is empty, writing header", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADERS)?;
        writer.flush()?;
        tracing::info!("Created new sheet: {}", self.path.display());
        Ok(true)
    }
}

impl SheetStore for CsvSheet {
    fn append(&self, row: &[String]) -> Result<()> {
        // A poisoned lock only means another append panicked; the file is
        // still usable.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.ensure_created()?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        tracing::debug!("Appended row to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record() -> IntakeRecord {
        IntakeRecord {
            full_name: "Jane Doe".to_string(),
            age: "16".to_string(),
            email: "jane@example.com".to_string(),
            zone: "North".to_string(),
            interests: "Medicine, Arts".to_string(),
            submitted_at: "3/7/2025, 4:05:09 PM".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_row_follows_header_order() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 16, 5, 9).unwrap();
        let row = row_for(&record(), at);
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[0], "2025-03-07T16:05:09.000Z");
        assert_eq!(row[1], "Jane Doe");
        assert_eq!(row[8], "Medicine, Arts");
        assert_eq!(row[12], "3/7/2025, 4:05:09 PM");
    }

    #[test]
    fn test_first_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let sheet = CsvSheet::new(dir.path().join("nested").join("intake.csv"));
        let row = row_for(&record(), Utc::now());

        sheet.append(&row).unwrap();
        sheet.append(&row).unwrap();

        let mut reader = csv::Reader::from_path(sheet.path()).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, HEADERS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][8], "Medicine, Arts");
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intake.csv");
        std::fs::write(&path, "").unwrap();
        let sheet = CsvSheet::new(&path);

        sheet.append(&row_for(&record(), Utc::now())).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), HEADERS.len());
        assert_eq!(&reader.headers().unwrap()[0], "Timestamp");
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn test_ensure_created_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let sheet = CsvSheet::new(dir.path().join("intake.csv"));
        assert!(sheet.ensure_created().unwrap());
        assert!(!sheet.ensure_created().unwrap());
    }
}
