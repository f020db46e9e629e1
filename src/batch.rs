//! Batch phone validation: fixture/list input, CSV report output.
//!
//! A run reads its entries either from an explicit list of numbers or from a
//! CSV fixture, checks each number with [`crate::phone`], writes one report
//! row per entry to `results_dir/report-<UTC timestamp>.csv`, and returns a
//! [`Summary`] with the counts.
//!
//! Fixture layout: column 0 is the phone number, optional columns 1 and 2
//! hold the expected validity and availability (`true`/`false`). Blank rows
//! and a leading `phone,...` header row are skipped.

use crate::{
    config::AppConfig,
    normalizer::Normalizer,
    phone::{Availability, check_availability, is_valid_phone_number},
    stage::RemoveWhitespace,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const REPORT_HEADER: [&str; 7] = [
    "phone",
    "valid",
    "available",
    "message",
    "expected_valid",
    "expected_available",
    "note",
];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("either phones or fixture must be provided")]
    MissingInput,
    #[error("invalid fixture name: {0:?}")]
    InvalidFixtureName(String),
    #[error("fixture not found: {0}")]
    FixtureNotFound(PathBuf),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, BatchError>;

/// Structured request body: a list of numbers, a fixture name, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub fixture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Phones(Vec<String>),
    Fixture(String),
}

impl ValidationRequest {
    /// The fixture wins when both inputs are present.
    pub fn into_source(self) -> Result<Source> {
        match (self.fixture, self.phones) {
            (Some(fixture), _) if !fixture.is_empty() => Ok(Source::Fixture(fixture)),
            (_, Some(phones)) => Ok(Source::Phones(phones)),
            _ => Err(BatchError::MissingInput),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub phone: String,
    pub expected_valid: Option<String>,
    pub expected_available: Option<String>,
}

impl Entry {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            expected_valid: None,
            expected_available: None,
        }
    }
}

/// One row of the CSV report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    pub phone: String,
    pub valid: bool,
    pub available: bool,
    pub message: String,
    pub expected_valid: String,
    pub expected_available: String,
    pub note: String,
}

impl ReportRecord {
    /// Whether the recorded expectations disagree with the actual result.
    ///
    /// Availability expectations only count for numbers with a valid format.
    pub fn is_mismatch(&self) -> bool {
        if !self.expected_valid.is_empty() && parse_flag(&self.expected_valid) != self.valid {
            return true;
        }
        self.valid
            && !self.expected_available.is_empty()
            && parse_flag(&self.expected_available) != self.available
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub available: usize,
    pub unavailable: usize,
    pub mismatches: usize,
}

impl Counts {
    fn record(&mut self, record: &ReportRecord) {
        self.total += 1;
        if record.valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        if record.available {
            self.available += 1;
        } else {
            self.unavailable += 1;
        }
        if record.is_mismatch() {
            self.mismatches += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub report: PathBuf,
    pub counts: Counts,
    pub total_rows: usize,
}

pub struct BatchRunner {
    fixtures_dir: PathBuf,
    results_dir: PathBuf,
    pre: Option<Normalizer>,
}

impl BatchRunner {
    pub fn new(config: &AppConfig) -> Self {
        let pre = config
            .strip_whitespace
            .then(|| Normalizer::builder().add_stage(RemoveWhitespace).build());
        Self {
            fixtures_dir: config.fixtures_dir.clone(),
            results_dir: config.results_dir.clone(),
            pre,
        }
    }

    pub fn run(&self, source: Source) -> Result<Summary> {
        self.run_at(source, Utc::now())
    }

    /// Same as [`BatchRunner::run`] with an explicit report timestamp.
    pub fn run_at(&self, source: Source, now: DateTime<Utc>) -> Result<Summary> {
        let entries = match source {
            Source::Fixture(name) => self.read_fixture(&name)?,
            Source::Phones(phones) => phones.into_iter().map(Entry::new).collect(),
        };

        let mut counts = Counts::default();
        let records: Vec<ReportRecord> = entries
            .into_iter()
            .map(|entry| {
                let record = self.evaluate(entry);
                counts.record(&record);
                record
            })
            .collect();

        let report = self.write_report(&records, now)?;
        info!(
            report = %report.display(),
            total = counts.total,
            mismatches = counts.mismatches,
            "validation report written"
        );

        Ok(Summary {
            report,
            counts,
            total_rows: records.len(),
        })
    }

    pub fn read_fixture(&self, name: &str) -> Result<Vec<Entry>> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(BatchError::InvalidFixtureName(name.to_owned()));
        }
        let path = self.fixtures_dir.join(name);
        if !path.is_file() {
            return Err(BatchError::FixtureNotFound(path));
        }
        let csv_err = |source| BatchError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(csv_err)?;

        let mut entries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(csv_err)?;
            let Some(first) = record.get(0) else {
                continue;
            };
            let phone = first.trim_start_matches('\u{FEFF}').trim();
            if row == 0 && phone.eq_ignore_ascii_case("phone") {
                continue;
            }
            if record.len() == 1 && phone.is_empty() {
                continue;
            }
            entries.push(Entry {
                phone: phone.to_owned(),
                expected_valid: optional_cell(&record, 1),
                expected_available: optional_cell(&record, 2),
            });
        }
        debug!(fixture = %path.display(), entries = entries.len(), "fixture loaded");
        Ok(entries)
    }

    pub fn evaluate(&self, entry: Entry) -> ReportRecord {
        let phone = match &self.pre {
            Some(pre) => pre.normalize_str(&entry.phone).into_owned(),
            None => entry.phone,
        };
        let valid = is_valid_phone_number(&phone);
        let availability = check_availability(&phone);
        let available = availability.is_available();

        let record = ReportRecord {
            note: note_for(valid, availability),
            message: availability.message().to_owned(),
            expected_valid: entry.expected_valid.unwrap_or_default(),
            expected_available: entry.expected_available.unwrap_or_default(),
            phone,
            valid,
            available,
        };
        debug!(phone = %record.phone, valid, available, "entry checked");
        if record.is_mismatch() {
            warn!(
                phone = %record.phone,
                expected_valid = %record.expected_valid,
                expected_available = %record.expected_available,
                valid,
                available,
                "result differs from fixture expectation"
            );
        }
        record
    }

    fn write_report(&self, records: &[ReportRecord], now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.results_dir).map_err(|source| BatchError::Io {
            path: self.results_dir.clone(),
            source,
        })?;
        let path = self.results_dir.join(report_file_name(now));
        write_records(&path, records)?;
        Ok(path)
    }
}

pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("report-{}.csv", now.format("%Y%m%dT%H%M%SZ"))
}

fn write_records(path: &Path, records: &[ReportRecord]) -> Result<()> {
    let csv_err = |source| BatchError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    // Written by hand so an empty run still gets a header.
    writer.write_record(REPORT_HEADER).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn optional_cell(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.trim().to_owned())
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn note_for(valid: bool, availability: Availability) -> String {
    let mut parts = Vec::with_capacity(2);
    if !valid {
        parts.push("invalid_format");
    }
    if !availability.is_available() {
        parts.push("unavailable");
    }
    if parts.is_empty() {
        "ok".to_owned()
    } else {
        parts.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn runner(temp: &TempDir, strip_whitespace: bool) -> BatchRunner {
        let config = AppConfig {
            fixtures_dir: temp.path().join("fixtures"),
            results_dir: temp.path().join("results"),
            strip_whitespace,
            ..AppConfig::default()
        };
        fs::create_dir_all(&config.fixtures_dir).unwrap();
        BatchRunner::new(&config)
    }

    fn write_fixture(temp: &TempDir, name: &str, contents: &str) {
        fs::write(temp.path().join("fixtures").join(name), contents).unwrap();
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    #[test]
    fn request_source_selection() {
        let both = ValidationRequest {
            phones: Some(vec!["0968123456".into()]),
            fixture: Some("mixed.csv".into()),
        };
        assert_eq!(both.into_source().unwrap(), Source::Fixture("mixed.csv".into()));

        let phones = ValidationRequest {
            phones: Some(vec![]),
            fixture: None,
        };
        assert_eq!(phones.into_source().unwrap(), Source::Phones(vec![]));

        assert!(matches!(
            ValidationRequest::default().into_source(),
            Err(BatchError::MissingInput)
        ));
    }

    #[test]
    fn request_deserializes_from_json() {
        let req: ValidationRequest = serde_json::from_str(r#"{"phones": ["0968123456"]}"#).unwrap();
        assert_eq!(req.phones.as_deref(), Some(&["0968123456".to_owned()][..]));
        assert_eq!(req.fixture, None);
    }

    #[test]
    fn notes_cover_every_outcome() {
        assert_eq!(note_for(true, Availability::Available), "ok");
        assert_eq!(note_for(true, Availability::Banned), "unavailable");
        assert_eq!(
            note_for(false, Availability::InvalidFormat),
            "invalid_format;unavailable"
        );
    }

    #[test]
    fn report_name_uses_utc_timestamp() {
        assert_eq!(report_file_name(fixed_time()), "report-20240506T070809Z.csv");
    }

    #[test]
    fn phone_list_run_counts_and_writes_report() {
        let temp = TempDir::new().unwrap();
        let runner = runner(&temp, false);
        let source = Source::Phones(vec![
            "0968123456".into(),
            "0911888999".into(),
            "12345".into(),
        ]);
        let summary = runner.run_at(source, fixed_time()).unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(
            summary.counts,
            Counts {
                total: 3,
                valid: 2,
                invalid: 1,
                available: 1,
                unavailable: 2,
                mismatches: 0,
            }
        );
        assert_eq!(
            summary.report,
            temp.path().join("results").join("report-20240506T070809Z.csv")
        );

        let report = fs::read_to_string(&summary.report).unwrap();
        let mut lines = report.lines();
        assert_eq!(
            lines.next(),
            Some("phone,valid,available,message,expected_valid,expected_available,note")
        );
        assert_eq!(lines.next(), Some("0968123456,true,true,號碼可用,,,ok"));
        assert_eq!(
            lines.next(),
            Some("0911888999,true,false,此號碼已被禁止註冊,,,unavailable")
        );
        assert_eq!(
            lines.next(),
            Some("12345,false,false,格式錯誤,,,invalid_format;unavailable")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fixture_rows_with_expectations() {
        let temp = TempDir::new().unwrap();
        let runner = runner(&temp, false);
        write_fixture(
            &temp,
            "mixed.csv",
            "phone,expected_valid,expected_available\n\
             0968123456,true,true\n\
             \n\
             0911123456,true,false\n\
             12345,false,\n\
             0900000000\n\
             0968-123-456,true,true\n",
        );

        let entries = runner.read_fixture("mixed.csv").unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].expected_available, None);
        assert_eq!(entries[3], Entry::new("0900000000"));

        let summary = runner
            .run_at(Source::Fixture("mixed.csv".into()), fixed_time())
            .unwrap();
        assert_eq!(summary.counts.total, 5);
        assert_eq!(summary.counts.valid, 3);
        assert_eq!(summary.counts.available, 2);
        // Only the dashed number contradicts its expectation.
        assert_eq!(summary.counts.mismatches, 1);
    }

    #[test]
    fn availability_expectation_ignored_for_invalid_numbers() {
        let record = ReportRecord {
            phone: "12345".into(),
            valid: false,
            available: false,
            message: "格式錯誤".into(),
            expected_valid: "false".into(),
            expected_available: "true".into(),
            note: "invalid_format;unavailable".into(),
        };
        assert!(!record.is_mismatch());
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let temp = TempDir::new().unwrap();
        let runner = runner(&temp, false);
        let err = runner
            .run(Source::Fixture("nope.csv".into()))
            .unwrap_err();
        assert!(matches!(err, BatchError::FixtureNotFound(p) if p.ends_with("nope.csv")));
        assert!(matches!(
            runner.read_fixture("../escape.csv"),
            Err(BatchError::InvalidFixtureName(_))
        ));
    }

    #[test]
    fn strip_whitespace_pre_processing() {
        let temp = TempDir::new().unwrap();
        let spaced = vec!["0968 123 456".to_owned(), "0968\u{3000}123456".to_owned()];

        let plain = runner(&temp, false)
            .run_at(Source::Phones(spaced.clone()), fixed_time())
            .unwrap();
        assert_eq!(plain.counts.valid, 0);

        let stripped = runner(&temp, true)
            .run_at(Source::Phones(spaced), fixed_time())
            .unwrap();
        assert_eq!(stripped.counts.valid, 2);
        let report = fs::read_to_string(&stripped.report).unwrap();
        assert!(report.contains("0968123456,true,true"));
    }

    #[test]
    fn empty_run_still_has_header() {
        let temp = TempDir::new().unwrap();
        let summary = runner(&temp, false)
            .run_at(Source::Phones(vec![]), fixed_time())
            .unwrap();
        assert_eq!(summary.counts, Counts::default());
        let report = fs::read_to_string(&summary.report).unwrap();
        assert_eq!(report.lines().count(), 1);
    }
}
