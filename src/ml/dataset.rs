//! Labelled job postings used for training.
//!
//! Datasets are read as CSV with a header row (files ending in `.csv`), or
//! otherwise as a JSON array of records or JSON Lines (one record per line,
//! blank lines ignored).

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::classifier::Verdict;

/// One labelled posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingRecord {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(deserialize_with = "deserialize_label")]
    pub is_fake: bool,
}

impl JobPostingRecord {
    /// Text the model is trained on: description, requirements and benefits
    /// joined by single spaces, missing fields treated as empty.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.job_description,
            self.requirements.as_deref().unwrap_or(""),
            self.benefits.as_deref().unwrap_or("")
        )
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_fake {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Bool(bool),
        Int(i64),
    }

    match Label::deserialize(deserializer)? {
        Label::Bool(b) => Ok(b),
        Label::Int(value) => label_from_int(value).map_err(serde::de::Error::custom),
    }
}

fn label_from_int(value: i64) -> std::result::Result<bool, String> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(format!("is_fake must be 0 or 1, got {other}")),
    }
}

/// One CSV row; columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    job_description: Option<String>,
    #[serde(default)]
    requirements: Option<String>,
    #[serde(default)]
    benefits: Option<String>,
    is_fake: String,
}

impl CsvRow {
    fn into_record(self) -> std::result::Result<JobPostingRecord, String> {
        let label = self.is_fake.trim();
        let is_fake = match label.parse::<i64>() {
            Ok(value) => label_from_int(value)?,
            Err(_) if label.eq_ignore_ascii_case("true") => true,
            Err(_) if label.eq_ignore_ascii_case("false") => false,
            Err(_) => return Err(format!("is_fake must be 0 or 1, got {label:?}")),
        };
        Ok(JobPostingRecord {
            job_description: self.job_description.unwrap_or_default(),
            requirements: self.requirements,
            benefits: self.benefits,
            is_fake,
        })
    }
}

/// Parse records from CSV text whose first row names the columns.
///
/// Empty cells are treated as missing fields.
pub fn parse_csv_records(content: &str) -> Result<Vec<JobPostingRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| MLError::invalid_training_data(format!("Failed to read CSV headers: {e}")))?;
    if !headers.iter().any(|h| h == "is_fake") {
        return Err(MLError::invalid_training_data("CSV header has no is_fake column").into());
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<CsvRow>().enumerate() {
        let record = result
            .map_err(|e| e.to_string())
            .and_then(CsvRow::into_record)
            .map_err(|e| MLError::invalid_training_data(format!("row {}: {e}", row + 1)))?;
        records.push(record);
    }
    Ok(records)
}

/// Parse records from a string holding a JSON array or JSON Lines.
pub fn parse_records(content: &str) -> Result<Vec<JobPostingRecord>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|e| {
            MLError::invalid_training_data(format!("line {}: {e}", line_no + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load records from a file, as CSV when the extension is `.csv`.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<JobPostingRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        MLError::invalid_training_data(format!("cannot read {}: {e}", path.display()))
    })?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let records = if is_csv {
        parse_csv_records(&content)?
    } else {
        parse_records(&content)?
    };
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_jsonl() {
        let content = r#"
{"job_description": "Wire transfer fee", "is_fake": 1}

{"job_description": "Software engineer", "requirements": "Rust", "benefits": null, "is_fake": 0}
"#;
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_fake);
        assert_eq!(records[1].verdict(), Verdict::Real);
        assert_eq!(records[1].combined_text(), "Software engineer Rust ");
    }

    #[test]
    fn test_parse_array_with_bool_labels() {
        let content = r#"[{"job_description": "a", "is_fake": true}, {"job_description": "b", "is_fake": false}]"#;
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_fake);
        assert!(!records[1].is_fake);
    }

    #[test]
    fn test_invalid_label_reports_line() {
        let content = "{\"job_description\": \"ok\", \"is_fake\": 0}\n{\"job_description\": \"x\", \"is_fake\": 3}\n";
        let err = parse_records(content).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_csv_with_empty_cells() {
        let content = "\
title,job_description,requirements,benefits,is_fake
Agent,\"Earn money fast, wire transfer\",,,1
Engineer,Build payment systems,\"Rust, SQL\",Health insurance,0
";
        let records = parse_csv_records(content).unwrap();
        assert_eq!(records.len(), 2);

        assert!(records[0].is_fake);
        assert_eq!(records[0].job_description, "Earn money fast, wire transfer");
        assert_eq!(records[0].requirements, None);
        assert_eq!(records[0].benefits, None);

        assert_eq!(records[1].verdict(), Verdict::Real);
        assert_eq!(records[1].requirements.as_deref(), Some("Rust, SQL"));
        assert_eq!(
            records[1].combined_text(),
            "Build payment systems Rust, SQL Health insurance"
        );
    }

    #[test]
    fn test_csv_errors() {
        let err = parse_csv_records("job_description,is_fake\nok,0\nbad,2\n").unwrap_err();
        assert!(err.to_string().contains("row 2"));

        let err = parse_csv_records("job_description,label\nok,0\n").unwrap_err();
        assert!(err.to_string().contains("is_fake"));
    }

    #[test]
    fn test_load_records_picks_csv_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        writeln!(file, "job_description,requirements,benefits,is_fake").unwrap();
        writeln!(file, "Remote support role,,Pension,0").unwrap();
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].benefits.as_deref(), Some("Pension"));
        assert!(!records[0].is_fake);
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"job_description": "Remote role", "is_fake": 0}}"#).unwrap();
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].job_description, "Remote role");

        assert!(load_records("/nonexistent/postings.jsonl").is_err());
    }
}
