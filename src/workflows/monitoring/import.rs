use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{MetricSample, VitalsSample};

#[derive(Debug, thiserror::Error)]
pub enum HistoryImportError {
    #[error("failed to read history export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid history CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unrecognized timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

/// Loads vitals and metric histories from CSV exports.
///
/// Vitals columns: `Temperature,Heart Rate,Blood Pressure,Measured At`.
/// Metric columns: `Metric Type,Value,Unit,Measured At`.
pub struct HistoryImporter;

impl HistoryImporter {
    pub fn vitals_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<VitalsSample>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::vitals_from_reader(file)
    }

    pub fn vitals_from_reader<R: Read>(reader: R) -> Result<Vec<VitalsSample>, HistoryImportError> {
        let mut samples = Vec::new();
        for (index, row) in csv_reader(reader).deserialize::<VitalsRow>().enumerate() {
            let row = row?;
            samples.push(VitalsSample {
                temperature: row.temperature,
                heart_rate: row.heart_rate,
                blood_pressure: row.blood_pressure.unwrap_or_default(),
                measured_at: parse_measured_at(index, &row.measured_at)?,
            });
        }
        Ok(samples)
    }

    pub fn metrics_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<MetricSample>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::metrics_from_reader(file)
    }

    pub fn metrics_from_reader<R: Read>(reader: R) -> Result<Vec<MetricSample>, HistoryImportError> {
        let mut samples = Vec::new();
        for (index, row) in csv_reader(reader).deserialize::<MetricRow>().enumerate() {
            let row = row?;
            samples.push(MetricSample {
                metric_type: row.metric_type.to_ascii_lowercase(),
                value: row.value,
                unit: row.unit.unwrap_or_default(),
                measured_at: parse_measured_at(index, &row.measured_at)?,
            });
        }
        Ok(samples)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct VitalsRow {
    #[serde(rename = "Temperature")]
    temperature: f64,
    #[serde(rename = "Heart Rate")]
    heart_rate: u32,
    #[serde(
        rename = "Blood Pressure",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    blood_pressure: Option<String>,
    #[serde(rename = "Measured At")]
    measured_at: String,
}

#[derive(Debug, Deserialize)]
struct MetricRow {
    #[serde(rename = "Metric Type")]
    metric_type: String,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "Unit", default, deserialize_with = "empty_string_as_none")]
    unit: Option<String>,
    #[serde(rename = "Measured At")]
    measured_at: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_measured_at(index: usize, raw: &str) -> Result<DateTime<Utc>, HistoryImportError> {
    // Data rows start on line 2, after the header.
    parse_datetime(raw).ok_or_else(|| HistoryImportError::InvalidTimestamp {
        row: index + 2,
        value: raw.to_string(),
    })
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    None
}
