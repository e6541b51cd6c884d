use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for the patient profile a history belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// One bedside or home vitals reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsSample {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Beats per minute.
    pub heart_rate: u32,
    /// `"systolic/diastolic"` in mmHg.
    pub blood_pressure: String,
    pub measured_at: DateTime<Utc>,
}

impl VitalsSample {
    pub fn parsed_blood_pressure(&self) -> Option<BloodPressure> {
        BloodPressure::parse(&self.blood_pressure)
    }
}

/// A single tracked measurement such as body weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub measured_at: DateTime<Utc>,
}

pub const WEIGHT_METRIC: &str = "weight";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BloodPressure {
    /// Parse `"120/80"`; surrounding whitespace is tolerated.
    pub fn parse(raw: &str) -> Option<Self> {
        let (systolic, diastolic) = raw.trim().split_once('/')?;
        Some(Self {
            systolic: systolic.trim().parse().ok()?,
            diastolic: diastolic.trim().parse().ok()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Vital,
    Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }
}

/// Derived finding over a patient's history. Recomputed on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Stable per rule so callers can diff successive evaluations.
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub recommendation: String,
    /// Timestamp of the sample that triggered the rule.
    pub detected_at: DateTime<Utc>,
}
