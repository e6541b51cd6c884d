mod rules;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Alert, MetricSample, VitalsSample, WEIGHT_METRIC};
use rules::{HistoryView, ALERT_RULES};

/// Clinical limits used by the alert rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub temperature_max_c: f64,
    pub heart_rate_max_bpm: u32,
    pub weight_delta_kg: f64,
    pub systolic_max_mmhg: u16,
    pub diastolic_max_mmhg: u16,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temperature_max_c: 37.5,
            heart_rate_max_bpm: 100,
            weight_delta_kg: 2.0,
            systolic_max_mmhg: 140,
            diastolic_max_mmhg: 90,
        }
    }
}

/// Stateless evaluator over vitals and metric histories.
///
/// Histories may arrive in any order; each is sorted newest-first by
/// `measured_at` before the rules run, with ties keeping caller order.
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Ids of every rule, in evaluation order.
    pub fn rule_ids() -> impl Iterator<Item = &'static str> {
        ALERT_RULES.iter().map(|rule| rule.id)
    }

    pub fn evaluate(&self, metrics: &[MetricSample], vitals: &[VitalsSample]) -> Vec<Alert> {
        let mut vitals: Vec<&VitalsSample> = vitals.iter().collect();
        vitals.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));

        let mut weights: Vec<&MetricSample> = metrics
            .iter()
            .filter(|sample| sample.metric_type.eq_ignore_ascii_case(WEIGHT_METRIC))
            .collect();
        weights.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));

        let history = HistoryView {
            latest_vitals: vitals.first().copied(),
            weights,
        };

        ALERT_RULES
            .iter()
            .filter_map(|rule| (rule.evaluate)(&history, &self.thresholds))
            .collect()
    }
}

/// Evaluate with the stock thresholds.
pub fn evaluate(metrics: &[MetricSample], vitals: &[VitalsSample]) -> Vec<Alert> {
    AlertEngine::default().evaluate(metrics, vitals)
}

/// Alert ids that appeared or cleared between two evaluations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertDiff {
    pub raised: Vec<String>,
    pub resolved: Vec<String>,
}

impl AlertDiff {
    pub fn between(previous: &[Alert], current: &[Alert]) -> Self {
        let before: BTreeSet<&str> = previous.iter().map(|alert| alert.id.as_str()).collect();
        let after: BTreeSet<&str> = current.iter().map(|alert| alert.id.as_str()).collect();

        Self {
            raised: after.difference(&before).map(|id| id.to_string()).collect(),
            resolved: before.difference(&after).map(|id| id.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raised.is_empty() && self.resolved.is_empty()
    }
}
