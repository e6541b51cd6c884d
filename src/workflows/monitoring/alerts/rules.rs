use super::super::domain::{Alert, AlertKind, AlertSeverity, MetricSample, VitalsSample};
use super::AlertThresholds;

/// Histories already sorted newest-first.
pub(crate) struct HistoryView<'a> {
    pub latest_vitals: Option<&'a VitalsSample>,
    pub weights: Vec<&'a MetricSample>,
}

pub(crate) struct AlertRule {
    pub id: &'static str,
    pub evaluate: fn(&HistoryView<'_>, &AlertThresholds) -> Option<Alert>,
}

/// Every rule runs; output keeps table order.
pub(crate) static ALERT_RULES: [AlertRule; 4] = [
    AlertRule {
        id: "temp-high",
        evaluate: elevated_temperature,
    },
    AlertRule {
        id: "hr-high",
        evaluate: elevated_heart_rate,
    },
    AlertRule {
        id: "bp-high",
        evaluate: elevated_blood_pressure,
    },
    AlertRule {
        id: "weight-change",
        evaluate: weight_change,
    },
];

fn elevated_temperature(history: &HistoryView<'_>, thresholds: &AlertThresholds) -> Option<Alert> {
    let latest = history.latest_vitals?;
    if latest.temperature <= thresholds.temperature_max_c {
        return None;
    }

    Some(Alert {
        id: "temp-high".to_string(),
        kind: AlertKind::Vital,
        severity: AlertSeverity::Medium,
        title: "Elevated Temperature".to_string(),
        message: format!(
            "Latest temperature of {:.1}°C is above {:.1}°C.",
            latest.temperature, thresholds.temperature_max_c
        ),
        recommendation: "Rest, stay hydrated, and recheck in a few hours. Contact your provider \
                         if the fever persists or rises."
            .to_string(),
        detected_at: latest.measured_at,
    })
}

fn elevated_heart_rate(history: &HistoryView<'_>, thresholds: &AlertThresholds) -> Option<Alert> {
    let latest = history.latest_vitals?;
    if latest.heart_rate <= thresholds.heart_rate_max_bpm {
        return None;
    }

    Some(Alert {
        id: "hr-high".to_string(),
        kind: AlertKind::Vital,
        severity: AlertSeverity::Medium,
        title: "Elevated Heart Rate".to_string(),
        message: format!(
            "Latest resting heart rate of {} bpm is above {} bpm.",
            latest.heart_rate, thresholds.heart_rate_max_bpm
        ),
        recommendation: "Sit quietly for five minutes and measure again. Seek care if it stays \
                         high or comes with chest pain or dizziness."
            .to_string(),
        detected_at: latest.measured_at,
    })
}

fn elevated_blood_pressure(
    history: &HistoryView<'_>,
    thresholds: &AlertThresholds,
) -> Option<Alert> {
    let latest = history.latest_vitals?;
    let reading = latest.parsed_blood_pressure()?;
    if reading.systolic < thresholds.systolic_max_mmhg
        && reading.diastolic < thresholds.diastolic_max_mmhg
    {
        return None;
    }

    Some(Alert {
        id: "bp-high".to_string(),
        kind: AlertKind::Vital,
        severity: AlertSeverity::Medium,
        title: "Elevated Blood Pressure".to_string(),
        message: format!(
            "Latest blood pressure of {}/{} mmHg is at or above {}/{} mmHg.",
            reading.systolic,
            reading.diastolic,
            thresholds.systolic_max_mmhg,
            thresholds.diastolic_max_mmhg
        ),
        recommendation: "Recheck after resting and share the readings with your provider."
            .to_string(),
        detected_at: latest.measured_at,
    })
}

fn weight_change(history: &HistoryView<'_>, thresholds: &AlertThresholds) -> Option<Alert> {
    let (latest, previous) = match history.weights.as_slice() {
        [latest, previous, ..] => (*latest, *previous),
        _ => return None,
    };
    let delta = latest.value - previous.value;
    if delta.abs() <= thresholds.weight_delta_kg {
        return None;
    }

    let direction = if delta > 0.0 { "increased" } else { "decreased" };
    let unit = if latest.unit.trim().is_empty() {
        "kg"
    } else {
        latest.unit.trim()
    };

    Some(Alert {
        id: "weight-change".to_string(),
        kind: AlertKind::Metric,
        severity: AlertSeverity::Low,
        title: "Significant Weight Change".to_string(),
        message: format!(
            "Significant weight change: weight {direction} by {:.1} {unit} since the previous measurement.",
            delta.abs()
        ),
        recommendation: "Review recent diet, activity, and medication changes with your care team."
            .to_string(),
        detected_at: latest.measured_at,
    })
}
