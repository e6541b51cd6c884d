use std::env;
use std::fmt;
use std::str::FromStr;

use crate::workflows::assessment::RecommendationConfig;
use crate::workflows::monitoring::AlertThresholds;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub alerts: AlertThresholds,
    pub recommendation: RecommendationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = AlertThresholds::default();
        let alerts = AlertThresholds {
            temperature_max_c: read_number("ALERT_TEMPERATURE_MAX_C", defaults.temperature_max_c)?,
            heart_rate_max_bpm: read_number(
                "ALERT_HEART_RATE_MAX_BPM",
                defaults.heart_rate_max_bpm,
            )?,
            weight_delta_kg: read_number("ALERT_WEIGHT_DELTA_KG", defaults.weight_delta_kg)?,
            systolic_max_mmhg: read_number("ALERT_SYSTOLIC_MAX_MMHG", defaults.systolic_max_mmhg)?,
            diastolic_max_mmhg: read_number(
                "ALERT_DIASTOLIC_MAX_MMHG",
                defaults.diastolic_max_mmhg,
            )?,
        };

        let recommendation = RecommendationConfig {
            symptom_threshold: read_number(
                "RECOMMENDATION_SYMPTOM_THRESHOLD",
                RecommendationConfig::default().symptom_threshold,
            )?,
            ..RecommendationConfig::default()
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            alerts,
            recommendation,
        })
    }
}

fn read_number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        _ => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "ALERT_TEMPERATURE_MAX_C",
            "ALERT_HEART_RATE_MAX_BPM",
            "ALERT_WEIGHT_DELTA_KG",
            "ALERT_SYSTOLIC_MAX_MMHG",
            "ALERT_DIASTOLIC_MAX_MMHG",
            "RECOMMENDATION_SYMPTOM_THRESHOLD",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.alerts, AlertThresholds::default());
        assert_eq!(config.recommendation.symptom_threshold, 3);
    }

    #[test]
    fn overrides_alert_thresholds_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("ALERT_TEMPERATURE_MAX_C", "38.0");
        env::set_var("ALERT_HEART_RATE_MAX_BPM", "110");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.alerts.temperature_max_c, 38.0);
        assert_eq!(config.alerts.heart_rate_max_bpm, 110);
        assert_eq!(config.alerts.weight_delta_kg, 2.0);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RECOMMENDATION_SYMPTOM_THRESHOLD", "three");
        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { key }) => {
                assert_eq!(key, "RECOMMENDATION_SYMPTOM_THRESHOLD")
            }
            other => panic!("expected invalid number error, got {other:?}"),
        }
        reset_env();
    }
}
