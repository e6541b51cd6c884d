//! Vitals and metric history evaluation. Independent of the intake wizard.

pub mod alerts;
pub mod domain;
pub mod import;
pub mod repository;
pub mod service;

pub use alerts::{evaluate, AlertDiff, AlertEngine, AlertThresholds};
pub use domain::{
    Alert, AlertKind, AlertSeverity, BloodPressure, MetricSample, ProfileId, VitalsSample,
    WEIGHT_METRIC,
};
pub use import::{HistoryImportError, HistoryImporter};
pub use repository::HealthHistoryRepository;
pub use service::MonitoringService;
