use std::sync::Arc;

use tracing::{debug, warn};

use super::alerts::{AlertEngine, AlertThresholds};
use super::domain::{Alert, MetricSample, ProfileId, VitalsSample};
use super::repository::HealthHistoryRepository;
use crate::workflows::assessment::RepositoryError;

/// Loads a profile's history and runs the alert engine over it.
pub struct MonitoringService<H> {
    history: Arc<H>,
    engine: AlertEngine,
}

impl<H> MonitoringService<H>
where
    H: HealthHistoryRepository + 'static,
{
    pub fn new(history: Arc<H>, thresholds: AlertThresholds) -> Self {
        Self {
            history,
            engine: AlertEngine::new(thresholds),
        }
    }

    /// Current alerts for a profile. Load failures are returned as-is, without retry.
    pub fn current_alerts(&self, profile: &ProfileId) -> Result<Vec<Alert>, RepositoryError> {
        let vitals = self.history.vitals(profile).inspect_err(|err| {
            warn!(profile = %profile.0, error = %err, "vitals history load failed");
        })?;
        let metrics = self.history.metrics(profile).inspect_err(|err| {
            warn!(profile = %profile.0, error = %err, "metrics history load failed");
        })?;

        let alerts = self.engine.evaluate(&metrics, &vitals);
        debug!(
            profile = %profile.0,
            vitals = vitals.len(),
            metrics = metrics.len(),
            alerts = alerts.len(),
            "evaluated health alerts"
        );
        Ok(alerts)
    }

    pub fn record_vitals(
        &self,
        profile: &ProfileId,
        sample: VitalsSample,
    ) -> Result<(), RepositoryError> {
        self.history.record_vitals(profile, sample)
    }

    pub fn record_metric(
        &self,
        profile: &ProfileId,
        sample: MetricSample,
    ) -> Result<(), RepositoryError> {
        self.history.record_metric(profile, sample)
    }
}
