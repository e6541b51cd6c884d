use super::domain::{MetricSample, ProfileId, VitalsSample};
use crate::workflows::assessment::RepositoryError;

/// Append-only store of measurements keyed by profile.
///
/// Reads may return samples in any order; the alert engine sorts them.
pub trait HealthHistoryRepository: Send + Sync {
    fn vitals(&self, profile: &ProfileId) -> Result<Vec<VitalsSample>, RepositoryError>;
    fn metrics(&self, profile: &ProfileId) -> Result<Vec<MetricSample>, RepositoryError>;
    fn record_vitals(
        &self,
        profile: &ProfileId,
        sample: VitalsSample,
    ) -> Result<(), RepositoryError>;
    fn record_metric(
        &self,
        profile: &ProfileId,
        sample: MetricSample,
    ) -> Result<(), RepositoryError>;
}
