use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use care_intake::workflows::assessment::{
    AssessmentId, AssessmentRepository, RepositoryError, SubmittedAssessment,
};
use care_intake::workflows::monitoring::{
    HealthHistoryRepository, MetricSample, ProfileId, VitalsSample,
};

#[derive(Default)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Mutex<HashMap<AssessmentId, SubmittedAssessment>>,
    fail_next: AtomicBool,
}

impl InMemoryAssessmentRepository {
    /// Make the next insert fail once, for exercising retry paths.
    pub(crate) fn fail_next_insert(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(
        &self,
        assessment: SubmittedAssessment,
    ) -> Result<SubmittedAssessment, RepositoryError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "simulated storage outage".to_string(),
            ));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<SubmittedAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryHistoryRepository {
    vitals: Mutex<HashMap<ProfileId, Vec<VitalsSample>>>,
    metrics: Mutex<HashMap<ProfileId, Vec<MetricSample>>>,
}

impl HealthHistoryRepository for InMemoryHistoryRepository {
    fn vitals(&self, profile: &ProfileId) -> Result<Vec<VitalsSample>, RepositoryError> {
        let guard = self.vitals.lock().expect("history mutex poisoned");
        Ok(guard.get(profile).cloned().unwrap_or_default())
    }

    fn metrics(&self, profile: &ProfileId) -> Result<Vec<MetricSample>, RepositoryError> {
        let guard = self.metrics.lock().expect("history mutex poisoned");
        Ok(guard.get(profile).cloned().unwrap_or_default())
    }

    fn record_vitals(
        &self,
        profile: &ProfileId,
        sample: VitalsSample,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.vitals.lock().expect("history mutex poisoned");
        guard.entry(profile.clone()).or_default().push(sample);
        Ok(())
    }

    fn record_metric(
        &self,
        profile: &ProfileId,
        sample: MetricSample,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.metrics.lock().expect("history mutex poisoned");
        guard.entry(profile.clone()).or_default().push(sample);
        Ok(())
    }
}
