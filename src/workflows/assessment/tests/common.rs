use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::workflows::assessment::domain::{AssessmentRecord, LifestyleFactor, Symptom};
use crate::workflows::assessment::repository::{
    AssessmentId, AssessmentRepository, RepositoryError, SubmittedAssessment,
};
use crate::workflows::assessment::service::{AssessmentService, IntakeSession};
use crate::workflows::assessment::wizard::{ContactField, FieldUpdate, IntakeFlow};
use crate::workflows::assessment::RecommendationConfig;

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<AssessmentId, SubmittedAssessment>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(super) fn stored(&self) -> Vec<SubmittedAssessment> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(
        &self,
        assessment: SubmittedAssessment,
    ) -> Result<SubmittedAssessment, RepositoryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("connection refused".to_string()));
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

pub(super) fn service(
    repository: Arc<MemoryRepository>,
) -> Arc<AssessmentService<MemoryRepository>> {
    Arc::new(AssessmentService::new(
        repository,
        RecommendationConfig::default(),
    ))
}

pub(super) fn session(
    flow: IntakeFlow,
) -> (Arc<MemoryRepository>, IntakeSession<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let session = IntakeSession::new(flow, service(repository.clone()));
    (repository, session)
}

pub(super) fn fill_contact(session: &mut IntakeSession<MemoryRepository>) {
    session.update(FieldUpdate::Contact(
        ContactField::Email,
        "jordan@example.com".to_string(),
    ));
    session.update(FieldUpdate::Contact(
        ContactField::FirstName,
        "Jordan".to_string(),
    ));
    session.update(FieldUpdate::Contact(
        ContactField::LastName,
        "Reyes".to_string(),
    ));
}

/// Record with the first `count` symptoms from the vocabulary.
pub(super) fn record_with_symptoms(count: usize) -> AssessmentRecord {
    let mut record = AssessmentRecord::empty();
    record
        .symptoms
        .extend(Symptom::ALL.into_iter().take(count));
    record
}

pub(super) fn with_lifestyle(
    mut record: AssessmentRecord,
    factor: LifestyleFactor,
) -> AssessmentRecord {
    record.lifestyle_factors.insert(factor);
    record
}
