use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::AssessmentRecord;
use super::recommendation::{RecommendationConfig, RecommendationEngine};
use super::repository::{AssessmentId, AssessmentRepository, RepositoryError, SubmittedAssessment};
use super::scoring::{EngagementScorer, ScoringWeights};
use super::wizard::{
    reduce, FieldUpdate, IntakeFlow, Transition, WizardAction, WizardEffect, WizardState,
};

/// Service composing the scorer, the recommendation rules and the repository.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    scorer: EngagementScorer,
    recommender: RecommendationEngine,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: RecommendationConfig) -> Self {
        Self::with_weights(repository, config, ScoringWeights::default())
    }

    pub fn with_weights(
        repository: Arc<R>,
        config: RecommendationConfig,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            repository,
            scorer: EngagementScorer::new(weights),
            recommender: RecommendationEngine::new(config),
        }
    }

    /// Derive score and recommendation for a finished record, then persist it.
    pub fn submit(
        &self,
        record: AssessmentRecord,
    ) -> Result<SubmittedAssessment, RepositoryError> {
        let score = self.scorer.breakdown(&record);
        let recommendation = self.recommender.recommend(&record);
        let assessment = SubmittedAssessment {
            id: next_assessment_id(),
            record,
            score,
            recommendation,
            submitted_at: Utc::now(),
        };

        match self.repository.insert(assessment) {
            Ok(stored) => {
                info!(
                    assessment_id = %stored.id.0,
                    score = stored.score.total,
                    tier = stored.recommendation.tier.label(),
                    "assessment submitted"
                );
                Ok(stored)
            }
            Err(err) => {
                warn!(error = %err, "assessment submission failed");
                Err(err)
            }
        }
    }

    /// Fetch a stored assessment.
    pub fn get(&self, id: &AssessmentId) -> Result<SubmittedAssessment, RepositoryError> {
        self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)
    }
}

/// Error surfaced by an intake session. Validation problems stay in the wizard state.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("submission failed: {0}")]
    Submission(#[from] RepositoryError),
}

/// Single-user driver that feeds actions through the wizard reducer and
/// executes the submission effect against the service.
pub struct IntakeSession<R> {
    state: WizardState,
    service: Arc<AssessmentService<R>>,
    receipt: Option<SubmittedAssessment>,
}

impl<R> IntakeSession<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(flow: IntakeFlow, service: Arc<AssessmentService<R>>) -> Self {
        Self {
            state: WizardState::new(flow),
            service,
            receipt: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// The stored assessment once submission has succeeded.
    pub fn receipt(&self) -> Option<&SubmittedAssessment> {
        self.receipt.as_ref()
    }

    pub fn update(&mut self, update: FieldUpdate) -> &WizardState {
        self.apply(WizardAction::Update(update));
        &self.state
    }

    pub fn next(&mut self) -> Result<&WizardState, IntakeError> {
        self.dispatch(WizardAction::Next)
    }

    pub fn prev(&mut self) -> &WizardState {
        self.apply(WizardAction::Prev);
        &self.state
    }

    pub fn reset(&mut self) -> &WizardState {
        self.apply(WizardAction::Reset);
        self.receipt = None;
        &self.state
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<&WizardState, IntakeError> {
        if let Some(WizardEffect::Submit(record)) = self.apply(action) {
            match self.service.submit(record) {
                Ok(stored) => {
                    self.apply(WizardAction::SubmissionSucceeded);
                    self.receipt = Some(stored);
                }
                Err(err) => {
                    self.apply(WizardAction::SubmissionFailed(err.to_string()));
                    return Err(IntakeError::Submission(err));
                }
            }
        }
        Ok(&self.state)
    }

    fn apply(&mut self, action: WizardAction) -> Option<WizardEffect> {
        let placeholder = WizardState::new(self.state.flow());
        let current = std::mem::replace(&mut self.state, placeholder);
        let Transition { state, effect } = reduce(current, action);
        self.state = state;
        effect
    }
}
