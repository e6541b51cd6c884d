use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::AssessmentRecord;
use super::recommendation::{CareTier, Recommendation};
use super::scoring::EngagementScore;

/// Identifier wrapper for submitted assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// A finalized record together with everything derived from it at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAssessment {
    pub id: AssessmentId,
    pub record: AssessmentRecord,
    pub score: EngagementScore,
    pub recommendation: Recommendation,
    pub submitted_at: DateTime<Utc>,
}

impl SubmittedAssessment {
    pub fn summary_view(&self) -> AssessmentSummaryView {
        AssessmentSummaryView {
            assessment_id: self.id.clone(),
            score: self.score.total,
            tier: self.recommendation.tier,
            tier_label: self.recommendation.tier.label(),
            recommendation: self.recommendation.message.clone(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(
        &self,
        assessment: SubmittedAssessment,
    ) -> Result<SubmittedAssessment, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<SubmittedAssessment>, RepositoryError>;
}

/// Error enumeration for persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact projection for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummaryView {
    pub assessment_id: AssessmentId,
    pub score: u8,
    pub tier: CareTier,
    pub tier_label: &'static str,
    pub recommendation: String,
}
