//! Patient self-assessment intake: the record model, the step wizard, and the
//! two derivations (engagement score and care recommendation) applied on submission.

pub mod domain;
pub mod recommendation;
pub mod repository;
pub mod scoring;
pub mod service;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    toggle_tag, AssessmentRecord, Frequency, Goal, Intensity, LifestyleFactor, MentalHealth,
    PersonalInfo, PhysicalHealth, Quality, Symptom, VitalsInput,
};
pub use recommendation::{
    recommend, CareTier, Recommendation, RecommendationConfig, RecommendationEngine,
};
pub use repository::{
    AssessmentId, AssessmentRepository, AssessmentSummaryView, RepositoryError,
    SubmittedAssessment,
};
pub use scoring::{
    score, EngagementScore, EngagementScorer, ScoreComponent, ScoreFactor, ScoringWeights,
};
pub use service::{AssessmentService, IntakeError, IntakeSession};
pub use wizard::{
    reduce, ContactField, FieldUpdate, IntakeFlow, MentalUpdate, PhysicalUpdate, StepKind,
    SubmissionStatus, Transition, ValidationIssue, VitalsField, WizardAction, WizardEffect,
    WizardPosition, WizardState,
};
