//! Multi-step intake as a pure reducer.
//!
//! `reduce` never performs I/O. Reaching the end of the last step yields a
//! [`WizardEffect::Submit`] that the caller executes and then reports back with
//! `SubmissionSucceeded` or `SubmissionFailed`.

use serde::{Deserialize, Serialize};

use super::domain::{
    is_provided, toggle_tag, AssessmentRecord, Frequency, Goal, Intensity, LifestyleFactor,
    PersonalInfo, Quality, Symptom,
};

/// Step orderings. Both flows have four steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeFlow {
    /// Anonymous visitor; collects contact details first.
    LeadCapture,
    /// Signed-in patient; no contact step.
    Returning,
}

impl IntakeFlow {
    pub const fn steps(self) -> [StepKind; 4] {
        match self {
            IntakeFlow::LeadCapture => [
                StepKind::Contact,
                StepKind::PhysicalHealth,
                StepKind::MentalHealth,
                StepKind::SymptomsAndGoals,
            ],
            IntakeFlow::Returning => [
                StepKind::SymptomsAndLifestyle,
                StepKind::PhysicalHealth,
                StepKind::MentalHealth,
                StepKind::Goals,
            ],
        }
    }

    pub const fn max_step(self) -> u8 {
        self.steps().len() as u8
    }

    fn empty_draft(self) -> AssessmentRecord {
        match self {
            IntakeFlow::LeadCapture => AssessmentRecord::empty_with_contact(),
            IntakeFlow::Returning => AssessmentRecord::empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Contact,
    /// Vitals plus exercise, sleep and energy.
    PhysicalHealth,
    MentalHealth,
    SymptomsAndGoals,
    SymptomsAndLifestyle,
    Goals,
}

impl StepKind {
    pub const fn label(self) -> &'static str {
        match self {
            StepKind::Contact => "Contact Information",
            StepKind::PhysicalHealth => "Vitals & Physical Health",
            StepKind::MentalHealth => "Mental Health",
            StepKind::SymptomsAndGoals => "Symptoms & Goals",
            StepKind::SymptomsAndLifestyle => "Symptoms & Lifestyle",
            StepKind::Goals => "Health Goals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardPosition {
    /// 1-based step index.
    Step(u8),
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalUpdate {
    ExerciseFrequency(Option<Frequency>),
    SleepQuality(Option<Quality>),
    EnergyLevel(Option<Quality>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentalUpdate {
    StressLevel(Option<Intensity>),
    MoodStability(Option<Quality>),
    AnxietyLevel(Option<Intensity>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalsField {
    Weight,
    Height,
    BloodPressure,
    RestingHeartRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    FirstName,
    LastName,
    Phone,
}

/// One typed edit to the draft, grouped by form section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    ToggleSymptom(Symptom),
    ToggleLifestyle(LifestyleFactor),
    ToggleGoal(Goal),
    Physical(PhysicalUpdate),
    Mental(MentalUpdate),
    Vitals(VitalsField, String),
    Contact(ContactField, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    Update(FieldUpdate),
    Next,
    Prev,
    Reset,
    SubmissionSucceeded,
    SubmissionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    Submit(AssessmentRecord),
}

/// User-facing problems with a step's required fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("email address '{value}' is not valid")]
    MalformedEmail { value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    flow: IntakeFlow,
    position: WizardPosition,
    draft: AssessmentRecord,
    issues: Vec<ValidationIssue>,
    submission: SubmissionStatus,
}

impl WizardState {
    pub fn new(flow: IntakeFlow) -> Self {
        Self {
            flow,
            position: WizardPosition::Step(1),
            draft: flow.empty_draft(),
            issues: Vec::new(),
            submission: SubmissionStatus::Idle,
        }
    }

    pub fn flow(&self) -> IntakeFlow {
        self.flow
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    pub fn draft(&self) -> &AssessmentRecord {
        &self.draft
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// The step currently shown, or `None` once submitted.
    pub fn current_step(&self) -> Option<StepKind> {
        match self.position {
            WizardPosition::Step(n) => self.flow.steps().get(usize::from(n) - 1).copied(),
            WizardPosition::Submitted => None,
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.position == WizardPosition::Step(self.flow.max_step())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WizardState,
    pub effect: Option<WizardEffect>,
}

impl Transition {
    fn stay(state: WizardState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

pub fn reduce(mut state: WizardState, action: WizardAction) -> Transition {
    let step = match state.position {
        WizardPosition::Step(n) => n,
        WizardPosition::Submitted => {
            return match action {
                WizardAction::Reset => Transition::stay(WizardState::new(state.flow)),
                _ => Transition::stay(state),
            };
        }
    };
    let pending = state.submission == SubmissionStatus::Pending;

    match action {
        // An in-flight submission can only resolve; it cannot be cancelled or edited.
        WizardAction::Reset | WizardAction::Update(_) | WizardAction::Prev | WizardAction::Next
            if pending =>
        {
            Transition::stay(state)
        }
        WizardAction::Reset => Transition::stay(WizardState::new(state.flow)),
        WizardAction::Update(update) => {
            apply_update(&mut state.draft, update);
            if !state.issues.is_empty() {
                state.issues = step_issues(&state.draft, state.current_step());
            }
            Transition::stay(state)
        }
        WizardAction::Prev => {
            if step > 1 {
                state.position = WizardPosition::Step(step - 1);
                state.issues.clear();
            }
            Transition::stay(state)
        }
        WizardAction::Next => {
            let issues = step_issues(&state.draft, state.current_step());
            if !issues.is_empty() {
                state.issues = issues;
                return Transition::stay(state);
            }
            state.issues.clear();

            if step < state.flow.max_step() {
                state.position = WizardPosition::Step(step + 1);
                return Transition::stay(state);
            }

            let outstanding: Vec<ValidationIssue> = state
                .flow
                .steps()
                .into_iter()
                .flat_map(|kind| step_issues(&state.draft, Some(kind)))
                .collect();
            if !outstanding.is_empty() {
                state.issues = outstanding;
                return Transition::stay(state);
            }

            state.submission = SubmissionStatus::Pending;
            let record = state.draft.clone();
            Transition {
                state,
                effect: Some(WizardEffect::Submit(record)),
            }
        }
        WizardAction::SubmissionSucceeded => {
            if pending {
                state.position = WizardPosition::Submitted;
                state.submission = SubmissionStatus::Idle;
            }
            Transition::stay(state)
        }
        WizardAction::SubmissionFailed(reason) => {
            if pending {
                state.submission = SubmissionStatus::Failed(reason);
            }
            Transition::stay(state)
        }
    }
}

fn apply_update(draft: &mut AssessmentRecord, update: FieldUpdate) {
    match update {
        FieldUpdate::ToggleSymptom(tag) => draft.symptoms = toggle_tag(&draft.symptoms, tag),
        FieldUpdate::ToggleLifestyle(tag) => {
            draft.lifestyle_factors = toggle_tag(&draft.lifestyle_factors, tag)
        }
        FieldUpdate::ToggleGoal(tag) => draft.goals = toggle_tag(&draft.goals, tag),
        FieldUpdate::Physical(update) => {
            let physical = &mut draft.physical_health;
            match update {
                PhysicalUpdate::ExerciseFrequency(value) => physical.exercise_frequency = value,
                PhysicalUpdate::SleepQuality(value) => physical.sleep_quality = value,
                PhysicalUpdate::EnergyLevel(value) => physical.energy_level = value,
            }
        }
        FieldUpdate::Mental(update) => {
            let mental = &mut draft.mental_health;
            match update {
                MentalUpdate::StressLevel(value) => mental.stress_level = value,
                MentalUpdate::MoodStability(value) => mental.mood_stability = value,
                MentalUpdate::AnxietyLevel(value) => mental.anxiety_level = value,
            }
        }
        FieldUpdate::Vitals(field, value) => {
            let vitals = &mut draft.vitals_input;
            let slot = match field {
                VitalsField::Weight => &mut vitals.weight,
                VitalsField::Height => &mut vitals.height,
                VitalsField::BloodPressure => &mut vitals.blood_pressure,
                VitalsField::RestingHeartRate => &mut vitals.resting_heart_rate,
            };
            *slot = value;
        }
        // Flows without a contact step have no personal info to edit.
        FieldUpdate::Contact(field, value) => {
            if let Some(info) = draft.personal_info.as_mut() {
                let slot = match field {
                    ContactField::Email => &mut info.email,
                    ContactField::FirstName => &mut info.first_name,
                    ContactField::LastName => &mut info.last_name,
                    ContactField::Phone => &mut info.phone,
                };
                *slot = value;
            }
        }
    }
}

fn step_issues(draft: &AssessmentRecord, step: Option<StepKind>) -> Vec<ValidationIssue> {
    match (step, draft.personal_info.as_ref()) {
        (Some(StepKind::Contact), Some(info)) => contact_issues(info),
        _ => Vec::new(),
    }
}

fn contact_issues(info: &PersonalInfo) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if !is_provided(&info.email) {
        issues.push(ValidationIssue::Required { field: "email" });
    } else if !looks_like_email(info.email.trim()) {
        issues.push(ValidationIssue::MalformedEmail {
            value: info.email.trim().to_string(),
        });
    }
    if !is_provided(&info.first_name) {
        issues.push(ValidationIssue::Required {
            field: "first name",
        });
    }
    if !is_provided(&info.last_name) {
        issues.push(ValidationIssue::Required { field: "last name" });
    }
    issues
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
