use super::common::*;
use crate::workflows::assessment::domain::{Goal, Intensity, LifestyleFactor, Quality, Symptom};
use crate::workflows::assessment::service::IntakeError;
use crate::workflows::assessment::wizard::{
    reduce, ContactField, FieldUpdate, IntakeFlow, MentalUpdate, PhysicalUpdate, StepKind,
    SubmissionStatus, ValidationIssue, VitalsField, WizardAction, WizardEffect, WizardPosition,
    WizardState,
};
use crate::workflows::assessment::{CareTier, RepositoryError};

fn step(state: WizardState, action: WizardAction) -> WizardState {
    let transition = reduce(state, action);
    assert!(transition.effect.is_none(), "unexpected effect");
    transition.state
}

fn advance_to_last_step(mut state: WizardState) -> WizardState {
    for _ in 1..state.flow().max_step() {
        state = step(state, WizardAction::Next);
    }
    assert!(state.is_last_step());
    state
}

#[test]
fn prev_at_first_step_is_a_no_op() {
    let state = step(
        WizardState::new(IntakeFlow::Returning),
        WizardAction::Update(FieldUpdate::ToggleSymptom(Symptom::Fatigue)),
    );
    let before = state.clone();

    let after = step(state, WizardAction::Prev);

    assert_eq!(after.position(), WizardPosition::Step(1));
    assert_eq!(after, before);
}

#[test]
fn next_and_prev_walk_the_returning_flow() {
    let state = WizardState::new(IntakeFlow::Returning);
    let state = step(state, WizardAction::Next);
    assert_eq!(state.position(), WizardPosition::Step(2));
    assert_eq!(state.current_step(), Some(StepKind::PhysicalHealth));

    let state = step(state, WizardAction::Next);
    let state = step(state, WizardAction::Prev);
    assert_eq!(state.position(), WizardPosition::Step(2));
}

#[test]
fn contact_step_blocks_until_required_fields_are_present() {
    let state = step(WizardState::new(IntakeFlow::LeadCapture), WizardAction::Next);

    assert_eq!(state.position(), WizardPosition::Step(1));
    assert!(state
        .issues()
        .contains(&ValidationIssue::Required { field: "email" }));
    assert_eq!(state.issues().len(), 3);

    let state = step(
        state,
        WizardAction::Update(FieldUpdate::Contact(
            ContactField::Email,
            "jordan@".to_string(),
        )),
    );
    assert!(state
        .issues()
        .iter()
        .any(|issue| matches!(issue, ValidationIssue::MalformedEmail { .. })));

    let mut state = state;
    for (field, value) in [
        (ContactField::Email, "jordan@example.com"),
        (ContactField::FirstName, "Jordan"),
        (ContactField::LastName, "Reyes"),
    ] {
        state = step(
            state,
            WizardAction::Update(FieldUpdate::Contact(field, value.to_string())),
        );
    }
    assert!(state.issues().is_empty(), "issues clear once fixed");

    let state = step(state, WizardAction::Next);
    assert_eq!(state.position(), WizardPosition::Step(2));
}

#[test]
fn phone_is_optional() {
    let (_, mut session) = session(IntakeFlow::LeadCapture);
    fill_contact(&mut session);

    let state = session.next().expect("no submission yet");

    assert_eq!(state.position(), WizardPosition::Step(2));
    assert_eq!(
        state.draft().personal_info.as_ref().map(|info| info.phone.as_str()),
        Some("")
    );
}

#[test]
fn contact_updates_are_ignored_without_a_contact_step() {
    let state = step(
        WizardState::new(IntakeFlow::Returning),
        WizardAction::Update(FieldUpdate::Contact(
            ContactField::Email,
            "jordan@example.com".to_string(),
        )),
    );
    assert!(state.draft().personal_info.is_none());
}

#[test]
fn field_updates_reach_every_section() {
    let mut state = WizardState::new(IntakeFlow::Returning);
    for update in [
        FieldUpdate::ToggleSymptom(Symptom::BrainFog),
        FieldUpdate::ToggleLifestyle(LifestyleFactor::PoorSleep),
        FieldUpdate::ToggleGoal(Goal::BetterSleep),
        FieldUpdate::Physical(PhysicalUpdate::SleepQuality(Some(Quality::Poor))),
        FieldUpdate::Mental(MentalUpdate::AnxietyLevel(Some(Intensity::High))),
        FieldUpdate::Vitals(VitalsField::BloodPressure, "128/84".to_string()),
    ] {
        state = step(state, WizardAction::Update(update));
    }

    let draft = state.draft();
    assert!(draft.symptoms.contains(&Symptom::BrainFog));
    assert!(draft.lifestyle_factors.contains(&LifestyleFactor::PoorSleep));
    assert!(draft.goals.contains(&Goal::BetterSleep));
    assert_eq!(draft.physical_health.sleep_quality, Some(Quality::Poor));
    assert_eq!(draft.mental_health.anxiety_level, Some(Intensity::High));
    assert_eq!(draft.vitals_input.blood_pressure, "128/84");

    let cleared = step(
        state,
        WizardAction::Update(FieldUpdate::Physical(PhysicalUpdate::SleepQuality(None))),
    );
    assert_eq!(cleared.draft().physical_health.sleep_quality, None);
}

#[test]
fn toggling_a_tag_twice_restores_the_draft() {
    let state = WizardState::new(IntakeFlow::Returning);
    let original = state.draft().clone();

    let state = step(
        state,
        WizardAction::Update(FieldUpdate::ToggleGoal(Goal::Longevity)),
    );
    let state = step(
        state,
        WizardAction::Update(FieldUpdate::ToggleGoal(Goal::Longevity)),
    );

    assert_eq!(state.draft(), &original);
}

#[test]
fn next_on_last_step_emits_a_single_submit_effect() {
    let state = advance_to_last_step(WizardState::new(IntakeFlow::Returning));

    let transition = reduce(state, WizardAction::Next);

    assert_eq!(transition.state.position(), WizardPosition::Step(4));
    assert_eq!(transition.state.submission(), &SubmissionStatus::Pending);
    match transition.effect {
        Some(WizardEffect::Submit(record)) => assert_eq!(&record, transition.state.draft()),
        other => panic!("expected submit effect, got {other:?}"),
    }

    // Pending submissions swallow navigation, edits and resets.
    let pending = transition.state;
    for action in [
        WizardAction::Next,
        WizardAction::Prev,
        WizardAction::Reset,
        WizardAction::Update(FieldUpdate::ToggleGoal(Goal::Longevity)),
    ] {
        let again = reduce(pending.clone(), action);
        assert!(again.effect.is_none());
        assert_eq!(again.state, pending);
    }
}

#[test]
fn submission_resolution_moves_to_terminal_state() {
    let state = advance_to_last_step(WizardState::new(IntakeFlow::Returning));
    let pending = reduce(state, WizardAction::Next).state;

    let submitted = step(pending, WizardAction::SubmissionSucceeded);
    assert_eq!(submitted.position(), WizardPosition::Submitted);
    assert_eq!(submitted.current_step(), None);

    let still_submitted = step(submitted.clone(), WizardAction::Next);
    assert_eq!(still_submitted, submitted);

    let reset = step(submitted, WizardAction::Reset);
    assert_eq!(reset, WizardState::new(IntakeFlow::Returning));
}

#[test]
fn stray_resolutions_are_ignored() {
    let state = WizardState::new(IntakeFlow::Returning);
    let after = step(state.clone(), WizardAction::SubmissionSucceeded);
    assert_eq!(after, state);
    let after = step(state.clone(), WizardAction::SubmissionFailed("late".to_string()));
    assert_eq!(after, state);
}

#[test]
fn session_submits_exactly_once_from_last_step() {
    let (repository, mut session) = session(IntakeFlow::Returning);
    session.update(FieldUpdate::ToggleSymptom(Symptom::Fatigue));
    for _ in 1..IntakeFlow::Returning.max_step() {
        session.next().expect("navigation never submits");
    }
    assert_eq!(repository.attempts(), 0);

    let state = session.next().expect("submission succeeds");

    assert_eq!(state.position(), WizardPosition::Submitted);
    assert_eq!(repository.attempts(), 1);
    let receipt = session.receipt().expect("receipt kept");
    assert_eq!(receipt.score.total, 2);
    assert_eq!(receipt.recommendation.tier, CareTier::Baseline);

    session.next().expect("no-op after submission");
    assert_eq!(repository.attempts(), 1);
}

#[test]
fn failed_submission_preserves_draft_for_retry() {
    let (repository, mut session) = session(IntakeFlow::LeadCapture);
    fill_contact(&mut session);
    session.next().expect("contact step passes");
    session.update(FieldUpdate::Vitals(VitalsField::Weight, "81".to_string()));
    session.next().expect("physical step passes");
    session.next().expect("mental step passes");
    session.update(FieldUpdate::ToggleSymptom(Symptom::JointPain));
    let draft_before = session.state().draft().clone();

    repository.set_failing(true);
    match session.next() {
        Err(IntakeError::Submission(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable repository, got {other:?}"),
    }

    let state = session.state();
    assert!(state.is_last_step());
    assert_eq!(state.draft(), &draft_before);
    assert!(matches!(state.submission(), SubmissionStatus::Failed(_)));
    assert!(session.receipt().is_none());

    repository.set_failing(false);
    let state = session.next().expect("retry succeeds");
    assert_eq!(state.position(), WizardPosition::Submitted);
    assert_eq!(repository.attempts(), 2);
    assert_eq!(repository.stored().len(), 1);
    assert_eq!(repository.stored()[0].record, draft_before);
}

#[test]
fn reset_discards_the_draft() {
    let (_, mut session) = session(IntakeFlow::Returning);
    session.update(FieldUpdate::ToggleSymptom(Symptom::Headaches));
    session.next().expect("advance");

    let state = session.reset();

    assert_eq!(state, &WizardState::new(IntakeFlow::Returning));
}
