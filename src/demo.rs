use std::sync::Arc;

use care_intake::config::AppConfig;
use care_intake::error::AppError;
use care_intake::workflows::assessment::{
    AssessmentService, ContactField, FieldUpdate, Frequency, Goal, IntakeFlow, IntakeSession,
    Intensity, LifestyleFactor, MentalUpdate, PhysicalUpdate, Quality, StepKind, SubmissionStatus,
    Symptom, VitalsField, WizardPosition, WizardState,
};
use care_intake::workflows::monitoring::{
    Alert, AlertDiff, MetricSample, MonitoringService, ProfileId, VitalsSample, WEIGHT_METRIC,
};
use chrono::{Duration, Utc};
use clap::Args;
use tracing::warn;

use crate::infra::{InMemoryAssessmentRepository, InMemoryHistoryRepository};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Walk the returning-patient flow instead of lead capture.
    #[arg(long)]
    pub(crate) returning: bool,
    /// Skip the first simulated storage outage on submit.
    #[arg(long)]
    pub(crate) no_outage: bool,
    /// Skip the alert evaluation portion of the demo.
    #[arg(long)]
    pub(crate) skip_alerts: bool,
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    run_intake_demo(config, &args)?;
    if !args.skip_alerts {
        run_alerts_demo(config)?;
    }
    Ok(())
}

fn run_intake_demo(config: &AppConfig, args: &DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = Arc::new(AssessmentService::new(
        repository.clone(),
        config.recommendation.clone(),
    ));
    let flow = if args.returning {
        IntakeFlow::Returning
    } else {
        IntakeFlow::LeadCapture
    };
    let mut session = IntakeSession::new(flow, service);

    println!("=== Self-assessment intake ({flow:?}) ===");

    if flow == IntakeFlow::LeadCapture {
        // Advancing past empty contact details shows the blocking validation.
        session.next()?;
        print_step(session.state());
    }

    for step in flow.steps() {
        for update in sample_answers(step) {
            session.update(update);
        }
        if session.state().is_last_step() && !args.no_outage {
            repository.fail_next_insert();
        }
        match session.next() {
            Ok(state) => print_step(state),
            Err(err) => {
                warn!(error = %err, "submission failed; retrying");
                print_step(session.state());
                session.next()?;
                print_step(session.state());
            }
        }
    }

    let Some(receipt) = session.receipt() else {
        println!("Assessment was not submitted.");
        return Ok(());
    };
    let view = receipt.summary_view();
    println!("\nAssessment {} stored", view.assessment_id.0);
    println!("Engagement score: {}/100", view.score);
    for component in &receipt.score.components {
        println!("- {:+.1} {}", component.points, component.notes);
    }
    println!("Recommended tier: {}", view.tier_label);
    println!("{}", view.recommendation);
    for reason in &receipt.recommendation.rationale {
        println!("- {reason}");
    }
    Ok(())
}

fn sample_answers(step: StepKind) -> Vec<FieldUpdate> {
    match step {
        StepKind::Contact => vec![
            FieldUpdate::Contact(ContactField::Email, "jordan@example.com".to_string()),
            FieldUpdate::Contact(ContactField::FirstName, "Jordan".to_string()),
            FieldUpdate::Contact(ContactField::LastName, "Reyes".to_string()),
        ],
        StepKind::PhysicalHealth => vec![
            FieldUpdate::Vitals(VitalsField::Weight, "72".to_string()),
            FieldUpdate::Vitals(VitalsField::BloodPressure, "128/84".to_string()),
            FieldUpdate::Physical(PhysicalUpdate::ExerciseFrequency(Some(
                Frequency::Occasionally,
            ))),
            FieldUpdate::Physical(PhysicalUpdate::SleepQuality(Some(Quality::Poor))),
            FieldUpdate::Physical(PhysicalUpdate::EnergyLevel(Some(Quality::Fair))),
        ],
        StepKind::MentalHealth => vec![
            FieldUpdate::Mental(MentalUpdate::StressLevel(Some(Intensity::High))),
            FieldUpdate::Mental(MentalUpdate::MoodStability(Some(Quality::Fair))),
        ],
        StepKind::SymptomsAndGoals => vec![
            FieldUpdate::ToggleSymptom(Symptom::Fatigue),
            FieldUpdate::ToggleSymptom(Symptom::BrainFog),
            FieldUpdate::ToggleSymptom(Symptom::Insomnia),
            FieldUpdate::ToggleGoal(Goal::BetterSleep),
            FieldUpdate::ToggleGoal(Goal::IncreasedEnergy),
        ],
        StepKind::SymptomsAndLifestyle => vec![
            FieldUpdate::ToggleSymptom(Symptom::Fatigue),
            FieldUpdate::ToggleSymptom(Symptom::Headaches),
            FieldUpdate::ToggleLifestyle(LifestyleFactor::HighStress),
            FieldUpdate::ToggleLifestyle(LifestyleFactor::PoorSleep),
        ],
        StepKind::Goals => vec![
            FieldUpdate::ToggleGoal(Goal::StressReduction),
            FieldUpdate::ToggleGoal(Goal::BetterSleep),
        ],
    }
}

fn print_step(state: &WizardState) {
    match state.position() {
        WizardPosition::Step(step) => {
            let label = state.current_step().map(|kind| kind.label()).unwrap_or("");
            println!("Step {step}/{}: {label}", state.flow().max_step());
        }
        WizardPosition::Submitted => println!("Submitted."),
    }
    for issue in state.issues() {
        println!("  ! {issue}");
    }
    if let SubmissionStatus::Failed(reason) = state.submission() {
        println!("  ! submission failed: {reason}");
    }
}

fn run_alerts_demo(config: &AppConfig) -> Result<(), AppError> {
    let history = Arc::new(InMemoryHistoryRepository::default());
    let monitoring = MonitoringService::new(history, config.alerts.clone());
    let profile = ProfileId("demo-profile".to_string());
    let now = Utc::now();

    monitoring.record_metric(
        &profile,
        MetricSample {
            metric_type: WEIGHT_METRIC.to_string(),
            value: 74.2,
            unit: "kg".to_string(),
            measured_at: now - Duration::days(14),
        },
    )?;
    monitoring.record_metric(
        &profile,
        MetricSample {
            metric_type: WEIGHT_METRIC.to_string(),
            value: 71.6,
            unit: "kg".to_string(),
            measured_at: now - Duration::days(1),
        },
    )?;
    monitoring.record_vitals(
        &profile,
        VitalsSample {
            temperature: 38.1,
            heart_rate: 104,
            blood_pressure: "146/92".to_string(),
            measured_at: now - Duration::hours(6),
        },
    )?;

    println!("\n=== Health alerts ===");
    let before = monitoring.current_alerts(&profile)?;
    render_alerts(&before);

    monitoring.record_vitals(
        &profile,
        VitalsSample {
            temperature: 36.8,
            heart_rate: 74,
            blood_pressure: "122/80".to_string(),
            measured_at: now,
        },
    )?;
    let after = monitoring.current_alerts(&profile)?;
    let diff = AlertDiff::between(&before, &after);

    println!("\nAfter a normal vitals reading:");
    render_alerts(&after);
    if !diff.is_empty() {
        println!("Raised: {:?}", diff.raised);
        println!("Resolved: {:?}", diff.resolved);
    }
    Ok(())
}

pub(crate) fn render_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No active alerts.");
        return;
    }
    for alert in alerts {
        println!(
            "[{}] {} ({})",
            alert.severity.label(),
            alert.title,
            alert.detected_at.format("%Y-%m-%d %H:%M")
        );
        println!("  {}", alert.message);
        println!("  -> {}", alert.recommendation);
    }
}
