use std::path::PathBuf;

use care_intake::config::AppConfig;
use care_intake::error::AppError;
use care_intake::telemetry;
use care_intake::workflows::assessment::{
    AssessmentRecord, EngagementScorer, RecommendationEngine,
};
use care_intake::workflows::monitoring::{AlertEngine, HistoryImporter};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use crate::demo::{run_demo, DemoArgs};

#[derive(Parser, Debug)]
#[command(
    name = "care-intake",
    about = "Score patient self-assessments and evaluate vitals history from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a saved assessment record and print its care recommendation
    Assess(AssessArgs),
    /// Evaluate vitals and metric CSV exports for alerts
    Alerts(AlertsArgs),
    /// Walk through a scripted intake session and alert evaluation
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Path to an assessment record in JSON form
    #[arg(long)]
    input: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct AlertsArgs {
    /// Vitals CSV export (Temperature,Heart Rate,Blood Pressure,Measured At)
    #[arg(long)]
    vitals: Option<PathBuf>,
    /// Metrics CSV export (Metric Type,Value,Unit,Measured At)
    #[arg(long)]
    metrics: Option<PathBuf>,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    info!(environment = ?config.environment, "care intake ready");

    match cli.command {
        Command::Assess(args) => run_assess(&config, args),
        Command::Alerts(args) => run_alerts(&config, args),
        Command::Demo(args) => run_demo(&config, args),
    }
}

fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let record: AssessmentRecord = serde_json::from_str(&raw)?;

    let score = EngagementScorer::default().breakdown(&record);
    let recommendation = RecommendationEngine::new(config.recommendation.clone()).recommend(&record);

    if args.json {
        let payload = json!({
            "score": score,
            "recommendation": recommendation,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Engagement score: {}/100", score.total);
    for component in &score.components {
        println!("- {:+.1} {}", component.points, component.notes);
    }
    println!(
        "\nRecommended tier: {} ({:?})",
        recommendation.tier.label(),
        recommendation.tier
    );
    println!("{}", recommendation.message);
    if !recommendation.rationale.is_empty() {
        println!("\nWhy");
        for reason in &recommendation.rationale {
            println!("- {reason}");
        }
    }
    Ok(())
}

fn run_alerts(config: &AppConfig, args: AlertsArgs) -> Result<(), AppError> {
    let vitals = match &args.vitals {
        Some(path) => HistoryImporter::vitals_from_path(path)?,
        None => Vec::new(),
    };
    let metrics = match &args.metrics {
        Some(path) => HistoryImporter::metrics_from_path(path)?,
        None => Vec::new(),
    };

    let alerts = AlertEngine::new(config.alerts.clone()).evaluate(&metrics, &vitals);
    info!(
        vitals = vitals.len(),
        metrics = metrics.len(),
        alerts = alerts.len(),
        "history evaluated"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    crate::demo::render_alerts(&alerts);
    Ok(())
}
