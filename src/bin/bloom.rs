//! Bloom CLI - Command-line front end for Blooming Health
//!
//! Commands:
//! - show: Print profile, metrics, BMI and the last assessment
//! - set: Update one profile or metrics field (persisted immediately)
//! - analyze: Run the delayed analysis and optionally save it
//! - reset: Clear all persisted state
//! - doctor: Diagnose configuration and stored data

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use blooming_health::report::ReportBuilder;
use blooming_health::storage::{ASSESSMENT_KEY, METRICS_KEY, PROFILE_KEY};
use blooming_health::types::{MetricField, ProfileField, RiskAssessment};
use blooming_health::{
    analyze, DailyMetrics, DashboardConfig, DashboardError, FileStorage, Gender, HealthStore,
    KeyValueStorage, Profile, BLOOM_VERSION, PRODUCER_NAME,
};

/// Bloom - personal health dashboard
#[derive(Parser)]
#[command(name = "bloom")]
#[command(version = BLOOM_VERSION)]
#[command(
    about = "Track your profile and daily metrics and get a wellness assessment",
    long_about = None
)]
struct Cli {
    /// Data directory (overrides BLOOM_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current state
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update one field
    Set {
        #[arg(value_enum)]
        field: Field,

        /// New value (gender: male, female or other)
        value: String,
    },

    /// Run the wellness analysis
    Analyze {
        /// Persist profile, metrics and the new assessment
        #[arg(long)]
        save: bool,

        /// Artificial delay in milliseconds (overrides BLOOM_ANALYSIS_DELAY_MS)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all persisted data
    Reset,

    /// Diagnose configuration and stored data
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Age,
    Gender,
    Height,
    Weight,
    Calories,
    Exercise,
    Sleep,
    Steps,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BloomCliError> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Show { json } => cmd_show(&config, json),
        Commands::Set { field, value } => cmd_set(&config, field, &value),
        Commands::Analyze { save, delay_ms, json } => {
            if let Some(ms) = delay_ms {
                config.analysis_delay = Duration::from_millis(ms);
            }
            cmd_analyze(&config, save, json).await
        }
        Commands::Reset => cmd_reset(&config),
        Commands::Doctor { json } => cmd_doctor(&config, json),
    }
}

fn open_store(config: &DashboardConfig) -> HealthStore<FileStorage> {
    HealthStore::load(FileStorage::new(&config.data_dir))
}

fn cmd_show(config: &DashboardConfig, json: bool) -> Result<(), BloomCliError> {
    let store = open_store(config);

    if json {
        let state = serde_json::json!({
            "profile": store.profile(),
            "metrics": store.metrics(),
            "bmi": store.bmi(),
            "assessment": store.assessment(),
        });
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let profile = store.profile();
    let metrics = store.metrics();

    println!("Profile");
    println!("=======");
    println!("Age:       {}", profile.age);
    println!("Gender:    {}", profile.gender);
    println!("Height:    {} cm", profile.height_cm);
    println!("Weight:    {} kg", profile.weight_kg);
    println!("BMI:       {:.1}", store.bmi());
    println!();
    println!("Daily Metrics");
    println!("=============");
    println!("Calories:  {}", metrics.calories);
    println!("Exercise:  {} min", metrics.exercise_minutes);
    println!("Sleep:     {} h", metrics.sleep_hours);
    println!("Steps:     {}", metrics.steps);
    println!();

    match store.assessment() {
        Some(assessment) => print_assessment(assessment),
        None => println!("No analysis yet. Run 'bloom analyze' to get your assessment."),
    }

    Ok(())
}

fn cmd_set(config: &DashboardConfig, field: Field, value: &str) -> Result<(), BloomCliError> {
    let mut store = open_store(config);

    match field {
        Field::Age => store.update_profile(ProfileField::Age(parse_number(value)?))?,
        Field::Gender => store.update_profile(ProfileField::Gender(value.parse::<Gender>()?))?,
        Field::Height => store.update_profile(ProfileField::HeightCm(parse_number(value)?))?,
        Field::Weight => store.update_profile(ProfileField::WeightKg(parse_number(value)?))?,
        Field::Calories => store.update_metrics(MetricField::Calories(parse_number(value)?))?,
        Field::Exercise => {
            store.update_metrics(MetricField::ExerciseMinutes(parse_number(value)?))?
        }
        Field::Sleep => store.update_metrics(MetricField::SleepHours(parse_number(value)?))?,
        Field::Steps => store.update_metrics(MetricField::Steps(parse_number(value)?))?,
    }

    Ok(())
}

async fn cmd_analyze(
    config: &DashboardConfig,
    save: bool,
    json: bool,
) -> Result<(), BloomCliError> {
    let mut store = open_store(config);

    if !json {
        println!("Analyzing your health data...");
    }
    let assessment = analyze(&mut store, config.analysis_delay).await;

    if save {
        store.save()?;
    }

    if json {
        let report = ReportBuilder::new()
            .build_to_json(&store)?
            .ok_or(BloomCliError::NoAssessment)?;
        println!("{}", report);
    } else {
        println!("BMI: {:.1}", store.bmi());
        print_assessment(&assessment);
        if save {
            println!("\nHealth data saved.");
        }
    }

    Ok(())
}

fn cmd_reset(config: &DashboardConfig) -> Result<(), BloomCliError> {
    let mut store = open_store(config);
    store.reset()?;
    println!("Cleared stored data in {}", config.data_dir.display());
    Ok(())
}

fn cmd_doctor(config: &DashboardConfig, json: bool) -> Result<(), BloomCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} {}", PRODUCER_NAME, BLOOM_VERSION),
    });

    checks.push(if config.data_dir.is_dir() {
        DoctorCheck {
            name: "data_dir".to_string(),
            status: CheckStatus::Ok,
            message: format!("Data directory {}", config.data_dir.display()),
        }
    } else {
        DoctorCheck {
            name: "data_dir".to_string(),
            status: CheckStatus::Warning,
            message: format!(
                "Data directory {} does not exist yet (created on first save)",
                config.data_dir.display()
            ),
        }
    });

    checks.push(DoctorCheck {
        name: "analysis_delay".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} ms", config.analysis_delay.as_millis()),
    });

    let storage = FileStorage::new(&config.data_dir);
    checks.push(check_entry::<Profile>(&storage, PROFILE_KEY));
    checks.push(check_entry::<DailyMetrics>(&storage, METRICS_KEY));
    checks.push(check_entry::<Option<RiskAssessment>>(&storage, ASSESSMENT_KEY));

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: BLOOM_VERSION.to_string(),
        data_dir: config.data_dir.clone(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Bloom Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(BloomCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn check_entry<T: serde::de::DeserializeOwned>(storage: &FileStorage, key: &str) -> DoctorCheck {
    let (status, message) = match storage.get(key) {
        Ok(None) => (CheckStatus::Ok, "Not stored yet (defaults in use)".to_string()),
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(_) => (CheckStatus::Ok, "Stored entry is valid".to_string()),
            Err(e) => (
                CheckStatus::Warning,
                format!("Stored entry is unparsable and will be ignored: {}", e),
            ),
        },
        Err(e) => (CheckStatus::Error, format!("Cannot read stored entry: {}", e)),
    };

    DoctorCheck {
        name: key.to_string(),
        status,
        message,
    }
}

fn print_assessment(assessment: &RiskAssessment) {
    println!("Assessment");
    println!("==========");
    println!("Risk level:     {}", assessment.risk_level);
    println!("Risk score:     {:.0}%", assessment.risk_score * 100.0);
    println!("Wellness score: {:.0}%", assessment.wellness_score * 100.0);
    println!("BMI category:   {}", assessment.bmi_category);
    println!("Age factor:     {}", assessment.age_factor);
    println!("\nRecommendations:");
    for recommendation in &assessment.recommendations {
        println!("  - {}", recommendation);
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, BloomCliError> {
    value
        .trim()
        .parse()
        .map_err(|_| BloomCliError::InvalidNumber(value.to_string()))
}

// Error types

#[derive(Debug)]
enum BloomCliError {
    Dashboard(DashboardError),
    Json(serde_json::Error),
    InvalidNumber(String),
    NoAssessment,
    DoctorFailed,
}

impl From<DashboardError> for BloomCliError {
    fn from(e: DashboardError) -> Self {
        BloomCliError::Dashboard(e)
    }
}

impl From<blooming_health::validation::ValidationError> for BloomCliError {
    fn from(e: blooming_health::validation::ValidationError) -> Self {
        BloomCliError::Dashboard(DashboardError::Validation(e))
    }
}

impl From<serde_json::Error> for BloomCliError {
    fn from(e: serde_json::Error) -> Self {
        BloomCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BloomCliError> for CliError {
    fn from(e: BloomCliError) -> Self {
        match e {
            BloomCliError::Dashboard(DashboardError::Validation(e)) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Value is outside the accepted range".to_string()),
            },
            BloomCliError::Dashboard(DashboardError::Config(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Check BLOOM_* environment variables".to_string()),
            },
            BloomCliError::Dashboard(e) => CliError {
                code: "STORAGE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the data directory path and permissions".to_string()),
            },
            BloomCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            BloomCliError::InvalidNumber(value) => CliError {
                code: "INVALID_NUMBER".to_string(),
                message: format!("Not a valid number: {}", value),
                hint: Some("Pass a plain number, e.g. 'bloom set weight 72.5'".to_string()),
            },
            BloomCliError::NoAssessment => CliError {
                code: "NO_ASSESSMENT".to_string(),
                message: "No analysis available".to_string(),
                hint: Some("Run 'bloom analyze'".to_string()),
            },
            BloomCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    data_dir: PathBuf,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

