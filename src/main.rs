use clap::{Args, Parser, Subcommand};
use internship_intake::config::{ApiConfig, AppConfig};
use internship_intake::error::AppError;
use internship_intake::telemetry;
use internship_intake::workflows::registration::{
    FormController, GuardDecision, HttpGateway, MemoryNotifier, RegistrationInput,
    RegistrationSchema, RouteGuard, SubmitOutcome, ValidationErrors,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

const EXIT_INVALID: u8 = 2;
const EXIT_NOT_SUCCESSFUL: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "internship-intake",
    about = "Validate and submit internship registration forms from the command line",
    version
)]
struct Cli {
    /// Override the configured registration API base URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a registration form without sending it
    Validate(FormArgs),
    /// Validate a registration form and submit it to the registration API
    Submit(FormArgs),
    /// Ask the session API whether the public pages should redirect
    Guard,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// JSON file holding the form fields, keyed by their wire names
    file: PathBuf,
    /// Print field errors as a JSON object instead of one line per field
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("application error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_cli() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.api_base_url.as_deref() {
        config.api.base_url = ApiConfig::normalize_base_url(base_url)?;
    }
    telemetry::init(&config.telemetry, config.environment)?;

    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Submit(args) => run_submit(args, &config).await,
        Command::Guard => run_guard(&config).await,
    }
}

fn read_form(path: &Path) -> Result<RegistrationInput, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn render_errors(errors: &ValidationErrors, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(errors)?);
    } else {
        for (field, message) in errors.iter() {
            println!("{field}: {message}");
        }
    }
    Ok(())
}

fn run_validate(args: FormArgs) -> Result<ExitCode, AppError> {
    let input = read_form(&args.file)?;
    match RegistrationSchema::new().validate(&input) {
        Ok(_) => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            render_errors(&errors, args.json)?;
            Ok(ExitCode::from(EXIT_INVALID))
        }
    }
}

async fn run_submit(args: FormArgs, config: &AppConfig) -> Result<ExitCode, AppError> {
    let input = read_form(&args.file)?;
    let gateway = Arc::new(HttpGateway::new(config.api.clone())?);
    let notifier = Arc::new(MemoryNotifier::default());
    let mut controller = FormController::with_gateway(gateway, notifier.clone());
    controller.load(input);

    info!(base_url = %config.api.base_url, "submitting registration");
    let outcome = controller.submit().await;
    if let Some(notice) = notifier.last() {
        println!("{}", notice.message);
    }

    match outcome {
        SubmitOutcome::Submitted(application_id) => {
            println!("application id: {application_id}");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Invalid(errors) => {
            render_errors(&errors, args.json)?;
            Ok(ExitCode::from(EXIT_INVALID))
        }
        SubmitOutcome::NotSuccessful | SubmitOutcome::Suppressed => {
            Ok(ExitCode::from(EXIT_NOT_SUCCESSFUL))
        }
    }
}

async fn run_guard(config: &AppConfig) -> Result<ExitCode, AppError> {
    let gateway = Arc::new(HttpGateway::new(config.api.clone())?);
    let guard = RouteGuard::new(gateway, config.guard.redirect_to.clone());

    match guard.check().await {
        GuardDecision::Redirect(path) => println!("redirect {path}"),
        GuardDecision::Render => println!("render"),
    }
    Ok(ExitCode::SUCCESS)
}
