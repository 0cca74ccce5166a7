// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use supabase_conncheck::{
    checker::ConnectivityChecker,
    config::{self, Overrides, DEFAULT_ENV_FILE},
    logging,
    report::{self, OutputFormat},
};
use tracing::{debug, error};

/// Check that the Supabase settings are present and the REST endpoint answers.
#[derive(Debug, Parser)]
#[command(name = "conncheck", version)]
struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment [default: .env.local]
    #[arg(long, conflicts_with = "no_env_file")]
    env_file: Option<PathBuf>,

    /// Do not load any dotenv file
    #[arg(long)]
    no_env_file: bool,

    /// Table to count rows in
    #[arg(short, long)]
    resource: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long, default_value = "error")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    if !cli.no_env_file {
        let (path, required) = match &cli.env_file {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_ENV_FILE), false),
        };
        config::load_env_file(&path, required)?;
    }

    // After the env file, so a RUST_LOG set there applies.
    logging::init(&cli.log_level)?;

    let overrides = Overrides {
        resource: cli.resource,
        timeout_secs: cli.timeout,
    };
    let settings = config::load_settings(cli.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;
    debug!(
        resource = %settings.resource,
        timeout_secs = settings.timeout_secs,
        "Settings loaded"
    );

    let result = ConnectivityChecker::new(settings).check().await;

    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), &result, cli.format)
        .context("Failed to write report")?;

    Ok(result.is_success())
}
