//! resonance-formcheck CLI
//!
//! Runs a JSON values document through a form controller configured from a
//! JSON rule document, and prints what the submit callback would receive.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use resonance_forms::{FormConfig, SubmitOutcome};
use resonance_formcheck::{check, load_rules, load_values};
use resonance_validate::format_validation_errors;

/// Check a form payload against a rule document.
#[derive(Parser)]
#[command(name = "resonance-formcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rule document (JSON object of field name to rule).
    rules: PathBuf,

    /// Values document (JSON object of field name to value).
    values: PathBuf,

    /// Form configuration file.
    #[arg(short, long, env = "RESONANCE_FORM_CONFIG")]
    config: Option<PathBuf>,

    /// Print the whole form state as JSON instead of the submitted values.
    #[arg(long)]
    state: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => FormConfig::from_file(path)?,
        None => FormConfig::default(),
    };
    let rules = load_rules(&cli.rules)?;
    let values = load_values(&cli.values)?;
    info!(
        rules = rules.len(),
        fields = values.len(),
        "Checking {}",
        cli.values.display()
    );

    let report = check(rules, values, &config).await;

    if cli.state {
        println!("{}", serde_json::to_string_pretty(&report.state)?);
    }

    match report.outcome {
        SubmitOutcome::Submitted => {
            if let (false, Some(values)) = (cli.state, &report.submitted) {
                println!("{}", serde_json::to_string_pretty(values)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Blocked => {
            for (field, message) in report.state.errors.iter() {
                eprintln!("  {field}: {message}");
            }
            eprintln!("{}", format_validation_errors(&report.state.errors));
            Ok(ExitCode::FAILURE)
        }
    }
}
