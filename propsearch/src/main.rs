use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use proposal_core::{NameSearchReporter, ReportConfig, run_report};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "propsearch")]
#[command(about = "Count proposals mentioning a person in any column", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the proposal spreadsheet (defaults to public/proposal_dataset.xlsx)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(env).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let config = ReportConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    let path = cli.file.unwrap_or_else(|| config.path.clone());
    info!(path = %path.display(), target = %config.search.target, "searching proposals");

    let reporter = NameSearchReporter::new(&config).context("Invalid search target")?;
    let report = run_report(&reporter, &path)
        .with_context(|| format!("Failed to search {}", path.display()))?;

    match cli.format {
        OutputFormat::Human => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
