use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use proposal_core::{ReportConfig, SchemaPreviewer, run_report};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "propinspect")]
#[command(about = "Preview the first rows and the columns of a proposal spreadsheet", long_about = None)]
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
    info!(path = %path.display(), "previewing");

    let previewer = SchemaPreviewer::new(&config);

    // Load failures are printed, not propagated
    match cli.format {
        OutputFormat::Human => println!("{}", previewer.preview_or_error(&path)),
        OutputFormat::Json => {
            let output = match run_report(&previewer, &path) {
                Ok(preview) => serde_json::to_value(&preview)?,
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
