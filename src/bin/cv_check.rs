//! CV Check CLI
//!
//! Validates and normalizes CV data files during development.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use cv_data::{normalize, validate_cv, Checksum, CvConfig, Diagnostic};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cv-check")]
#[command(about = "Validate and normalize CV data files")]
struct Cli {
    /// Config file (defaults to cv.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print errors and warnings; exits non-zero if the CV is invalid
    Validate {
        /// CV file (defaults to the configured source)
        file: Option<PathBuf>,
        /// Hide warnings
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the normalized document
    Normalize {
        file: Option<PathBuf>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a JSON validation report
    Report {
        file: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = CvConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Validate { file, quiet } => {
            let path = file.unwrap_or_else(|| config.source_path());
            let (raw, _) = read_json(&path)?;
            let result = validate_cv(&raw);

            println!("🔍 Validating {}", path.display());
            println!();
            for error in &result.errors {
                print_diagnostic("❌", error);
            }
            if !quiet {
                for warning in &result.warnings {
                    print_diagnostic("⚠️ ", warning);
                }
            }
            if !result.errors.is_empty() || (!quiet && result.has_warnings()) {
                println!();
            }

            if result.is_valid() {
                println!("✅ Valid ({} warning(s))", result.warnings.len());
            } else {
                println!("❌ {} error(s), {} warning(s)", result.errors.len(), result.warnings.len());
            }
            Ok(result.is_valid())
        }

        Commands::Normalize { file, output } => {
            let path = file.unwrap_or_else(|| config.source_path());
            let (raw, _) = read_json(&path)?;
            let document = normalize(&raw)
                .with_context(|| format!("normalizing {}", path.display()))?;

            let json = serde_json::to_string_pretty(&document)?;
            write_output(output.as_deref(), &json)?;
            Ok(true)
        }

        Commands::Report { file, output } => {
            let path = file.unwrap_or_else(|| config.source_path());
            let (raw, checksum) = read_json(&path)?;
            let result = validate_cv(&raw);

            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "source": path.display().to_string(),
                "checksum": checksum,
                "is_valid": result.is_valid(),
                "errors": result.errors,
                "warnings": result.warnings,
                "normalizable": normalize(&raw).is_ok(),
            });

            let json = serde_json::to_string_pretty(&report)?;
            write_output(output.as_deref(), &json)?;
            Ok(true)
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<(Value, Checksum)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let raw = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok((raw, Checksum::of_text(&text)))
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("✅ Written to {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn print_diagnostic(marker: &str, diagnostic: &Diagnostic) {
    if diagnostic.path.is_empty() {
        println!("{} [{}] {}", marker, diagnostic.code, diagnostic.message);
    } else {
        println!(
            "{} [{}] {}: {}",
            marker, diagnostic.code, diagnostic.path, diagnostic.message
        );
    }
}
