use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tax_cli::app::{self, CalcForm};
use tax_cli::{AppConfig, CalcOverrides, OutputFormat, logging};
use tax_core::{FilerStatus, PayPeriod};
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian personal income tax (PAYE) estimator.
///
/// Computes annual and monthly tax from gross income, rent paid and pension
/// contribution under the 2025 progressive bands.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about, long_about = None)]
struct Cli {
    /// TOML file with default settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive (overridden by RUST_LOG).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate tax for one filer.
    Calc {
        /// Gross income for the period, e.g. 500000 or "₦500,000".
        #[arg(long)]
        gross: String,

        /// Rent paid for the period.
        #[arg(long, default_value = "")]
        rent: String,

        /// Period the amounts cover: monthly or annual.
        #[arg(long)]
        period: Option<PayPeriod>,

        /// Filer status: salary or freelance.
        #[arg(long)]
        status: Option<FilerStatus>,

        /// Opt out of the 8% pension deduction (freelance only).
        #[arg(long)]
        no_pension: bool,

        /// Output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Show how income was spread across the bands (`--breakdown=false`
        /// turns off a configured default).
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        breakdown: Option<bool>,
    },

    /// Calculate tax for every row of a CSV file.
    Batch {
        /// CSV file of requests.
        #[arg(short, long)]
        file: PathBuf,

        /// Where to write results (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the tax band table.
    Bands,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_logging("info");

    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    if !logging::env_filter_present() {
        let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "loaded configuration");

    match cli.command {
        Command::Calc {
            gross,
            rent,
            period,
            status,
            no_pension,
            format,
            breakdown,
        } => {
            let config = config.with_overrides(CalcOverrides {
                period,
                status,
                format,
                breakdown,
            });
            let form = CalcForm::from_config(gross, rent, !no_pension, &config);
            let rendered = app::run_calc(&form, config.format, config.breakdown)?;
            println!("{rendered}");
        }
        Command::Batch { file, output } => {
            let count = match output {
                Some(path) => {
                    let out = File::create(&path)
                        .with_context(|| format!("failed to create: {}", path.display()))?;
                    app::run_batch(&file, BufWriter::new(out))?
                }
                None => app::run_batch(&file, io::stdout().lock())?,
            };
            info!("processed {count} rows from {}", file.display());
        }
        Command::Bands => println!("{}", app::run_bands()),
    }

    Ok(())
}
