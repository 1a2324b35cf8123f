//! # frota
//!
//! Command-line front end for the Frota plate grammar and vehicle rules.
//!
//! ## Usage
//! ```bash
//! frota detect abc2e                 # ABC2E  new (Mercosul)
//! frota mask abc1234                 # ABC-1234
//! frota validate ABC1234 BRA2E19 X1  # exit 1 if any plate is invalid
//! frota type abc12345                # replay typing into the plate field
//! frota vehicle --plate bra2e19 --brand Fiat --model Pulse --year 2024 --color Azul
//! frota search vehicles.json --query gol --sort plate --json
//! ```
//!
//! ## Exit Codes
//! - `0` - everything checked was valid
//! - `1` - at least one plate or draft was rejected
//! - `2` - configuration, file or argument error

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use frota_core::{PlateFormat, VehicleDraft, VehicleFilter, VehicleSort};
use tracing::error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::commands::Report;
use crate::config::{FrotaConfig, OutputFormat, DEFAULT_LOG_FILTER};
use crate::error::CliResult;

/// Brazilian plate and vehicle checks
#[derive(Parser, Debug)]
#[command(name = "frota", version)]
#[command(about = "Brazilian plate and vehicle checks", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the grammar of a (possibly partial) plate
    Detect {
        plate: String,
    },

    /// Print the display form of a plate
    Mask {
        plate: String,

        /// Mask as this format instead of detecting it (old | new)
        #[arg(long)]
        format: Option<PlateFormat>,
    },

    /// Validate complete plates
    Validate {
        #[arg(required = true)]
        plates: Vec<String>,
    },

    /// Replay typing into the plate field, one keystroke at a time
    Type {
        keystrokes: String,
    },

    /// Validate a vehicle draft
    Vehicle {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        color: String,
        /// Photo URI (file://, content://, http(s)://)
        #[arg(long)]
        photo: Option<String>,
    },

    /// Filter a JSON file of vehicles
    Search {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        year_from: Option<i32>,
        #[arg(long)]
        year_to: Option<i32>,
        /// Only plates of this format (old | new)
        #[arg(long)]
        format: Option<PlateFormat>,
        /// newest | oldest | plate | brand | year-desc | year-asc
        #[arg(long, default_value = "newest")]
        sort: VehicleSort,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(
        cli.config.clone(),
        |key| std::env::var(key).ok(),
        env_filter(DEFAULT_LOG_FILTER),
        std::io::stderr,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("frota: {e}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging.filter);

    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    match run(cli.command, &config, output) {
        Ok(report) => {
            if !report.text.is_empty() {
                println!("{}", report.text);
            }
            if report.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("frota: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command, config: &FrotaConfig, output: OutputFormat) -> CliResult<Report> {
    let catalog = config.catalog();

    match command {
        Command::Detect { plate } => commands::detect(&plate, output),
        Command::Mask { plate, format } => commands::mask(&plate, format, output),
        Command::Validate { plates } => commands::validate(&plates, &catalog, output),
        Command::Type { keystrokes } => commands::replay_typing(&keystrokes, output),
        Command::Vehicle {
            plate,
            brand,
            model,
            year,
            color,
            photo,
        } => {
            let draft = VehicleDraft {
                plate,
                brand,
                model,
                year,
                color,
                photo_uri: photo,
            };
            commands::vehicle(&draft, Utc::now(), &catalog, output)
        }
        Command::Search {
            file,
            query,
            brand,
            year_from,
            year_to,
            format,
            sort,
        } => {
            let filter = VehicleFilter {
                query,
                brand,
                year_from,
                year_to,
                format,
                sort,
            };
            commands::search(&file, &filter, output)
        }
    }
}

/// `RUST_LOG` if set, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Loads the config under a scoped subscriber.
///
/// The global subscriber needs `logging.filter` from the config, so anything
/// logged while loading (ignored overrides, the file being read) goes through
/// this one instead.
fn load_config<W>(
    path: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
    filter: EnvFilter,
    writer: W,
) -> CliResult<FrotaConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || FrotaConfig::load(path, lookup))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Otherwise the config's `logging.filter` (default `warn,frota=info`)
///
/// Logs go to stderr; stdout is reserved for reports.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
