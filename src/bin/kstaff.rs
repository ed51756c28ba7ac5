/// KoruStaff CLI - run catalogue queries over an employee roster
///
/// Usage:
///   kstaff list                    - List the catalogue queries
///   kstaff run <query>             - Run one query and print its JSON result
///   kstaff all                     - Run every query
///   kstaff sample                  - Print the built-in roster as JSON
///
/// Global options pick the roster (`--roster`), catalogue parameters
/// (`--config`) and the instant treated as "now" (`--now`).
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use colored::*;
use koru_staff::{CatalogueConfig, QueryClock, QueryName, Snapshot, roster};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// KoruStaff - analytical queries over employee records
#[derive(Parser)]
#[command(name = "kstaff")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Roster file (JSON array of employees); defaults to the built-in sample
    #[arg(short, long, global = true)]
    roster: Option<PathBuf>,

    /// Catalogue config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Instant to treat as "now", e.g. 2024-06-15T09:00:00 (default: current time)
    #[arg(long, global = true)]
    now: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalogue queries
    List,

    /// Run a single query
    ///
    /// Examples:
    ///   kstaff run highest-paid
    ///   kstaff run headcount-by-department --roster staff.json
    Run {
        /// Query name (see `kstaff list`)
        query: String,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run every query in catalogue order
    All,

    /// Print the built-in sample roster as JSON
    Sample,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_clock(now: Option<&str>) -> Result<QueryClock> {
    match now {
        Some(text) => {
            let instant: NaiveDateTime = text
                .parse()
                .with_context(|| format!("Invalid --now timestamp: {}", text))?;
            Ok(QueryClock::at(instant))
        }
        None => Ok(QueryClock::now()),
    }
}

fn load_snapshot(
    roster_path: Option<&Path>,
    config_path: Option<&Path>,
    clock: QueryClock,
) -> Result<Snapshot> {
    let employees = match roster_path {
        Some(path) => roster::load_from_path(path, &clock)
            .with_context(|| format!("Failed to load roster {}", path.display()))?,
        None => roster::sample_roster(&clock).context("Failed to load sample roster")?,
    };

    let config = match config_path {
        Some(path) => CatalogueConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CatalogueConfig::default(),
    };

    Ok(Snapshot::new(employees, clock)?.with_config(config))
}

fn render(value: &JsonValue, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let clock = parse_clock(cli.now.as_deref())?;

    match cli.command {
        Commands::List => {
            for query in QueryName::ALL {
                println!("{:<28} {}", query.as_str().cyan(), query.description());
            }
            Ok(())
        }

        Commands::Sample => {
            let employees = roster::sample_roster(&clock).context("Failed to load sample roster")?;
            println!("{}", roster::to_json_string(&employees)?);
            Ok(())
        }

        Commands::Run { query, compact } => {
            let query: QueryName = query.parse()?;
            let snapshot = load_snapshot(cli.roster.as_deref(), cli.config.as_deref(), clock)?;
            let output = snapshot
                .run(query)
                .with_context(|| format!("Query '{}' failed", query))?;
            println!("{}", render(&output.value, compact)?);
            Ok(())
        }

        Commands::All => {
            let snapshot = load_snapshot(cli.roster.as_deref(), cli.config.as_deref(), clock)?;
            println!(
                "{} {} employees, now = {}",
                "Snapshot:".bold(),
                snapshot.len(),
                snapshot.clock().instant()
            );

            for (index, query) in QueryName::ALL.into_iter().enumerate() {
                println!();
                println!(
                    "{} {} {}",
                    format!("{:>2}.", index + 1).bright_black(),
                    query.as_str().cyan().bold(),
                    format!("- {}", query.description()).bright_black()
                );
                match snapshot.run(query) {
                    Ok(output) => println!("{}", render(&output.value, false)?),
                    Err(e) => println!("  {} {}", "Error".red().bold(), e),
                }
            }
            Ok(())
        }
    }
}
