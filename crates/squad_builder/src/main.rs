//! Squad Builder CLI
//!
//! CSV → form scores → fantasy eleven

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use squad_builder::{OnInvalid, SelectionRun};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "squad_builder")]
#[command(about = "Pick a fantasy cricket eleven from squad and match history CSVs", long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(long, short, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Score the squad and select the eleven
    Select {
        /// Squad CSV (id, name, team, role, credits[, status][, lineup_order])
        #[arg(long)]
        squad: PathBuf,

        /// Match records CSV (player_id, date, batting|points[, bowling][, fielding])
        #[arg(long)]
        records: PathBuf,

        /// YAML or JSON selector config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ground table CSV (ground, city, batting, bowling)
        #[arg(long)]
        venues: Option<PathBuf>,

        /// Ground or city to look up in the ground table
        #[arg(long, requires = "venues")]
        venue: Option<String>,

        /// Score form as of this date (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,

        /// Abort on the first invalid CSV row instead of skipping it
        #[arg(long, default_value = "false")]
        strict: bool,

        /// Also write the roster as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// List the grounds in a ground table
    Venues {
        /// Ground table CSV
        #[arg(long)]
        venues: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Failed to initialize logger")
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Select {
            squad,
            records,
            config,
            venues,
            venue,
            as_of,
            strict,
            json,
        } => {
            let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
            let run = SelectionRun {
                squad: &squad,
                records: &records,
                config: config.as_deref(),
                venues: venues.as_deref(),
                venue: venue.as_deref(),
                as_of,
                on_invalid: if strict { OnInvalid::Abort } else { OnInvalid::Skip },
            };

            let roster = squad_builder::run_selection(&run)?;
            print!("{}", squad_builder::render_table(&roster));

            if let Some(path) = json {
                squad_builder::write_json(&roster, &path)?;
                log::info!("Roster written to {}", path.display());
            }
        }

        Commands::Venues { venues } => {
            let (grounds, _) = squad_builder::load_venues(&venues, OnInvalid::Skip)?;
            for (i, v) in grounds.iter().enumerate() {
                println!(
                    "{:>3}. {} ({})  batting {:.2}  bowling {:.2}",
                    i + 1,
                    v.ground,
                    v.city,
                    v.batting,
                    v.bowling
                );
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("squad_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
