//! Squad Builder Library
//!
//! CSV (squad, match records, grounds) → form scores → selected eleven
//!
//! The command line front end lives in `main.rs`; everything it does is
//! available here so the pipeline can be driven from tests or other tools.

pub mod csv_input;
pub mod report;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use xi_core::{FormScorer, Roster, SelectorConfig, TeamSelector, VenueWeights};

pub use csv_input::{
    find_venue, load_match_records, load_squad, load_venues, OnInvalid, ParseStats, Venue,
};
pub use report::{render_table, roster_json, write_json, RosterTable};

/// Everything one selection run reads.
#[derive(Debug, Clone)]
pub struct SelectionRun<'a> {
    pub squad: &'a Path,
    pub records: &'a Path,
    /// YAML or JSON config; Dream11 defaults when absent
    pub config: Option<&'a Path>,
    pub venues: Option<&'a Path>,
    /// Ground or city to look up in `venues`
    pub venue: Option<&'a str>,
    pub as_of: NaiveDate,
    pub on_invalid: OnInvalid,
}

pub fn load_config(path: Option<&Path>) -> Result<SelectorConfig> {
    match path {
        Some(p) => SelectorConfig::from_path(p)
            .with_context(|| format!("Failed to load config: {}", p.display())),
        None => Ok(SelectorConfig::dream11()),
    }
}

/// Venue weights for the run: the named ground from the table, or the
/// config's own venue section.
pub fn resolve_venue(run: &SelectionRun<'_>, config: &SelectorConfig) -> Result<VenueWeights> {
    match (run.venue, run.venues) {
        (None, _) => Ok(config.venue.clone()),
        (Some(name), None) => bail!("venue '{}' given without a ground table", name),
        (Some(name), Some(path)) => {
            let (venues, _) = load_venues(path, run.on_invalid)?;
            match find_venue(&venues, name) {
                Some(v) => {
                    log::info!(
                        "Ground {} ({}): batting {:.2}, bowling {:.2}",
                        v.ground,
                        v.city,
                        v.batting,
                        v.bowling
                    );
                    Ok(v.weights(&config.venue))
                }
                None => bail!("venue '{}' not found in {}", name, path.display()),
            }
        }
    }
}

/// Load, score and select in one go.
pub fn run_selection(run: &SelectionRun<'_>) -> Result<Roster> {
    let config = load_config(run.config)?;
    let venue = resolve_venue(run, &config)?;

    let (squad, _) = load_squad(run.squad, run.on_invalid)?;
    let (records, _) = load_match_records(run.records, run.on_invalid)?;

    let scorer = FormScorer::new(config.form.clone(), run.as_of);
    let pool = scorer
        .score(&squad, &records, &venue)
        .context("Failed to score squad")?;

    TeamSelector::from_config(&config)
        .select(&pool)
        .context("Team selection failed")
}
