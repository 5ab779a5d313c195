//! CSV ingestion for squads, match records and venues
//!
//! Headers are matched case-insensitively and may appear in any order.
//! Cell-level problems (bad numbers, unknown roles, bad dates) become
//! [`SelectionError::DataValidation`] carrying the file line; the
//! [`OnInvalid`] policy decides whether such a row is skipped and counted in
//! [`ParseStats`] or aborts the load.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use xi_core::{MatchRecord, PlayingStatus, Role, SelectionError, SquadEntry, VenueWeights};

type RowResult<T> = std::result::Result<T, SelectionError>;

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnInvalid {
    /// Log a warning, count the row as failed and continue
    #[default]
    Skip,
    /// Stop loading and return the row's error
    Abort,
}

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// Header name to column index, lowercased.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_lowercase(), i))
            .collect();
        Self { index }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn require(&self, name: &str, path: &Path) -> Result<usize> {
        match self.find(name) {
            Some(i) => Ok(i),
            None => bail!("{} has no '{}' column", path.display(), name),
        }
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_number(value: &str, column: &str, owner: &str, line: u64) -> RowResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            SelectionError::validation(
                owner,
                format!("line {}: invalid {} value '{}'", line, column, value),
            )
        })
}

fn open(path: &Path) -> Result<(csv::Reader<File>, Columns)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();
    Ok((reader, Columns::new(&headers)))
}

fn collect_rows<T>(
    reader: &mut csv::Reader<File>,
    path: &Path,
    on_invalid: OnInvalid,
    mut parse: impl FnMut(&StringRecord, u64) -> RowResult<T>,
) -> Result<(Vec<T>, ParseStats)> {
    let mut rows = Vec::new();
    let mut stats = ParseStats::default();

    for result in reader.records() {
        stats.total_rows += 1;
        let record = result.with_context(|| {
            format!("Failed to read row {} of {}", stats.total_rows, path.display())
        })?;
        // Header is line 1
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(stats.total_rows as u64 + 1);

        match parse(&record, line) {
            Ok(row) => {
                rows.push(row);
                stats.parsed += 1;
            }
            Err(e) => match on_invalid {
                OnInvalid::Skip => {
                    stats.failed += 1;
                    log::warn!("{}: {}, skipping", path.display(), e);
                }
                OnInvalid::Abort => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Invalid row at {} line {}", path.display(), line)));
                }
            },
        }
    }
    Ok((rows, stats))
}

/// Load a squad file: `id, name, team, role, credits[, status][, lineup_order]`.
///
/// Without a `status` column every player is playing; with one, an empty or
/// unknown status means not playing.
pub fn load_squad(path: &Path, on_invalid: OnInvalid) -> Result<(Vec<SquadEntry>, ParseStats)> {
    let (mut reader, cols) = open(path)?;
    let id_col = cols.require("id", path)?;
    let name_col = cols.require("name", path)?;
    let team_col = cols.require("team", path)?;
    let role_col = cols.require("role", path)?;
    let credits_col = cols.require("credits", path)?;
    let status_col = cols.find("status");
    let lineup_col = cols.find("lineup_order");

    let (entries, stats) = collect_rows(&mut reader, path, on_invalid, |r, line| {
        let id = cell(r, id_col);
        if id.is_empty() {
            return Err(SelectionError::validation(
                format!("line {}", line),
                "missing player id",
            ));
        }
        let role = cell(r, role_col)
            .parse::<Role>()
            .map_err(|e| SelectionError::validation(id, format!("line {}: {}", line, e)))?;
        let credits = parse_number(cell(r, credits_col), "credits", id, line)?;

        let mut entry = SquadEntry::new(id, cell(r, name_col), cell(r, team_col), role, credits);
        if let Some(i) = status_col {
            entry = entry.with_status(PlayingStatus::parse_lenient(cell(r, i)));
        }
        if let Some(i) = lineup_col {
            let order = cell(r, i);
            if !order.is_empty() {
                let order = order.parse::<u8>().map_err(|_| {
                    SelectionError::validation(
                        id,
                        format!("line {}: invalid lineup_order '{}'", line, order),
                    )
                })?;
                entry = entry.with_lineup_order(order);
            }
        }
        Ok(entry)
    })?;

    log::info!(
        "Loaded {} squad entries from {} ({} skipped)",
        stats.parsed,
        path.display(),
        stats.failed
    );
    Ok((entries, stats))
}

/// Load match records: `player_id, date, batting[, bowling][, fielding]`,
/// or `player_id, date, points` for composite fantasy points.
///
/// An empty `bowling` cell means the player did not bowl; an empty
/// `fielding` cell counts as 0.
pub fn load_match_records(
    path: &Path,
    on_invalid: OnInvalid,
) -> Result<(Vec<MatchRecord>, ParseStats)> {
    let (mut reader, cols) = open(path)?;
    let id_col = cols.require("player_id", path)?;
    let date_col = cols.require("date", path)?;
    let batting_col = cols.find("batting");
    let points_col = cols.find("points");
    let bowling_col = cols.find("bowling");
    let fielding_col = cols.find("fielding");

    let (value_col, composite) = match (batting_col, points_col) {
        (Some(i), _) => (i, false),
        (None, Some(i)) => (i, true),
        (None, None) => bail!("{} has neither a 'batting' nor a 'points' column", path.display()),
    };

    let (records, stats) = collect_rows(&mut reader, path, on_invalid, |r, line| {
        let id = cell(r, id_col);
        if id.is_empty() {
            return Err(SelectionError::validation(
                format!("line {}", line),
                "missing player id",
            ));
        }
        let raw_date = cell(r, date_col);
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            SelectionError::validation(id, format!("line {}: invalid date '{}'", line, raw_date))
        })?;

        if composite {
            let points = parse_number(cell(r, value_col), "points", id, line)?;
            return Ok(MatchRecord::composite(id, date, points));
        }

        let batting = parse_number(cell(r, value_col), "batting", id, line)?;
        let bowling = match bowling_col.map(|i| cell(r, i)) {
            Some(v) if !v.is_empty() => Some(parse_number(v, "bowling", id, line)?),
            _ => None,
        };
        let fielding = match fielding_col.map(|i| cell(r, i)) {
            Some(v) if !v.is_empty() => parse_number(v, "fielding", id, line)?,
            _ => 0.0,
        };
        Ok(MatchRecord::new(id, date, batting, bowling, fielding))
    })?;

    log::info!(
        "Loaded {} match records from {} ({} skipped)",
        stats.parsed,
        path.display(),
        stats.failed
    );
    Ok((records, stats))
}

/// One row of the ground table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub ground: String,
    pub city: String,
    pub batting: f64,
    pub bowling: f64,
}

impl Venue {
    /// This ground's weights, keeping the home-team settings of `base`.
    pub fn weights(&self, base: &VenueWeights) -> VenueWeights {
        VenueWeights {
            ground: Some(self.ground.clone()),
            batting_weight: self.batting,
            bowling_weight: self.bowling,
            ..base.clone()
        }
    }
}

/// Load the ground table: `ground, city, batting, bowling`.
pub fn load_venues(path: &Path, on_invalid: OnInvalid) -> Result<(Vec<Venue>, ParseStats)> {
    let (mut reader, cols) = open(path)?;
    let ground_col = cols.require("ground", path)?;
    let city_col = cols.find("city");
    let batting_col = cols.require("batting", path)?;
    let bowling_col = cols.require("bowling", path)?;

    collect_rows(&mut reader, path, on_invalid, |r, line| {
        let ground = cell(r, ground_col);
        if ground.is_empty() {
            return Err(SelectionError::validation(format!("line {}", line), "missing ground"));
        }
        let batting = parse_number(cell(r, batting_col), "batting", ground, line)?;
        let bowling = parse_number(cell(r, bowling_col), "bowling", ground, line)?;
        if batting < 0.0 || bowling < 0.0 {
            return Err(SelectionError::validation(
                ground,
                format!("line {}: negative ground weight", line),
            ));
        }
        Ok(Venue {
            ground: ground.to_string(),
            city: city_col.map(|i| cell(r, i).to_string()).unwrap_or_default(),
            batting,
            bowling,
        })
    })
}

/// Exact (case-insensitive) ground or city match first, then the first
/// ground whose name contains `name`.
pub fn find_venue<'v>(venues: &'v [Venue], name: &str) -> Option<&'v Venue> {
    let needle = name.trim().to_lowercase();
    venues
        .iter()
        .find(|v| v.ground.to_lowercase() == needle || v.city.to_lowercase() == needle)
        .or_else(|| venues.iter().find(|v| v.ground.to_lowercase().contains(&needle)))
}
