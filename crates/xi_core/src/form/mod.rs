//! # Form Scorer
//!
//! Turns a player's match history into one scalar form score.
//!
//! ## Pipeline
//! 1. Window: only matches in `[as_of - lookback_months, as_of]` count.
//! 2. Recency: newest match first, weight `exp(-decay_rate * k)` for the
//!    k-th most recent match.
//! 3. Per discipline averages (batting, bowling over bowled matches only,
//!    fielding) form a [`FormLine`].
//! 4. Optional percentile normalization across the pool.
//! 5. Missing history policy, then venue/role weighting into the scalar.

mod percentile;

pub use percentile::{percentile_of_score, rank_in_place};

use crate::config::{FormConfig, MissingHistory, Normalization};
use crate::error::{Result, SelectionError};
use crate::models::{MatchRecord, Player, PlayerId, Role, SquadEntry};
use crate::scoring::VenueWeights;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Recency-weighted discipline averages for one player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormLine {
    pub batting: f64,
    /// `None` when the player did not bowl inside the window
    pub bowling: Option<f64>,
    pub fielding: f64,
    /// Matches inside the window
    pub matches: usize,
}

impl FormLine {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Weighted mean of `values` ordered most recent first.
///
/// Returns `None` for an empty slice.
pub fn recency_weighted_average(values: &[f64], decay_rate: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (k, v) in values.iter().enumerate() {
        let w = (-decay_rate * k as f64).exp();
        weighted += w * v;
        total_weight += w;
    }
    Some(weighted / total_weight)
}

pub struct FormScorer {
    config: FormConfig,
    as_of: NaiveDate,
}

impl FormScorer {
    pub fn new(config: FormConfig, as_of: NaiveDate) -> Self {
        Self { config, as_of }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// First day that still counts towards form.
    pub fn window_start(&self) -> NaiveDate {
        self.as_of
            .checked_sub_months(Months::new(self.config.lookback_months))
            .unwrap_or(NaiveDate::MIN)
    }

    fn validate_config(&self) -> Result<()> {
        let decay = self.config.decay_rate;
        if !decay.is_finite() || decay < 0.0 {
            return Err(SelectionError::Config(format!(
                "decay_rate must be finite and >= 0, got {}",
                decay
            )));
        }
        Ok(())
    }

    /// Per-player form lines from raw records. Players without a record in
    /// the window are absent from the map.
    pub fn form_lines(&self, records: &[MatchRecord]) -> Result<BTreeMap<PlayerId, FormLine>> {
        self.validate_config()?;
        let start = self.window_start();

        let mut by_player: BTreeMap<&PlayerId, Vec<&MatchRecord>> = BTreeMap::new();
        let mut outside_window = 0usize;
        for record in records {
            record.validate()?;
            if record.match_date < start || record.match_date > self.as_of {
                outside_window += 1;
                continue;
            }
            by_player.entry(&record.player_id).or_default().push(record);
        }
        if outside_window > 0 {
            log::debug!(
                "Ignored {} records outside {}..={}",
                outside_window,
                start,
                self.as_of
            );
        }

        let decay = self.config.decay_rate;
        let mut lines = BTreeMap::new();
        for (id, mut history) in by_player {
            // Stable sort keeps input order for same-day records
            history.sort_by(|a, b| b.match_date.cmp(&a.match_date));

            let batting: Vec<f64> = history.iter().map(|r| r.batting).collect();
            let bowling: Vec<f64> = history.iter().filter_map(|r| r.bowling).collect();
            let fielding: Vec<f64> = history.iter().map(|r| r.fielding).collect();

            let line = FormLine {
                batting: recency_weighted_average(&batting, decay).unwrap_or(0.0),
                bowling: recency_weighted_average(&bowling, decay),
                fielding: recency_weighted_average(&fielding, decay).unwrap_or(0.0),
                matches: history.len(),
            };
            lines.insert(id.clone(), line);
        }
        Ok(lines)
    }

    /// Score the available part of `squad` into the selection pool.
    pub fn score(
        &self,
        squad: &[SquadEntry],
        records: &[MatchRecord],
        venue: &VenueWeights,
    ) -> Result<Vec<Player>> {
        let mut lines = self.form_lines(records)?;

        let mut seen = BTreeSet::new();
        let mut pool: Vec<&SquadEntry> = Vec::with_capacity(squad.len());
        for entry in squad {
            if !seen.insert(&entry.id) {
                return Err(SelectionError::validation(
                    entry.id.as_str(),
                    "duplicate squad entry",
                ));
            }
            if !entry.credits.is_finite() || entry.credits < 0.0 {
                return Err(SelectionError::validation(
                    entry.id.as_str(),
                    format!("invalid credits {}", entry.credits),
                ));
            }
            if !entry.status.is_available() {
                log::debug!("{} ({}) is not playing, skipped", entry.name, entry.id);
                continue;
            }
            pool.push(entry);
        }

        // Only players in the pool take part in normalization and role means
        let mut scored_lines: Vec<Option<FormLine>> =
            pool.iter().map(|e| lines.remove(&e.id)).collect();

        if self.config.normalization == Normalization::Percentile {
            self.normalize(&mut scored_lines);
        }

        let role_means = self.role_means(&pool, &scored_lines);

        let mut players = Vec::with_capacity(pool.len());
        let mut without_history = 0usize;
        for (entry, line) in pool.iter().zip(scored_lines) {
            let line = match line {
                Some(line) => line,
                None => {
                    without_history += 1;
                    match self.config.missing_history {
                        MissingHistory::Zero => FormLine::zero(),
                        MissingHistory::Exclude => {
                            log::warn!(
                                "{} ({}) has no matches since {}, excluded",
                                entry.name,
                                entry.id,
                                self.window_start()
                            );
                            continue;
                        }
                        MissingHistory::RoleMean => {
                            role_means.get(&entry.role).cloned().unwrap_or_default()
                        }
                    }
                }
            };

            // No history under the zero policy stays exactly zero
            let form = if line.matches == 0 && self.config.missing_history == MissingHistory::Zero
            {
                0.0
            } else {
                venue.score(entry.role, &entry.team, &line)
            };
            players.push(Player::scored(entry, form));
        }

        log::info!(
            "Scored {} players ({} without recent history, {} not playing)",
            players.len(),
            without_history,
            squad.len() - pool.len()
        );
        Ok(players)
    }

    fn normalize(&self, lines: &mut [Option<FormLine>]) {
        let mut batting: Vec<f64> = lines.iter().flatten().map(|l| l.batting).collect();
        let mut fielding: Vec<f64> = lines.iter().flatten().map(|l| l.fielding).collect();
        let mut bowling: Vec<f64> = lines.iter().flatten().filter_map(|l| l.bowling).collect();
        rank_in_place(&mut batting);
        rank_in_place(&mut fielding);
        rank_in_place(&mut bowling);

        let mut batting = batting.into_iter();
        let mut fielding = fielding.into_iter();
        let mut bowling = bowling.into_iter();
        for line in lines.iter_mut().flatten() {
            line.batting = batting.next().unwrap_or(0.0);
            line.fielding = fielding.next().unwrap_or(0.0);
            line.bowling = match line.bowling {
                Some(_) => bowling.next(),
                None => Some(self.config.non_bowler_bowling_form),
            };
        }
    }

    fn role_means(
        &self,
        pool: &[&SquadEntry],
        lines: &[Option<FormLine>],
    ) -> BTreeMap<Role, FormLine> {
        let mut means = BTreeMap::new();
        if self.config.missing_history != MissingHistory::RoleMean {
            return means;
        }
        for role in Role::ALL {
            let peers: Vec<&FormLine> = pool
                .iter()
                .zip(lines)
                .filter(|(e, _)| e.role == role)
                .filter_map(|(_, l)| l.as_ref())
                .collect();
            if peers.is_empty() {
                continue;
            }
            let n = peers.len() as f64;
            let bowled: Vec<f64> = peers.iter().filter_map(|l| l.bowling).collect();
            let mean = FormLine {
                batting: peers.iter().map(|l| l.batting).sum::<f64>() / n,
                bowling: if bowled.is_empty() {
                    None
                } else {
                    Some(bowled.iter().sum::<f64>() / bowled.len() as f64)
                },
                fielding: peers.iter().map(|l| l.fielding).sum::<f64>() / n,
                matches: 0,
            };
            means.insert(role, mean);
        }
        means
    }
}
