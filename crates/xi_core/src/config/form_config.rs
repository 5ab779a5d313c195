//! Form scorer configuration

use serde::{Deserialize, Serialize};

/// How per-discipline averages are brought onto a common scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Keep the weighted averages as expected fantasy points.
    #[default]
    Raw,
    /// Replace each average by its percentile rank (0-100) in the pool.
    Percentile,
}

/// What to do with a squad player that has no match inside the window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingHistory {
    /// Score the player at 0.0.
    #[default]
    Zero,
    /// Drop the player from the selection pool.
    Exclude,
    /// Use the mean form of same-role players that do have history.
    RoleMean,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Exponential decay per match step, newest match has weight 1 (default: 0.1)
    pub decay_rate: f64,
    /// Records older than this many months before `as_of` are ignored (default: 36)
    pub lookback_months: u32,
    pub normalization: Normalization,
    pub missing_history: MissingHistory,
    /// Bowling form given to players who never bowled, percentile mode only (default: 30)
    pub non_bowler_bowling_form: f64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            lookback_months: 36,
            normalization: Normalization::Raw,
            missing_history: MissingHistory::Zero,
            non_bowler_bowling_form: 30.0,
        }
    }
}
