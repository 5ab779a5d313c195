use super::player::PlayerId;
use crate::error::{Result, SelectionError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One player's output in one match, split by discipline.
///
/// `bowling` is `None` when the player did not bowl, which is distinct from
/// bowling and scoring nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub player_id: PlayerId,
    pub match_date: NaiveDate,
    pub batting: f64,
    #[serde(default)]
    pub bowling: Option<f64>,
    #[serde(default)]
    pub fielding: f64,
}

impl MatchRecord {
    pub fn new(
        player_id: impl Into<String>,
        match_date: NaiveDate,
        batting: f64,
        bowling: Option<f64>,
        fielding: f64,
    ) -> Self {
        Self { player_id: PlayerId::new(player_id), match_date, batting, bowling, fielding }
    }

    /// Record carrying a single composite fantasy-point value, which stands
    /// for both batting and bowling.
    pub fn composite(player_id: impl Into<String>, match_date: NaiveDate, points: f64) -> Self {
        Self::new(player_id, match_date, points, Some(points), 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("batting", Some(self.batting)),
            ("bowling", self.bowling),
            ("fielding", Some(self.fielding)),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(SelectionError::validation(
                        self.player_id.as_str(),
                        format!("non-finite {} value {} on {}", name, v, self.match_date),
                    ));
                }
            }
        }
        Ok(())
    }
}
