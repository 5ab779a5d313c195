//! Venue-adjusted role scoring
//!
//! Collapses a player's [`FormLine`] into the single scalar the selector
//! maximizes. Batters and keepers are scored on batting, bowlers on bowling
//! and all-rounders on the stronger of the two. Batting-friendly grounds lift
//! batters and keepers, bowling grounds lift bowlers, all-rounders take the
//! mean of both weights but never drop below the neutral weight of 1.0.
//! Fielding stays on the form line and does not enter the score.

use crate::form::FormLine;
use crate::models::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VenueWeights {
    /// Ground name, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground: Option<String>,
    pub batting_weight: f64,
    pub bowling_weight: f64,
    /// Team playing at home, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    pub home_boost: f64,
}

impl Default for VenueWeights {
    fn default() -> Self {
        Self {
            ground: None,
            batting_weight: 1.0,
            bowling_weight: 1.0,
            home_team: None,
            home_boost: 1.0,
        }
    }
}

impl VenueWeights {
    pub fn new(batting_weight: f64, bowling_weight: f64) -> Self {
        Self { batting_weight, bowling_weight, ..Self::default() }
    }

    pub fn with_home(mut self, team: impl Into<String>, boost: f64) -> Self {
        self.home_team = Some(team.into());
        self.home_boost = boost;
        self
    }

    pub fn all_rounder_weight(&self) -> f64 {
        ((self.batting_weight + self.bowling_weight) / 2.0).max(1.0)
    }

    pub fn role_weight(&self, role: Role) -> f64 {
        match role {
            Role::Batsman | Role::WicketKeeper => self.batting_weight,
            Role::Bowler => self.bowling_weight,
            Role::AllRounder => self.all_rounder_weight(),
        }
    }

    fn home_multiplier(&self, team: &str) -> f64 {
        match &self.home_team {
            Some(home) if home == team => self.home_boost,
            _ => 1.0,
        }
    }

    /// Scalar form score for a player of `role` on `team`.
    pub fn score(&self, role: Role, team: &str, line: &FormLine) -> f64 {
        let bowling = line.bowling.unwrap_or(0.0);
        let base = match role {
            Role::Batsman | Role::WicketKeeper => line.batting,
            Role::Bowler => bowling,
            Role::AllRounder => line.batting.max(bowling),
        };
        self.role_weight(role) * base * self.home_multiplier(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(batting: f64, bowling: Option<f64>) -> FormLine {
        FormLine { batting, bowling, fielding: 0.0, matches: 3 }
    }

    #[test]
    fn test_all_rounder_weight_floor() {
        assert_eq!(VenueWeights::new(0.8, 0.9).all_rounder_weight(), 1.0);
        assert!((VenueWeights::new(1.4, 1.0).all_rounder_weight() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_score_by_role() {
        let venue = VenueWeights::new(1.2, 0.8);
        let l = line(50.0, Some(20.0));
        assert!((venue.score(Role::Batsman, "A", &l) - 60.0).abs() < 1e-9);
        assert!((venue.score(Role::WicketKeeper, "A", &l) - 60.0).abs() < 1e-9);
        assert!((venue.score(Role::Bowler, "A", &l) - 16.0).abs() < 1e-9);
        assert!((venue.score(Role::AllRounder, "A", &l) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_fielding_and_other_disciplines_ignored() {
        let venue = VenueWeights::new(1.0, 2.0);
        let l = FormLine { batting: 50.0, bowling: Some(10.0), fielding: 5.0, matches: 2 };
        assert!((venue.score(Role::Bowler, "A", &l) - 20.0).abs() < 1e-9);
        assert!((venue.score(Role::Batsman, "A", &l) - 50.0).abs() < 1e-9);
        // max(1.0, 1.5) * max(50, 10)
        assert!((venue.score(Role::AllRounder, "A", &l) - 75.0).abs() < 1e-9);
        assert_eq!(venue.score(Role::Bowler, "A", &line(40.0, None)), 0.0);
    }

    #[test]
    fn test_home_boost() {
        let venue = VenueWeights::default().with_home("MI", 1.05);
        let l = line(30.0, Some(10.0));
        assert!((venue.score(Role::Batsman, "CSK", &l) - 30.0).abs() < 1e-9);
        assert!((venue.score(Role::Batsman, "MI", &l) - 31.5).abs() < 1e-9);
    }
}
