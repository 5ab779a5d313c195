use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable player identifier as supplied by the ingestion side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    #[serde(rename = "BAT")]
    Batsman,
    #[serde(rename = "BOWL")]
    Bowler,
    #[serde(rename = "ALL")]
    AllRounder,
    #[serde(rename = "WK")]
    WicketKeeper,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::WicketKeeper, Role::Batsman, Role::AllRounder, Role::Bowler];

    pub fn code(&self) -> &'static str {
        match self {
            Role::Batsman => "BAT",
            Role::Bowler => "BOWL",
            Role::AllRounder => "ALL",
            Role::WicketKeeper => "WK",
        }
    }

    /// Bowlers and all-rounders both count as bowling options.
    pub fn can_bowl(&self) -> bool {
        matches!(self, Role::Bowler | Role::AllRounder)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BAT" | "BATSMAN" | "BATTER" => Ok(Role::Batsman),
            "BOWL" | "BOWLER" => Ok(Role::Bowler),
            "ALL" | "AR" | "ALL-ROUNDER" | "ALLROUNDER" | "ALL ROUNDER" => Ok(Role::AllRounder),
            "WK" | "KEEPER" | "WICKETKEEPER" | "WICKET-KEEPER" | "WICKET KEEPER" => {
                Ok(Role::WicketKeeper)
            }
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Announced match-day status of a squad member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayingStatus {
    #[default]
    Playing,
    ImpactSubstitute,
    NotPlaying,
}

impl PlayingStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, PlayingStatus::Playing | PlayingStatus::ImpactSubstitute)
    }

    /// Lenient parse used for feed columns: unknown or empty values mean the
    /// player is not in the match.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PLAYING" => PlayingStatus::Playing,
            "X_FACTOR_SUBSTITUTE" | "IMPACT" | "IMPACT_SUBSTITUTE" => {
                PlayingStatus::ImpactSubstitute
            }
            _ => PlayingStatus::NotPlaying,
        }
    }
}

/// Unscored squad row as delivered by the ingestion side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SquadEntry {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub role: Role,
    pub credits: f64,
    #[serde(default)]
    pub status: PlayingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineup_order: Option<u8>,
}

impl SquadEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        team: impl Into<String>,
        role: Role,
        credits: f64,
    ) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            team: team.into(),
            role,
            credits,
            status: PlayingStatus::Playing,
            lineup_order: None,
        }
    }

    pub fn with_status(mut self, status: PlayingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_lineup_order(mut self, order: u8) -> Self {
        self.lineup_order = Some(order);
        self
    }
}

/// A scored player. Fields are private so that the form score cannot drift
/// after scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    team: String,
    credits: f64,
    form: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lineup_order: Option<u8>,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        team: impl Into<String>,
        credits: f64,
        form: f64,
    ) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            role,
            team: team.into(),
            credits,
            form,
            lineup_order: None,
        }
    }

    pub fn scored(entry: &SquadEntry, form: f64) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            role: entry.role,
            team: entry.team.clone(),
            credits: entry.credits,
            form,
            lineup_order: entry.lineup_order,
        }
    }

    pub fn with_lineup_order(mut self, order: u8) -> Self {
        self.lineup_order = Some(order);
        self
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn form(&self) -> f64 {
        self.form
    }

    pub fn lineup_order(&self) -> Option<u8> {
        self.lineup_order
    }
}
