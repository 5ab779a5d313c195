use super::player::{Player, Role};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Designation {
    Captain,
    ViceCaptain,
    Player,
}

impl Designation {
    pub fn label(&self) -> &'static str {
        match self {
            Designation::Captain => "C",
            Designation::ViceCaptain => "VC",
            Designation::Player => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pick {
    pub player: Player,
    pub designation: Designation,
    pub multiplier: f64,
}

impl Pick {
    pub fn weighted_points(&self) -> f64 {
        self.player.form() * self.multiplier
    }
}

/// Final eleven with captaincy assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    picks: Vec<Pick>,
    total_credits: f64,
    expected_points: f64,
}

/// Captaincy order: higher form first, then earlier lineup slot (players
/// without one rank last), then id.
pub(crate) fn captaincy_order(a: &Player, b: &Player) -> Ordering {
    b.form()
        .total_cmp(&a.form())
        .then_with(|| match (a.lineup_order(), b.lineup_order()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id().cmp(b.id()))
}

impl Roster {
    /// Assign captain and vice-captain to an already selected set.
    ///
    /// The top two players by [`captaincy_order`] get the multipliers, which is
    /// the multiplier-weighted optimum whenever `captain >= vice >= 1`.
    pub fn from_selection(
        mut selected: Vec<Player>,
        captain_multiplier: f64,
        vice_captain_multiplier: f64,
    ) -> Self {
        selected.sort_by(captaincy_order);
        // Everyone after the vice-captain: form, then id
        if selected.len() > 2 {
            selected[2..]
                .sort_by(|a, b| b.form().total_cmp(&a.form()).then_with(|| a.id().cmp(b.id())));
        }

        let picks: Vec<Pick> = selected
            .into_iter()
            .enumerate()
            .map(|(rank, player)| {
                let (designation, multiplier) = match rank {
                    0 => (Designation::Captain, captain_multiplier),
                    1 => (Designation::ViceCaptain, vice_captain_multiplier),
                    _ => (Designation::Player, 1.0),
                };
                Pick { player, designation, multiplier }
            })
            .collect();

        let total_credits = picks.iter().map(|p| p.player.credits()).sum();
        let expected_points = picks.iter().map(Pick::weighted_points).sum();

        Self { picks, total_credits, expected_points }
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn total_credits(&self) -> f64 {
        self.total_credits
    }

    pub fn expected_points(&self) -> f64 {
        self.expected_points
    }

    pub fn captain(&self) -> Option<&Player> {
        self.find(Designation::Captain)
    }

    pub fn vice_captain(&self) -> Option<&Player> {
        self.find(Designation::ViceCaptain)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.picks.iter().filter(|p| p.player.role() == role).count()
    }

    pub fn count_team(&self, team: &str) -> usize {
        self.picks.iter().filter(|p| p.player.team() == team).count()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.picks.iter().map(|p| &p.player)
    }

    fn find(&self, designation: Designation) -> Option<&Player> {
        self.picks.iter().find(|p| p.designation == designation).map(|p| &p.player)
    }
}
