//! Indexed view of a selection run shared by all solvers

use super::constraints::ConstraintSet;
use crate::models::{Player, Role};

const BUDGET_EPSILON: f64 = 1e-9;

fn role_slot(role: Role) -> usize {
    match role {
        Role::WicketKeeper => 0,
        Role::Batsman => 1,
        Role::AllRounder => 2,
        Role::Bowler => 3,
    }
}

/// Counts of a partial or complete selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub size: usize,
    pub cost: f64,
    pub roles: [usize; 4],
    pub groups: Vec<usize>,
    pub teams: Vec<usize>,
}

impl Tally {
    pub fn role(&self, role: Role) -> usize {
        self.roles[role_slot(role)]
    }
}

/// Players ordered by id, with team indices resolved once.
pub struct SelectionProblem<'a> {
    players: Vec<&'a Player>,
    constraints: &'a ConstraintSet,
    teams: Vec<&'a str>,
    team_of: Vec<usize>,
    by_cost: Vec<usize>,
}

impl<'a> SelectionProblem<'a> {
    pub fn new(pool: &'a [Player], constraints: &'a ConstraintSet) -> Self {
        let mut players: Vec<&Player> = pool.iter().collect();
        players.sort_by(|a, b| a.id().cmp(b.id()));

        let mut teams: Vec<&'a str> = pool.iter().map(|p| p.team()).collect();
        teams.sort_unstable();
        teams.dedup();

        let team_of = players
            .iter()
            .map(|p| teams.binary_search(&p.team()).unwrap_or(0))
            .collect();

        let mut by_cost: Vec<usize> = (0..players.len()).collect();
        by_cost.sort_by(|&a, &b| players[a].credits().total_cmp(&players[b].credits()));

        Self { players, constraints, teams, team_of, by_cost }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, i: usize) -> &'a Player {
        self.players[i]
    }

    pub fn constraints(&self) -> &ConstraintSet {
        self.constraints
    }

    pub fn teams(&self) -> &[&'a str] {
        &self.teams
    }

    pub fn team_index(&self, i: usize) -> usize {
        self.team_of[i]
    }

    /// Indices ordered by ascending credits.
    pub fn by_cost(&self) -> &[usize] {
        &self.by_cost
    }

    pub fn tally(&self, chosen: &[usize]) -> Tally {
        let mut tally = Tally {
            size: 0,
            cost: 0.0,
            roles: [0; 4],
            groups: vec![0; self.constraints.groups.len()],
            teams: vec![0; self.teams.len()],
        };
        for &i in chosen {
            self.add_to(&mut tally, i);
        }
        tally
    }

    fn add_to(&self, tally: &mut Tally, i: usize) {
        let p = self.players[i];
        tally.size += 1;
        tally.cost += p.credits();
        tally.roles[role_slot(p.role())] += 1;
        tally.teams[self.team_of[i]] += 1;
        for (g, group) in self.constraints.groups.iter().enumerate() {
            if group.includes(p.role()) {
                tally.groups[g] += 1;
            }
        }
    }

    /// Multiplier-weighted value of a selection with optimal captaincy.
    pub fn objective(&self, chosen: &[usize]) -> f64 {
        let mut forms: Vec<f64> = chosen.iter().map(|&i| self.players[i].form()).collect();
        forms.sort_by(|a, b| b.total_cmp(a));
        let base: f64 = forms.iter().sum();
        let c = self.constraints;
        let captain = forms.first().copied().unwrap_or(0.0) * (c.captain_multiplier - 1.0);
        let vice = forms.get(1).copied().unwrap_or(0.0) * (c.vice_captain_multiplier - 1.0);
        base + captain + vice
    }

    /// Whether a complete selection meets every rule.
    pub fn is_feasible(&self, chosen: &[usize]) -> bool {
        let c = self.constraints;
        if chosen.len() != c.squad_size {
            return false;
        }
        let mut sorted = chosen.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != chosen.len() || sorted.iter().any(|&i| i >= self.len()) {
            return false;
        }

        let tally = self.tally(chosen);
        tally.cost <= c.budget + BUDGET_EPSILON
            && Role::ALL.iter().all(|&r| c.bounds_for(r).contains(tally.role(r)))
            && c.groups
                .iter()
                .zip(&tally.groups)
                .all(|(g, &n)| g.min <= n && n <= g.max)
            && tally.teams.iter().all(|&n| c.team_bounds.contains(n))
    }

    /// Whether adding `candidate` to a partial selection can still lead to a
    /// feasible squad, judged by necessary conditions only.
    pub fn can_extend(&self, chosen: &[usize], candidate: usize) -> bool {
        let c = self.constraints;
        if chosen.len() >= c.squad_size || chosen.contains(&candidate) {
            return false;
        }
        let mut tally = self.tally(chosen);
        self.add_to(&mut tally, candidate);

        if Role::ALL.iter().any(|&r| tally.role(r) > c.bounds_for(r).max)
            || c.groups.iter().zip(&tally.groups).any(|(g, &n)| n > g.max)
            || tally.teams.iter().any(|&n| n > c.team_bounds.max)
        {
            return false;
        }

        let remaining = c.squad_size - tally.size;
        let role_deficit = Role::ALL
            .iter()
            .map(|&r| c.bounds_for(r).min.saturating_sub(tally.role(r)))
            .fold(0usize, usize::saturating_add);
        let team_deficit = tally
            .teams
            .iter()
            .map(|&n| c.team_bounds.min.saturating_sub(n))
            .fold(0usize, usize::saturating_add);
        let group_short = c
            .groups
            .iter()
            .zip(&tally.groups)
            .any(|(g, &n)| g.min.saturating_sub(n) > remaining);
        if role_deficit > remaining || team_deficit > remaining || group_short {
            return false;
        }

        let cheapest_rest: f64 = self
            .by_cost
            .iter()
            .filter(|&&i| i != candidate && !chosen.contains(&i))
            .take(remaining)
            .map(|&i| self.players[i].credits())
            .sum();
        tally.cost + cheapest_rest <= c.budget + BUDGET_EPSILON
    }

    /// Players behind a list of indices, cloned for the roster.
    pub fn players_at(&self, chosen: &[usize]) -> Vec<Player> {
        chosen.iter().map(|&i| self.players[i].clone()).collect()
    }
}
