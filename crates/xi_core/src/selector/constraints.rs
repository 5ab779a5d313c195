//! Squad composition rules

use crate::error::{Result, SelectionError};
use crate::models::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive count range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

/// Bound over the union of several roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleGroupBound {
    pub name: String,
    pub roles: Vec<Role>,
    pub min: usize,
    pub max: usize,
}

impl RoleGroupBound {
    /// Bowlers plus all-rounders, at least `min` of them.
    pub fn bowling_options(min: usize) -> Self {
        Self {
            name: "bowling options".to_string(),
            roles: vec![Role::Bowler, Role::AllRounder],
            min,
            max: usize::MAX,
        }
    }

    pub fn includes(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstraintSet {
    /// Credit cap for the whole squad (default: 100)
    pub budget: f64,
    /// Players to select (default: 11)
    pub squad_size: usize,
    /// Per-role counts; a role without an entry is unconstrained
    pub role_bounds: BTreeMap<Role, Bounds>,
    pub groups: Vec<RoleGroupBound>,
    /// Applies to every team present in the pool
    pub team_bounds: Bounds,
    pub captain_multiplier: f64,
    pub vice_captain_multiplier: f64,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        let role_bounds = Role::ALL.iter().map(|&role| (role, Bounds::new(1, 8))).collect();
        Self {
            budget: 100.0,
            squad_size: 11,
            role_bounds,
            groups: vec![RoleGroupBound::bowling_options(5)],
            team_bounds: Bounds::new(1, 7),
            captain_multiplier: 2.0,
            vice_captain_multiplier: 1.5,
        }
    }
}

impl ConstraintSet {
    /// Size, budget and multipliers only; no role, group or team rules.
    pub fn unrestricted(squad_size: usize, budget: f64) -> Self {
        Self {
            budget,
            squad_size,
            role_bounds: BTreeMap::new(),
            groups: Vec::new(),
            team_bounds: Bounds::new(0, squad_size),
            ..Self::default()
        }
    }

    pub fn bounds_for(&self, role: Role) -> Bounds {
        self.role_bounds
            .get(&role)
            .copied()
            .unwrap_or(Bounds::new(0, self.squad_size))
    }

    /// Reject rule sets no pool could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SelectionError::InvalidConstraints(msg));

        if self.squad_size < 2 {
            return invalid(format!(
                "squad size must leave room for captain and vice-captain, got {}",
                self.squad_size
            ));
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return invalid(format!("budget must be positive, got {}", self.budget));
        }

        let mut min_total = 0usize;
        let mut max_total = 0usize;
        for role in Role::ALL {
            let b = self.bounds_for(role);
            if b.min > b.max {
                return invalid(format!("{} min {} exceeds max {}", role, b.min, b.max));
            }
            if b.min > self.squad_size {
                return invalid(format!(
                    "{} needs {} players, squad size is {}",
                    role, b.min, self.squad_size
                ));
            }
            min_total = min_total.saturating_add(b.min);
            max_total = max_total.saturating_add(b.max.min(self.squad_size));
        }
        if min_total > self.squad_size {
            return invalid(format!(
                "role minimums add up to {}, more than squad size {}",
                min_total, self.squad_size
            ));
        }
        if max_total < self.squad_size {
            return invalid(format!(
                "role maximums add up to {}, fewer than squad size {}",
                max_total, self.squad_size
            ));
        }

        for group in &self.groups {
            if group.roles.is_empty() {
                return invalid(format!("group '{}' has no roles", group.name));
            }
            if group.min > group.max {
                return invalid(format!(
                    "group '{}' min {} exceeds max {}",
                    group.name, group.min, group.max
                ));
            }
            if group.min > self.squad_size {
                return invalid(format!(
                    "group '{}' needs {} players, squad size is {}",
                    group.name, group.min, self.squad_size
                ));
            }
        }

        if self.team_bounds.min > self.team_bounds.max || self.team_bounds.max == 0 {
            return invalid(format!(
                "team bounds {}..={} are empty",
                self.team_bounds.min, self.team_bounds.max
            ));
        }
        if self.team_bounds.min > self.squad_size {
            return invalid(format!(
                "team minimum {} exceeds squad size {}",
                self.team_bounds.min, self.squad_size
            ));
        }

        let (c, v) = (self.captain_multiplier, self.vice_captain_multiplier);
        if !c.is_finite() || !v.is_finite() || v < 1.0 || c < v {
            return invalid(format!(
                "multipliers must satisfy captain >= vice-captain >= 1, got {} and {}",
                c, v
            ));
        }
        Ok(())
    }
}
