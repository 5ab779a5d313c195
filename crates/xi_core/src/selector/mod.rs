//! # Team Selector
//!
//! Picks the squad that maximizes multiplier-weighted form under budget,
//! role, group and per-team bounds, then assigns captaincy.
//!
//! ## Flow
//! 1. [`ConstraintSet::validate`] rejects incoherent rules.
//! 2. The pool is checked for duplicate ids and unusable numbers.
//! 3. [`feasibility_check`] fails fast on pools that cannot work.
//! 4. The configured [`SelectionSolver`] runs. A solver failure that is not
//!    proven infeasibility is retried once with [`GreedySolver`].
//! 5. The result is re-verified before the [`Roster`] is built.

mod constraints;
mod exhaustive;
mod feasibility;
mod greedy;
mod milp;
mod problem;

pub use constraints::{Bounds, ConstraintSet, RoleGroupBound};
pub use exhaustive::{binomial, ExhaustiveSolver, DEFAULT_MAX_COMBINATIONS};
pub use feasibility::feasibility_check;
pub use greedy::GreedySolver;
pub use milp::MilpSolver;
pub use problem::{SelectionProblem, Tally};

use crate::config::{SelectorConfig, SolverKind};
use crate::error::{Result, SelectionError};
use crate::models::{Player, Roster};
use std::collections::BTreeSet;

/// Strategy that turns a [`SelectionProblem`] into chosen indices.
pub trait SelectionSolver {
    fn name(&self) -> &'static str;

    /// Indices into `problem`, exactly `squad_size` of them on success.
    fn solve(&self, problem: &SelectionProblem<'_>) -> Result<Vec<usize>>;
}

fn solver_for(kind: SolverKind) -> Box<dyn SelectionSolver> {
    match kind {
        SolverKind::Milp => Box::new(MilpSolver),
        SolverKind::Exhaustive => Box::new(ExhaustiveSolver::default()),
        SolverKind::Greedy => Box::new(GreedySolver::default()),
    }
}

#[derive(Debug, Clone)]
pub struct TeamSelector {
    constraints: ConstraintSet,
    solver: SolverKind,
}

impl TeamSelector {
    pub fn new(constraints: ConstraintSet, solver: SolverKind) -> Self {
        Self { constraints, solver }
    }

    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(config.constraints.clone(), config.solver)
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn solver(&self) -> SolverKind {
        self.solver
    }

    pub fn select(&self, pool: &[Player]) -> Result<Roster> {
        self.constraints.validate()?;
        validate_pool(pool)?;

        let problem = SelectionProblem::new(pool, &self.constraints);
        log::debug!(
            "Selecting {} of {} players from {} teams, budget {:.1}",
            self.constraints.squad_size,
            problem.len(),
            problem.teams().len(),
            self.constraints.budget
        );
        feasibility_check(&problem)?;

        let primary = solver_for(self.solver);
        let chosen = match primary.solve(&problem) {
            Ok(chosen) => chosen,
            Err(e) if e.allows_fallback() && self.solver != SolverKind::Greedy => {
                log::warn!("{} solver failed ({}), retrying with greedy", primary.name(), e);
                GreedySolver::default().solve(&problem)?
            }
            Err(e) => return Err(e),
        };

        if !problem.is_feasible(&chosen) {
            return Err(SelectionError::Solver(format!(
                "{} solver returned a squad that breaks the constraints",
                primary.name()
            )));
        }

        let roster = Roster::from_selection(
            problem.players_at(&chosen),
            self.constraints.captain_multiplier,
            self.constraints.vice_captain_multiplier,
        );
        log::info!(
            "Selected {} players for {:.1} credits, expected {:.2} points (C: {}, VC: {})",
            roster.len(),
            roster.total_credits(),
            roster.expected_points(),
            roster.captain().map(|p| p.name()).unwrap_or("-"),
            roster.vice_captain().map(|p| p.name()).unwrap_or("-")
        );
        Ok(roster)
    }
}

impl Default for TeamSelector {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::dream11())
    }
}

fn validate_pool(pool: &[Player]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for p in pool {
        if !seen.insert(p.id()) {
            return Err(SelectionError::validation(p.id().as_str(), "duplicate player in pool"));
        }
        if !p.form().is_finite() {
            return Err(SelectionError::validation(
                p.id().as_str(),
                format!("form score {} is not a number", p.form()),
            ));
        }
        if !p.credits().is_finite() || p.credits() < 0.0 {
            return Err(SelectionError::validation(
                p.id().as_str(),
                format!("invalid credits {}", p.credits()),
            ));
        }
    }
    Ok(())
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use crate::models::Role;
    use proptest::prelude::*;

    fn arb_pool() -> impl Strategy<Value = Vec<Player>> {
        prop::collection::vec((0usize..4, 0usize..3, 6.0f64..11.0, 0.0f64..120.0), 11..15).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (r, t, credits, form))| {
                        let role = Role::ALL[r];
                        let team = ["CSK", "MI", "RR"][t];
                        Player::new(format!("p{:02}", i), "x", role, team, credits, form)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: a returned roster always satisfies every rule
        #[test]
        fn prop_greedy_ok_is_feasible(pool in arb_pool()) {
            let c = ConstraintSet::default();
            if let Ok(roster) = TeamSelector::new(c.clone(), SolverKind::Greedy).select(&pool) {
                prop_assert_eq!(roster.len(), 11);
                prop_assert!(roster.total_credits() <= c.budget + 1e-9);
                for role in Role::ALL {
                    prop_assert!(c.bounds_for(role).contains(roster.count_role(role)));
                }
            }
        }

        /// Property: the exact search is never beaten by the heuristic
        #[test]
        fn prop_exhaustive_dominates_greedy(pool in arb_pool()) {
            let c = ConstraintSet::unrestricted(11, 100.0);
            let exact = TeamSelector::new(c.clone(), SolverKind::Exhaustive).select(&pool);
            let greedy = TeamSelector::new(c, SolverKind::Greedy).select(&pool);
            if let (Ok(exact), Ok(greedy)) = (exact, greedy) {
                prop_assert!(exact.expected_points() + 1e-9 >= greedy.expected_points());
            }
        }

        /// Property: both exact solvers agree on feasibility and value
        #[test]
        fn prop_exact_solvers_agree(pool in arb_pool()) {
            let c = ConstraintSet { budget: 90.0, ..ConstraintSet::default() };
            let milp = TeamSelector::new(c.clone(), SolverKind::Milp).select(&pool);
            let exhaustive = TeamSelector::new(c, SolverKind::Exhaustive).select(&pool);
            match (milp, exhaustive) {
                (Ok(a), Ok(b)) => {
                    prop_assert!((a.expected_points() - b.expected_points()).abs() < 1e-6);
                }
                (Err(_), Err(_)) => {}
                (a, b) => prop_assert!(false, "milp {:?} vs exhaustive {:?}", a.is_ok(), b.is_ok()),
            }
        }
    }
}
