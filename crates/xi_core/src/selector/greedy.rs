//! Heuristic fallback: seed minimums, fill by form, then improve by swaps

use super::problem::{SelectionProblem, Tally};
use super::SelectionSolver;
use crate::error::{Result, SelectionError};
use crate::models::Role;
use std::cmp::Ordering;

const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
pub struct GreedySolver {
    /// Swap passes after the initial squad is built (default: 200)
    pub max_swap_rounds: usize,
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self { max_swap_rounds: 200 }
    }
}

/// Whether `i` helps close any open minimum in `tally`.
fn closes_deficit(problem: &SelectionProblem<'_>, tally: &Tally, i: usize) -> bool {
    let c = problem.constraints();
    let role = problem.player(i).role();
    tally.role(role) < c.bounds_for(role).min
        || tally.teams[problem.team_index(i)] < c.team_bounds.min
        || c.groups
            .iter()
            .zip(&tally.groups)
            .any(|(g, &n)| g.includes(role) && n < g.min)
}

fn has_deficit(problem: &SelectionProblem<'_>, tally: &Tally) -> bool {
    let c = problem.constraints();
    Role::ALL.iter().any(|&r| tally.role(r) < c.bounds_for(r).min)
        || tally.teams.iter().any(|&n| n < c.team_bounds.min)
        || c.groups.iter().zip(&tally.groups).any(|(g, &n)| n < g.min)
}

fn form_per_credit(problem: &SelectionProblem<'_>, i: usize) -> f64 {
    let p = problem.player(i);
    if p.credits() > 0.0 {
        p.form() / p.credits()
    } else {
        f64::INFINITY
    }
}

impl GreedySolver {
    fn build(&self, problem: &SelectionProblem<'_>) -> Vec<usize> {
        let k = problem.constraints().squad_size;

        let mut by_value: Vec<usize> = (0..problem.len()).collect();
        by_value.sort_by(|&a, &b| {
            form_per_credit(problem, b)
                .total_cmp(&form_per_credit(problem, a))
                .then(a.cmp(&b))
        });
        let mut by_form: Vec<usize> = (0..problem.len()).collect();
        by_form.sort_by(|&a, &b| {
            let (fa, fb) = (problem.player(a).form(), problem.player(b).form());
            fb.total_cmp(&fa).then(a.cmp(&b))
        });

        let mut chosen: Vec<usize> = Vec::with_capacity(k);

        // Seed open minimums with the best value per credit
        loop {
            let tally = problem.tally(&chosen);
            if !has_deficit(problem, &tally) {
                break;
            }
            let next = by_value
                .iter()
                .copied()
                .find(|&i| closes_deficit(problem, &tally, i) && problem.can_extend(&chosen, i));
            match next {
                Some(i) => chosen.push(i),
                None => break,
            }
        }

        for &i in &by_form {
            if chosen.len() == k {
                break;
            }
            if problem.can_extend(&chosen, i) {
                chosen.push(i);
            }
        }
        chosen
    }

    fn improve(&self, problem: &SelectionProblem<'_>, chosen: &mut [usize]) {
        for round in 0..self.max_swap_rounds {
            let current = problem.objective(chosen);
            let mut best: Option<(f64, usize, usize)> = None;

            for pos in 0..chosen.len() {
                for j in 0..problem.len() {
                    if chosen.contains(&j) {
                        continue;
                    }
                    let mut trial = chosen.to_vec();
                    trial[pos] = j;
                    if !problem.is_feasible(&trial) {
                        continue;
                    }
                    let gain = problem.objective(&trial) - current;
                    let better = match best {
                        Some((g, _, _)) => gain.partial_cmp(&g) == Some(Ordering::Greater),
                        None => gain > IMPROVEMENT_EPSILON,
                    };
                    if better {
                        best = Some((gain, pos, j));
                    }
                }
            }

            match best {
                Some((gain, pos, j)) => {
                    log::trace!("Swap round {}: slot {} -> {} (+{:.3})", round, pos, j, gain);
                    chosen[pos] = j;
                }
                None => return,
            }
        }
    }
}

impl SelectionSolver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, problem: &SelectionProblem<'_>) -> Result<Vec<usize>> {
        let mut chosen = self.build(problem);
        if !problem.is_feasible(&chosen) {
            return Err(SelectionError::Solver(format!(
                "heuristic could only place {} of {} players within the bounds",
                chosen.len(),
                problem.constraints().squad_size
            )));
        }
        self.improve(problem, &mut chosen);
        chosen.sort_unstable();
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use crate::selector::constraints::{Bounds, ConstraintSet};

    fn trap_pool() -> Vec<Player> {
        vec![
            Player::new("a", "A", Role::Batsman, "X", 9.0, 50.0),
            Player::new("b", "B", Role::Batsman, "X", 5.0, 40.0),
            Player::new("c", "C", Role::Batsman, "Y", 5.0, 39.0),
            Player::new("d", "D", Role::Batsman, "Y", 1.0, 1.0),
        ]
    }

    #[test]
    fn test_swaps_improve_weak_start() {
        let pool = trap_pool();
        let c = ConstraintSet::unrestricted(2, 10.0);
        let problem = SelectionProblem::new(&pool, &c);
        let mut chosen = vec![3, 2];
        GreedySolver::default().improve(&problem, &mut chosen);
        chosen.sort_unstable();
        assert_eq!(chosen, vec![1, 2]);
    }

    #[test]
    fn test_result_is_feasible_even_when_not_optimal() {
        // Form-first filling takes `a` and can then only afford `d`; no single
        // swap reaches b + c, which is the true optimum.
        let pool = trap_pool();
        let c = ConstraintSet::unrestricted(2, 10.0);
        let problem = SelectionProblem::new(&pool, &c);
        let chosen = GreedySolver::default().solve(&problem).unwrap();
        assert!(problem.is_feasible(&chosen));
        assert_eq!(chosen, vec![0, 3]);
    }

    #[test]
    fn test_seeds_role_minimum() {
        let pool = vec![
            Player::new("a", "A", Role::Batsman, "X", 5.0, 90.0),
            Player::new("b", "B", Role::Batsman, "X", 5.0, 80.0),
            Player::new("c", "C", Role::Batsman, "Y", 5.0, 70.0),
            Player::new("k", "K", Role::WicketKeeper, "Y", 5.0, 1.0),
        ];
        let mut c = ConstraintSet::unrestricted(3, 100.0);
        c.role_bounds.insert(Role::WicketKeeper, Bounds::new(1, 1));
        let problem = SelectionProblem::new(&pool, &c);
        let chosen = GreedySolver::default().solve(&problem).unwrap();
        assert!(problem.is_feasible(&chosen));
        assert!(chosen.contains(&3));
        assert_eq!(chosen, vec![0, 1, 3]);
    }

    #[test]
    fn test_dead_end_is_a_solver_error() {
        // Seeding takes x1 for team X; y1 then no longer fits, though x2 + y1 would
        let pool = vec![
            Player::new("x1", "X1", Role::Batsman, "X", 5.0, 50.0),
            Player::new("x2", "X2", Role::Batsman, "X", 1.0, 1.0),
            Player::new("y1", "Y1", Role::Batsman, "Y", 6.0, 30.0),
        ];
        let mut c = ConstraintSet::unrestricted(2, 10.0);
        c.team_bounds = Bounds::new(1, 2);
        let problem = SelectionProblem::new(&pool, &c);
        assert!(problem.is_feasible(&[1, 2]));

        let err = GreedySolver::default().solve(&problem).unwrap_err();
        assert!(matches!(err, SelectionError::Solver(_)), "{:?}", err);
    }

    #[test]
    fn test_fills_squad_that_spends_whole_budget() {
        let pool: Vec<Player> = (0..12)
            .map(|i| {
                let team = if i % 2 == 0 { "X" } else { "Y" };
                Player::new(format!("p{:02}", i), "P", Role::Batsman, team, 9.0, 10.0 + i as f64)
            })
            .collect();
        let c = ConstraintSet::unrestricted(11, 99.0);
        let problem = SelectionProblem::new(&pool, &c);
        let chosen = GreedySolver::default().solve(&problem).unwrap();
        assert_eq!(chosen, (1..12).collect::<Vec<_>>());
    }
}
