//! Exact enumeration over all squads, for small pools

use super::problem::SelectionProblem;
use super::SelectionSolver;
use crate::error::{Result, SelectionError};

/// Upper bound on candidate squads before the search refuses to start.
pub const DEFAULT_MAX_COMBINATIONS: u128 = 5_000_000;

const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSolver {
    pub max_combinations: u128,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self { max_combinations: DEFAULT_MAX_COMBINATIONS }
    }
}

pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.saturating_mul((n - i) as u128) / (i as u128 + 1);
    }
    acc
}

struct Search<'p, 'a> {
    problem: &'p SelectionProblem<'a>,
    chosen: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
}

impl Search<'_, '_> {
    fn run(&mut self, next: usize) {
        let k = self.problem.constraints().squad_size;
        if self.chosen.len() == k {
            if self.problem.is_feasible(&self.chosen) {
                let value = self.problem.objective(&self.chosen);
                let better = match &self.best {
                    Some((best, _)) => value > best + IMPROVEMENT_EPSILON,
                    None => true,
                };
                if better {
                    self.best = Some((value, self.chosen.clone()));
                }
            }
            return;
        }
        let needed = k - self.chosen.len();
        if self.problem.len() - next < needed {
            return;
        }

        if self.problem.can_extend(&self.chosen, next) {
            self.chosen.push(next);
            self.run(next + 1);
            self.chosen.pop();
        }
        self.run(next + 1);
    }
}

impl SelectionSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    /// Squads are visited in lexicographic index order and only a strictly
    /// better squad replaces the incumbent, so ties resolve to the first.
    fn solve(&self, problem: &SelectionProblem<'_>) -> Result<Vec<usize>> {
        let k = problem.constraints().squad_size;
        let combinations = binomial(problem.len(), k);
        if combinations > self.max_combinations {
            return Err(SelectionError::Solver(format!(
                "{} candidate squads exceed the exhaustive limit of {}",
                combinations, self.max_combinations
            )));
        }

        let mut search = Search { problem, chosen: Vec::with_capacity(k), best: None };
        search.run(0);

        match search.best {
            Some((value, chosen)) => {
                log::debug!("Exhaustive search best value {:.3}", value);
                Ok(chosen)
            }
            None => Err(SelectionError::InfeasibleConstraints(
                "no squad satisfies budget, role and team bounds".to_string(),
            )),
        }
    }
}
