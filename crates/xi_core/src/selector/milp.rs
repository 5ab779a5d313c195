//! Exact selection as a binary integer program
//!
//! Three binaries per player: `pick`, `captain`, `vice`. Captaincy variables
//! only add the extra multiplier share, so
//! `score * (pick + (cm - 1) * captain + (vm - 1) * vice)`
//! is the player's contribution to the objective.

use super::problem::SelectionProblem;
use super::SelectionSolver;
use crate::error::{Result, SelectionError};
use crate::models::Role;
use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

fn sum_of(vars: impl Iterator<Item = Variable>) -> Expression {
    vars.map(Expression::from).sum()
}

impl SelectionSolver for MilpSolver {
    fn name(&self) -> &'static str {
        "milp"
    }

    fn solve(&self, problem: &SelectionProblem<'_>) -> Result<Vec<usize>> {
        let c = problem.constraints();
        let n = problem.len();

        let mut vars = ProblemVariables::new();
        let pick: Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();
        let captain: Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();
        let vice: Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();

        let captain_bonus = c.captain_multiplier - 1.0;
        let vice_bonus = c.vice_captain_multiplier - 1.0;
        let objective: Expression = (0..n)
            .map(|i| {
                let s = problem.player(i).form();
                s * pick[i] + (s * captain_bonus) * captain[i] + (s * vice_bonus) * vice[i]
            })
            .sum();

        let mut model = vars.maximise(objective).using(microlp);

        let size = sum_of(pick.iter().copied());
        model.add_constraint(constraint!(size == c.squad_size as f64));

        let cost: Expression = (0..n).map(|i| problem.player(i).credits() * pick[i]).sum();
        model.add_constraint(constraint!(cost <= c.budget));

        for role in Role::ALL {
            let bounds = c.bounds_for(role);
            let members = (0..n).filter(|&i| problem.player(i).role() == role).map(|i| pick[i]);
            let count = sum_of(members);
            model.add_constraint(constraint!(count.clone() >= bounds.min as f64));
            if bounds.max < c.squad_size {
                model.add_constraint(constraint!(count <= bounds.max as f64));
            }
        }

        for group in &c.groups {
            let members = (0..n).filter(|&i| group.includes(problem.player(i).role())).map(|i| pick[i]);
            let count = sum_of(members);
            model.add_constraint(constraint!(count.clone() >= group.min as f64));
            if group.max < c.squad_size {
                model.add_constraint(constraint!(count <= group.max as f64));
            }
        }

        for t in 0..problem.teams().len() {
            let members = (0..n).filter(|&i| problem.team_index(i) == t).map(|i| pick[i]);
            let count = sum_of(members);
            model.add_constraint(constraint!(count.clone() >= c.team_bounds.min as f64));
            if c.team_bounds.max < c.squad_size {
                model.add_constraint(constraint!(count <= c.team_bounds.max as f64));
            }
        }

        model.add_constraint(constraint!(sum_of(captain.iter().copied()) == 1.0));
        model.add_constraint(constraint!(sum_of(vice.iter().copied()) == 1.0));
        for i in 0..n {
            model.add_constraint(constraint!(captain[i] <= pick[i]));
            model.add_constraint(constraint!(vice[i] <= pick[i]));
            model.add_constraint(constraint!(captain[i] + vice[i] <= 1.0));
        }

        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                return Err(SelectionError::InfeasibleConstraints(
                    "no squad satisfies budget, role and team bounds".to_string(),
                ))
            }
            Err(e) => return Err(SelectionError::Solver(e.to_string())),
        };

        let chosen: Vec<usize> = (0..n).filter(|&i| solution.value(pick[i]) > 0.5).collect();
        log::debug!("MILP picked {} of {} players", chosen.len(), n);
        Ok(chosen)
    }
}
