//! Fast necessary conditions checked before any solver runs

use super::problem::SelectionProblem;
use crate::error::{Result, SelectionError};
use crate::models::Role;

fn infeasible<T>(msg: String) -> Result<T> {
    Err(SelectionError::InfeasibleConstraints(msg))
}

/// Fail early, with a readable reason, when the pool obviously cannot
/// produce a squad. Passing does not guarantee a feasible squad exists.
pub fn feasibility_check(problem: &SelectionProblem<'_>) -> Result<()> {
    let c = problem.constraints();
    let everyone: Vec<usize> = (0..problem.len()).collect();
    let available = problem.tally(&everyone);

    log::debug!(
        "Pool availability: WK {}, BAT {}, ALL {}, BOWL {}, teams {:?}",
        available.role(Role::WicketKeeper),
        available.role(Role::Batsman),
        available.role(Role::AllRounder),
        available.role(Role::Bowler),
        problem.teams().iter().zip(&available.teams).collect::<Vec<_>>()
    );

    if problem.len() < c.squad_size {
        return infeasible(format!(
            "need {} players, pool has {}",
            c.squad_size,
            problem.len()
        ));
    }

    let mut role_capacity = 0usize;
    for role in Role::ALL {
        let bounds = c.bounds_for(role);
        let n = available.role(role);
        if n < bounds.min {
            return infeasible(format!("need at least {} {}, pool has {}", bounds.min, role, n));
        }
        role_capacity += n.min(bounds.max);
    }
    if role_capacity < c.squad_size {
        return infeasible(format!(
            "role maximums allow only {} of {} players from this pool",
            role_capacity, c.squad_size
        ));
    }

    for (group, &n) in c.groups.iter().zip(&available.groups) {
        if n < group.min {
            return infeasible(format!(
                "need at least {} {}, pool has {}",
                group.min, group.name, n
            ));
        }
    }

    let team_min = c.team_bounds.min;
    if team_min.saturating_mul(problem.teams().len()) > c.squad_size {
        return infeasible(format!(
            "{} teams with at least {} each exceed squad size {}",
            problem.teams().len(),
            team_min,
            c.squad_size
        ));
    }
    let mut team_capacity = 0usize;
    for (team, &n) in problem.teams().iter().zip(&available.teams) {
        if n < team_min {
            return infeasible(format!("need at least {} from {}, pool has {}", team_min, team, n));
        }
        team_capacity += n.min(c.team_bounds.max);
    }
    if team_capacity < c.squad_size {
        return infeasible(format!(
            "at most {} per team allows only {} of {} players",
            c.team_bounds.max, team_capacity, c.squad_size
        ));
    }

    let cheapest: f64 = problem
        .by_cost()
        .iter()
        .take(c.squad_size)
        .map(|&i| problem.player(i).credits())
        .sum();
    if cheapest > c.budget + 1e-9 {
        return infeasible(format!(
            "cheapest {} players cost {:.1}, budget is {:.1}",
            c.squad_size, cheapest, c.budget
        ));
    }

    Ok(())
}
