//! End-to-end selection checks against a brute-force optimum

use xi_core::{
    ConstraintSet, Designation, Player, Role, SelectionError, SolverKind, TeamSelector,
};

fn fifteen() -> Vec<Player> {
    let roles = [
        Role::WicketKeeper,
        Role::WicketKeeper,
        Role::Batsman,
        Role::Batsman,
        Role::Batsman,
        Role::Batsman,
        Role::Batsman,
        Role::AllRounder,
        Role::AllRounder,
        Role::AllRounder,
        Role::Bowler,
        Role::Bowler,
        Role::Bowler,
        Role::Bowler,
        Role::Bowler,
    ];
    roles
        .iter()
        .enumerate()
        .map(|(i, &role)| {
            let team = if i % 2 == 0 { "RCB" } else { "KKR" };
            let credits = 8.0 + ((i * 7) % 5) as f64 * 0.5;
            let form = 30.0 + ((i * 13) % 41) as f64;
            Player::new(format!("p{:02}", i), format!("Player {}", i), role, team, credits, form)
        })
        .collect()
}

/// Form tracks price closely, so the best eleven costs exactly 95 credits.
fn priced_to_budget() -> Vec<Player> {
    let rows = [
        (Role::WicketKeeper, 7.0, 40.0),
        (Role::WicketKeeper, 9.0, 57.0),
        (Role::Batsman, 7.5, 45.0),
        (Role::Batsman, 9.5, 62.0),
        (Role::Batsman, 8.0, 50.0),
        (Role::Batsman, 10.0, 67.0),
        (Role::AllRounder, 8.5, 55.0),
        (Role::AllRounder, 7.5, 43.0),
        (Role::AllRounder, 9.0, 60.0),
        (Role::Bowler, 8.0, 48.0),
        (Role::Bowler, 9.5, 65.0),
        (Role::Bowler, 8.5, 53.0),
        (Role::Bowler, 7.0, 41.0),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, &(role, credits, form))| {
            let team = if i % 2 == 0 { "RCB" } else { "KKR" };
            Player::new(format!("q{:02}", i), format!("Player {}", i), role, team, credits, form)
        })
        .collect()
}

fn satisfies(c: &ConstraintSet, squad: &[&Player]) -> bool {
    let cost: f64 = squad.iter().map(|p| p.credits()).sum();
    if squad.len() != c.squad_size || cost > c.budget + 1e-9 {
        return false;
    }
    let roles_ok = Role::ALL.iter().all(|&r| {
        let n = squad.iter().filter(|p| p.role() == r).count();
        c.bounds_for(r).contains(n)
    });
    let groups_ok = c.groups.iter().all(|g| {
        let n = squad.iter().filter(|p| g.includes(p.role())).count();
        g.min <= n && n <= g.max
    });
    let teams_ok = ["RCB", "KKR"].iter().all(|t| {
        let n = squad.iter().filter(|p| p.team() == *t).count();
        c.team_bounds.contains(n)
    });
    roles_ok && groups_ok && teams_ok
}

fn weighted_value(c: &ConstraintSet, squad: &[&Player]) -> f64 {
    let mut forms: Vec<f64> = squad.iter().map(|p| p.form()).collect();
    forms.sort_by(|a, b| b.total_cmp(a));
    forms.iter().sum::<f64>()
        + forms[0] * (c.captain_multiplier - 1.0)
        + forms[1] * (c.vice_captain_multiplier - 1.0)
}

fn brute_force(pool: &[Player], c: &ConstraintSet) -> Option<f64> {
    let n = pool.len();
    let mut best: Option<f64> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() as usize != c.squad_size {
            continue;
        }
        let squad: Vec<&Player> = (0..n).filter(|i| mask & (1 << i) != 0).map(|i| &pool[i]).collect();
        if !satisfies(c, &squad) {
            continue;
        }
        let value = weighted_value(c, &squad);
        if best.map_or(true, |b| value > b) {
            best = Some(value);
        }
    }
    best
}

#[test]
fn test_exact_solvers_match_brute_force() {
    let pool = fifteen();
    let c = ConstraintSet::default();
    let optimum = brute_force(&pool, &c).unwrap();
    assert!((optimum - 706.5).abs() < 1e-9);

    for kind in [SolverKind::Milp, SolverKind::Exhaustive] {
        let roster = TeamSelector::new(c.clone(), kind).select(&pool).unwrap();
        assert!(
            (roster.expected_points() - optimum).abs() < 1e-6,
            "{:?} found {} instead of {}",
            kind,
            roster.expected_points(),
            optimum
        );
    }
}

#[test]
fn test_every_solver_returns_a_legal_squad() {
    let pool = fifteen();
    let c = ConstraintSet::default();
    for kind in [SolverKind::Milp, SolverKind::Exhaustive, SolverKind::Greedy] {
        let roster = TeamSelector::new(c.clone(), kind).select(&pool).unwrap();
        let squad: Vec<&Player> = roster.players().collect();
        assert!(satisfies(&c, &squad), "{:?} broke a rule", kind);
        assert!(roster.total_credits() <= 100.0 + 1e-9);
        assert!(roster.expected_points() <= 706.5 + 1e-6);
    }
}

#[test]
fn test_captaincy_goes_to_top_two() {
    let pool = fifteen();
    let roster = TeamSelector::new(ConstraintSet::default(), SolverKind::Exhaustive)
        .select(&pool)
        .unwrap();
    let captain = roster.captain().unwrap();
    let vice = roster.vice_captain().unwrap();
    for p in roster.players() {
        assert!(p.form() <= captain.form());
        if p.id() != captain.id() {
            assert!(p.form() <= vice.form());
        }
    }
    let multipliers: Vec<f64> = roster
        .picks()
        .iter()
        .filter(|p| p.designation != Designation::Player)
        .map(|p| p.multiplier)
        .collect();
    assert_eq!(multipliers, vec![2.0, 1.5]);
}

#[test]
fn test_reruns_are_identical() {
    let pool = fifteen();
    for kind in [SolverKind::Milp, SolverKind::Exhaustive, SolverKind::Greedy] {
        let selector = TeamSelector::new(ConstraintSet::default(), kind);
        let first = selector.select(&pool).unwrap();
        let second = selector.select(&pool).unwrap();
        assert_eq!(first, second, "{:?} is not deterministic", kind);
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let pool = fifteen();
    let mut reversed = pool.clone();
    reversed.reverse();
    let selector = TeamSelector::new(ConstraintSet::default(), SolverKind::Exhaustive);
    assert_eq!(selector.select(&pool).unwrap(), selector.select(&reversed).unwrap());
}

#[test]
fn test_tight_budget_is_infeasible() {
    let pool = fifteen();
    let c = ConstraintSet { budget: 80.0, ..ConstraintSet::default() };
    for kind in [SolverKind::Milp, SolverKind::Exhaustive] {
        let err = TeamSelector::new(c.clone(), kind).select(&pool).unwrap_err();
        assert!(matches!(err, SelectionError::InfeasibleConstraints(_)), "{:?}: {}", kind, err);
    }
}

#[test]
fn test_not_enough_bowling_options() {
    let pool: Vec<Player> = fifteen()
        .into_iter()
        .filter(|p| !(p.role() == Role::Bowler && p.id().as_str() > "p10"))
        .collect();
    // 3 all-rounders + 1 bowler left
    let c = ConstraintSet::default();
    let err = TeamSelector::new(c.clone(), SolverKind::Milp).select(&pool).unwrap_err();
    assert!(err.to_string().contains("bowling options"));

    let mut relaxed = c;
    relaxed.groups[0].min = 4;
    let roster = TeamSelector::new(relaxed, SolverKind::Exhaustive).select(&pool).unwrap();
    assert_eq!(roster.len(), 11);
}

#[test]
fn test_squad_spending_the_whole_budget_is_found() {
    let pool = priced_to_budget();
    let c = ConstraintSet { budget: 95.0, ..ConstraintSet::default() };
    let optimum = brute_force(&pool, &c).unwrap();
    assert!((optimum - 704.5).abs() < 1e-9);

    for kind in [SolverKind::Milp, SolverKind::Exhaustive, SolverKind::Greedy] {
        let roster = TeamSelector::new(c.clone(), kind).select(&pool).unwrap();
        assert!((roster.total_credits() - 95.0).abs() < 1e-9, "{:?}", kind);
        assert!(
            (roster.expected_points() - optimum).abs() < 1e-6,
            "{:?} found {} instead of {}",
            kind,
            roster.expected_points(),
            optimum
        );
        assert!(roster.players().all(|p| p.id().as_str() != "q00" && p.id().as_str() != "q12"));
    }
}

#[test]
fn test_greedy_dead_end_is_a_solver_error() {
    let pool = vec![
        Player::new("x1", "X1", Role::Batsman, "X", 5.0, 50.0),
        Player::new("x2", "X2", Role::Batsman, "X", 1.0, 1.0),
        Player::new("y1", "Y1", Role::Batsman, "Y", 6.0, 30.0),
    ];
    let mut c = ConstraintSet::unrestricted(2, 10.0);
    c.team_bounds.min = 1;

    let err = TeamSelector::new(c.clone(), SolverKind::Greedy).select(&pool).unwrap_err();
    assert!(matches!(err, SelectionError::Solver(_)), "{}", err);

    let roster = TeamSelector::new(c, SolverKind::Milp).select(&pool).unwrap();
    let mut ids: Vec<&str> = roster.players().map(|p| p.id().as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["x2", "y1"]);
}
