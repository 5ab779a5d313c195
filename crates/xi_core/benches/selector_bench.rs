use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xi_core::{ConstraintSet, Player, Role, SolverKind, TeamSelector};

fn match_pool(size: usize) -> Vec<Player> {
    (0..size)
        .map(|i| {
            let role = Role::ALL[i % 4];
            let team = if i % 2 == 0 { "IND" } else { "AUS" };
            let credits = 7.0 + (i % 7) as f64 * 0.5;
            let form = 15.0 + ((i * 29) % 83) as f64;
            Player::new(format!("p{:02}", i), format!("Player {}", i), role, team, credits, form)
        })
        .collect()
}

fn bench_solvers(c: &mut Criterion) {
    let pool = match_pool(22);

    for kind in [SolverKind::Milp, SolverKind::Greedy] {
        let selector = TeamSelector::new(ConstraintSet::default(), kind);
        c.bench_function(&format!("select_22_{:?}", kind).to_lowercase(), |b| {
            b.iter(|| selector.select(black_box(&pool)))
        });
    }

    let small = match_pool(16);
    let exhaustive = TeamSelector::new(ConstraintSet::default(), SolverKind::Exhaustive);
    c.bench_function("select_16_exhaustive", |b| {
        b.iter(|| exhaustive.select(black_box(&small)))
    });
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
