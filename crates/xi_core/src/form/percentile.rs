/// Percentile rank of `score` within `pool`, 0-100.
///
/// Ties share the mean of their strict and weak ranks, so a pool of equal
/// values puts every member at 50 + 50/n.
pub fn percentile_of_score(pool: &[f64], score: f64) -> f64 {
    if pool.is_empty() {
        return 0.0;
    }
    let below = pool.iter().filter(|&&v| v < score).count();
    let at_or_below = pool.iter().filter(|&&v| v <= score).count();
    let present = usize::from(at_or_below > below);
    (below + at_or_below + present) as f64 * 50.0 / pool.len() as f64
}

/// Replace every value by its percentile rank in the same slice.
pub fn rank_in_place(values: &mut [f64]) {
    let pool = values.to_vec();
    for v in values.iter_mut() {
        *v = percentile_of_score(&pool, *v);
    }
}
