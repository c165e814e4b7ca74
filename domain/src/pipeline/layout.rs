//! Horizontal node layout

/// Fractional x position (in `[0, 1]`) of each of `stage_count` stages.
///
/// Stages sit at equal intervals: stage `i` at `i / (n - 1)`, or the midpoint
/// when there is a single stage.
pub fn resolve_positions(stage_count: usize) -> Vec<f64> {
    match stage_count {
        0 => Vec::new(),
        1 => vec![0.5],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}
