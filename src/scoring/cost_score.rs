//! Relative cost scoring across the providers of one comparison run.

/// Score for a provider evaluated without a comparison set
pub const NEUTRAL_COST_SCORE: f64 = 70.0;

pub const CHEAPEST_COST_SCORE: f64 = 100.0;
pub const MOST_EXPENSIVE_COST_SCORE: f64 = 30.0;

/// Linear interpolation from 100 (cheapest in `comparison`) to 30 (most
/// expensive). All-equal costs score 100; an empty comparison set scores
/// [`NEUTRAL_COST_SCORE`].
pub fn cost_score(monthly_cost: f64, comparison: &[f64]) -> f64 {
    let finite = comparison.iter().copied().filter(|c| c.is_finite());
    let Some((min, max)) = finite.fold(None, |range: Option<(f64, f64)>, c| match range {
        None => Some((c, c)),
        Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
    }) else {
        return NEUTRAL_COST_SCORE;
    };

    let spread = max - min;
    if spread <= f64::EPSILON * max.abs().max(1.0) {
        return CHEAPEST_COST_SCORE;
    }

    let position = ((monthly_cost - min) / spread).clamp(0.0, 1.0);
    CHEAPEST_COST_SCORE - position * (CHEAPEST_COST_SCORE - MOST_EXPENSIVE_COST_SCORE)
}
