use crate::config::MaturitySettings;

/// Lowest factor the maturity penalty can reach
pub const MATURITY_FLOOR: f64 = 0.7;

/// `max(0.7, 1 - preview × p% - missing × m%)`, or 1.0 when disabled.
///
/// Negative or non-finite penalty percentages count as zero, so the factor
/// always lies in `[0.7, 1.0]`.
pub fn maturity_factor(settings: &MaturitySettings, preview: usize, missing: usize) -> f64 {
    if !settings.enabled {
        return 1.0;
    }

    let rate = |percent: f64| {
        if percent.is_finite() {
            percent.max(0.0) / 100.0
        } else {
            0.0
        }
    };
    let penalty = preview as f64 * rate(settings.preview_penalty_percent)
        + missing as f64 * rate(settings.missing_penalty_percent);

    (1.0 - penalty).clamp(MATURITY_FLOOR, 1.0)
}
