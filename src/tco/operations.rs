//! Operations effort in FTE.
//!
//! Each offered service contributes a base FTE fraction by operations tier,
//! scaled sub-linearly by instance count and by a variety factor for
//! heterogeneous sub-types. Self-built services add their own tier's FTE
//! once.

use super::TcoLevel;
use crate::analysis::ServiceAnalysis;
use crate::catalog::{ServiceId, Tier};
use crate::sizing::{Footprint, SystemConfig};
use serde::{Deserialize, Serialize};

/// Fraction of one FTE needed to run a service at an operations tier
pub fn base_fte(tier: Tier) -> f64 {
    match tier {
        Tier::VeryLow => 0.02,
        Tier::Low => 0.05,
        Tier::Medium => 0.15,
        Tier::High => 0.3,
        Tier::VeryHigh => 0.5,
    }
}

/// `1 + ln(n) / ln(1.5)` for n > 1; exactly 1 for a single instance
pub fn instance_scale(instances: u32) -> f64 {
    if instances <= 1 {
        return 1.0;
    }
    1.0 + f64::from(instances).ln() / 1.5_f64.ln()
}

/// Extra operations effort per additional distinct sub-type
pub fn variety_increment(service: &ServiceId) -> f64 {
    match service {
        ServiceId::DatabaseSql => 0.25,
        ServiceId::DatabaseNosql | ServiceId::Kubernetes => 0.20,
        ServiceId::Messaging | ServiceId::Cache => 0.15,
        _ => 0.10,
    }
}

/// `1 + (distinct - 1) × increment`
pub fn variety_factor(increment: f64, distinct: u32) -> f64 {
    1.0 + f64::from(distinct.max(1) - 1) * increment
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsLine {
    pub service: ServiceId,
    pub tier: Tier,
    pub base_fte: f64,
    pub scale: f64,
    pub variety: f64,
    pub fte: f64,
    pub self_build: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsEstimate {
    pub lines: Vec<OperationsLine>,
    pub total_fte: f64,
    pub monthly_personnel_cost: f64,
    pub level: TcoLevel,
}

impl OperationsEstimate {
    /// <0.5 FTE low, <1.5 FTE medium, else high
    pub fn level_for(total_fte: f64) -> TcoLevel {
        if total_fte < 0.5 {
            TcoLevel::Low
        } else if total_fte < 1.5 {
            TcoLevel::Medium
        } else {
            TcoLevel::High
        }
    }
}

pub fn estimate_operations(
    analysis: &ServiceAnalysis,
    system: Option<&SystemConfig>,
    fte_monthly_rate: f64,
) -> OperationsEstimate {
    let mut lines: Vec<OperationsLine> = analysis
        .offered()
        .map(|matched| {
            let footprint = system
                .map(|s| s.footprint(&matched.service))
                .unwrap_or(Footprint::SINGLE);
            let base = base_fte(matched.operations);
            let scale = instance_scale(footprint.instances);
            let variety = variety_factor(variety_increment(&matched.service), footprint.variants);
            OperationsLine {
                service: matched.service.clone(),
                tier: matched.operations,
                base_fte: base,
                scale,
                variety,
                fte: base * scale * variety,
                self_build: false,
            }
        })
        .collect();

    lines.extend(analysis.self_buildable().map(|(service, option)| {
        let base = base_fte(option.operations);
        OperationsLine {
            service: service.clone(),
            tier: option.operations,
            base_fte: base,
            scale: 1.0,
            variety: 1.0,
            fte: base,
            self_build: true,
        }
    }));

    let total_fte: f64 = lines.iter().map(|l| l.fte).sum();
    OperationsEstimate {
        monthly_personnel_cost: (total_fte * fte_monthly_rate).round(),
        level: OperationsEstimate::level_for(total_fte),
        total_fte,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_instance_is_unscaled() {
        assert_eq!(instance_scale(0), 1.0);
        assert_eq!(instance_scale(1), 1.0);
    }

    #[test]
    fn test_four_instances_scale_example() {
        let fte = base_fte(Tier::Medium) * instance_scale(4) * variety_factor(0.1, 1);
        assert!((instance_scale(4) - 4.4190).abs() < 1e-4);
        assert!((fte - 0.6629).abs() < 1e-4);
    }

    #[test]
    fn test_scale_is_non_decreasing() {
        let mut previous = instance_scale(1);
        for n in 2..200 {
            let current = instance_scale(n);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_variety_factor_penalises_heterogeneity() {
        assert_eq!(variety_factor(0.25, 1), 1.0);
        assert_eq!(variety_factor(0.25, 3), 1.5);
        assert_eq!(variety_factor(0.25, 0), 1.0);
    }

    #[test]
    fn test_levels_by_total_fte() {
        assert_eq!(OperationsEstimate::level_for(0.2), TcoLevel::Low);
        assert_eq!(OperationsEstimate::level_for(0.5), TcoLevel::Medium);
        assert_eq!(OperationsEstimate::level_for(2.0), TcoLevel::High);
    }
}
