//! Weighted provider score.
//!
//! Pipeline:
//! 1. Blend service averages 60/40 with the provider's effective control
//!    and performance
//! 2. Availability is the coverage, cost is relative to the comparison set
//! 3. Weight the four dimensions with normalized weights
//! 4. Apply the maturity factor and round to one decimal

use super::cost_score::cost_score;
use super::maturity::maturity_factor;
use crate::analysis::ServiceAnalysis;
use crate::catalog::Provider;
use crate::config::{MaturitySettings, NormalizedWeights, WeightConfig};
use crate::overrides::EffectiveScoreResolver;
use crate::tco::TcoEstimate;
use serde::{Deserialize, Serialize};

/// Share of the service average in the combined control/performance score
pub const SERVICE_SHARE: f64 = 0.6;
/// Share of the provider value in the combined control/performance score
pub const PROVIDER_SHARE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub control: f64,
    pub performance: f64,
    pub availability: f64,
    pub cost: f64,
    pub weights: NormalizedWeights,
    /// Weighted sum before the maturity factor
    pub base: f64,
    pub maturity_factor: f64,
    /// `base × maturity_factor`, rounded to one decimal
    pub total: f64,
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn blend(service_average: f64, provider_value: f64) -> f64 {
    SERVICE_SHARE * service_average + PROVIDER_SHARE * provider_value
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    resolver: EffectiveScoreResolver<'a>,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(resolver: EffectiveScoreResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Score one provider. `comparison` holds the monthly totals of every
    /// provider in the run; `None` scores cost neutrally.
    pub fn score(
        &self,
        provider: &Provider,
        analysis: &ServiceAnalysis,
        tco: &TcoEstimate,
        weights: &WeightConfig,
        comparison: Option<&[f64]>,
        maturity: &MaturitySettings,
    ) -> Score {
        let weights = weights.normalize();

        let control = blend(analysis.avg_service_control, self.resolver.control(provider));
        let performance = blend(
            analysis.avg_service_performance,
            self.resolver.performance(provider),
        );
        let availability = analysis.coverage;
        let cost = cost_score(tco.monthly_total, comparison.unwrap_or(&[]));

        let base = control * weights.control
            + performance * weights.performance
            + availability * weights.availability
            + cost * weights.cost;
        let factor = maturity_factor(maturity, analysis.preview.len(), analysis.missing.len());

        Score {
            control,
            performance,
            availability,
            cost,
            weights,
            base,
            maturity_factor: factor,
            total: round1(base * factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ServiceAnalyzer;
    use crate::catalog::{Catalog, ServiceId};
    use crate::config::{OperationsSettings, ProjectEffortSettings, TcoRates};
    use crate::cost::CostModel;
    use crate::overrides::OverrideSet;
    use crate::tco::TcoCalculator;

    fn score_for(
        catalog: &Catalog,
        overrides: &OverrideSet,
        provider_id: &str,
        weights: &WeightConfig,
        comparison: Option<&[f64]>,
    ) -> Score {
        let resolver = EffectiveScoreResolver::new(catalog, overrides);
        let provider = catalog.provider(provider_id).unwrap();
        let required = [ServiceId::Compute, ServiceId::DatabaseSql, ServiceId::Kubernetes];
        let analysis = ServiceAnalyzer::new(resolver).analyze(provider, &required);
        let tco = TcoCalculator::new(CostModel::new(resolver), TcoRates::default()).calculate(
            provider,
            &analysis,
            None,
            &OperationsSettings::default(),
            &ProjectEffortSettings::default(),
        );
        ScoringEngine::new(resolver).score(
            provider,
            &analysis,
            &tco,
            weights,
            comparison,
            &MaturitySettings::default(),
        )
    }

    #[test]
    fn test_total_is_rounded_to_one_decimal() {
        let catalog = Catalog::builtin().unwrap();
        let score = score_for(&catalog, &OverrideSet::new(), "stackit", &WeightConfig::default(), None);
        assert_eq!(score.total, round1(score.total));
        assert_eq!(score.cost, 70.0);
    }

    #[test]
    fn test_control_only_weights() {
        let catalog = Catalog::builtin().unwrap();
        let weights = WeightConfig::new(1.0, 0.0, 0.0, 0.0);
        let score = score_for(&catalog, &OverrideSet::new(), "aws", &weights, None);
        assert!((score.base - score.control).abs() < 1e-9);
        // AWS offers all three services at GA
        assert_eq!(score.maturity_factor, 1.0);
    }

    #[test]
    fn test_zero_weights_give_zero_score() {
        let catalog = Catalog::builtin().unwrap();
        let weights = WeightConfig::new(0.0, 0.0, 0.0, 0.0);
        let score = score_for(&catalog, &OverrideSet::new(), "gcp", &weights, None);
        assert_eq!(score.base, 0.0);
        assert_eq!(score.total, 0.0);
    }

    #[test]
    fn test_control_override_raises_combined_control() {
        let catalog = Catalog::builtin().unwrap();
        let baseline = score_for(&catalog, &OverrideSet::new(), "aws", &WeightConfig::default(), None);

        let mut overrides = OverrideSet::new();
        overrides
            .set(
                "aws",
                crate::overrides::ScoreOverride {
                    control: Some(60.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let overridden = score_for(&catalog, &overrides, "aws", &WeightConfig::default(), None);
        assert!(overridden.control > baseline.control);
    }

    #[test]
    fn test_blend_is_sixty_forty() {
        assert_eq!(blend(100.0, 0.0), 60.0);
        assert_eq!(blend(0.0, 100.0), 40.0);
    }
}
