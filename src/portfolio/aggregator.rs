//! Portfolio aggregation.
//!
//! Each application runs through the single-application pipeline on its
//! own. Scores and coverage are then averaged per provider, weighted by the
//! number of components the application selects; cost fields are summed.

use super::application::ApplicationInstance;
use super::metrics::{portfolio_metrics, PortfolioMetrics};
use crate::config::{AnalysisSettings, WeightConfig};
use crate::engine::{CloudAnalyzer, RankedResult};
use crate::scoring::round1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One application's ranking inside a portfolio run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub application_id: String,
    pub name: String,
    /// Weight of this application in the aggregated scores
    pub weight: usize,
    pub results: Vec<RankedResult>,
}

/// One provider across the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedProvider {
    pub rank: usize,
    pub provider_id: String,
    pub provider_name: String,
    pub aggregated_score: f64,
    pub aggregated_coverage: f64,
    pub monthly_infrastructure: f64,
    pub monthly_operations: f64,
    pub total_fte: f64,
    pub project_days: f64,
    pub one_time_cost: f64,
}

impl AggregatedProvider {
    pub fn monthly_total(&self) -> f64 {
        self.monthly_infrastructure + self.monthly_operations
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    pub providers: Vec<AggregatedProvider>,
    pub applications: Vec<ApplicationResult>,
    pub metrics: PortfolioMetrics,
}

/// Σ(value × weight) / Σ(weight); a plain mean when every weight is zero
pub fn weighted_mean(samples: &[(f64, f64)]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total_weight: f64 = samples.iter().map(|(_, w)| w).sum();
    if total_weight > 0.0 {
        Some(samples.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight)
    } else {
        Some(samples.iter().map(|(v, _)| v).sum::<f64>() / samples.len() as f64)
    }
}

#[derive(Default)]
struct Accumulator {
    name: String,
    scores: Vec<(f64, f64)>,
    coverage: Vec<(f64, f64)>,
    monthly_infrastructure: f64,
    monthly_operations: f64,
    total_fte: f64,
    project_days: f64,
    one_time_cost: f64,
}

impl Accumulator {
    fn add(&mut self, result: &RankedResult, weight: f64) {
        let tco = &result.tco;
        self.name.clone_from(&result.provider_name);
        self.scores.push((result.score.total, weight));
        self.coverage.push((result.service_analysis.coverage, weight));
        self.monthly_infrastructure += tco.consumption.monthly_estimate;
        if tco.operations_included {
            self.monthly_operations += tco.operations.monthly_personnel_cost;
        }
        self.total_fte += tco.operations.total_fte;
        self.project_days += tco.project_effort.total_days;
        self.one_time_cost += tco.project_effort.one_time_cost;
    }

    fn finish(self, provider_id: String) -> AggregatedProvider {
        AggregatedProvider {
            rank: 0,
            provider_id,
            provider_name: self.name,
            aggregated_score: round1(weighted_mean(&self.scores).unwrap_or(0.0)),
            aggregated_coverage: weighted_mean(&self.coverage).unwrap_or(100.0),
            monthly_infrastructure: self.monthly_infrastructure,
            monthly_operations: self.monthly_operations,
            total_fte: self.total_fte,
            project_days: self.project_days,
            one_time_cost: self.one_time_cost,
        }
    }
}

pub struct PortfolioAggregator<'a> {
    analyzer: &'a CloudAnalyzer,
}

impl<'a> PortfolioAggregator<'a> {
    pub fn new(analyzer: &'a CloudAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn aggregate(
        &self,
        applications: &[ApplicationInstance],
        weights: &WeightConfig,
        settings: &AnalysisSettings,
        top_components: usize,
    ) -> PortfolioResult {
        let application_results: Vec<ApplicationResult> = applications
            .iter()
            .map(|app| ApplicationResult {
                application_id: app.id.clone(),
                name: app.name.clone(),
                weight: app.component_count(),
                results: self.analyzer.analyze_for_components(
                    &app.component_ids(),
                    weights,
                    Some(&app.system_config),
                    settings,
                ),
            })
            .collect();

        let mut accumulators: BTreeMap<String, Accumulator> = BTreeMap::new();
        for app in &application_results {
            for result in &app.results {
                accumulators
                    .entry(result.provider_id.clone())
                    .or_default()
                    .add(result, app.weight as f64);
            }
        }

        let mut providers: Vec<AggregatedProvider> = accumulators
            .into_iter()
            .map(|(id, acc)| acc.finish(id))
            .collect();
        providers.sort_by(|a, b| {
            b.aggregated_score
                .total_cmp(&a.aggregated_score)
                .then_with(|| a.provider_id.cmp(&b.provider_id))
        });
        for (index, provider) in providers.iter_mut().enumerate() {
            provider.rank = index + 1;
        }

        log::debug!(
            "Aggregated {} providers over {} applications",
            providers.len(),
            applications.len()
        );

        PortfolioResult {
            providers,
            applications: application_results,
            metrics: portfolio_metrics(self.analyzer.catalog(), applications, top_components),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean_by_component_count() {
        // 3 components at 80, 1 component at 40
        let mean = weighted_mean(&[(80.0, 3.0), (40.0, 1.0)]).unwrap();
        assert_eq!(mean, 70.0);
    }

    #[test]
    fn test_zero_weights_fall_back_to_plain_mean() {
        assert_eq!(weighted_mean(&[(80.0, 0.0), (40.0, 0.0)]), Some(60.0));
        assert_eq!(weighted_mean(&[]), None);
    }
}
