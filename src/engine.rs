//! Primary analysis entrypoints.
//!
//! `CloudAnalyzer` owns the catalog, the override set read from the store
//! and the personnel rates. Every analysis call takes fresh immutable
//! inputs and returns a complete result; nothing is cached between calls.

use crate::analysis::{ServiceAnalysis, ServiceAnalyzer};
use crate::catalog::{ArchitectureComponent, Catalog, Provider, ProviderCategory, ServiceId};
use crate::config::{AnalysisSettings, EngineConfig, TcoRates, WeightConfig};
use crate::cost::CostModel;
use crate::errors::{Error, Result};
use crate::overrides::{EffectiveScoreResolver, FileStore, KeyValueStore, OverrideSet};
use crate::portfolio::{ApplicationInstance, PortfolioAggregator, PortfolioResult};
use crate::recommendation::{recommend, Recommendation};
use crate::scoring::{Score, ScoringEngine};
use crate::sizing::SystemConfig;
use crate::tco::{TcoCalculator, TcoEstimate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One provider's complete evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based position in the ranking
    pub rank: usize,
    pub provider_id: String,
    pub provider_name: String,
    pub category: ProviderCategory,
    pub service_analysis: ServiceAnalysis,
    pub tco: TcoEstimate,
    pub score: Score,
    pub recommendation: Recommendation,
}

/// Total descending, then provider id ascending
pub fn compare_ranked(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.score
        .total
        .total_cmp(&a.score.total)
        .then_with(|| a.provider_id.cmp(&b.provider_id))
}

/// Sort and number results in place
pub fn rank_results(results: &mut [RankedResult]) {
    results.sort_by(compare_ranked);
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index + 1;
    }
}

type SharedStore = Box<dyn KeyValueStore + Send + Sync>;

pub struct CloudAnalyzer {
    catalog: Catalog,
    overrides: OverrideSet,
    rates: TcoRates,
    store: Option<SharedStore>,
}

/// Analysis and TCO of one provider, before cost scoring
struct Evaluation<'c> {
    provider: &'c Provider,
    analysis: ServiceAnalysis,
    tco: TcoEstimate,
}

impl CloudAnalyzer {
    /// Analyzer with baseline catalog values and no override store
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            overrides: OverrideSet::new(),
            rates: TcoRates::default(),
            store: None,
        }
    }

    /// Analyzer reading overrides from `store` now and on every
    /// [`reload_overrides`](Self::reload_overrides)
    pub fn with_store(catalog: Catalog, store: SharedStore) -> Self {
        let overrides = OverrideSet::load(store.as_ref());
        Self {
            catalog,
            overrides,
            rates: TcoRates::default(),
            store: Some(store),
        }
    }

    /// Analyzer using the configured rates and override store location
    pub fn from_config(catalog: Catalog, config: &EngineConfig) -> Self {
        let location = config
            .overrides
            .path
            .clone()
            .or_else(FileStore::default_location);
        let analyzer = match location {
            Some(path) => {
                log::debug!("Reading score overrides from {}", path.display());
                Self::with_store(catalog, Box::new(FileStore::new(path)))
            }
            None => {
                log::warn!("No data directory for the override store; using catalog values");
                Self::new(catalog)
            }
        };
        analyzer.with_rates(config.rates)
    }

    pub fn with_rates(mut self, rates: TcoRates) -> Self {
        self.rates = rates;
        self
    }

    /// Replace the override set directly, e.g. for callers without a store
    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }

    /// Re-read overrides from the store after an external change.
    ///
    /// Without a store the current set is kept.
    pub fn reload_overrides(&mut self) {
        if let Some(store) = &self.store {
            self.overrides = OverrideSet::load(store.as_ref());
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    pub fn rates(&self) -> TcoRates {
        self.rates
    }

    pub fn resolver(&self) -> EffectiveScoreResolver<'_> {
        EffectiveScoreResolver::new(&self.catalog, &self.overrides)
    }

    /// Look up every component id, failing on the first unknown one
    pub fn resolve_components<S: AsRef<str>>(
        &self,
        component_ids: &[S],
    ) -> Result<Vec<&ArchitectureComponent>> {
        component_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.catalog
                    .component(id)
                    .ok_or_else(|| Error::UnknownComponent(id.to_string()))
            })
            .collect()
    }

    /// Union of the services the components require, in first-seen order.
    /// Unknown component ids are skipped with a warning.
    pub fn required_services<S: AsRef<str>>(&self, component_ids: &[S]) -> Vec<ServiceId> {
        let mut services: Vec<ServiceId> = Vec::new();
        for id in component_ids {
            let Some(component) = self.catalog.component(id.as_ref()) else {
                log::warn!("Unknown component '{}' ignored", id.as_ref());
                continue;
            };
            for service in &component.required_services {
                if !services.contains(service) {
                    services.push(service.clone());
                }
            }
        }
        services
    }

    /// Score and rank every catalog provider for the selected components.
    ///
    /// Cost scores are relative to the monthly totals of all providers in
    /// this run.
    pub fn analyze_for_components<S: AsRef<str>>(
        &self,
        component_ids: &[S],
        weights: &WeightConfig,
        system: Option<&SystemConfig>,
        settings: &AnalysisSettings,
    ) -> Vec<RankedResult> {
        let required = self.required_services(component_ids);
        log::debug!(
            "Analyzing {} providers for {} required services",
            self.catalog.providers.len(),
            required.len()
        );

        let evaluations: Vec<Evaluation<'_>> = self
            .catalog
            .providers
            .iter()
            .map(|provider| self.evaluate(provider, &required, system, settings))
            .collect();
        let comparison: Vec<f64> = evaluations.iter().map(|e| e.tco.monthly_total).collect();

        let mut results: Vec<RankedResult> = evaluations
            .into_iter()
            .map(|evaluation| self.finish(evaluation, weights, Some(&comparison), settings))
            .collect();
        rank_results(&mut results);
        results
    }

    /// Evaluate a single provider without a comparison set; its cost score
    /// is the neutral fallback.
    pub fn evaluate_provider<S: AsRef<str>>(
        &self,
        provider_id: &str,
        component_ids: &[S],
        weights: &WeightConfig,
        system: Option<&SystemConfig>,
        settings: &AnalysisSettings,
    ) -> Result<RankedResult> {
        let provider = self
            .catalog
            .provider(provider_id)
            .ok_or_else(|| Error::UnknownProvider(provider_id.to_string()))?;
        let required = self.required_services(component_ids);
        let evaluation = self.evaluate(provider, &required, system, settings);
        let mut result = self.finish(evaluation, weights, None, settings);
        result.rank = 1;
        Ok(result)
    }

    /// Run every application independently and aggregate per provider
    pub fn analyze_portfolio(
        &self,
        applications: &[ApplicationInstance],
        weights: &WeightConfig,
        settings: &AnalysisSettings,
        top_components: usize,
    ) -> PortfolioResult {
        PortfolioAggregator::new(self).aggregate(applications, weights, settings, top_components)
    }

    fn evaluate<'c>(
        &'c self,
        provider: &'c Provider,
        required: &[ServiceId],
        system: Option<&SystemConfig>,
        settings: &AnalysisSettings,
    ) -> Evaluation<'c> {
        let resolver = self.resolver();
        let analysis = ServiceAnalyzer::new(resolver).analyze(provider, required);
        let tco = TcoCalculator::new(CostModel::new(resolver), self.rates).calculate(
            provider,
            &analysis,
            system,
            &settings.operations,
            &settings.project_effort,
        );
        Evaluation {
            provider,
            analysis,
            tco,
        }
    }

    fn finish(
        &self,
        evaluation: Evaluation<'_>,
        weights: &WeightConfig,
        comparison: Option<&[f64]>,
        settings: &AnalysisSettings,
    ) -> RankedResult {
        let Evaluation {
            provider,
            analysis,
            tco,
        } = evaluation;
        let score = ScoringEngine::new(self.resolver()).score(
            provider,
            &analysis,
            &tco,
            weights,
            comparison,
            &settings.maturity,
        );
        let recommendation = recommend(provider, &analysis, &score, &tco);

        RankedResult {
            rank: 0,
            provider_id: provider.id.clone(),
            provider_name: provider.name.clone(),
            category: provider.category,
            service_analysis: analysis,
            tco,
            score,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{MemoryStore, ScoreOverride, OVERRIDES_KEY};

    fn analyzer() -> CloudAnalyzer {
        CloudAnalyzer::new(Catalog::builtin().unwrap())
    }

    #[test]
    fn test_results_cover_every_provider_in_rank_order() {
        let analyzer = analyzer();
        let results = analyzer.analyze_for_components(
            &["compute", "database"],
            &WeightConfig::default(),
            None,
            &AnalysisSettings::default(),
        );
        assert_eq!(results.len(), analyzer.catalog().providers.len());
        for (index, pair) in results.windows(2).enumerate() {
            assert_eq!(pair[0].rank, index + 1);
            assert_ne!(compare_ranked(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_cheapest_scores_hundred_most_expensive_thirty() {
        let results = analyzer().analyze_for_components(
            &["compute", "kubernetes"],
            &WeightConfig::default(),
            None,
            &AnalysisSettings::default(),
        );
        let cheapest = results
            .iter()
            .min_by(|a, b| a.tco.monthly_total.total_cmp(&b.tco.monthly_total))
            .unwrap();
        let priciest = results
            .iter()
            .max_by(|a, b| a.tco.monthly_total.total_cmp(&b.tco.monthly_total))
            .unwrap();
        assert_eq!(cheapest.score.cost, 100.0);
        assert_eq!(priciest.score.cost, 30.0);
    }

    #[test]
    fn test_unknown_components_are_skipped() {
        let analyzer = analyzer();
        let services = analyzer.required_services(&["compute", "mainframe"]);
        assert_eq!(services, vec![ServiceId::Compute, ServiceId::StorageBlock]);
        assert!(matches!(
            analyzer.resolve_components(&["compute", "mainframe"]),
            Err(Error::UnknownComponent(id)) if id == "mainframe"
        ));
    }

    #[test]
    fn test_shared_services_are_required_once() {
        let services = analyzer().required_services(&["database", "backup"]);
        assert_eq!(
            services,
            vec![ServiceId::DatabaseSql, ServiceId::Backup, ServiceId::StorageObject]
        );
    }

    #[test]
    fn test_evaluate_provider_uses_neutral_cost() {
        let result = analyzer()
            .evaluate_provider(
                "ionos",
                &["compute"],
                &WeightConfig::default(),
                None,
                &AnalysisSettings::default(),
            )
            .unwrap();
        assert_eq!(result.score.cost, 70.0);
        assert_eq!(result.rank, 1);
    }

    #[test]
    fn test_evaluate_unknown_provider_fails() {
        let outcome = analyzer().evaluate_provider(
            "nimbus",
            &["compute"],
            &WeightConfig::default(),
            None,
            &AnalysisSettings::default(),
        );
        assert!(matches!(outcome, Err(Error::UnknownProvider(_))));
    }

    #[test]
    fn test_reload_picks_up_store_changes() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut analyzer = CloudAnalyzer::with_store(
            Catalog::builtin().unwrap(),
            Box::new(SharedMemory(store.clone())),
        );
        assert!(analyzer.overrides().is_empty());

        store
            .set(OVERRIDES_KEY, r#"{"aws": {"control": 55}}"#)
            .unwrap();
        analyzer.reload_overrides();
        assert_eq!(
            analyzer.overrides().get("aws"),
            Some(&ScoreOverride {
                control: Some(55.0),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_malformed_store_fails_open() {
        let analyzer = CloudAnalyzer::with_store(
            Catalog::builtin().unwrap(),
            Box::new(MemoryStore::with_entry(OVERRIDES_KEY, "{not json")),
        );
        assert!(analyzer.overrides().is_empty());
    }

    struct SharedMemory(std::sync::Arc<MemoryStore>);

    impl KeyValueStore for SharedMemory {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }
}
