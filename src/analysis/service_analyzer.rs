//! Per-provider service partitioning and coverage.

use crate::catalog::{Maturity, Provider, SelfBuildOption, ServiceId, ServiceOffering, Tier};
use crate::overrides::{EffectiveScoreResolver, ScoreField};
use serde::{Deserialize, Serialize};

/// A required service the provider offers (GA or preview), with sub-scores
/// already rescaled by any provider override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedService {
    pub service: ServiceId,
    pub maturity: Maturity,
    pub control: f64,
    pub performance: f64,
    pub consumption: Tier,
    pub operations: Tier,
    pub project_effort: Tier,
    pub product: Option<String>,
}

/// A required service the provider lacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingService {
    pub service: ServiceId,
    pub self_build: Option<SelfBuildOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAnalysis {
    pub provider_id: String,
    pub total_required: usize,
    pub available: Vec<MatchedService>,
    pub preview: Vec<MatchedService>,
    pub planned: Vec<ServiceId>,
    pub missing: Vec<MissingService>,
    /// Percentage 0-100; preview services count half
    pub coverage: f64,
    pub avg_service_control: f64,
    pub avg_service_performance: f64,
}

impl ServiceAnalysis {
    /// GA and preview services together
    pub fn offered(&self) -> impl Iterator<Item = &MatchedService> {
        self.available.iter().chain(self.preview.iter())
    }

    pub fn self_buildable(&self) -> impl Iterator<Item = (&ServiceId, &SelfBuildOption)> {
        self.missing
            .iter()
            .filter_map(|m| m.self_build.as_ref().map(|option| (&m.service, option)))
    }
}

/// Where one required service lands for a provider
enum Placement<'o> {
    Available(&'o ServiceOffering),
    Preview(&'o ServiceOffering),
    Planned,
    Missing,
}

fn place(offering: Option<&ServiceOffering>) -> Placement<'_> {
    match offering {
        Some(o) if o.maturity == Maturity::Planned => Placement::Planned,
        Some(o) if !o.available => Placement::Missing,
        Some(o) if o.maturity == Maturity::Preview => Placement::Preview(o),
        Some(o) => Placement::Available(o),
        None => Placement::Missing,
    }
}

/// `(available + 0.5 × preview) / total × 100`; 100 when nothing is required
pub fn coverage(available: usize, preview: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (available as f64 + 0.5 * preview as f64) / total as f64 * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceAnalyzer<'a> {
    resolver: EffectiveScoreResolver<'a>,
}

impl<'a> ServiceAnalyzer<'a> {
    pub fn new(resolver: EffectiveScoreResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn analyze(&self, provider: &Provider, required: &[ServiceId]) -> ServiceAnalysis {
        let mut available = Vec::new();
        let mut preview = Vec::new();
        let mut planned = Vec::new();
        let mut missing = Vec::new();

        for service in required {
            match place(provider.offering(service)) {
                Placement::Available(offering) => {
                    available.push(self.matched(provider, service, offering))
                }
                Placement::Preview(offering) => {
                    preview.push(self.matched(provider, service, offering))
                }
                Placement::Planned => planned.push(service.clone()),
                Placement::Missing => missing.push(MissingService {
                    service: service.clone(),
                    self_build: self.resolver.catalog().self_build_option(service).cloned(),
                }),
            }
        }

        let offered = || available.iter().chain(preview.iter());
        let avg_service_control = mean(offered().map(|m| m.control))
            .unwrap_or_else(|| self.resolver.control(provider));
        let avg_service_performance = mean(offered().map(|m| m.performance))
            .unwrap_or_else(|| self.resolver.performance(provider));

        ServiceAnalysis {
            provider_id: provider.id.clone(),
            total_required: required.len(),
            coverage: coverage(available.len(), preview.len(), required.len()),
            available,
            preview,
            planned,
            missing,
            avg_service_control,
            avg_service_performance,
        }
    }

    fn matched(
        &self,
        provider: &Provider,
        service: &ServiceId,
        offering: &ServiceOffering,
    ) -> MatchedService {
        MatchedService {
            service: service.clone(),
            maturity: offering.maturity,
            control: self
                .resolver
                .rescale_service_score(provider, ScoreField::Control, offering.control),
            performance: self.resolver.rescale_service_score(
                provider,
                ScoreField::Performance,
                offering.performance,
            ),
            consumption: offering.consumption,
            operations: offering.operations,
            project_effort: offering.project_effort,
            product: offering.product.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ProviderCategory};
    use crate::overrides::{OverrideSet, ScoreOverride};
    use std::collections::BTreeMap;

    fn offering(available: bool, maturity: Maturity, control: f64) -> ServiceOffering {
        ServiceOffering {
            available,
            maturity,
            control,
            performance: 80.0,
            consumption: Tier::Medium,
            operations: Tier::Low,
            project_effort: Tier::Medium,
            product: None,
        }
    }

    fn provider(services: Vec<(ServiceId, ServiceOffering)>) -> Provider {
        Provider {
            id: "test".into(),
            name: "Test Cloud".into(),
            category: ProviderCategory::Eu,
            control: 30.0,
            performance: 70.0,
            price_factor: None,
            variant_of: None,
            services: services.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    fn catalog_with(provider: Provider) -> Catalog {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.providers.push(provider);
        catalog
    }

    #[test]
    fn test_ga_plus_preview_gives_seventy_five() {
        let p = provider(vec![
            (ServiceId::Compute, offering(true, Maturity::Ga, 50.0)),
            (ServiceId::Cache, offering(true, Maturity::Preview, 70.0)),
        ]);
        let catalog = catalog_with(p.clone());
        let overrides = OverrideSet::new();
        let analyzer = ServiceAnalyzer::new(EffectiveScoreResolver::new(&catalog, &overrides));

        let analysis = analyzer.analyze(&p, &[ServiceId::Compute, ServiceId::Cache]);
        assert_eq!(analysis.coverage, 75.0);
        assert_eq!(analysis.available.len(), 1);
        assert_eq!(analysis.preview.len(), 1);
        assert_eq!(analysis.avg_service_control, 60.0);
    }

    #[test]
    fn test_partition_planned_and_missing() {
        let p = provider(vec![
            (ServiceId::Compute, offering(true, Maturity::Ga, 50.0)),
            (ServiceId::Cache, offering(false, Maturity::Planned, 0.0)),
            // Inconsistent entry: unavailable but GA
            (ServiceId::Dns, offering(false, Maturity::Ga, 40.0)),
        ]);
        let catalog = catalog_with(p.clone());
        let overrides = OverrideSet::new();
        let analyzer = ServiceAnalyzer::new(EffectiveScoreResolver::new(&catalog, &overrides));

        let analysis = analyzer.analyze(
            &p,
            &[
                ServiceId::Compute,
                ServiceId::Cache,
                ServiceId::Dns,
                ServiceId::Messaging,
                ServiceId::Custom("quantum".into()),
            ],
        );
        assert_eq!(analysis.planned, vec![ServiceId::Cache]);
        let missing: Vec<_> = analysis.missing.iter().map(|m| m.service.clone()).collect();
        assert_eq!(
            missing,
            vec![
                ServiceId::Dns,
                ServiceId::Messaging,
                ServiceId::Custom("quantum".into())
            ]
        );
        assert_eq!(analysis.coverage, 20.0);
        // Messaging has a self-build option, the unknown id does not
        assert!(analysis.missing[1].self_build.is_some());
        assert!(analysis.missing[2].self_build.is_none());
    }

    #[test]
    fn test_empty_requirements_are_fully_covered() {
        let p = provider(vec![]);
        let catalog = catalog_with(p.clone());
        let overrides = OverrideSet::new();
        let analyzer = ServiceAnalyzer::new(EffectiveScoreResolver::new(&catalog, &overrides));

        let analysis = analyzer.analyze(&p, &[]);
        assert_eq!(analysis.coverage, 100.0);
        assert_eq!(analysis.avg_service_control, 30.0);
        assert_eq!(analysis.avg_service_performance, 70.0);
    }

    #[test]
    fn test_override_rescales_matched_services() {
        let p = provider(vec![(ServiceId::Compute, offering(true, Maturity::Ga, 50.0))]);
        let catalog = catalog_with(p.clone());
        let mut overrides = OverrideSet::new();
        overrides
            .set(
                "test",
                ScoreOverride {
                    control: Some(60.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let analyzer = ServiceAnalyzer::new(EffectiveScoreResolver::new(&catalog, &overrides));

        let analysis = analyzer.analyze(&p, &[ServiceId::Compute]);
        assert_eq!(analysis.available[0].control, 100.0);
        assert_eq!(analysis.available[0].performance, 80.0);
    }

    #[test]
    fn test_fallback_averages_use_overridden_provider_values() {
        let p = provider(vec![]);
        let catalog = catalog_with(p.clone());
        let mut overrides = OverrideSet::new();
        overrides
            .set(
                "test",
                ScoreOverride {
                    performance: Some(90.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let analyzer = ServiceAnalyzer::new(EffectiveScoreResolver::new(&catalog, &overrides));

        let analysis = analyzer.analyze(&p, &[ServiceId::Compute]);
        assert_eq!(analysis.coverage, 0.0);
        assert_eq!(analysis.avg_service_performance, 90.0);
    }
}
