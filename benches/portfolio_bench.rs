use criterion::{criterion_group, criterion_main, Criterion};
use cloudrank::catalog::Catalog;
use cloudrank::config::{AnalysisSettings, WeightConfig};
use cloudrank::portfolio::ApplicationInstance;
use cloudrank::sizing::{ComponentSelection, Sizing, SystemConfigBuilder};
use cloudrank::CloudAnalyzer;
use std::hint::black_box;

const COMPONENT_SETS: &[&[&str]] = &[
    &["web-frontend", "compute", "database"],
    &["kubernetes", "database", "cache", "messaging", "observability"],
    &["serverless", "nosql", "object-storage", "identity"],
    &["sap-hana", "backup", "vpn"],
    &["ai-platform", "data-warehouse", "object-storage", "compute"],
];

fn create_portfolio(catalog: &Catalog, size: usize) -> Vec<ApplicationInstance> {
    (0..size)
        .map(|i| {
            let sizing = match i % 3 {
                0 => Sizing::Small,
                1 => Sizing::Medium,
                _ => Sizing::Large,
            };
            let mut app = ApplicationInstance::new(format!("app-{}", i), format!("App {}", i), sizing);
            for component in COMPONENT_SETS[i % COMPONENT_SETS.len()] {
                app.select(catalog, ComponentSelection::new(*component));
            }
            app
        })
        .collect()
}

fn benchmark_single_analysis(c: &mut Criterion) {
    let analyzer = CloudAnalyzer::new(Catalog::builtin().unwrap());
    let components = COMPONENT_SETS[1];
    let system = SystemConfigBuilder::new(analyzer.catalog())
        .sizing(Sizing::Large)
        .build(
            &components
                .iter()
                .map(|id| ComponentSelection::new(*id))
                .collect::<Vec<_>>(),
        );

    let mut group = c.benchmark_group("single_analysis");
    group.bench_function("tier_estimates", |b| {
        b.iter(|| {
            analyzer.analyze_for_components(
                black_box(components),
                &WeightConfig::default(),
                None,
                &AnalysisSettings::default(),
            )
        });
    });
    group.bench_function("resource_pricing", |b| {
        b.iter(|| {
            analyzer.analyze_for_components(
                black_box(components),
                &WeightConfig::default(),
                Some(&system),
                &AnalysisSettings::default(),
            )
        });
    });
    group.finish();
}

fn benchmark_portfolio_aggregation(c: &mut Criterion) {
    let analyzer = CloudAnalyzer::new(Catalog::builtin().unwrap());
    let mut group = c.benchmark_group("portfolio_aggregation");

    for size in [5, 25, 100] {
        let portfolio = create_portfolio(analyzer.catalog(), size);
        group.bench_function(format!("apps_{}", size), |b| {
            b.iter(|| {
                analyzer.analyze_portfolio(
                    black_box(&portfolio),
                    &WeightConfig::default(),
                    &AnalysisSettings::default(),
                    5,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_analysis,
    benchmark_portfolio_aggregation
);
criterion_main!(benches);
