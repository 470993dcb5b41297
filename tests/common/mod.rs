// Test utility module for cloudrank integration tests
#![allow(dead_code)]

use cloudrank::catalog::{
    Catalog, Maturity, Provider, ProviderCategory, ServiceId, ServiceOffering, Tier,
};
use cloudrank::portfolio::ApplicationInstance;
use cloudrank::sizing::{ComponentSelection, Sizing};
use cloudrank::CloudAnalyzer;
use std::collections::BTreeMap;

/// Route `log` output through the test harness; `RUST_LOG=debug` shows it
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn builtin_catalog() -> Catalog {
    init_logging();
    Catalog::builtin().unwrap()
}

pub fn analyzer() -> CloudAnalyzer {
    CloudAnalyzer::new(builtin_catalog())
}

pub fn offering(maturity: Maturity, control: f64, performance: f64) -> ServiceOffering {
    ServiceOffering {
        available: maturity != Maturity::Planned,
        maturity,
        control,
        performance,
        consumption: Tier::Medium,
        operations: Tier::Medium,
        project_effort: Tier::Medium,
        product: None,
    }
}

/// Synthetic EU provider offering exactly `services`
pub fn provider_with(id: &str, services: &[(ServiceId, Maturity)]) -> Provider {
    Provider {
        id: id.to_string(),
        name: format!("{} cloud", id),
        category: ProviderCategory::Eu,
        control: 80.0,
        performance: 70.0,
        price_factor: Some(0.9),
        variant_of: None,
        services: services
            .iter()
            .map(|(service, maturity)| (service.clone(), offering(*maturity, 75.0, 70.0)))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn application(
    catalog: &Catalog,
    id: &str,
    sizing: Sizing,
    components: &[&str],
) -> ApplicationInstance {
    let mut app = ApplicationInstance::new(id, id, sizing);
    for component in components {
        app.select(catalog, ComponentSelection::new(*component));
    }
    app
}
