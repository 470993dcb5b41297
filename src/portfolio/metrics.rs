//! Portfolio-level statistics on component selection.

use super::application::ApplicationInstance;
use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentFrequency {
    pub component_id: String,
    pub name: String,
    /// Applications selecting the component
    pub count: usize,
    /// Share of applications selecting the component, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_applications: usize,
    pub total_components: usize,
    pub average_components_per_app: f64,
    pub top_components: Vec<ComponentFrequency>,
}

/// Count, average and the `top_n` most frequently selected components,
/// ordered by frequency then id
pub fn portfolio_metrics(
    catalog: &Catalog,
    applications: &[ApplicationInstance],
    top_n: usize,
) -> PortfolioMetrics {
    let total_applications = applications.len();
    let total_components: usize = applications.iter().map(|a| a.component_count()).sum();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for app in applications {
        let distinct: BTreeSet<&str> = app.component_ids().into_iter().collect();
        for id in distinct {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let top_components = ranked
        .into_iter()
        .take(top_n)
        .map(|(id, count)| ComponentFrequency {
            component_id: id.to_string(),
            name: catalog
                .component(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string()),
            count,
            percentage: count as f64 / total_applications as f64 * 100.0,
        })
        .collect();

    PortfolioMetrics {
        total_applications,
        total_components,
        average_components_per_app: if total_applications == 0 {
            0.0
        } else {
            total_components as f64 / total_applications as f64
        },
        top_components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::{ComponentSelection, Sizing};
    use pretty_assertions::assert_eq;

    fn app(catalog: &Catalog, id: &str, components: &[&str]) -> ApplicationInstance {
        let mut app = ApplicationInstance::new(id, id, Sizing::Medium);
        for component in components {
            app.select(catalog, ComponentSelection::new(*component));
        }
        app
    }

    #[test]
    fn test_frequency_ranking() {
        let catalog = Catalog::builtin().unwrap();
        let apps = vec![
            app(&catalog, "a", &["compute", "database", "cache"]),
            app(&catalog, "b", &["compute", "database"]),
            app(&catalog, "c", &["compute", "messaging"]),
            app(&catalog, "d", &["kubernetes"]),
        ];
        let metrics = portfolio_metrics(&catalog, &apps, 2);

        assert_eq!(metrics.total_applications, 4);
        assert_eq!(metrics.total_components, 8);
        assert_eq!(metrics.average_components_per_app, 2.0);
        let top: Vec<(&str, usize, f64)> = metrics
            .top_components
            .iter()
            .map(|c| (c.component_id.as_str(), c.count, c.percentage))
            .collect();
        assert_eq!(top, vec![("compute", 3, 75.0), ("database", 2, 50.0)]);
    }

    #[test]
    fn test_empty_portfolio() {
        let catalog = Catalog::builtin().unwrap();
        let metrics = portfolio_metrics(&catalog, &[], 5);
        assert_eq!(metrics.total_applications, 0);
        assert_eq!(metrics.average_components_per_app, 0.0);
        assert!(metrics.top_components.is_empty());
    }
}
