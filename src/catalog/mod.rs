//! Static provider / component catalog.
//!
//! The catalog is read-only reference data, loaded wholesale before any
//! analysis call. It is validated once at load time so that the engine can
//! treat it as well-formed afterwards.

mod component;
mod provider;
mod service_id;

pub use component::{
    ArchitectureComponent, ComponentCategory, ConfigField, FieldKind, GroupKind, ResourceKind,
    ScalarField,
};
pub use provider::{
    Maturity, Provider, ProviderCategory, SelfBuildOption, ServiceOffering, Tier, VariantOf,
};
pub use service_id::ServiceId;

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Versioned provider / component catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub published: NaiveDate,
    pub providers: Vec<Provider>,
    pub components: Vec<ArchitectureComponent>,
    #[serde(default)]
    pub self_build: BTreeMap<ServiceId, SelfBuildOption>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        catalog.warn_inconsistent_offerings();
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(e.to_string(), path))?;
        let catalog = Self::from_json_str(&contents)?;
        log::debug!(
            "Loaded catalog {} ({} providers, {} components) from {}",
            catalog.version,
            catalog.providers.len(),
            catalog.components.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&ArchitectureComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn self_build_option(&self, service: &ServiceId) -> Option<&SelfBuildOption> {
        self.self_build.get(service)
    }

    /// Structural validation; rejects data the engine cannot interpret.
    pub fn validate(&self) -> Result<()> {
        let errors = self.collect_validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Catalog(errors.join("; ")))
        }
    }

    fn collect_validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut provider_ids = BTreeSet::new();
        for provider in &self.providers {
            if !provider_ids.insert(provider.id.as_str()) {
                errors.push(format!("duplicate provider id '{}'", provider.id));
            }
            errors.extend(validate_provider(provider));
        }

        for provider in &self.providers {
            if let Some(variant) = &provider.variant_of {
                if variant.base == provider.id {
                    errors.push(format!("provider '{}' is a variant of itself", provider.id));
                } else if !provider_ids.contains(variant.base.as_str()) {
                    errors.push(format!(
                        "provider '{}' is a variant of unknown provider '{}'",
                        provider.id, variant.base
                    ));
                }
            }
        }

        let mut component_ids = BTreeSet::new();
        for component in &self.components {
            if !component_ids.insert(component.id.as_str()) {
                errors.push(format!("duplicate component id '{}'", component.id));
            }
        }

        for (service, option) in &self.self_build {
            if !option.project_days.is_finite() || option.project_days < 0.0 {
                errors.push(format!(
                    "self-build option for '{}' has invalid project days {}",
                    service, option.project_days
                ));
            }
        }

        errors
    }

    fn warn_inconsistent_offerings(&self) {
        for provider in &self.providers {
            for (service, offering) in &provider.services {
                if !offering.is_consistent() {
                    log::warn!(
                        "Offering '{}' at '{}' is unavailable but not planned; treating as missing",
                        service,
                        provider.id
                    );
                }
            }
        }
    }
}

fn is_score(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

fn validate_provider(provider: &Provider) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_score(provider.control) {
        errors.push(format!(
            "provider '{}' control {} outside 0-100",
            provider.id, provider.control
        ));
    }
    if !is_score(provider.performance) {
        errors.push(format!(
            "provider '{}' performance {} outside 0-100",
            provider.id, provider.performance
        ));
    }
    if let Some(factor) = provider.price_factor {
        if !(factor.is_finite() && factor > 0.0) {
            errors.push(format!(
                "provider '{}' price factor {} must be positive",
                provider.id, factor
            ));
        }
    }
    if let Some(variant) = &provider.variant_of {
        if !(variant.premium.is_finite() && variant.premium > 0.0) {
            errors.push(format!(
                "provider '{}' variant premium {} must be positive",
                provider.id, variant.premium
            ));
        }
    }
    for (service, offering) in &provider.services {
        if !is_score(offering.control) || !is_score(offering.performance) {
            errors.push(format!(
                "offering '{}' at '{}' has scores outside 0-100",
                service, provider.id
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const MINIMAL: &str = indoc! {r#"
        {
          "version": "test-1",
          "published": "2026-01-15",
          "providers": [
            {
              "id": "alpha",
              "name": "Alpha Cloud",
              "category": "eu",
              "control": 80,
              "performance": 60,
              "services": {
                "compute": {"available": true, "maturity": "ga", "control": 80, "performance": 60}
              }
            }
          ],
          "components": [
            {"id": "vm", "name": "VMs", "category": "compute", "required_services": ["compute"]}
          ]
        }
    "#};

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.providers.is_empty());
        assert!(!catalog.components.is_empty());
        assert!(catalog.provider("aws").is_some());
    }

    #[test]
    fn test_builtin_components_only_reference_known_services() {
        let catalog = Catalog::builtin().unwrap();
        for component in &catalog.components {
            for service in &component.required_services {
                assert!(!service.is_custom(), "{} uses custom service {}", component.id, service);
            }
        }
    }

    #[test]
    fn test_minimal_catalog_parses() {
        let catalog = Catalog::from_json_str(MINIMAL).unwrap();
        assert_eq!(catalog.version, "test-1");
        assert_eq!(catalog.published, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert!(catalog.self_build.is_empty());
        assert!(catalog.component("vm").is_some());
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let mut catalog = Catalog::from_json_str(MINIMAL).unwrap();
        catalog.providers.push(catalog.providers[0].clone());
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate provider id 'alpha'"));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let mut catalog = Catalog::from_json_str(MINIMAL).unwrap();
        catalog.providers[0].control = 140.0;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_variant_of_unknown_base_rejected() {
        let mut catalog = Catalog::from_json_str(MINIMAL).unwrap();
        catalog.providers[0].variant_of = Some(VariantOf {
            base: "ghost".into(),
            premium: 1.2,
        });
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("unknown provider 'ghost'"));
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let err = Catalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
