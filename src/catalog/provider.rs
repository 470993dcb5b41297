//! Provider reference data: providers, their service offerings and the
//! self-build fallbacks for services a provider does not offer.

use super::service_id::ServiceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Provider category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    Hyperscaler,
    Sovereign,
    Eu,
    Private,
    Hybrid,
}

impl ProviderCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderCategory::Hyperscaler => "Hyperscaler",
            ProviderCategory::Sovereign => "Sovereign cloud",
            ProviderCategory::Eu => "European cloud",
            ProviderCategory::Private => "Private cloud",
            ProviderCategory::Hybrid => "Hybrid cloud",
        }
    }
}

/// Production readiness of a service at a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    Ga,
    Preview,
    Planned,
}

/// Coarse effort/price tier.
///
/// The catalog may use the finer `very_low`/`very_high` grades; the
/// 1/2/3 level scale folds them into low and high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Tier {
    /// Position on the 1/2/3 level scale
    pub fn level(self) -> u8 {
        match self {
            Tier::VeryLow | Tier::Low => 1,
            Tier::Medium => 2,
            Tier::High | Tier::VeryHigh => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::VeryLow => "very_low",
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::VeryHigh => "very_high",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Medium
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider's offering of one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub available: bool,
    pub maturity: Maturity,
    /// Data control / sovereignty sub-score (0-100)
    pub control: f64,
    /// Performance sub-score (0-100)
    pub performance: f64,
    #[serde(default)]
    pub consumption: Tier,
    #[serde(default)]
    pub operations: Tier,
    #[serde(default)]
    pub project_effort: Tier,
    /// Provider's product name for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl ServiceOffering {
    /// An offering that is unavailable but not announced violates the
    /// catalog invariant and is handled as missing.
    pub fn is_consistent(&self) -> bool {
        self.available || self.maturity == Maturity::Planned
    }
}

/// Marks a provider as a sovereign SKU operated on top of another
/// provider's infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOf {
    /// Id of the underlying provider
    pub base: String,
    /// Price premium over the underlying provider (e.g. 1.15)
    pub premium: f64,
}

/// Cloud provider reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub category: ProviderCategory,
    /// Baseline control score (0-100)
    pub control: f64,
    /// Baseline performance score (0-100)
    pub performance: f64,
    /// Built-in price multiplier relative to hyperscaler list prices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<VariantOf>,
    #[serde(default)]
    pub services: BTreeMap<ServiceId, ServiceOffering>,
}

impl Provider {
    pub fn offering(&self, service: &ServiceId) -> Option<&ServiceOffering> {
        self.services.get(service)
    }
}

/// VM-based fallback for a service a provider does not offer natively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfBuildOption {
    pub name: String,
    /// One-time implementation effort in person-days
    pub project_days: f64,
    /// Operations tier of running the self-built service
    pub operations: Tier,
    pub description: String,
}
