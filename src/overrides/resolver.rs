//! Single point of truth for "effective" provider values.
//!
//! Every downstream component asks this resolver for a provider's control,
//! performance and price factor instead of checking the override set
//! itself.

use super::set::OverrideSet;
use crate::catalog::{Catalog, Provider, ProviderCategory};

/// Variant chains deeper than this fall back to the provider's own data.
const MAX_VARIANT_DEPTH: usize = 4;

/// A value the resolver can answer for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    Control,
    Performance,
    PriceFactor,
}

/// Built-in price factor when a provider declares none
pub fn category_price_factor(category: ProviderCategory) -> f64 {
    match category {
        ProviderCategory::Hyperscaler => 1.0,
        ProviderCategory::Sovereign => 1.10,
        ProviderCategory::Eu => 0.85,
        ProviderCategory::Private => 1.20,
        ProviderCategory::Hybrid => 1.05,
    }
}

/// Merges the catalog baseline with user overrides
#[derive(Debug, Clone, Copy)]
pub struct EffectiveScoreResolver<'a> {
    catalog: &'a Catalog,
    overrides: &'a OverrideSet,
}

impl<'a> EffectiveScoreResolver<'a> {
    pub fn new(catalog: &'a Catalog, overrides: &'a OverrideSet) -> Self {
        Self { catalog, overrides }
    }

    /// Effective value of `field` for a provider id; `None` if the id is
    /// not in the catalog.
    pub fn resolve(&self, provider_id: &str, field: ScoreField) -> Option<f64> {
        self.catalog
            .provider(provider_id)
            .map(|provider| self.resolve_for(provider, field))
    }

    pub fn resolve_for(&self, provider: &Provider, field: ScoreField) -> f64 {
        match field {
            ScoreField::Control => self.control(provider),
            ScoreField::Performance => self.performance(provider),
            ScoreField::PriceFactor => self.price_factor(provider),
        }
    }

    pub fn control(&self, provider: &Provider) -> f64 {
        self.overrides
            .get(&provider.id)
            .and_then(|o| o.control)
            .unwrap_or(provider.control)
    }

    pub fn performance(&self, provider: &Provider) -> f64 {
        self.overrides
            .get(&provider.id)
            .and_then(|o| o.performance)
            .unwrap_or(provider.performance)
    }

    /// Override, else variant-of-base × premium, else the catalog factor,
    /// else the category default.
    pub fn price_factor(&self, provider: &Provider) -> f64 {
        self.price_factor_at_depth(provider, 0, true)
    }

    /// Price factor from catalog data alone, ignoring overrides
    pub fn builtin_price_factor(&self, provider: &Provider) -> f64 {
        self.price_factor_at_depth(provider, 0, false)
    }

    fn price_factor_at_depth(&self, provider: &Provider, depth: usize, with_overrides: bool) -> f64 {
        if with_overrides {
            if let Some(factor) = self.overrides.get(&provider.id).and_then(|o| o.price_factor) {
                return factor;
            }
        }

        if depth < MAX_VARIANT_DEPTH {
            if let Some(variant) = &provider.variant_of {
                if let Some(base) = self.catalog.provider(&variant.base) {
                    return self.price_factor_at_depth(base, depth + 1, with_overrides)
                        * variant.premium;
                }
            }
        }

        provider
            .price_factor
            .unwrap_or_else(|| category_price_factor(provider.category))
    }

    /// Ratio override / baseline for a score field; 1.0 without override or
    /// with a zero baseline.
    pub fn rescale_ratio(&self, provider: &Provider, field: ScoreField) -> f64 {
        let (baseline, overridden) = match field {
            ScoreField::Control => (
                provider.control,
                self.overrides.get(&provider.id).and_then(|o| o.control),
            ),
            ScoreField::Performance => (
                provider.performance,
                self.overrides.get(&provider.id).and_then(|o| o.performance),
            ),
            ScoreField::PriceFactor => return 1.0,
        };

        match overridden {
            Some(value) if baseline != 0.0 => value / baseline,
            _ => 1.0,
        }
    }

    /// Apply the provider-level override proportionally to a service
    /// sub-score, clamped to 0-100 and rounded.
    pub fn rescale_service_score(&self, provider: &Provider, field: ScoreField, score: f64) -> f64 {
        let has_override = self.overrides.get(&provider.id).is_some_and(|o| match field {
            ScoreField::Control => o.control.is_some(),
            ScoreField::Performance => o.performance.is_some(),
            ScoreField::PriceFactor => false,
        });
        if !has_override {
            return score;
        }

        let ratio = self.rescale_ratio(provider, field);
        (score * ratio).clamp(0.0, 100.0).round()
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }
}
