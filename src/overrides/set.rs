//! User-supplied score overrides per provider.

use super::store::KeyValueStore;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store key holding the serialized override map
pub const OVERRIDES_KEY: &str = "custom_scores";

/// Override of a provider's baseline values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,

    #[serde(
        default,
        alias = "priceFactor",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_factor: Option<f64>,
}

impl ScoreOverride {
    pub fn is_empty(&self) -> bool {
        self.control.is_none() && self.performance.is_none() && self.price_factor.is_none()
    }

    /// Drop fields the engine cannot use, returning what was dropped
    fn sanitize(&mut self) -> Vec<&'static str> {
        let mut dropped = Vec::new();
        let is_score = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);

        if self.control.is_some_and(|v| !is_score(v)) {
            self.control = None;
            dropped.push("control");
        }
        if self.performance.is_some_and(|v| !is_score(v)) {
            self.performance = None;
            dropped.push("performance");
        }
        if self.price_factor.is_some_and(|v| !(v.is_finite() && v > 0.0)) {
            self.price_factor = None;
            dropped.push("price_factor");
        }
        dropped
    }
}

/// All overrides, keyed by provider id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet {
    entries: BTreeMap<String, ScoreOverride>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parse; invalid fields are still dropped with a warning.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut set: OverrideSet = serde_json::from_str(raw)?;
        for (provider_id, entry) in set.entries.iter_mut() {
            for field in entry.sanitize() {
                log::warn!(
                    "Ignoring invalid override '{}' for provider '{}'",
                    field,
                    provider_id
                );
            }
        }
        set.entries.retain(|_, entry| !entry.is_empty());
        Ok(set)
    }

    /// Load overrides, failing open to an empty set.
    ///
    /// Store errors and malformed data are logged and never propagated;
    /// the engine then runs on baseline catalog values.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(OVERRIDES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("Failed to read score overrides: {}. Using catalog values.", e);
                return Self::new();
            }
        };

        match Self::parse(&raw) {
            Ok(set) => {
                log::debug!("Loaded score overrides for {} providers", set.len());
                set
            }
            Err(e) => {
                log::warn!("Malformed score overrides: {}. Using catalog values.", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        store
            .set(OVERRIDES_KEY, &raw)
            .map_err(|e| Error::store(OVERRIDES_KEY, e.to_string()))
    }

    pub fn get(&self, provider_id: &str) -> Option<&ScoreOverride> {
        self.entries.get(provider_id)
    }

    pub fn set(&mut self, provider_id: impl Into<String>, entry: ScoreOverride) -> Result<()> {
        let mut entry = entry;
        let dropped = entry.sanitize();
        if !dropped.is_empty() {
            return Err(Error::Validation(format!(
                "invalid override values: {}",
                dropped.join(", ")
            )));
        }
        let provider_id = provider_id.into();
        if entry.is_empty() {
            self.entries.remove(&provider_id);
        } else {
            self.entries.insert(provider_id, entry);
        }
        Ok(())
    }

    pub fn remove(&mut self, provider_id: &str) -> Option<ScoreOverride> {
        self.entries.remove(provider_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::MemoryStore;
    use pretty_assertions::assert_eq;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(Error::store(key, "unavailable"))
        }
        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(Error::store(key, "unavailable"))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_accepts_camel_case_price_factor() {
        let store = MemoryStore::with_entry(
            OVERRIDES_KEY,
            r#"{"stackit": {"control": 95, "priceFactor": 0.8}}"#,
        );
        let set = OverrideSet::load(&store);
        assert_eq!(
            set.get("stackit"),
            Some(&ScoreOverride {
                control: Some(95.0),
                performance: None,
                price_factor: Some(0.8),
            })
        );
    }

    #[test]
    fn test_malformed_data_fails_open() {
        let store = MemoryStore::with_entry(OVERRIDES_KEY, "[1, 2");
        assert!(OverrideSet::load(&store).is_empty());
    }

    #[test]
    fn test_store_error_fails_open() {
        assert!(OverrideSet::load(&FailingStore).is_empty());
    }

    #[test]
    fn test_invalid_fields_dropped_on_load() {
        let store = MemoryStore::with_entry(
            OVERRIDES_KEY,
            r#"{"aws": {"control": 140, "performance": 90}, "ionos": {"price_factor": 0}}"#,
        );
        let set = OverrideSet::load(&store);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("aws").unwrap().control, None);
        assert_eq!(set.get("aws").unwrap().performance, Some(90.0));
        assert!(set.get("ionos").is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut set = OverrideSet::new();
        set.set(
            "otc",
            ScoreOverride {
                performance: Some(88.0),
                ..Default::default()
            },
        )
        .unwrap();
        set.save(&store).unwrap();

        assert_eq!(OverrideSet::load(&store), set);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut set = OverrideSet::new();
        let result = set.set(
            "aws",
            ScoreOverride {
                price_factor: Some(-1.0),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_save_reports_store_failure() {
        let err = OverrideSet::new().save(&FailingStore).unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
    }
}
