//! User-entered component configuration values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar value inside a group record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            ScalarValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            ScalarValue::Number(_) => None,
        }
    }
}

/// One record of a repeated group (e.g. one VM group)
pub type GroupEntry = BTreeMap<String, ScalarValue>;

/// Value of one configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
    Group(Vec<GroupEntry>),
}

/// Field values of one component instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl ComponentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_number(self, key: impl Into<String>, value: f64) -> Self {
        self.with(key, ConfigValue::Number(value))
    }

    pub fn with_text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, ConfigValue::Text(value.into()))
    }

    pub fn with_group(self, key: impl Into<String>, entries: Vec<GroupEntry>) -> Self {
        self.with(key, ConfigValue::Group(entries))
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Text(s) => s.trim().parse().ok(),
            ConfigValue::Group(_) => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn group(&self, key: &str) -> Option<&[GroupEntry]> {
        match self.values.get(key)? {
            ConfigValue::Group(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build a group record from `(key, value)` pairs
pub fn group_entry<const N: usize>(fields: [(&str, ScalarValue); N]) -> GroupEntry {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// All configured instances of one selected component.
///
/// An empty instance list means a single instance with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSelection {
    pub component_id: String,
    #[serde(default)]
    pub instances: Vec<ComponentConfig>,
}

impl ComponentSelection {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            instances: Vec::new(),
        }
    }

    pub fn with_instance(mut self, config: ComponentConfig) -> Self {
        self.instances.push(config);
        self
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_values_deserialize() {
        let config: ComponentConfig = serde_json::from_str(
            r#"{"nodes": 5, "tier": "high", "vms": [{"name": "app", "cpu": 4, "ram": 16, "count": 2}]}"#,
        )
        .unwrap();
        assert_eq!(config.number("nodes"), Some(5.0));
        assert_eq!(config.text("tier"), Some("high"));
        let vms = config.group("vms").unwrap();
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0]["cpu"].as_number(), Some(4.0));
        assert_eq!(vms[0]["name"].as_text(), Some("app"));
    }

    #[test]
    fn test_numeric_text_is_read_as_number() {
        let config = ComponentConfig::new().with_text("nodes", " 7 ");
        assert_eq!(config.number("nodes"), Some(7.0));
    }

    #[test]
    fn test_selection_without_instances_counts_one() {
        assert_eq!(ComponentSelection::new("cache").instance_count(), 1);
        let two = ComponentSelection::new("cache")
            .with_instance(ComponentConfig::new())
            .with_instance(ComponentConfig::new());
        assert_eq!(two.instance_count(), 2);
    }
}
