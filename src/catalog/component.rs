//! Architecture components and their configuration schema.

use super::service_id::ServiceId;
use serde::{Deserialize, Serialize};

/// Architecture component category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Compute,
    Container,
    Data,
    Storage,
    Network,
    Integration,
    Security,
    Operations,
    Analytics,
}

/// How the builder maps a component's configuration onto resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Compute,
    Database,
    Storage,
    Kubernetes,
    Serverless,
    Messaging,
}

/// Repeated-record group kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    VmGroup,
    DbGroup,
    StorageGroup,
}

/// Typed field of a group record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalarField {
    Number {
        key: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Text {
        key: String,
    },
    Select {
        key: String,
        options: Vec<String>,
    },
}

impl ScalarField {
    pub fn key(&self) -> &str {
        match self {
            ScalarField::Number { key, .. }
            | ScalarField::Text { key }
            | ScalarField::Select { key, .. } => key,
        }
    }
}

/// Typed configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Number {
        default: f64,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        unit: Option<String>,
    },
    Select {
        options: Vec<String>,
        default: String,
    },
    Group {
        group: GroupKind,
        fields: Vec<ScalarField>,
    },
}

/// One entry of a component's configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Selectable building block of an application architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureComponent {
    pub id: String,
    pub name: String,
    pub category: ComponentCategory,
    pub required_services: Vec<ServiceId>,
    #[serde(default)]
    pub resource: Option<ResourceKind>,
    /// Marks specialised in-memory database workloads (e.g. SAP HANA)
    #[serde(default)]
    pub high_memory_workload: bool,
    #[serde(default)]
    pub config_schema: Vec<ConfigField>,
}

impl ArchitectureComponent {
    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.config_schema.iter().find(|f| f.key == key)
    }

    pub fn requires(&self, service: &ServiceId) -> bool {
        self.required_services.contains(service)
    }
}
