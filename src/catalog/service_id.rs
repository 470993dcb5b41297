//! Closed enumeration of service identifiers.
//!
//! Every static table in the engine (base prices, self-build prices,
//! project days, variety increments) matches on `ServiceId`, so adding a
//! known service is a compile-checked change. Identifiers the engine does
//! not know about are carried as `Custom` and fall back to the documented
//! default row of each table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a cloud service capability (e.g. managed Kubernetes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceId {
    Compute,
    Kubernetes,
    Serverless,
    DatabaseSql,
    DatabaseNosql,
    Cache,
    StorageObject,
    StorageBlock,
    StorageFile,
    Messaging,
    LoadBalancer,
    Cdn,
    Dns,
    ApiGateway,
    Identity,
    KeyManagement,
    Monitoring,
    Logging,
    Backup,
    ContainerRegistry,
    AiMl,
    DataWarehouse,
    Vpn,
    /// A service id the engine has no typed tables for
    Custom(String),
}

const KNOWN_IDS: &[&str] = &[
    "compute",
    "kubernetes",
    "serverless",
    "database_sql",
    "database_nosql",
    "cache",
    "storage_object",
    "storage_block",
    "storage_file",
    "messaging",
    "load_balancer",
    "cdn",
    "dns",
    "api_gateway",
    "identity",
    "key_management",
    "monitoring",
    "logging",
    "backup",
    "container_registry",
    "ai_ml",
    "data_warehouse",
    "vpn",
];

impl ServiceId {
    /// All known (non-custom) service ids in declaration order.
    pub fn known() -> Vec<ServiceId> {
        KNOWN_IDS.iter().map(|id| ServiceId::from(*id)).collect()
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceId::Compute => "compute",
            ServiceId::Kubernetes => "kubernetes",
            ServiceId::Serverless => "serverless",
            ServiceId::DatabaseSql => "database_sql",
            ServiceId::DatabaseNosql => "database_nosql",
            ServiceId::Cache => "cache",
            ServiceId::StorageObject => "storage_object",
            ServiceId::StorageBlock => "storage_block",
            ServiceId::StorageFile => "storage_file",
            ServiceId::Messaging => "messaging",
            ServiceId::LoadBalancer => "load_balancer",
            ServiceId::Cdn => "cdn",
            ServiceId::Dns => "dns",
            ServiceId::ApiGateway => "api_gateway",
            ServiceId::Identity => "identity",
            ServiceId::KeyManagement => "key_management",
            ServiceId::Monitoring => "monitoring",
            ServiceId::Logging => "logging",
            ServiceId::Backup => "backup",
            ServiceId::ContainerRegistry => "container_registry",
            ServiceId::AiMl => "ai_ml",
            ServiceId::DataWarehouse => "data_warehouse",
            ServiceId::Vpn => "vpn",
            ServiceId::Custom(id) => id,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ServiceId::Custom(_))
    }

    /// Human-readable label used in recommendation text.
    pub fn label(&self) -> &str {
        match self {
            ServiceId::Compute => "Virtual machines",
            ServiceId::Kubernetes => "Managed Kubernetes",
            ServiceId::Serverless => "Serverless functions",
            ServiceId::DatabaseSql => "Managed SQL database",
            ServiceId::DatabaseNosql => "Managed NoSQL database",
            ServiceId::Cache => "In-memory cache",
            ServiceId::StorageObject => "Object storage",
            ServiceId::StorageBlock => "Block storage",
            ServiceId::StorageFile => "File storage",
            ServiceId::Messaging => "Messaging / queues",
            ServiceId::LoadBalancer => "Load balancer",
            ServiceId::Cdn => "CDN",
            ServiceId::Dns => "DNS",
            ServiceId::ApiGateway => "API gateway",
            ServiceId::Identity => "Identity & access",
            ServiceId::KeyManagement => "Key management",
            ServiceId::Monitoring => "Monitoring",
            ServiceId::Logging => "Logging",
            ServiceId::Backup => "Backup",
            ServiceId::ContainerRegistry => "Container registry",
            ServiceId::AiMl => "AI / ML platform",
            ServiceId::DataWarehouse => "Data warehouse",
            ServiceId::Vpn => "VPN",
            ServiceId::Custom(id) => id,
        }
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        match value {
            "compute" => ServiceId::Compute,
            "kubernetes" => ServiceId::Kubernetes,
            "serverless" => ServiceId::Serverless,
            "database_sql" => ServiceId::DatabaseSql,
            "database_nosql" => ServiceId::DatabaseNosql,
            "cache" => ServiceId::Cache,
            "storage_object" => ServiceId::StorageObject,
            "storage_block" => ServiceId::StorageBlock,
            "storage_file" => ServiceId::StorageFile,
            "messaging" => ServiceId::Messaging,
            "load_balancer" => ServiceId::LoadBalancer,
            "cdn" => ServiceId::Cdn,
            "dns" => ServiceId::Dns,
            "api_gateway" => ServiceId::ApiGateway,
            "identity" => ServiceId::Identity,
            "key_management" => ServiceId::KeyManagement,
            "monitoring" => ServiceId::Monitoring,
            "logging" => ServiceId::Logging,
            "backup" => ServiceId::Backup,
            "container_registry" => ServiceId::ContainerRegistry,
            "ai_ml" => ServiceId::AiMl,
            "data_warehouse" => ServiceId::DataWarehouse,
            "vpn" => ServiceId::Vpn,
            other => ServiceId::Custom(other.to_string()),
        }
    }
}

impl From<String> for ServiceId {
    fn from(value: String) -> Self {
        match ServiceId::from(value.as_str()) {
            ServiceId::Custom(_) => ServiceId::Custom(value),
            known => known,
        }
    }
}

impl From<ServiceId> for String {
    fn from(value: ServiceId) -> Self {
        match value {
            ServiceId::Custom(id) => id,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ServiceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ServiceId::from(s))
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
