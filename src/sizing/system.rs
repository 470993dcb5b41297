//! Normalized resource tree consumed by the cost model and the
//! operations / project-effort scaling.

use crate::catalog::{ServiceId, Tier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deployment region; only detailed price tables carry regional uplifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    Germany,
    EuWest,
    EuNorth,
}

/// Application size used for default resource quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    Small,
    #[default]
    Medium,
    Large,
}

/// Default quantities for a sizing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingPreset {
    pub vm_cpu: u32,
    pub vm_ram_gb: f64,
    pub vm_count: u32,
    pub database_gb: f64,
    pub storage_gb: f64,
    pub k8s_nodes: u32,
    pub k8s_cpu_per_node: u32,
    pub k8s_ram_per_node_gb: f64,
    pub invocations_millions: f64,
    pub messages_millions: f64,
}

impl Sizing {
    pub fn preset(self) -> SizingPreset {
        match self {
            Sizing::Small => SizingPreset {
                vm_cpu: 2,
                vm_ram_gb: 4.0,
                vm_count: 1,
                database_gb: 50.0,
                storage_gb: 100.0,
                k8s_nodes: 3,
                k8s_cpu_per_node: 2,
                k8s_ram_per_node_gb: 8.0,
                invocations_millions: 1.0,
                messages_millions: 5.0,
            },
            Sizing::Medium => SizingPreset {
                vm_cpu: 4,
                vm_ram_gb: 16.0,
                vm_count: 2,
                database_gb: 200.0,
                storage_gb: 500.0,
                k8s_nodes: 3,
                k8s_cpu_per_node: 4,
                k8s_ram_per_node_gb: 16.0,
                invocations_millions: 10.0,
                messages_millions: 50.0,
            },
            Sizing::Large => SizingPreset {
                vm_cpu: 8,
                vm_ram_gb: 32.0,
                vm_count: 4,
                database_gb: 1000.0,
                storage_gb: 2000.0,
                k8s_nodes: 6,
                k8s_cpu_per_node: 8,
                k8s_ram_per_node_gb: 32.0,
                invocations_millions: 100.0,
                messages_millions: 500.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmGroup {
    pub name: String,
    pub cpu: u32,
    pub ram_gb: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseEngine {
    Postgresql,
    Mysql,
    Mariadb,
    Sqlserver,
    Oracle,
    Mongodb,
    Hana,
}

impl DatabaseEngine {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Some(DatabaseEngine::Postgresql),
            "mysql" => Some(DatabaseEngine::Mysql),
            "mariadb" => Some(DatabaseEngine::Mariadb),
            "sqlserver" | "mssql" => Some(DatabaseEngine::Sqlserver),
            "oracle" => Some(DatabaseEngine::Oracle),
            "mongodb" | "mongo" => Some(DatabaseEngine::Mongodb),
            "hana" => Some(DatabaseEngine::Hana),
            _ => None,
        }
    }

    /// Service that hosts this engine
    pub fn service(self) -> ServiceId {
        match self {
            DatabaseEngine::Mongodb => ServiceId::DatabaseNosql,
            _ => ServiceId::DatabaseSql,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInstance {
    pub name: String,
    pub engine: DatabaseEngine,
    pub size_gb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Block,
    Object,
    File,
}

impl StorageKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" => Some(StorageKind::Block),
            "object" => Some(StorageKind::Object),
            "file" => Some(StorageKind::File),
            _ => None,
        }
    }

    pub fn service(self) -> ServiceId {
        match self {
            StorageKind::Block => ServiceId::StorageBlock,
            StorageKind::Object => ServiceId::StorageObject,
            StorageKind::File => ServiceId::StorageFile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageVolume {
    pub name: String,
    pub kind: StorageKind,
    pub size_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesCluster {
    pub nodes: u32,
    pub cpu_per_node: u32,
    pub ram_per_node_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerlessWorkload {
    pub invocations_millions: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingWorkload {
    pub messages_millions: f64,
    pub tier: Tier,
}

/// Instance count and number of distinct sub-types of one service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub instances: u32,
    pub variants: u32,
}

impl Footprint {
    pub const SINGLE: Footprint = Footprint {
        instances: 1,
        variants: 1,
    };

    fn of(instances: u32, variants: usize) -> Self {
        Self {
            instances: instances.max(1),
            variants: saturating_count(variants).max(1),
        }
    }
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Resource quantities of one application, flattened over all selected
/// component instances
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub vm_groups: Vec<VmGroup>,
    #[serde(default)]
    pub databases: Vec<DatabaseInstance>,
    #[serde(default)]
    pub storage: Vec<StorageVolume>,
    #[serde(default)]
    pub kubernetes: Vec<KubernetesCluster>,
    #[serde(default)]
    pub serverless: Vec<ServerlessWorkload>,
    #[serde(default)]
    pub messaging: Vec<MessagingWorkload>,
    /// Specialised in-memory database workload present
    #[serde(default)]
    pub high_memory_workload: bool,
    /// Component instances requiring each service
    #[serde(default)]
    pub component_instances: BTreeMap<ServiceId, u32>,
}

impl SystemConfig {
    /// Saturates at `u32::MAX` for absurd user-entered counts
    pub fn total_vms(&self) -> u32 {
        self.vm_groups
            .iter()
            .fold(0u32, |total, g| total.saturating_add(g.count))
    }

    pub fn databases_for(&self, service: &ServiceId) -> impl Iterator<Item = &DatabaseInstance> {
        let service = service.clone();
        self.databases
            .iter()
            .filter(move |db| db.engine.service() == service)
    }

    pub fn volumes_of(&self, kind: StorageKind) -> impl Iterator<Item = &StorageVolume> {
        self.storage.iter().filter(move |v| v.kind == kind)
    }

    fn instances_of(&self, service: &ServiceId) -> u32 {
        self.component_instances.get(service).copied().unwrap_or(1)
    }

    /// Instance count and variety of a service in this system
    pub fn footprint(&self, service: &ServiceId) -> Footprint {
        match service {
            ServiceId::Compute if !self.vm_groups.is_empty() => {
                let shapes: BTreeSet<(u32, u64)> = self
                    .vm_groups
                    .iter()
                    .map(|g| (g.cpu, g.ram_gb.to_bits()))
                    .collect();
                Footprint::of(self.total_vms(), shapes.len())
            }
            ServiceId::DatabaseSql | ServiceId::DatabaseNosql => {
                let instances: Vec<&DatabaseInstance> = self.databases_for(service).collect();
                if instances.is_empty() {
                    return Footprint::of(self.instances_of(service), 1);
                }
                let engines: BTreeSet<DatabaseEngine> =
                    instances.iter().map(|db| db.engine).collect();
                Footprint::of(saturating_count(instances.len()), engines.len())
            }
            ServiceId::StorageBlock | ServiceId::StorageObject | ServiceId::StorageFile => {
                let kind = match service {
                    ServiceId::StorageBlock => StorageKind::Block,
                    ServiceId::StorageObject => StorageKind::Object,
                    _ => StorageKind::File,
                };
                let count = saturating_count(self.volumes_of(kind).count());
                if count == 0 {
                    Footprint::of(self.instances_of(service), 1)
                } else {
                    Footprint::of(count, 1)
                }
            }
            ServiceId::Kubernetes if !self.kubernetes.is_empty() => {
                let shapes: BTreeSet<(u32, u64)> = self
                    .kubernetes
                    .iter()
                    .map(|c| (c.cpu_per_node, c.ram_per_node_gb.to_bits()))
                    .collect();
                Footprint::of(saturating_count(self.kubernetes.len()), shapes.len())
            }
            ServiceId::Serverless if !self.serverless.is_empty() => {
                let tiers: BTreeSet<Tier> = self.serverless.iter().map(|w| w.tier).collect();
                Footprint::of(saturating_count(self.serverless.len()), tiers.len())
            }
            ServiceId::Messaging if !self.messaging.is_empty() => {
                let tiers: BTreeSet<Tier> = self.messaging.iter().map(|w| w.tier).collect();
                Footprint::of(saturating_count(self.messaging.len()), tiers.len())
            }
            other => Footprint::of(self.instances_of(other), 1),
        }
    }
}
