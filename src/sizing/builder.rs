//! Flattens selected component instances into a `SystemConfig`.
//!
//! Field values are looked up in this order: the instance's own value, the
//! schema default, the sizing preset.

use super::system::{
    DatabaseEngine, DatabaseInstance, KubernetesCluster, MessagingWorkload, Region,
    ServerlessWorkload, Sizing, SizingPreset, StorageKind, StorageVolume, SystemConfig, VmGroup,
};
use super::values::{ComponentConfig, ComponentSelection, GroupEntry};
use crate::catalog::{
    ArchitectureComponent, Catalog, FieldKind, GroupKind, ResourceKind, ServiceId, Tier,
};

/// RAM multiplier for default VMs of in-memory database workloads
const HIGH_MEMORY_RAM_FACTOR: f64 = 4.0;

pub struct SystemConfigBuilder<'a> {
    catalog: &'a Catalog,
    sizing: Sizing,
    region: Region,
}

impl<'a> SystemConfigBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            sizing: Sizing::default(),
            region: Region::default(),
        }
    }

    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn build(&self, selections: &[ComponentSelection]) -> SystemConfig {
        let mut system = SystemConfig {
            region: self.region,
            ..Default::default()
        };

        for selection in selections {
            let Some(component) = self.catalog.component(&selection.component_id) else {
                log::warn!(
                    "Skipping unknown component '{}' while building system config",
                    selection.component_id
                );
                continue;
            };

            let defaults = [ComponentConfig::new()];
            let instances: &[ComponentConfig] = if selection.instances.is_empty() {
                &defaults
            } else {
                &selection.instances
            };

            for (index, instance) in instances.iter().enumerate() {
                self.add_instance(&mut system, component, instance, index + 1);
            }
        }

        system
    }

    fn add_instance(
        &self,
        system: &mut SystemConfig,
        component: &ArchitectureComponent,
        instance: &ComponentConfig,
        ordinal: usize,
    ) {
        for service in &component.required_services {
            let count = system
                .component_instances
                .entry(service.clone())
                .or_insert(0);
            *count = count.saturating_add(1);
        }
        if component.high_memory_workload {
            system.high_memory_workload = true;
        }

        let preset = self.sizing.preset();
        let label = instance_label(component, ordinal);

        match component.resource {
            Some(ResourceKind::Compute) => {
                let entries = group_entries(component, instance, GroupKind::VmGroup);
                if entries.is_empty() {
                    system
                        .vm_groups
                        .push(default_vm_group(&label, &preset, component.high_memory_workload));
                } else {
                    system
                        .vm_groups
                        .extend(entries.iter().map(|e| vm_group_from(e, &label, &preset)));
                }
            }
            Some(ResourceKind::Database) => {
                let entries = group_entries(component, instance, GroupKind::DbGroup);
                if entries.is_empty() {
                    system.databases.push(DatabaseInstance {
                        name: label,
                        engine: default_engine(component),
                        size_gb: preset.database_gb,
                    });
                } else {
                    system.databases.extend(
                        entries
                            .iter()
                            .map(|e| database_from(e, &label, component, &preset)),
                    );
                }
            }
            Some(ResourceKind::Storage) => {
                let default_kind = default_storage_kind(component);
                let entries = group_entries(component, instance, GroupKind::StorageGroup);
                if entries.is_empty() {
                    system.storage.push(StorageVolume {
                        name: label,
                        kind: default_kind,
                        size_gb: preset.storage_gb,
                    });
                } else {
                    system.storage.extend(
                        entries
                            .iter()
                            .map(|e| volume_from(e, &label, default_kind, &preset)),
                    );
                }
            }
            Some(ResourceKind::Kubernetes) => {
                system.kubernetes.push(KubernetesCluster {
                    nodes: as_count(number_field(component, instance, "nodes")
                        .unwrap_or(f64::from(preset.k8s_nodes))),
                    cpu_per_node: as_count(number_field(component, instance, "cpu_per_node")
                        .unwrap_or(f64::from(preset.k8s_cpu_per_node))),
                    ram_per_node_gb: number_field(component, instance, "ram_per_node")
                        .unwrap_or(preset.k8s_ram_per_node_gb)
                        .max(0.0),
                });
            }
            Some(ResourceKind::Serverless) => {
                system.serverless.push(ServerlessWorkload {
                    invocations_millions: number_field(component, instance, "invocations")
                        .unwrap_or(preset.invocations_millions)
                        .max(0.0),
                    tier: tier_field(component, instance),
                });
            }
            Some(ResourceKind::Messaging) => {
                system.messaging.push(MessagingWorkload {
                    messages_millions: number_field(component, instance, "messages")
                        .unwrap_or(preset.messages_millions)
                        .max(0.0),
                    tier: tier_field(component, instance),
                });
            }
            None => {}
        }
    }
}

fn instance_label(component: &ArchitectureComponent, ordinal: usize) -> String {
    if ordinal == 1 {
        component.id.clone()
    } else {
        format!("{} #{}", component.id, ordinal)
    }
}

fn as_count(value: f64) -> u32 {
    if value.is_finite() {
        value.max(0.0).round() as u32
    } else {
        0
    }
}

/// Instance value, else the schema default for a numeric field
fn number_field(
    component: &ArchitectureComponent,
    instance: &ComponentConfig,
    key: &str,
) -> Option<f64> {
    instance.number(key).or_else(|| match component.field(key) {
        Some(field) => match &field.kind {
            FieldKind::Number { default, .. } => Some(*default),
            _ => None,
        },
        None => None,
    })
}

fn tier_field(component: &ArchitectureComponent, instance: &ComponentConfig) -> Tier {
    let raw = instance
        .text("tier")
        .map(str::to_string)
        .or_else(|| match component.field("tier").map(|f| &f.kind) {
            Some(FieldKind::Select { default, .. }) => Some(default.clone()),
            _ => None,
        });
    match raw.as_deref() {
        Some("very_low") => Tier::VeryLow,
        Some("low") => Tier::Low,
        Some("high") => Tier::High,
        Some("very_high") => Tier::VeryHigh,
        _ => Tier::Medium,
    }
}

/// Entries of the first group field of the given kind
fn group_entries<'c>(
    component: &ArchitectureComponent,
    instance: &'c ComponentConfig,
    kind: GroupKind,
) -> &'c [GroupEntry] {
    component
        .config_schema
        .iter()
        .find(|f| matches!(&f.kind, FieldKind::Group { group, .. } if *group == kind))
        .and_then(|f| instance.group(&f.key))
        .unwrap_or(&[])
}

fn entry_number(entry: &GroupEntry, key: &str) -> Option<f64> {
    entry.get(key).and_then(|v| v.as_number())
}

fn entry_name(entry: &GroupEntry, fallback: &str) -> String {
    entry
        .get("name")
        .and_then(|v| v.as_text())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn default_vm_group(label: &str, preset: &SizingPreset, high_memory: bool) -> VmGroup {
    let ram_gb = if high_memory {
        preset.vm_ram_gb * HIGH_MEMORY_RAM_FACTOR
    } else {
        preset.vm_ram_gb
    };
    VmGroup {
        name: label.to_string(),
        cpu: preset.vm_cpu,
        ram_gb,
        count: preset.vm_count,
    }
}

fn vm_group_from(entry: &GroupEntry, label: &str, preset: &SizingPreset) -> VmGroup {
    VmGroup {
        name: entry_name(entry, label),
        cpu: as_count(entry_number(entry, "cpu").unwrap_or(f64::from(preset.vm_cpu))),
        ram_gb: entry_number(entry, "ram").unwrap_or(preset.vm_ram_gb).max(0.0),
        count: as_count(entry_number(entry, "count").unwrap_or(1.0)),
    }
}

fn default_engine(component: &ArchitectureComponent) -> DatabaseEngine {
    if component.requires(&ServiceId::DatabaseNosql) && !component.requires(&ServiceId::DatabaseSql)
    {
        DatabaseEngine::Mongodb
    } else if component.high_memory_workload {
        DatabaseEngine::Hana
    } else {
        DatabaseEngine::Postgresql
    }
}

fn database_from(
    entry: &GroupEntry,
    label: &str,
    component: &ArchitectureComponent,
    preset: &SizingPreset,
) -> DatabaseInstance {
    let engine = entry
        .get("engine")
        .and_then(|v| v.as_text())
        .and_then(DatabaseEngine::parse)
        .unwrap_or_else(|| default_engine(component));
    DatabaseInstance {
        name: entry_name(entry, label),
        engine,
        size_gb: entry_number(entry, "size").unwrap_or(preset.database_gb).max(0.0),
    }
}

fn default_storage_kind(component: &ArchitectureComponent) -> StorageKind {
    if component.requires(&ServiceId::StorageObject) {
        StorageKind::Object
    } else if component.requires(&ServiceId::StorageFile) {
        StorageKind::File
    } else {
        StorageKind::Block
    }
}

fn volume_from(
    entry: &GroupEntry,
    label: &str,
    default_kind: StorageKind,
    preset: &SizingPreset,
) -> StorageVolume {
    StorageVolume {
        name: entry_name(entry, label),
        kind: entry
            .get("type")
            .and_then(|v| v.as_text())
            .and_then(StorageKind::parse)
            .unwrap_or(default_kind),
        size_gb: entry_number(entry, "size").unwrap_or(preset.storage_gb).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::values::{group_entry, ScalarValue};
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_default_instances_use_sizing_preset() {
        let catalog = catalog();
        let system = SystemConfigBuilder::new(&catalog)
            .sizing(Sizing::Large)
            .build(&[
                ComponentSelection::new("compute"),
                ComponentSelection::new("database"),
            ]);

        assert_eq!(
            system.vm_groups,
            vec![VmGroup {
                name: "compute".into(),
                cpu: 8,
                ram_gb: 32.0,
                count: 4,
            }]
        );
        assert_eq!(system.databases.len(), 1);
        assert_eq!(system.databases[0].engine, DatabaseEngine::Postgresql);
        assert_eq!(system.databases[0].size_gb, 1000.0);
        assert_eq!(system.component_instances[&ServiceId::StorageBlock], 1);
        assert_eq!(system.component_instances[&ServiceId::Backup], 1);
    }

    #[test]
    fn test_explicit_vm_groups_across_instances() {
        let catalog = catalog();
        let first = ComponentConfig::new().with_group(
            "vms",
            vec![group_entry([
                ("name", ScalarValue::Text("web".into())),
                ("cpu", ScalarValue::Number(2.0)),
                ("ram", ScalarValue::Number(8.0)),
                ("count", ScalarValue::Number(3.0)),
            ])],
        );
        let second = ComponentConfig::new().with_group(
            "vms",
            vec![group_entry([
                ("cpu", ScalarValue::Number(16.0)),
                ("ram", ScalarValue::Number(64.0)),
            ])],
        );
        let system = SystemConfigBuilder::new(&catalog).build(&[ComponentSelection::new(
            "compute",
        )
        .with_instance(first)
        .with_instance(second)]);

        assert_eq!(system.vm_groups.len(), 2);
        assert_eq!(system.vm_groups[0].name, "web");
        assert_eq!(system.vm_groups[1].name, "compute #2");
        assert_eq!(system.vm_groups[1].count, 1);
        assert_eq!(system.total_vms(), 4);
        assert_eq!(system.component_instances[&ServiceId::Compute], 2);
    }

    #[test]
    fn test_oversized_vm_counts_do_not_overflow() {
        let catalog = catalog();
        let huge = || {
            group_entry([
                ("cpu", ScalarValue::Number(2.0)),
                ("ram", ScalarValue::Number(4.0)),
                ("count", ScalarValue::Number(3e9)),
            ])
        };
        let instance = ComponentConfig::new().with_group("vms", vec![huge(), huge()]);
        let system = SystemConfigBuilder::new(&catalog)
            .build(&[ComponentSelection::new("compute").with_instance(instance)]);

        assert_eq!(system.vm_groups.len(), 2);
        assert_eq!(system.vm_groups[0].count, 3_000_000_000);
        assert_eq!(system.total_vms(), u32::MAX);
        assert_eq!(system.footprint(&ServiceId::Compute).instances, u32::MAX);
    }

    #[test]
    fn test_high_memory_workload_flagged() {
        let catalog = catalog();
        let system = SystemConfigBuilder::new(&catalog).build(&[ComponentSelection::new("sap-hana")]);
        assert!(system.high_memory_workload);
        assert_eq!(system.vm_groups[0].ram_gb, 64.0);
    }

    #[test]
    fn test_kubernetes_uses_schema_defaults_then_instance_values() {
        let catalog = catalog();
        let system = SystemConfigBuilder::new(&catalog)
            .sizing(Sizing::Small)
            .build(&[ComponentSelection::new("kubernetes")
                .with_instance(ComponentConfig::new())
                .with_instance(ComponentConfig::new().with_number("nodes", 9.0))]);

        assert_eq!(system.kubernetes.len(), 2);
        // Schema default (3 nodes, 4 vCPU) beats the small preset
        assert_eq!(system.kubernetes[0].nodes, 3);
        assert_eq!(system.kubernetes[0].cpu_per_node, 4);
        assert_eq!(system.kubernetes[1].nodes, 9);
    }

    #[test]
    fn test_messaging_tier_and_volume() {
        let catalog = catalog();
        let system = SystemConfigBuilder::new(&catalog).build(&[ComponentSelection::new(
            "messaging",
        )
        .with_instance(
            ComponentConfig::new()
                .with_number("messages", 120.0)
                .with_text("tier", "high"),
        )]);
        assert_eq!(
            system.messaging,
            vec![MessagingWorkload {
                messages_millions: 120.0,
                tier: Tier::High,
            }]
        );
    }

    #[test]
    fn test_storage_kind_defaults_from_component() {
        let catalog = catalog();
        let system = SystemConfigBuilder::new(&catalog).build(&[
            ComponentSelection::new("object-storage"),
            ComponentSelection::new("file-storage"),
        ]);
        let kinds: Vec<StorageKind> = system.storage.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![StorageKind::Object, StorageKind::File]);
    }

    #[test]
    fn test_unknown_component_skipped() {
        let catalog = catalog();
        let system =
            SystemConfigBuilder::new(&catalog).build(&[ComponentSelection::new("mainframe")]);
        assert_eq!(system, SystemConfig::default());
    }
}
