//! Component configuration and the derived system resource tree.

mod builder;
mod system;
mod values;

pub use builder::SystemConfigBuilder;
pub use system::{
    DatabaseEngine, DatabaseInstance, Footprint, KubernetesCluster, MessagingWorkload, Region,
    ServerlessWorkload, Sizing, SizingPreset, StorageKind, StorageVolume, SystemConfig, VmGroup,
};
pub use values::{
    group_entry, ComponentConfig, ComponentSelection, ConfigValue, GroupEntry, ScalarValue,
};
