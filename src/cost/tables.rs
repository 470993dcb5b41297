//! Static price tables.
//!
//! Amounts are monthly, in EUR. Managed base costs are hyperscaler
//! reference prices at medium tier. Self-build base costs are VM-based
//! equivalents at 30-40 % of the managed baseline.

use crate::catalog::{ServiceId, Tier};
use crate::sizing::{DatabaseEngine, Region};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Formula results never fall below this monthly amount.
pub const MINIMUM_MONTHLY_CHARGE: f64 = 10.0;

/// Compute premium for specialised in-memory database workloads.
pub const HIGH_MEMORY_PREMIUM: f64 = 1.35;

/// Managed-service base cost at medium tier.
///
/// `Custom` ids use 200.
pub fn base_monthly_cost(service: &ServiceId) -> f64 {
    match service {
        ServiceId::Compute => 450.0,
        ServiceId::Kubernetes => 800.0,
        ServiceId::Serverless => 150.0,
        ServiceId::DatabaseSql => 400.0,
        ServiceId::DatabaseNosql => 350.0,
        ServiceId::Cache => 200.0,
        ServiceId::StorageObject => 80.0,
        ServiceId::StorageBlock => 100.0,
        ServiceId::StorageFile => 150.0,
        ServiceId::Messaging => 120.0,
        ServiceId::LoadBalancer => 60.0,
        ServiceId::Cdn => 150.0,
        ServiceId::Dns => 20.0,
        ServiceId::ApiGateway => 120.0,
        ServiceId::Identity => 100.0,
        ServiceId::KeyManagement => 40.0,
        ServiceId::Monitoring => 120.0,
        ServiceId::Logging => 150.0,
        ServiceId::Backup => 100.0,
        ServiceId::ContainerRegistry => 40.0,
        ServiceId::AiMl => 1500.0,
        ServiceId::DataWarehouse => 1800.0,
        ServiceId::Vpn => 80.0,
        ServiceId::Custom(_) => 200.0,
    }
}

/// VM-based self-build base cost.
///
/// `Custom` ids use 70.
pub fn self_build_monthly_cost(service: &ServiceId) -> f64 {
    match service {
        ServiceId::Compute => 180.0,
        ServiceId::Kubernetes => 320.0,
        ServiceId::Serverless => 60.0,
        ServiceId::DatabaseSql => 160.0,
        ServiceId::DatabaseNosql => 140.0,
        ServiceId::Cache => 70.0,
        ServiceId::StorageObject => 30.0,
        ServiceId::StorageBlock => 35.0,
        ServiceId::StorageFile => 50.0,
        ServiceId::Messaging => 45.0,
        ServiceId::LoadBalancer => 20.0,
        ServiceId::Cdn => 55.0,
        ServiceId::Dns => 7.0,
        ServiceId::ApiGateway => 40.0,
        ServiceId::Identity => 35.0,
        ServiceId::KeyManagement => 14.0,
        ServiceId::Monitoring => 40.0,
        ServiceId::Logging => 55.0,
        ServiceId::Backup => 35.0,
        ServiceId::ContainerRegistry => 14.0,
        ServiceId::AiMl => 600.0,
        ServiceId::DataWarehouse => 650.0,
        ServiceId::Vpn => 25.0,
        ServiceId::Custom(_) => 70.0,
    }
}

/// Self-build cost relative to the managed baseline
pub fn self_build_ratio(service: &ServiceId) -> f64 {
    self_build_monthly_cost(service) / base_monthly_cost(service)
}

/// Consumption multiplier of a tier
pub fn tier_multiplier(tier: Tier) -> f64 {
    match tier {
        Tier::VeryLow => 0.5,
        Tier::Low => 0.7,
        Tier::Medium => 1.0,
        Tier::High => 1.5,
        Tier::VeryHigh => 2.0,
    }
}

/// Unit prices for resource-based estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTable {
    pub vcpu_month: f64,
    pub ram_gb_month: f64,
    pub db_gb_month: f64,
    pub db_fee_open_source: f64,
    pub db_fee_commercial: f64,
    pub db_fee_oracle: f64,
    pub db_fee_document: f64,
    pub db_fee_in_memory: f64,
    pub block_gb_month: f64,
    pub object_gb_month: f64,
    pub file_gb_month: f64,
    pub k8s_control_plane: f64,
    pub serverless_per_million: f64,
    pub messaging_per_million: f64,
    /// Uplift per region (germany, eu_west, eu_north)
    pub regional: [f64; 3],
}

impl PriceTable {
    /// Every unit price multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> PriceTable {
        PriceTable {
            vcpu_month: self.vcpu_month * factor,
            ram_gb_month: self.ram_gb_month * factor,
            db_gb_month: self.db_gb_month * factor,
            db_fee_open_source: self.db_fee_open_source * factor,
            db_fee_commercial: self.db_fee_commercial * factor,
            db_fee_oracle: self.db_fee_oracle * factor,
            db_fee_document: self.db_fee_document * factor,
            db_fee_in_memory: self.db_fee_in_memory * factor,
            block_gb_month: self.block_gb_month * factor,
            object_gb_month: self.object_gb_month * factor,
            file_gb_month: self.file_gb_month * factor,
            k8s_control_plane: self.k8s_control_plane * factor,
            serverless_per_million: self.serverless_per_million * factor,
            messaging_per_million: self.messaging_per_million * factor,
            regional: self.regional,
        }
    }

    pub fn regional_uplift(&self, region: Region) -> f64 {
        match region {
            Region::Germany => self.regional[0],
            Region::EuWest => self.regional[1],
            Region::EuNorth => self.regional[2],
        }
    }

    pub fn database_fee(&self, engine: DatabaseEngine) -> f64 {
        match engine {
            DatabaseEngine::Postgresql | DatabaseEngine::Mysql | DatabaseEngine::Mariadb => {
                self.db_fee_open_source
            }
            DatabaseEngine::Sqlserver => self.db_fee_commercial,
            DatabaseEngine::Oracle => self.db_fee_oracle,
            DatabaseEngine::Mongodb => self.db_fee_document,
            DatabaseEngine::Hana => self.db_fee_in_memory,
        }
    }

    pub fn storage_gb_month(&self, kind: crate::sizing::StorageKind) -> f64 {
        use crate::sizing::StorageKind;
        match kind {
            StorageKind::Block => self.block_gb_month,
            StorageKind::Object => self.object_gb_month,
            StorageKind::File => self.file_gb_month,
        }
    }
}

/// Hyperscaler-average unit prices, scaled by the price factor for
/// providers without a detailed table.
pub const REFERENCE_PRICES: PriceTable = PriceTable {
    vcpu_month: 25.0,
    ram_gb_month: 3.5,
    db_gb_month: 0.20,
    db_fee_open_source: 50.0,
    db_fee_commercial: 300.0,
    db_fee_oracle: 450.0,
    db_fee_document: 80.0,
    db_fee_in_memory: 600.0,
    block_gb_month: 0.10,
    object_gb_month: 0.023,
    file_gb_month: 0.30,
    k8s_control_plane: 70.0,
    serverless_per_million: 4.0,
    messaging_per_million: 0.50,
    regional: [1.0, 1.0, 1.0],
};

/// Detailed list-price tables by provider id
static DETAILED_TABLES: Lazy<BTreeMap<&'static str, PriceTable>> = Lazy::new(|| {
    let mut tables = BTreeMap::new();
    tables.insert(
        "aws",
        PriceTable {
            vcpu_month: 24.5,
            ram_gb_month: 3.4,
            db_gb_month: 0.23,
            db_fee_open_source: 55.0,
            db_fee_commercial: 320.0,
            db_fee_oracle: 480.0,
            db_fee_document: 85.0,
            db_fee_in_memory: 650.0,
            block_gb_month: 0.095,
            object_gb_month: 0.0245,
            file_gb_month: 0.33,
            k8s_control_plane: 73.0,
            serverless_per_million: 4.2,
            messaging_per_million: 0.40,
            regional: [1.0, 0.96, 0.98],
        },
    );
    tables.insert(
        "azure",
        PriceTable {
            vcpu_month: 25.5,
            ram_gb_month: 3.5,
            db_gb_month: 0.21,
            db_fee_open_source: 52.0,
            db_fee_commercial: 280.0,
            db_fee_oracle: 470.0,
            db_fee_document: 90.0,
            db_fee_in_memory: 620.0,
            block_gb_month: 0.11,
            object_gb_month: 0.021,
            file_gb_month: 0.28,
            k8s_control_plane: 68.0,
            serverless_per_million: 3.9,
            messaging_per_million: 0.55,
            regional: [1.0, 0.97, 1.02],
        },
    );
    tables.insert(
        "gcp",
        PriceTable {
            vcpu_month: 24.0,
            ram_gb_month: 3.3,
            db_gb_month: 0.19,
            db_fee_open_source: 48.0,
            db_fee_commercial: 310.0,
            db_fee_oracle: 460.0,
            db_fee_document: 75.0,
            db_fee_in_memory: 640.0,
            block_gb_month: 0.10,
            object_gb_month: 0.023,
            file_gb_month: 0.30,
            k8s_control_plane: 73.0,
            serverless_per_million: 4.0,
            messaging_per_million: 0.45,
            regional: [1.0, 0.95, 0.99],
        },
    );
    tables.insert(
        "stackit",
        PriceTable {
            vcpu_month: 22.0,
            ram_gb_month: 3.0,
            db_gb_month: 0.18,
            db_fee_open_source: 45.0,
            db_fee_commercial: 290.0,
            db_fee_oracle: 440.0,
            db_fee_document: 75.0,
            db_fee_in_memory: 560.0,
            block_gb_month: 0.09,
            object_gb_month: 0.022,
            file_gb_month: 0.26,
            k8s_control_plane: 60.0,
            serverless_per_million: 3.8,
            messaging_per_million: 0.45,
            regional: [1.0, 1.05, 1.05],
        },
    );
    tables.insert(
        "ionos",
        PriceTable {
            vcpu_month: 18.5,
            ram_gb_month: 2.6,
            db_gb_month: 0.15,
            db_fee_open_source: 38.0,
            db_fee_commercial: 260.0,
            db_fee_oracle: 400.0,
            db_fee_document: 60.0,
            db_fee_in_memory: 520.0,
            block_gb_month: 0.075,
            object_gb_month: 0.017,
            file_gb_month: 0.22,
            k8s_control_plane: 0.0,
            serverless_per_million: 3.0,
            messaging_per_million: 0.38,
            regional: [1.0, 1.02, 1.04],
        },
    );
    tables.insert(
        "otc",
        PriceTable {
            vcpu_month: 23.5,
            ram_gb_month: 3.3,
            db_gb_month: 0.20,
            db_fee_open_source: 50.0,
            db_fee_commercial: 300.0,
            db_fee_oracle: 450.0,
            db_fee_document: 80.0,
            db_fee_in_memory: 580.0,
            block_gb_month: 0.10,
            object_gb_month: 0.022,
            file_gb_month: 0.29,
            k8s_control_plane: 65.0,
            serverless_per_million: 3.9,
            messaging_per_million: 0.48,
            regional: [1.0, 1.03, 1.05],
        },
    );
    tables
});

pub fn detailed_table(provider_id: &str) -> Option<&'static PriceTable> {
    DETAILED_TABLES.get(provider_id)
}
