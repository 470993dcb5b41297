//! Monthly cost estimates per service and provider.
//!
//! Without a system configuration a service costs its base price scaled by
//! tier and price factor. With one, resource-driven formulas price the
//! explicit quantities, using the provider's detailed table when one exists
//! and reference prices times the price factor otherwise.

use super::tables::{
    base_monthly_cost, detailed_table, self_build_monthly_cost, self_build_ratio,
    tier_multiplier, PriceTable, HIGH_MEMORY_PREMIUM, MINIMUM_MONTHLY_CHARGE, REFERENCE_PRICES,
};
use crate::catalog::{Provider, ServiceId, Tier};
use crate::overrides::EffectiveScoreResolver;
use crate::sizing::{StorageKind, SystemConfig};
use serde::{Deserialize, Serialize};

/// Where a cost figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    /// Flat base price × tier × price factor
    TierEstimate,
    /// Provider's detailed list-price table
    PriceTable,
    /// Reference unit prices × price factor
    Heuristic,
    /// VM-based self-build fallback
    SelfBuild,
}

/// One line of a cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub label: String,
    pub amount: f64,
}

impl CostComponent {
    fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount: amount.round(),
        }
    }
}

/// Rounded monthly cost with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub cost: f64,
    /// Monthly cost before rounding to whole currency units
    pub exact: f64,
    pub breakdown: Vec<CostComponent>,
    pub source: CostSource,
}

impl CostEstimate {
    fn new(exact: f64, breakdown: Vec<CostComponent>, source: CostSource) -> Self {
        Self {
            cost: exact.round(),
            exact,
            breakdown,
            source,
        }
    }
}

/// Unit prices resolved for one provider and region
struct ResolvedPrices {
    prices: PriceTable,
    source: CostSource,
}

#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    resolver: EffectiveScoreResolver<'a>,
}

impl<'a> CostModel<'a> {
    pub fn new(resolver: EffectiveScoreResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Managed-service estimate
    pub fn estimate_service_cost(
        &self,
        service: &ServiceId,
        tier: Tier,
        system: Option<&SystemConfig>,
        provider: &Provider,
    ) -> CostEstimate {
        let Some(system) = system else {
            return self.tier_estimate(service, tier, provider, 1);
        };

        let resolved = self.resolve_prices(provider, system);
        let lines = match service {
            ServiceId::Compute => compute_lines(system, &resolved.prices),
            ServiceId::DatabaseSql | ServiceId::DatabaseNosql => {
                database_lines(system, service, &resolved.prices)
            }
            ServiceId::StorageBlock => storage_lines(system, StorageKind::Block, &resolved.prices),
            ServiceId::StorageObject => {
                storage_lines(system, StorageKind::Object, &resolved.prices)
            }
            ServiceId::StorageFile => storage_lines(system, StorageKind::File, &resolved.prices),
            ServiceId::Kubernetes => kubernetes_lines(system, &resolved.prices),
            ServiceId::Serverless => serverless_lines(system, &resolved.prices),
            ServiceId::Messaging => messaging_lines(system, &resolved.prices),
            _ => Vec::new(),
        };

        if lines.is_empty() {
            let instances = system.footprint(service).instances;
            return self.tier_estimate(service, tier, provider, instances);
        }

        let total: f64 = lines.iter().map(|l| l.amount).sum();
        CostEstimate::new(total.max(MINIMUM_MONTHLY_CHARGE), lines, resolved.source)
    }

    /// VM-based self-build estimate for a service missing at the provider.
    ///
    /// Without a system configuration this is the self-build table price
    /// times the price factor; with one, the managed resource estimate is
    /// scaled by the table's self-build ratio.
    pub fn estimate_self_build_cost(
        &self,
        service: &ServiceId,
        system: Option<&SystemConfig>,
        provider: &Provider,
    ) -> CostEstimate {
        let factor = self.resolver.price_factor(provider);
        let cost = match system {
            None => self_build_monthly_cost(service) * factor,
            Some(system) => {
                let managed = self.estimate_service_cost(service, Tier::Medium, Some(system), provider);
                managed.exact * self_build_ratio(service)
            }
        };

        CostEstimate::new(
            cost,
            vec![CostComponent::new(
                format!("{} (self-build on VMs)", service.label()),
                cost,
            )],
            CostSource::SelfBuild,
        )
    }

    fn tier_estimate(
        &self,
        service: &ServiceId,
        tier: Tier,
        provider: &Provider,
        instances: u32,
    ) -> CostEstimate {
        let factor = self.resolver.price_factor(provider);
        let per_instance = base_monthly_cost(service) * tier_multiplier(tier) * factor;
        let cost = per_instance * f64::from(instances.max(1));
        let label = if instances > 1 {
            format!("{} ({} tier) × {}", service.label(), tier, instances)
        } else {
            format!("{} ({} tier)", service.label(), tier)
        };
        CostEstimate::new(
            cost,
            vec![CostComponent::new(label, cost)],
            CostSource::TierEstimate,
        )
    }

    fn resolve_prices(&self, provider: &Provider, system: &SystemConfig) -> ResolvedPrices {
        let effective = self.resolver.price_factor(provider);

        if let Some((table, premium)) = self.detailed_table_for(provider) {
            // Overrides rescale list prices by how far they move the factor
            let builtin = self.resolver.builtin_price_factor(provider);
            let adjustment = if builtin > 0.0 { effective / builtin } else { 1.0 };
            let uplift = table.regional_uplift(system.region);
            return ResolvedPrices {
                prices: table.scaled(premium * adjustment * uplift),
                source: CostSource::PriceTable,
            };
        }

        ResolvedPrices {
            prices: REFERENCE_PRICES.scaled(effective),
            source: CostSource::Heuristic,
        }
    }

    /// The provider's own table, or its base provider's table with the
    /// variant premium applied
    fn detailed_table_for(&self, provider: &Provider) -> Option<(&'static PriceTable, f64)> {
        if let Some(table) = detailed_table(&provider.id) {
            return Some((table, 1.0));
        }
        let variant = provider.variant_of.as_ref()?;
        detailed_table(&variant.base).map(|table| (table, variant.premium))
    }
}

fn compute_lines(system: &SystemConfig, prices: &PriceTable) -> Vec<CostComponent> {
    let premium = if system.high_memory_workload {
        HIGH_MEMORY_PREMIUM
    } else {
        1.0
    };
    system
        .vm_groups
        .iter()
        .map(|group| {
            let per_vm =
                f64::from(group.cpu) * prices.vcpu_month + group.ram_gb * prices.ram_gb_month;
            CostComponent::new(
                format!(
                    "{}: {} × {} vCPU / {} GB",
                    group.name, group.count, group.cpu, group.ram_gb
                ),
                per_vm * f64::from(group.count) * premium,
            )
        })
        .collect()
}

fn database_lines(
    system: &SystemConfig,
    service: &ServiceId,
    prices: &PriceTable,
) -> Vec<CostComponent> {
    system
        .databases_for(service)
        .map(|db| {
            CostComponent::new(
                format!("{}: {:?} {} GB", db.name, db.engine, db.size_gb),
                prices.database_fee(db.engine) + db.size_gb * prices.db_gb_month,
            )
        })
        .collect()
}

fn storage_lines(system: &SystemConfig, kind: StorageKind, prices: &PriceTable) -> Vec<CostComponent> {
    system
        .volumes_of(kind)
        .map(|volume| {
            CostComponent::new(
                format!("{}: {} GB", volume.name, volume.size_gb),
                volume.size_gb * prices.storage_gb_month(kind),
            )
        })
        .collect()
}

fn kubernetes_lines(system: &SystemConfig, prices: &PriceTable) -> Vec<CostComponent> {
    system
        .kubernetes
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            let per_node = f64::from(cluster.cpu_per_node) * prices.vcpu_month
                + cluster.ram_per_node_gb * prices.ram_gb_month;
            CostComponent::new(
                format!(
                    "cluster {}: {} nodes × {} vCPU / {} GB",
                    index + 1,
                    cluster.nodes,
                    cluster.cpu_per_node,
                    cluster.ram_per_node_gb
                ),
                prices.k8s_control_plane + per_node * f64::from(cluster.nodes),
            )
        })
        .collect()
}

fn serverless_lines(system: &SystemConfig, prices: &PriceTable) -> Vec<CostComponent> {
    system
        .serverless
        .iter()
        .map(|w| {
            CostComponent::new(
                format!("{} M invocations ({} tier)", w.invocations_millions, w.tier),
                w.invocations_millions * prices.serverless_per_million * tier_multiplier(w.tier),
            )
        })
        .collect()
}

fn messaging_lines(system: &SystemConfig, prices: &PriceTable) -> Vec<CostComponent> {
    system
        .messaging
        .iter()
        .map(|w| {
            CostComponent::new(
                format!("{} M messages ({} tier)", w.messages_millions, w.tier),
                w.messages_millions * prices.messaging_per_million * tier_multiplier(w.tier),
            )
        })
        .collect()
}
