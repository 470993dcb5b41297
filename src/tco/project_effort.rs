//! One-time project effort in person-days.

use super::TcoLevel;
use crate::analysis::ServiceAnalysis;
use crate::catalog::{ServiceId, Tier};
use crate::sizing::{Footprint, SystemConfig};
use serde::{Deserialize, Serialize};

/// Person-days to introduce a managed service at medium effort.
///
/// `Custom` ids use 5.
pub fn base_days(service: &ServiceId) -> f64 {
    match service {
        ServiceId::Compute => 5.0,
        ServiceId::Kubernetes => 15.0,
        ServiceId::Serverless => 8.0,
        ServiceId::DatabaseSql => 10.0,
        ServiceId::DatabaseNosql => 10.0,
        ServiceId::Cache => 4.0,
        ServiceId::StorageObject => 2.0,
        ServiceId::StorageBlock => 2.0,
        ServiceId::StorageFile => 3.0,
        ServiceId::Messaging => 6.0,
        ServiceId::LoadBalancer => 2.0,
        ServiceId::Cdn => 3.0,
        ServiceId::Dns => 1.0,
        ServiceId::ApiGateway => 6.0,
        ServiceId::Identity => 8.0,
        ServiceId::KeyManagement => 3.0,
        ServiceId::Monitoring => 5.0,
        ServiceId::Logging => 5.0,
        ServiceId::Backup => 4.0,
        ServiceId::ContainerRegistry => 2.0,
        ServiceId::AiMl => 20.0,
        ServiceId::DataWarehouse => 20.0,
        ServiceId::Vpn => 3.0,
        ServiceId::Custom(_) => 5.0,
    }
}

pub fn tier_multiplier(tier: Tier) -> f64 {
    match tier {
        Tier::VeryLow => 0.5,
        Tier::Low => 0.75,
        Tier::Medium => 1.0,
        Tier::High => 1.5,
        Tier::VeryHigh => 2.0,
    }
}

/// `1 + (sqrt(n) - 1) × 0.7` for n > 1; exactly 1 for a single instance
pub fn instance_scale(instances: u32) -> f64 {
    if instances <= 1 {
        return 1.0;
    }
    1.0 + (f64::from(instances).sqrt() - 1.0) * 0.7
}

/// Extra project effort per additional distinct sub-type
pub fn variety_increment(service: &ServiceId) -> f64 {
    match service {
        ServiceId::DatabaseSql | ServiceId::DatabaseNosql => 0.20,
        ServiceId::Kubernetes => 0.15,
        _ => 0.10,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLine {
    pub service: ServiceId,
    pub tier: Option<Tier>,
    pub days: f64,
    pub self_build: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEffortEstimate {
    pub lines: Vec<ProjectLine>,
    pub total_days: f64,
    /// `total_days × person_day_rate`; never part of the monthly total
    pub one_time_cost: f64,
    pub level: TcoLevel,
}

impl ProjectEffortEstimate {
    /// ≤20 days low, ≤60 days medium, else high
    pub fn level_for(total_days: f64) -> TcoLevel {
        if total_days <= 20.0 {
            TcoLevel::Low
        } else if total_days <= 60.0 {
            TcoLevel::Medium
        } else {
            TcoLevel::High
        }
    }
}

pub fn estimate_project_effort(
    analysis: &ServiceAnalysis,
    system: Option<&SystemConfig>,
    person_day_rate: f64,
) -> ProjectEffortEstimate {
    let mut lines: Vec<ProjectLine> = analysis
        .offered()
        .map(|matched| {
            let footprint = system
                .map(|s| s.footprint(&matched.service))
                .unwrap_or(Footprint::SINGLE);
            let variety = super::operations::variety_factor(
                variety_increment(&matched.service),
                footprint.variants,
            );
            ProjectLine {
                service: matched.service.clone(),
                tier: Some(matched.project_effort),
                days: base_days(&matched.service)
                    * tier_multiplier(matched.project_effort)
                    * instance_scale(footprint.instances)
                    * variety,
                self_build: false,
            }
        })
        .collect();

    // Self-build effort is a fixed estimate per service
    lines.extend(analysis.self_buildable().map(|(service, option)| ProjectLine {
        service: service.clone(),
        tier: None,
        days: option.project_days,
        self_build: true,
    }));

    let total_days: f64 = lines.iter().map(|l| l.days).sum();
    let total_days = (total_days * 10.0).round() / 10.0;
    ProjectEffortEstimate {
        one_time_cost: (total_days * person_day_rate).round(),
        level: ProjectEffortEstimate::level_for(total_days),
        total_days,
        lines,
    }
}
