//! Total cost of ownership: consumption, operations and project effort
//! combined into one estimate and a blended low/medium/high level.

use super::operations::{estimate_operations, OperationsEstimate};
use super::project_effort::{estimate_project_effort, ProjectEffortEstimate};
use crate::analysis::ServiceAnalysis;
use crate::catalog::{Provider, ServiceId, Tier};
use crate::config::{OperationsSettings, ProjectEffortSettings, TcoRates};
use crate::cost::{CostEstimate, CostModel};
use crate::sizing::SystemConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Added to the blended score per missing service
pub const MISSING_SERVICE_PENALTY: f64 = 0.3;

/// Coarse cost level on a 1/2/3 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TcoLevel {
    Low,
    Medium,
    High,
}

impl TcoLevel {
    /// ≤1.5 low, ≤2.5 medium, else high
    pub fn from_score(score: f64) -> Self {
        if score <= 1.5 {
            TcoLevel::Low
        } else if score <= 2.5 {
            TcoLevel::Medium
        } else {
            TcoLevel::High
        }
    }

    pub fn value(self) -> f64 {
        match self {
            TcoLevel::Low => 1.0,
            TcoLevel::Medium => 2.0,
            TcoLevel::High => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TcoLevel::Low => "low",
            TcoLevel::Medium => "medium",
            TcoLevel::High => "high",
        }
    }
}

impl fmt::Display for TcoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights of (consumption, operations, project) in the blended level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub consumption: f64,
    pub operations: f64,
    pub project: f64,
}

impl BlendWeights {
    pub fn for_settings(operations: bool, project: bool) -> Self {
        let (consumption, operations, project) = match (operations, project) {
            (true, true) => (0.40, 0.35, 0.25),
            (true, false) => (0.55, 0.45, 0.0),
            (false, true) => (0.60, 0.0, 0.40),
            (false, false) => (1.0, 0.0, 0.0),
        };
        Self {
            consumption,
            operations,
            project,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionLine {
    pub service: ServiceId,
    /// Consumption tier; `None` for self-built services
    pub tier: Option<Tier>,
    pub estimate: CostEstimate,
    pub self_build: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEstimate {
    pub lines: Vec<ConsumptionLine>,
    pub monthly_estimate: f64,
    pub level: TcoLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcoEstimate {
    pub consumption: ConsumptionEstimate,
    pub operations: OperationsEstimate,
    pub project_effort: ProjectEffortEstimate,
    pub operations_included: bool,
    pub project_effort_included: bool,
    pub missing_services: usize,
    /// Weighted level score plus the missing-service penalty
    pub blended_score: f64,
    pub level: TcoLevel,
    /// Consumption plus operations personnel cost when included
    pub monthly_total: f64,
}

impl TcoEstimate {
    pub fn one_time_cost(&self) -> f64 {
        self.project_effort.one_time_cost
    }
}

/// Mean line-item level; self-built items count as low, no items as low
fn consumption_level(lines: &[ConsumptionLine]) -> TcoLevel {
    if lines.is_empty() {
        return TcoLevel::Low;
    }
    let sum: f64 = lines
        .iter()
        .map(|l| l.tier.map_or(1.0, |t| f64::from(t.level())))
        .sum();
    TcoLevel::from_score(sum / lines.len() as f64)
}

#[derive(Debug, Clone, Copy)]
pub struct TcoCalculator<'a> {
    cost_model: CostModel<'a>,
    rates: TcoRates,
}

impl<'a> TcoCalculator<'a> {
    pub fn new(cost_model: CostModel<'a>, rates: TcoRates) -> Self {
        Self { cost_model, rates }
    }

    pub fn calculate(
        &self,
        provider: &Provider,
        analysis: &ServiceAnalysis,
        system: Option<&SystemConfig>,
        operations: &OperationsSettings,
        project_effort: &ProjectEffortSettings,
    ) -> TcoEstimate {
        let consumption = self.consumption(provider, analysis, system);
        let ops = estimate_operations(analysis, system, self.rates.fte_monthly_rate);
        let project = estimate_project_effort(analysis, system, self.rates.person_day_rate);

        let weights =
            BlendWeights::for_settings(operations.include_in_costs, project_effort.include_in_costs);
        let missing_services = analysis.missing.len();
        let blended_score = consumption.level.value() * weights.consumption
            + ops.level.value() * weights.operations
            + project.level.value() * weights.project
            + MISSING_SERVICE_PENALTY * missing_services as f64;

        let personnel = if operations.include_in_costs {
            ops.monthly_personnel_cost
        } else {
            0.0
        };

        TcoEstimate {
            monthly_total: consumption.monthly_estimate + personnel,
            level: TcoLevel::from_score(blended_score),
            consumption,
            operations: ops,
            project_effort: project,
            operations_included: operations.include_in_costs,
            project_effort_included: project_effort.include_in_costs,
            missing_services,
            blended_score,
        }
    }

    fn consumption(
        &self,
        provider: &Provider,
        analysis: &ServiceAnalysis,
        system: Option<&SystemConfig>,
    ) -> ConsumptionEstimate {
        let mut lines: Vec<ConsumptionLine> = analysis
            .offered()
            .map(|matched| ConsumptionLine {
                service: matched.service.clone(),
                tier: Some(matched.consumption),
                estimate: self.cost_model.estimate_service_cost(
                    &matched.service,
                    matched.consumption,
                    system,
                    provider,
                ),
                self_build: false,
            })
            .collect();

        lines.extend(analysis.self_buildable().map(|(service, _)| ConsumptionLine {
            service: service.clone(),
            tier: None,
            estimate: self
                .cost_model
                .estimate_self_build_cost(service, system, provider),
            self_build: true,
        }));

        ConsumptionEstimate {
            monthly_estimate: lines.iter().map(|l| l.estimate.cost).sum(),
            level: consumption_level(&lines),
            lines,
        }
    }
}
