//! Analysis settings: maturity penalties, cost-dimension toggles and rates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Penalties applied for preview and missing services
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaturitySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Score reduction per preview service, in percent
    #[serde(default = "default_preview_penalty")]
    pub preview_penalty_percent: f64,

    /// Score reduction per missing service, in percent
    #[serde(default = "default_missing_penalty")]
    pub missing_penalty_percent: f64,
}

impl Default for MaturitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            preview_penalty_percent: default_preview_penalty(),
            missing_penalty_percent: default_missing_penalty(),
        }
    }
}

impl MaturitySettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Whether operations personnel cost counts towards the TCO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsSettings {
    #[serde(default = "default_true")]
    pub include_in_costs: bool,
}

impl Default for OperationsSettings {
    fn default() -> Self {
        Self {
            include_in_costs: true,
        }
    }
}

/// Whether one-time project effort counts towards the blended TCO level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEffortSettings {
    #[serde(default = "default_true")]
    pub include_in_costs: bool,
}

impl Default for ProjectEffortSettings {
    fn default() -> Self {
        Self {
            include_in_costs: true,
        }
    }
}

/// The per-run settings bundle passed to every analysis entrypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default)]
    pub maturity: MaturitySettings,
    #[serde(default)]
    pub operations: OperationsSettings,
    #[serde(default)]
    pub project_effort: ProjectEffortSettings,
}

/// Personnel rates used to price operations and project effort
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TcoRates {
    /// Fully loaded monthly cost of one FTE
    #[serde(default = "default_fte_monthly_rate")]
    pub fte_monthly_rate: f64,

    /// Cost of one person-day of project work
    #[serde(default = "default_person_day_rate")]
    pub person_day_rate: f64,
}

impl Default for TcoRates {
    fn default() -> Self {
        Self {
            fte_monthly_rate: default_fte_monthly_rate(),
            person_day_rate: default_person_day_rate(),
        }
    }
}

impl TcoRates {
    pub fn validate(&self) -> Result<(), String> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(self.fte_monthly_rate) {
            return Err(format!(
                "fte_monthly_rate must be a non-negative number, got {}",
                self.fte_monthly_rate
            ));
        }
        if !valid(self.person_day_rate) {
            return Err(format!(
                "person_day_rate must be a non-negative number, got {}",
                self.person_day_rate
            ));
        }
        Ok(())
    }
}

/// Portfolio reporting options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Number of most frequently selected components to report
    #[serde(default = "default_top_components")]
    pub top_components: usize,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            top_components: default_top_components(),
        }
    }
}

/// Location of the override store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverrideStoreConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}
pub fn default_preview_penalty() -> f64 {
    2.0
}
pub fn default_missing_penalty() -> f64 {
    3.0
}
pub fn default_fte_monthly_rate() -> f64 {
    8000.0
}
pub fn default_person_day_rate() -> f64 {
    1000.0
}
pub fn default_top_components() -> usize {
    5
}
