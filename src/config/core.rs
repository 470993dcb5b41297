use serde::{Deserialize, Serialize};

use super::settings::{
    AnalysisSettings, MaturitySettings, OperationsSettings, OverrideStoreConfig, PortfolioConfig,
    ProjectEffortSettings, TcoRates,
};
use super::weights::WeightConfig;

/// Root configuration structure for cloudrank
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scoring weights
    #[serde(default)]
    pub weights: WeightConfig,

    /// Maturity penalty settings
    #[serde(default)]
    pub maturity: MaturitySettings,

    /// Operations cost toggle
    #[serde(default)]
    pub operations: OperationsSettings,

    /// Project effort toggle
    #[serde(default)]
    pub project_effort: ProjectEffortSettings,

    /// Personnel rates
    #[serde(default)]
    pub rates: TcoRates,

    /// Portfolio reporting options
    #[serde(default)]
    pub portfolio: PortfolioConfig,

    /// Override store location
    #[serde(default)]
    pub overrides: OverrideStoreConfig,
}

impl EngineConfig {
    /// The settings bundle passed to analysis entrypoints
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            maturity: self.maturity,
            operations: self.operations,
            project_effort: self.project_effort,
        }
    }
}
