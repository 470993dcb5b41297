// Export modules for library usage
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod engine;
pub mod errors;
pub mod overrides;
pub mod portfolio;
pub mod recommendation;
pub mod scoring;
pub mod sizing;
pub mod tco;

// Re-export commonly used types
pub use crate::analysis::{ServiceAnalysis, ServiceAnalyzer};

pub use crate::catalog::{
    ArchitectureComponent, Catalog, Maturity, Provider, ProviderCategory, SelfBuildOption,
    ServiceId, ServiceOffering, Tier,
};

pub use crate::config::{
    load_config, AnalysisSettings, EngineConfig, MaturitySettings, OperationsSettings,
    ProjectEffortSettings, TcoRates, WeightConfig,
};

pub use crate::cost::{CostEstimate, CostModel, CostSource};

pub use crate::engine::{CloudAnalyzer, RankedResult};

pub use crate::errors::{Error, Result, ResultExt};

pub use crate::overrides::{
    EffectiveScoreResolver, FileStore, KeyValueStore, MemoryStore, OverrideSet, ScoreOverride,
};

pub use crate::portfolio::{ApplicationInstance, Portfolio, PortfolioResult};

pub use crate::recommendation::{Recommendation, Suitability};

pub use crate::scoring::{Score, ScoringEngine};

pub use crate::sizing::{ComponentConfig, ComponentSelection, Sizing, SystemConfig};

pub use crate::tco::{TcoCalculator, TcoEstimate, TcoLevel};
