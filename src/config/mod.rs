//! Engine configuration
//!
//! Weights, maturity penalties, cost toggles and rates, loadable from a
//! `.cloudrank.toml` found in the working directory or one of its
//! ancestors.

mod core;
mod loader;
mod settings;
mod weights;

pub use self::core::EngineConfig;
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use settings::{
    AnalysisSettings, MaturitySettings, OperationsSettings, OverrideStoreConfig, PortfolioConfig,
    ProjectEffortSettings, TcoRates,
};
pub use weights::{NormalizedWeights, WeightConfig};
