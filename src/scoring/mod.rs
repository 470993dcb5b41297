//! Scoring engine: weighted dimensions, relative cost score and maturity
//! penalty.

pub mod cost_score;
pub mod maturity;
mod scorer;

pub use crate::config::{NormalizedWeights, WeightConfig};
pub use cost_score::{cost_score, NEUTRAL_COST_SCORE};
pub use maturity::{maturity_factor, MATURITY_FLOOR};
pub use scorer::{round1, Score, ScoringEngine, PROVIDER_SHARE, SERVICE_SHARE};
