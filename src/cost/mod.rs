//! Cost model: managed and self-build monthly estimates.

mod model;
pub mod tables;

pub use model::{CostComponent, CostEstimate, CostModel, CostSource};
