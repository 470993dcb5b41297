//! TCO calculator and its scaling laws.

mod calculator;
pub mod operations;
pub mod project_effort;

pub use calculator::{
    BlendWeights, ConsumptionEstimate, ConsumptionLine, TcoCalculator, TcoEstimate, TcoLevel,
    MISSING_SERVICE_PENALTY,
};
pub use operations::{OperationsEstimate, OperationsLine};
pub use project_effort::{ProjectEffortEstimate, ProjectLine};
