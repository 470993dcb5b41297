//! Multi-application portfolios.

mod aggregator;
mod application;
mod metrics;
mod state;

pub use aggregator::{
    weighted_mean, AggregatedProvider, ApplicationResult, PortfolioAggregator, PortfolioResult,
};
pub use application::ApplicationInstance;
pub use metrics::{portfolio_metrics, ComponentFrequency, PortfolioMetrics};
pub use state::Portfolio;
