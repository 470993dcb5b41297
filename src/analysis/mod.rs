//! Service analysis: how well one provider covers a set of required
//! services.

mod service_analyzer;

pub use service_analyzer::{
    coverage, MatchedService, MissingService, ServiceAnalysis, ServiceAnalyzer,
};
