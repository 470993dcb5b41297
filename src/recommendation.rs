//! Short natural-language assessment attached to each ranked result.

use crate::analysis::ServiceAnalysis;
use crate::catalog::Provider;
use crate::scoring::Score;
use crate::tco::{TcoEstimate, TcoLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coverage below this is never recommended
pub const NOT_RECOMMENDED_BELOW: f64 = 50.0;
/// Coverage below this is only conditionally suitable
pub const CONDITIONAL_BELOW: f64 = 80.0;
pub const HIGHLY_SUITABLE_SCORE: f64 = 65.0;
pub const HIGHLY_SUITABLE_COVERAGE: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    NotRecommended,
    ConditionallySuitable,
    Suitable,
    HighlySuitable,
}

impl Suitability {
    pub fn classify(total: f64, coverage: f64) -> Self {
        if coverage < NOT_RECOMMENDED_BELOW {
            Suitability::NotRecommended
        } else if coverage < CONDITIONAL_BELOW {
            Suitability::ConditionallySuitable
        } else if total >= HIGHLY_SUITABLE_SCORE && coverage >= HIGHLY_SUITABLE_COVERAGE {
            Suitability::HighlySuitable
        } else {
            Suitability::Suitable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Suitability::NotRecommended => "not recommended",
            Suitability::ConditionallySuitable => "conditionally suitable",
            Suitability::Suitable => "suitable",
            Suitability::HighlySuitable => "highly suitable",
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub suitability: Suitability,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: String,
}

fn service_list<'s>(services: impl Iterator<Item = &'s str>) -> String {
    services.collect::<Vec<_>>().join(", ")
}

pub fn recommend(
    provider: &Provider,
    analysis: &ServiceAnalysis,
    score: &Score,
    tco: &TcoEstimate,
) -> Recommendation {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if analysis.total_required > 0 && analysis.coverage >= 100.0 {
        strengths.push("All required services available as managed offerings".to_string());
    } else if analysis.coverage >= HIGHLY_SUITABLE_COVERAGE {
        strengths.push("Nearly complete service coverage".to_string());
    }
    if score.control >= 70.0 {
        strengths.push("High data sovereignty and operational control".to_string());
    }
    if score.performance >= 85.0 {
        strengths.push("Strong performance and feature depth".to_string());
    }
    if score.cost >= 85.0 {
        strengths.push("Among the most cost-efficient options".to_string());
    }
    if tco.level == TcoLevel::Low {
        strengths.push("Low total cost of ownership".to_string());
    }

    if !analysis.missing.is_empty() {
        let self_built = analysis.self_buildable().count();
        let mut line = format!(
            "Missing services: {}",
            service_list(analysis.missing.iter().map(|m| m.service.label()))
        );
        if self_built > 0 {
            line.push_str(&format!(" ({} can be self-built on VMs)", self_built));
        }
        weaknesses.push(line);
    }
    if !analysis.preview.is_empty() {
        weaknesses.push(format!(
            "Preview only: {}",
            service_list(analysis.preview.iter().map(|m| m.service.label()))
        ));
    }
    if !analysis.planned.is_empty() {
        weaknesses.push(format!(
            "Planned, not yet available: {}",
            service_list(analysis.planned.iter().map(|s| s.label()))
        ));
    }
    if score.control < 40.0 {
        weaknesses.push("Limited sovereignty and control".to_string());
    }
    if score.cost <= 40.0 {
        weaknesses.push("Comparatively expensive".to_string());
    }
    if tco.level == TcoLevel::High {
        weaknesses.push("High total cost of ownership".to_string());
    }

    let suitability = Suitability::classify(score.total, analysis.coverage);
    let summary = format!(
        "{} is {} ({:.1} points, {:.0}% coverage, {} TCO)",
        provider.name,
        suitability.label(),
        score.total,
        analysis.coverage,
        tco.level
    );

    Recommendation {
        suitability,
        strengths,
        weaknesses,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suitability_thresholds() {
        assert_eq!(Suitability::classify(90.0, 49.9), Suitability::NotRecommended);
        assert_eq!(Suitability::classify(90.0, 50.0), Suitability::ConditionallySuitable);
        assert_eq!(Suitability::classify(90.0, 79.9), Suitability::ConditionallySuitable);
        assert_eq!(Suitability::classify(64.9, 100.0), Suitability::Suitable);
        assert_eq!(Suitability::classify(65.0, 94.9), Suitability::Suitable);
        assert_eq!(Suitability::classify(65.0, 95.0), Suitability::HighlySuitable);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Suitability::ConditionallySuitable.to_string(), "conditionally suitable");
        assert_eq!(Suitability::HighlySuitable.label(), "highly suitable");
    }
}
