//! Scoring weight configuration
//!
//! Weights are entered as four non-negative numbers that need not sum to
//! 100; they are normalized to fractions before use.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// User-facing weights for the four scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    #[serde(default = "default_control_weight")]
    pub control: f64,

    #[serde(default = "default_performance_weight")]
    pub performance: f64,

    #[serde(default = "default_availability_weight")]
    pub availability: f64,

    #[serde(default = "default_cost_weight")]
    pub cost: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            control: default_control_weight(),
            performance: default_performance_weight(),
            availability: default_availability_weight(),
            cost: default_cost_weight(),
        }
    }
}

/// Weights as fractions summing to 1.0 (or all zero)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub control: f64,
    pub performance: f64,
    pub availability: f64,
    pub cost: f64,
}

impl NormalizedWeights {
    pub fn sum(&self) -> f64 {
        self.control + self.performance + self.availability + self.cost
    }
}

impl WeightConfig {
    pub fn new(control: f64, performance: f64, availability: f64, cost: f64) -> Self {
        Self {
            control,
            performance,
            availability,
            cost,
        }
    }

    // Pure function: Check if a weight is usable
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> std::result::Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} weight must be a non-negative number, got {}",
                name, weight
            ))
        }
    }

    /// Validate all weights; the sum may be anything including zero.
    pub fn validate(&self) -> Result<()> {
        let errors: Vec<String> = [
            Self::validate_weight(self.control, "Control"),
            Self::validate_weight(self.performance, "Performance"),
            Self::validate_weight(self.availability, "Availability"),
            Self::validate_weight(self.cost, "Cost"),
        ]
        .into_iter()
        .filter_map(|r| r.err())
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors.join("; ")))
        }
    }

    /// Divide each weight by the sum.
    ///
    /// Invalid entries count as zero. A zero sum yields all-zero fractions,
    /// so every weighted contribution drops out instead of dividing by zero.
    pub fn normalize(&self) -> NormalizedWeights {
        let sanitize = |w: f64| if Self::is_valid_weight(w) { w } else { 0.0 };
        let control = sanitize(self.control);
        let performance = sanitize(self.performance);
        let availability = sanitize(self.availability);
        let cost = sanitize(self.cost);

        let sum = control + performance + availability + cost;
        if sum <= 0.0 {
            return NormalizedWeights::default();
        }

        NormalizedWeights {
            control: control / sum,
            performance: performance / sum,
            availability: availability / sum,
            cost: cost / sum,
        }
    }
}

pub fn default_control_weight() -> f64 {
    25.0
}
pub fn default_performance_weight() -> f64 {
    25.0
}
pub fn default_availability_weight() -> f64 {
    35.0
}
pub fn default_cost_weight() -> f64 {
    15.0
}
