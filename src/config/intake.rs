//! Intake conversation tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for intent detection and budget extraction
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IntakeConfig {
    /// Message count (greeting included) that forces budget generation
    #[serde(default = "default_threshold")]
    pub generation_message_threshold: usize,

    /// Budget amounts are rounded to a multiple of this
    #[serde(default = "default_rounding_interval")]
    pub rounding_interval: f64,
}

impl IntakeConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generation_message_threshold == 0 {
            return Err(ValidationError::InvalidMessageThreshold);
        }
        if !self.rounding_interval.is_finite() || self.rounding_interval <= 0.0 {
            return Err(ValidationError::InvalidRoundingInterval);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            generation_message_threshold: default_threshold(),
            rounding_interval: default_rounding_interval(),
        }
    }
}

fn default_threshold() -> usize {
    6
}

fn default_rounding_interval() -> f64 {
    1_000.0
}
