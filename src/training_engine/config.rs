//! Engine tuning knobs.
//!
//! Every field has a default, so a JSON config only needs the keys it wants
//! to override:
//!
//! ```rust
//! use mental_math_drill::EngineConfig;
//!
//! let cfg = EngineConfig::from_json(r#"{ "near_hundred_radius": 10 }"#).unwrap();
//! assert_eq!(cfg.near_hundred_radius, 10);
//! assert_eq!(cfg.max_operand, 1_000_000_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::training_engine::error::EngineError;

/// Largest operand magnitude the engine accepts. Keeps every product inside `i64`.
pub const MAX_SAFE_OPERAND: i64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operands with a larger magnitude are rejected with a range error.
    pub max_operand: i64,
    /// Relative distance (|n - 10^k| / 10^k) under which an operand counts as
    /// "near a power of ten".
    pub near_power_tolerance: f64,
    /// Both operands must lie within this distance of 100 for the near-100 method.
    pub near_hundred_radius: i64,
    /// Intermediate values above this magnitude incur a growing cost penalty.
    pub magnitude_threshold: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_operand: MAX_SAFE_OPERAND,
            near_power_tolerance: 0.1,
            near_hundred_radius: 15,
            magnitude_threshold: 10_000,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document (missing keys fall back to defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=MAX_SAFE_OPERAND).contains(&self.max_operand) {
            return Err(EngineError::Config(format!(
                "max_operand must be between 1 and {MAX_SAFE_OPERAND}, got {}",
                self.max_operand
            )));
        }
        if !(self.near_power_tolerance > 0.0 && self.near_power_tolerance <= 0.5) {
            return Err(EngineError::Config(format!(
                "near_power_tolerance must be in (0, 0.5], got {}",
                self.near_power_tolerance
            )));
        }
        if !(1..=50).contains(&self.near_hundred_radius) {
            return Err(EngineError::Config(format!(
                "near_hundred_radius must be between 1 and 50, got {}",
                self.near_hundred_radius
            )));
        }
        if self.magnitude_threshold < 10 {
            return Err(EngineError::Config(format!(
                "magnitude_threshold must be at least 10, got {}",
                self.magnitude_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "magnitude_threshold": 5000 }"#).unwrap();
        assert_eq!(cfg.magnitude_threshold, 5000);
        assert_eq!(cfg.near_hundred_radius, 15);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = EngineConfig::from_json(r#"{ "max_operand": 5000000000 }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        let err = EngineConfig::from_json(r#"{ "near_power_tolerance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(EngineError::Config(_))
        ));
    }
}
