//! Configuration types.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How aggressively the filter rejects low-value or borderline content.
///
/// Raising the level tightens every threshold: minimum word count,
/// meaningful-word fraction, repetition ratio, and which low-value
/// shape checks run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    Low,
    Medium,
    High,
}

impl SensitivityLevel {
    /// Parse from a config/env string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ConfigError::InvalidValue {
                key: "sensitivity".into(),
                message: format!("expected low|medium|high, got {other:?}"),
            }),
        }
    }
}

/// Capture filtering configuration. Read-only for the pipeline;
/// persistence (if any) belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Master switch. When off, every capture is reported ineligible.
    pub smart_filtering: bool,
    /// Filter aggressiveness.
    pub sensitivity: SensitivityLevel,
    /// Minimum capture length in characters.
    pub min_length: usize,
    /// Maximum capture length in characters.
    pub max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smart_filtering: true,
            sensitivity: SensitivityLevel::Medium,
            min_length: 20,
            max_length: 50_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.smart_filtering);
        assert_eq!(config.sensitivity, SensitivityLevel::Medium);
        assert_eq!(config.min_length, 20);
        assert_eq!(config.max_length, 50_000);
    }

    #[test]
    fn sensitivity_parses_case_insensitive() {
        assert_eq!(
            SensitivityLevel::parse("HIGH").unwrap(),
            SensitivityLevel::High
        );
        assert_eq!(
            SensitivityLevel::parse(" low ").unwrap(),
            SensitivityLevel::Low
        );
    }

    #[test]
    fn sensitivity_rejects_unknown() {
        assert!(SensitivityLevel::parse("paranoid").is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.min_length, config.min_length);
        assert_eq!(back.sensitivity, config.sensitivity);
    }
}
