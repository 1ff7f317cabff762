//! Configuration for the name generation pipeline.
//!
//! The generator is configured with explicit bounds on the combinatorial
//! search plus the tone weights used by general scoring. Defaults keep the
//! search small for realistic inputs (names of 1-4 characters, candidate
//! pools of a few dozen).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{MeimeiError, Result};

/// Relative weights for blending energy and sentiment into a tone score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneWeights {
    /// Weight applied to the combination's mean energy level
    pub energy: f64,
    /// Weight applied to the combination's mean sentiment score
    pub sentiment: f64,
}

impl ToneWeights {
    /// Create a weight pair
    pub fn new(energy: f64, sentiment: f64) -> Self {
        Self { energy, sentiment }
    }

    /// Validate that both weights are in [0, 1] and carry some mass
    pub fn validate(&self, field: &str) -> Result<()> {
        for (name, value) in [("energy", self.energy), ("sentiment", self.sentiment)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MeimeiError::config_field(
                    format!("{name} weight {value} outside [0, 1]"),
                    field,
                ));
            }
        }
        if self.energy + self.sentiment <= 0.0 {
            return Err(MeimeiError::config_field(
                "tone weights must not both be zero",
                field,
            ));
        }
        Ok(())
    }

    /// Blend a sentiment and energy value with these weights
    pub fn blend(&self, sentiment: f64, energy: f64) -> f64 {
        (self.sentiment * sentiment + self.energy * energy) / (self.sentiment + self.energy)
    }
}

/// Configuration for `NameGenerator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Candidate pool cap; the pool keeps the top-ranked characters
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Hard cap on enumerated character sequences per request
    #[serde(default = "default_max_combinations")]
    pub max_combinations: usize,

    /// Longest name length serviced; longer requests yield empty results
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// General-score bonus per distinct profile term matched
    #[serde(default = "default_overlap_bonus")]
    pub overlap_bonus: f64,

    /// Tone weights when the preferred style reads energetic
    #[serde(default = "default_energetic_weights")]
    pub energetic_weights: ToneWeights,

    /// Tone weights when the preferred style reads calm or traditional
    #[serde(default = "default_calm_weights")]
    pub calm_weights: ToneWeights,

    /// Tone weights for any other style
    #[serde(default = "default_balanced_weights")]
    pub balanced_weights: ToneWeights,
}

fn default_max_candidates() -> usize {
    24
}

fn default_max_combinations() -> usize {
    4096
}

fn default_max_name_length() -> usize {
    4
}

fn default_overlap_bonus() -> f64 {
    0.05
}

fn default_energetic_weights() -> ToneWeights {
    ToneWeights::new(0.6, 0.4)
}

fn default_calm_weights() -> ToneWeights {
    ToneWeights::new(0.25, 0.75)
}

fn default_balanced_weights() -> ToneWeights {
    ToneWeights::new(0.5, 0.5)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            max_combinations: default_max_combinations(),
            max_name_length: default_max_name_length(),
            overlap_bonus: default_overlap_bonus(),
            energetic_weights: default_energetic_weights(),
            calm_weights: default_calm_weights(),
            balanced_weights: default_balanced_weights(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MeimeiError::io(
                format!("Failed to read config file: {}", path.display()),
                e,
            )
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            MeimeiError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            return Err(MeimeiError::config_field(
                "max_candidates must be at least 1",
                "max_candidates",
            ));
        }
        if self.max_combinations == 0 {
            return Err(MeimeiError::config_field(
                "max_combinations must be at least 1",
                "max_combinations",
            ));
        }
        if self.max_name_length == 0 {
            return Err(MeimeiError::config_field(
                "max_name_length must be at least 1",
                "max_name_length",
            ));
        }
        if !(0.0..=1.0).contains(&self.overlap_bonus) {
            return Err(MeimeiError::config_field(
                format!("overlap_bonus {} outside [0, 1]", self.overlap_bonus),
                "overlap_bonus",
            ));
        }

        self.energetic_weights.validate("energetic_weights")?;
        self.calm_weights.validate("calm_weights")?;
        self.balanced_weights.validate("balanced_weights")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_name_length, 4);
    }

    #[test]
    fn test_zero_caps_are_rejected() {
        let config = GeneratorConfig {
            max_combinations: 0,
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MeimeiError::Config { .. }));
    }

    #[test]
    fn test_out_of_range_overlap_bonus_is_rejected() {
        let config = GeneratorConfig {
            overlap_bonus: 1.5,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tone_weights_are_rejected() {
        let config = GeneratorConfig {
            balanced_weights: ToneWeights::new(0.0, 0.0),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tone_weight_blend() {
        let weights = ToneWeights::new(0.6, 0.4);
        assert_relative_eq!(weights.blend(1.0, 0.0), 0.4);
        assert_relative_eq!(weights.blend(0.0, 1.0), 0.6);
        assert_relative_eq!(weights.blend(0.5, 0.5), 0.5);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let config = GeneratorConfig {
            max_candidates: 12,
            ..GeneratorConfig::default()
        };
        config.to_yaml_file(&path).unwrap();

        let loaded = GeneratorConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: GeneratorConfig = serde_yaml::from_str("max_candidates: 8\n").unwrap();
        assert_eq!(config.max_candidates, 8);
        assert_eq!(config.max_combinations, default_max_combinations());
    }
}
