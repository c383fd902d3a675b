use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-call mutation probabilities.
///
/// Only `new_neuron` and `new_synapse` drive structural mutation here. The
/// weight, bias and threshold rates are carried for whoever randomises the
/// parameters of the built network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutationRates {
    /// Probability of splitting a synapse with a new hidden neuron.
    pub new_neuron: f64,
    /// Probability of connecting two existing neurons.
    pub new_synapse: f64,
    pub random_weight: f64,
    pub random_bias: f64,
    pub random_threshold: f64,
}

impl MutationRates {
    pub const DISABLED: Self = Self {
        new_neuron: 0.0,
        new_synapse: 0.0,
        random_weight: 0.0,
        random_bias: 0.0,
        random_threshold: 0.0,
    };

    pub const SLOW: Self = Self {
        new_neuron: 0.1,
        new_synapse: 0.1,
        random_weight: 0.3,
        random_bias: 0.1,
        random_threshold: 0.1,
    };

    pub const MEDIUM: Self = Self {
        new_neuron: 0.3,
        new_synapse: 0.3,
        random_weight: 0.3,
        random_bias: 0.3,
        random_threshold: 0.3,
    };

    pub const FAST: Self = Self {
        new_neuron: 0.5,
        new_synapse: 0.5,
        random_weight: 0.5,
        random_bias: 0.5,
        random_threshold: 0.5,
    };

    /// Every rate must be a probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("new_neuron", self.new_neuron),
            ("new_synapse", self.new_synapse),
            ("random_weight", self.random_weight),
            ("random_bias", self.random_bias),
            ("random_threshold", self.random_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate rates from JSON. Missing fields default to 0.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rates: Self = serde_json::from_str(json)?;
        rates.validate()?;
        Ok(rates)
    }
}

impl Default for MutationRates {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Named rate presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPreset {
    Disabled,
    Slow,
    Medium,
    Fast,
}

impl MutationPreset {
    pub fn rates(self) -> MutationRates {
        match self {
            MutationPreset::Disabled => MutationRates::DISABLED,
            MutationPreset::Slow => MutationRates::SLOW,
            MutationPreset::Medium => MutationRates::MEDIUM,
            MutationPreset::Fast => MutationRates::FAST,
        }
    }
}

impl FromStr for MutationPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disabled" => Ok(MutationPreset::Disabled),
            "slow" => Ok(MutationPreset::Slow),
            "medium" => Ok(MutationPreset::Medium),
            "fast" => Ok(MutationPreset::Fast),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for MutationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationPreset::Disabled => "disabled",
            MutationPreset::Slow => "slow",
            MutationPreset::Medium => "medium",
            MutationPreset::Fast => "fast",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in ["disabled", "SLOW", "Medium", "fast"] {
            let preset: MutationPreset = preset.parse().unwrap();
            preset.rates().validate().unwrap();
            assert_eq!(preset.to_string().parse::<MutationPreset>().unwrap(), preset);
        }
        assert_eq!(MutationRates::default(), MutationRates::DISABLED);
        assert!(matches!(
            "turbo".parse::<MutationPreset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn rates_from_json() {
        let rates = MutationRates::from_json(r#"{"new_neuron": 0.25, "new_synapse": 1.0}"#).unwrap();
        assert_eq!(rates.new_neuron, 0.25);
        assert_eq!(rates.new_synapse, 1.0);
        assert_eq!(rates.random_weight, 0.0);

        assert!(matches!(
            MutationRates::from_json(r#"{"new_neuron": 1.5}"#),
            Err(ConfigError::RateOutOfRange {
                field: "new_neuron",
                ..
            })
        ));
        assert!(matches!(
            MutationRates::from_json(r#"{"new_neurons": 0.1}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
