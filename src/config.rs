// Configuration — simulation settings from an optional JSON file, overridden
// by command-line flags.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::constants::DEFAULT_VALUE_RANGE;
use crate::error::{Error, Result};
use crate::types::{ReadingPolicy, ToxicityValue};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub max_steps: usize,
    pub max_samples: usize,
    /// `None` seeds from the wall clock.
    pub seed: Option<u64>,
    pub policy: ReadingPolicy,
    /// Uniform sampling range for readings not drawn from the fixed sample set.
    pub value_range: (ToxicityValue, ToxicityValue),
    /// Probability of drawing from the fixed sample set instead of the range.
    pub sample_bias: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 20,
            max_samples: 10_000,
            seed: None,
            policy: ReadingPolicy::Passthrough,
            value_range: DEFAULT_VALUE_RANGE,
            sample_bias: 0.5,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(?config, path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.value_range;
        if self.max_samples == 0 {
            return Err(Error::InvalidConfig("max_samples must be positive".into()));
        }
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(Error::InvalidConfig(format!(
                "value_range must be finite with lo < hi, got ({}, {})",
                lo, hi
            )));
        }
        if !(0.0..=1.0).contains(&self.sample_bias) {
            return Err(Error::InvalidConfig(format!(
                "sample_bias must be within [0, 1], got {}",
                self.sample_bias
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"{ "max_steps": 5, "policy": "clamp" }"#);
        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.max_steps, 5);
        assert_eq!(config.policy, ReadingPolicy::Clamp);
        assert_eq!(config.max_samples, SimulationConfig::default().max_samples);
        assert_eq!(config.value_range, DEFAULT_VALUE_RANGE);
    }

    #[test]
    fn rejects_inverted_range() {
        let file = write_config(r#"{ "value_range": [50.0, 10.0] }"#);
        let err = SimulationConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let file = write_config(r#"{ "max_stepz": 5 }"#);
        let err = SimulationConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimulationConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }

    #[test]
    fn default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }
}
