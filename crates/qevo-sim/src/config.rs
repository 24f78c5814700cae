//! Trotter factory configuration.
//!
//! Supports loading configuration from YAML or JSON text and from files
//! (format chosen by extension, YAML by default).
//!
//! ```yaml
//! time_step: 0.1      # or n_trotter: 10, never both
//! trotter_order: 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decomposition::validate_order;
use crate::error::{SimError, SimResult};
use crate::policy::StepPolicy;

/// Settings shared by the Trotter factory facades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrotterConfig {
    /// Duration of one Trotter slice (fixed-interval policy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_step: Option<f64>,

    /// Total number of Trotter slices (fixed-step policy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_trotter: Option<usize>,

    /// Product-formula order: 1 or a positive even number.
    #[serde(default = "default_trotter_order")]
    pub trotter_order: usize,
}

fn default_trotter_order() -> usize {
    1
}

impl Default for TrotterConfig {
    fn default() -> Self {
        Self {
            time_step: None,
            n_trotter: Some(1),
            trotter_order: default_trotter_order(),
        }
    }
}

impl TrotterConfig {
    /// Fixed-step configuration.
    pub fn fixed_step(n_trotter: usize, trotter_order: usize) -> Self {
        Self {
            time_step: None,
            n_trotter: Some(n_trotter),
            trotter_order,
        }
    }

    /// Fixed-interval configuration.
    pub fn fixed_interval(time_step: f64, trotter_order: usize) -> Self {
        Self {
            time_step: Some(time_step),
            n_trotter: None,
            trotter_order,
        }
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> SimResult<Self> {
        let config: TrotterConfig =
            serde_yaml_ng::from_str(text).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> SimResult<Self> {
        let config: TrotterConfig =
            serde_json::from_str(text).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> SimResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| SimError::ConfigParse(e.to_string()))
    }

    /// Validate the order and resolve the step policy.
    pub fn validate(&self) -> SimResult<StepPolicy> {
        validate_order(self.trotter_order)?;
        StepPolicy::from_options(self.time_step, self.n_trotter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrotterConfig::default();
        assert_eq!(
            config.validate().unwrap(),
            StepPolicy::FixedStep { n_trotter: 1 }
        );
    }

    #[test]
    fn test_yaml_fixed_interval() {
        let config = TrotterConfig::from_yaml_str("time_step: 0.1\ntrotter_order: 2\n").unwrap();
        assert_eq!(config, TrotterConfig::fixed_interval(0.1, 2));
        assert_eq!(
            config.validate().unwrap(),
            StepPolicy::FixedInterval { time_step: 0.1 }
        );
    }

    #[test]
    fn test_json_fixed_step_default_order() {
        let config = TrotterConfig::from_json_str(r#"{"n_trotter": 4}"#).unwrap();
        assert_eq!(config.trotter_order, 1);
        assert_eq!(config.n_trotter, Some(4));
    }

    #[test]
    fn test_conflicting_policy_rejected() {
        assert!(matches!(
            TrotterConfig::from_yaml_str("time_step: 0.1\nn_trotter: 3\n"),
            Err(SimError::StepPolicyConflict { .. })
        ));
        assert!(matches!(
            TrotterConfig::from_yaml_str("trotter_order: 2\n"),
            Err(SimError::StepPolicyConflict { .. })
        ));
    }

    #[test]
    fn test_invalid_order_rejected() {
        assert!(matches!(
            TrotterConfig::from_yaml_str("n_trotter: 3\ntrotter_order: 3\n"),
            Err(SimError::UnsupportedTrotterOrder(3))
        ));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        assert!(matches!(
            TrotterConfig::from_yaml_str("n_trotter: 3\nsteps: 4\n"),
            Err(SimError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("trotter.json");
        std::fs::write(&json, r#"{"time_step": 0.05, "trotter_order": 4}"#).unwrap();
        assert_eq!(
            TrotterConfig::from_file(&json).unwrap(),
            TrotterConfig::fixed_interval(0.05, 4)
        );

        for name in ["trotter.yaml", "trotter.yml", "trotter.conf"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "n_trotter: 6\ntrotter_order: 2\n").unwrap();
            assert_eq!(
                TrotterConfig::from_file(&path).unwrap(),
                TrotterConfig::fixed_step(6, 2)
            );
        }

        // YAML text behind a .json extension goes to the JSON parser.
        let mislabelled = dir.path().join("yaml.json");
        std::fs::write(&mislabelled, "n_trotter: 6\n").unwrap();
        assert!(matches!(
            TrotterConfig::from_file(&mislabelled),
            Err(SimError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TrotterConfig::from_file(dir.path().join("absent.yaml")),
            Err(SimError::Io(_))
        ));
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "time_step: -0.1\n").unwrap();
        assert!(matches!(
            TrotterConfig::from_file(&path),
            Err(SimError::InvalidTimeStep(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TrotterConfig::fixed_step(8, 4);
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(TrotterConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
