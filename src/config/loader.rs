//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading split policies
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{SplitError, SplitResult};

use super::types::SplitPolicy;

/// File name of the policy inside a configuration directory.
pub const POLICY_FILE: &str = "policy.yaml";

/// Loads and provides access to a split policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # rounding, reconciliation, allocation, date format
/// ```
///
/// # Example
///
/// ```no_run
/// use bill_splitter::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Person unit: {}", loader.policy().rounding.person_unit);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: SplitPolicy,
}

impl ConfigLoader {
    /// Loads the policy from `policy.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The policy file is missing
    /// - The file contains invalid YAML or unknown enum values
    /// - A field fails [`SplitPolicy::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> SplitResult<Self> {
        Self::from_file(path.as_ref().join(POLICY_FILE))
    }

    /// Loads the policy from a single YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SplitResult<Self> {
        let policy = Self::load_yaml::<SplitPolicy>(path.as_ref())?;
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Parses a policy from a YAML string.
    pub fn from_yaml_str(content: &str) -> SplitResult<Self> {
        let policy: SplitPolicy =
            serde_yaml::from_str(content).map_err(|e| SplitError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> SplitResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SplitError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| SplitError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> SplitPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResidualStrategy, RoundingMode, SharedDivisor};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &SplitPolicy::default());
    }

    #[test]
    fn test_default_config_values() {
        let policy = ConfigLoader::load(config_path()).unwrap().into_policy();

        assert_eq!(policy.rounding.person_unit, dec("0.1"));
        assert_eq!(policy.rounding.mode, RoundingMode::HalfUp);
        assert_eq!(
            policy.reconciliation.strategy,
            ResidualStrategy::FirstParticipant
        );
        assert_eq!(policy.allocation.shared_divisor, SharedDivisor::Participants);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(SplitError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_yaml_str_overrides() {
        let loader = ConfigLoader::from_yaml_str(
            "allocation:\n  shared_divisor: participants_plus_one\n",
        )
        .unwrap();

        assert_eq!(
            loader.policy().allocation.shared_divisor,
            SharedDivisor::ParticipantsPlusOne
        );
    }

    #[test]
    fn test_from_yaml_str_unknown_variant_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("rounding:\n  mode: truncate\n");

        match result {
            Err(SplitError::ConfigParseError { path, .. }) => assert_eq!(path, "<inline>"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_str_runs_validation() {
        let result = ConfigLoader::from_yaml_str("rounding:\n  person_unit: \"0\"\n");

        assert!(matches!(result, Err(SplitError::InvalidPolicy { .. })));
    }
}
