/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulation configuration.
//!
//! The defaults reproduce the warehouse described by the command format:
//! five workers, a 5-minute bundling window, 10 items per trip and 5 minutes
//! per leg of travel. A JSON file may override any subset of the fields.
//!
//! ```json
//! { "workers": ["Ann", "Ben"], "bundle_capacity": 8 }
//! ```

use crate::workers::WorkerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The worker roster is empty.
    #[error("worker roster must not be empty")]
    EmptyRoster,

    /// The same worker name appears twice in the roster.
    #[error("duplicate worker '{0}' in roster")]
    DuplicateWorker(WorkerId),

    /// A numeric setting that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroSetting(&'static str),
}

/// Tunable parameters of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Worker roster, all initially available, acquired in this order.
    pub workers: Vec<WorkerId>,
    /// Minutes after an order during which compatible orders may still join.
    pub bundle_window_minutes: u32,
    /// Maximum total items in one bundle.
    pub bundle_capacity: u32,
    /// Minutes per travel leg (to the first category, between categories, back).
    pub travel_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workers: ["Alice", "Bob", "Carol", "David", "Emily"]
                .into_iter()
                .map(String::from)
                .collect(),
            bundle_window_minutes: 5,
            bundle_capacity: 10,
            travel_minutes: 5,
        }
    }
}

impl SimulationConfig {
    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the worker roster.
    #[must_use]
    pub fn with_workers<I, S>(mut self, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<WorkerId>,
    {
        self.workers = workers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the bundling window.
    #[must_use]
    pub fn with_bundle_window(mut self, minutes: u32) -> Self {
        self.bundle_window_minutes = minutes;
        self
    }

    /// Sets the per-bundle item capacity.
    #[must_use]
    pub fn with_bundle_capacity(mut self, capacity: u32) -> Self {
        self.bundle_capacity = capacity;
        self
    }

    /// Checks the roster and numeric settings.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let mut seen = HashSet::new();
        for worker in &self.workers {
            if !seen.insert(worker.as_str()) {
                return Err(ConfigError::DuplicateWorker(worker.clone()));
            }
        }
        if self.bundle_window_minutes == 0 {
            return Err(ConfigError::ZeroSetting("bundle_window_minutes"));
        }
        if self.bundle_capacity == 0 {
            return Err(ConfigError::ZeroSetting("bundle_capacity"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_roster() {
        let config = SimulationConfig::default();
        assert_eq!(config.workers, vec!["Alice", "Bob", "Carol", "David", "Emily"]);
        assert_eq!(config.bundle_window_minutes, 5);
        assert_eq!(config.bundle_capacity, 10);
        assert_eq!(config.travel_minutes, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "workers": ["Ann", "Ben"], "bundle_capacity": 8 }}"#).unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.workers, vec!["Ann", "Ben"]);
        assert_eq!(config.bundle_capacity, 8);
        assert_eq!(config.bundle_window_minutes, 5);
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = SimulationConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validation_rules() {
        let empty = SimulationConfig::default().with_workers(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyRoster)));

        let dup = SimulationConfig::default().with_workers(["A", "B", "A"]);
        assert!(matches!(dup.validate(), Err(ConfigError::DuplicateWorker(w)) if w == "A"));

        let zero_window = SimulationConfig::default().with_bundle_window(0);
        assert!(matches!(
            zero_window.validate(),
            Err(ConfigError::ZeroSetting("bundle_window_minutes"))
        ));

        let zero_capacity = SimulationConfig::default().with_bundle_capacity(0);
        assert!(matches!(
            zero_capacity.validate(),
            Err(ConfigError::ZeroSetting("bundle_capacity"))
        ));
    }
}
