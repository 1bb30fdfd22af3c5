//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! for the planner and the robot model it plans for.
//!
//! # Usage
//!
//! ```rust,no_run
//! use traj_common::config::{ConfigLoader, SharedConfig, ConfigError};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct MyAppConfig {
//!     shared: SharedConfig,
//!     rate: f64,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MyAppConfig::load(Path::new("config.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::{PLANNER_CONFIG_FILE, ROBOT_CONFIG_FILE};
use crate::planner::{PlannerConfig, PlannerFileConfig};
use crate::robot::{RobotFileConfig, RobotModelConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Common configuration fields shared by every application in the workspace.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "traj-planner"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            service_name: "traj-planner".to_string(),
        }
    }
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for every `serde::de::DeserializeOwned` type.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation so any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Fully loaded and validated configuration directory.
#[derive(Debug, Clone)]
pub struct FullConfig {
    /// Shared application settings from `planner.toml`.
    pub shared: SharedConfig,
    /// Planner identity and sampling rate.
    pub planner: PlannerConfig,
    /// Robot model the planner plans for.
    pub robot: RobotModelConfig,
}

/// Load `planner.toml` and `robot.toml` from `dir` and validate both.
///
/// # Errors
///
/// - `ConfigError::FileNotFound` if either file is missing
/// - `ConfigError::ParseError` on malformed TOML or unknown fields
/// - `ConfigError::ValidationError` if either section fails validation
pub fn load_config_dir(dir: &Path) -> Result<FullConfig, ConfigError> {
    let planner_path = dir.join(PLANNER_CONFIG_FILE);
    let robot_path = dir.join(ROBOT_CONFIG_FILE);

    debug!("Loading planner config from {}", planner_path.display());
    let planner_file = PlannerFileConfig::load(&planner_path)?;
    debug!("Loading robot config from {}", robot_path.display());
    let robot_file = RobotFileConfig::load(&robot_path)?;

    planner_file.shared.validate()?;
    planner_file.planner.validate()?;
    robot_file.robot.validate()?;

    Ok(FullConfig {
        shared: planner_file.shared,
        planner: planner_file.planner,
        robot: robot_file.robot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_serialization() {
        #[derive(Serialize)]
        struct TestWrapper {
            level: LogLevel,
        }

        let wrapper = TestWrapper {
            level: LogLevel::Trace,
        };
        assert!(toml::to_string(&wrapper).unwrap().contains("trace"));

        let wrapper = TestWrapper {
            level: LogLevel::Warn,
        };
        assert!(toml::to_string(&wrapper).unwrap().contains("warn"));
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        assert_eq!(
            toml::from_str::<TestWrapper>("level = \"debug\"")
                .unwrap()
                .level,
            LogLevel::Debug
        );
        assert_eq!(
            toml::from_str::<TestWrapper>("level = \"error\"")
                .unwrap()
                .level,
            LogLevel::Error
        );
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::Trace.as_directive(), "trace");
        assert_eq!(LogLevel::Info.as_directive(), "info");
        assert_eq!(LogLevel::Error.as_directive(), "error");
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_config_loader_file_not_found() {
        #[allow(dead_code)]
        #[derive(Debug, Deserialize)]
        struct TestConfig {
            value: String,
        }

        let result = TestConfig::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        #[allow(dead_code)]
        #[derive(Debug, Deserialize)]
        struct TestConfig {
            value: String,
        }

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = TestConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_loader_success() {
        #[derive(Debug, Deserialize)]
        struct TestConfig {
            shared: SharedConfig,
            rate: f64,
        }

        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"rate = 250.0

[shared]
log_level = "debug"
service_name = "test-service"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = TestConfig::load(file.path()).unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Debug);
        assert_eq!(config.shared.service_name, "test-service");
        assert_eq!(config.rate, 250.0);
    }
}
