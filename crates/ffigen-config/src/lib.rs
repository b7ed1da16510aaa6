//! # ffigen-config
//!
//! Layered configuration loading for ffigen using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FFIGEN_*` prefix, `__` as separator)
//! 2. Project-level `.ffigen/config.toml`
//! 3. User-level `~/.config/ffigen/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FFIGEN_CLANG__LANGUAGE` -> `clang.language`,
//! `FFIGEN_OUTPUT__PRETTY` -> `output.pretty`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ffigen_config::FfigenConfig;
//!
//! let config = FfigenConfig::load_with_dotenv().expect("config");
//! if config.clang.prelude {
//!     println!("parsing through the scratch unit as {}", config.clang.language);
//! }
//! ```

mod clang;
mod error;
mod output;

pub use clang::ClangConfig;
pub use error::ConfigError;
pub use output::OutputConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FFIGEN_";

/// Project-local configuration file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".ffigen/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FfigenConfig {
    #[serde(default)]
    pub clang: ClangConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl FfigenConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`FfigenConfig::load_with_dotenv`] for
    /// `.env` support.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` if a source cannot be read or has the
    /// wrong shape, and `ConfigError::InvalidValue` if a value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file from the working
    /// directory or one of its parents, if there is one.
    ///
    /// # Errors
    /// Returns `ConfigError::Dotenv` if a `.env` file exists but cannot be
    /// read or parsed, otherwise the same as [`FfigenConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(error) if error.not_found() => {}
            Err(error) => return Err(ConfigError::Dotenv(error)),
        }
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    ///
    /// # Errors
    /// Same as [`FfigenConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every section for unusable values.
    ///
    /// # Errors
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clang.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ffigen").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FfigenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clang.language, "c");
        assert!(config.output.pretty);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = FfigenConfig::from_figment(&FfigenConfig::figment())
                .expect("should extract defaults");
            assert!(config.clang.prelude);
            assert!(config.output.diagnostics);
            Ok(())
        });
    }
}
