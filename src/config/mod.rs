//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BUDGET_INTAKE` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use budget_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod intake;
mod logging;

pub use ai::{AiConfig, AiProvider};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use logging::{Environment, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and passed down explicitly.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Generative model settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Intent detection and extraction settings
    #[serde(default)]
    pub intake: IntakeConfig,

    /// PostgreSQL storage; in-memory storage when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BUDGET_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `BUDGET_INTAKE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `BUDGET_INTAKE__DATABASE__URL=...` -> `database.url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("BUDGET_INTAKE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.intake.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        Ok(())
    }

    /// Load then validate.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "BUDGET_INTAKE__AI__OPENAI_API_KEY",
        "BUDGET_INTAKE__AI__MODEL",
        "BUDGET_INTAKE__AI__MAX_ATTEMPTS",
        "BUDGET_INTAKE__INTAKE__GENERATION_MESSAGE_THRESHOLD",
        "BUDGET_INTAKE__DATABASE__URL",
        "BUDGET_INTAKE__LOGGING__ENVIRONMENT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("BUDGET_INTAKE__AI__OPENAI_API_KEY", "sk-test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_openai());
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.intake.generation_message_threshold, 6);
        assert!(config.database.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("BUDGET_INTAKE__AI__OPENAI_API_KEY", "sk-test");
        env::set_var("BUDGET_INTAKE__AI__MODEL", "gpt-4o");
        env::set_var("BUDGET_INTAKE__AI__MAX_ATTEMPTS", "5");
        env::set_var("BUDGET_INTAKE__INTAKE__GENERATION_MESSAGE_THRESHOLD", "8");
        env::set_var("BUDGET_INTAKE__DATABASE__URL", "postgres://localhost/intake");
        env::set_var("BUDGET_INTAKE__LOGGING__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.ai.max_attempts, 5);
        assert_eq!(config.intake.generation_message_threshold, 8);
        assert_eq!(
            config.database.as_ref().map(|d| d.url.as_str()),
            Some("postgres://localhost/intake")
        );
        assert!(config.logging.is_production());
    }

    #[test]
    fn test_validate_reports_missing_key() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"))
        );
    }
}
