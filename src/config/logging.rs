//! Logging configuration

use serde::Deserialize;

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Deployment environment; production logs JSON
    #[serde(default)]
    pub environment: Environment,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl LoggingConfig {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            environment: Environment::default(),
        }
    }
}

fn default_level() -> String {
    "info,budget_intake=debug,sqlx=warn".to_string()
}
