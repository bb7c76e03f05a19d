//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("Model timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("At least one model attempt is required")]
    InvalidAttempts,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Generation message threshold must be at least 1")]
    InvalidMessageThreshold,

    #[error("Rounding interval must be a positive number")]
    InvalidRoundingInterval,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,
}
