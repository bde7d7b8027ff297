//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// `development` exposes internal error text in error responses.
    pub environment: String,
    /// When unset, trips are kept in memory for the life of the process.
    pub database_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub generation_model: String,
    pub generation_temperature: f32,
    pub generation_max_tokens: u32,
    pub generation_timeout: Duration,
    pub generation_transport_retries: u32,
    pub google_maps_api_key: Option<String>,
    /// Resolve unauthenticated callers to `anonymous_user_id` instead of rejecting them.
    pub allow_anonymous: bool,
    pub anonymous_user_id: String,
    pub cors_allowed_origin: String,
    pub budget_tolerance: f64,
    pub currency: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address = parse_var::<SocketAddr>("BIND_ADDRESS", "0.0.0.0:8787")?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string());
        let database_url = optional_var("DATABASE_URL");

        // --- Generation Settings ---
        let openai_api_key = optional_var("OPENAI_API_KEY");
        let openai_base_url = optional_var("OPENAI_BASE_URL");
        let generation_model =
            std::env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let generation_temperature = parse_var::<f32>("GENERATION_TEMPERATURE", "0.4")?;
        let generation_max_tokens = parse_var::<u32>("GENERATION_MAX_TOKENS", "8000")?;
        let generation_timeout =
            Duration::from_secs(parse_var::<u64>("GENERATION_TIMEOUT_SECS", "60")?);
        let generation_transport_retries = parse_var::<u32>("GENERATION_TRANSPORT_RETRIES", "0")?;

        // --- Places, Identity and HTTP Settings ---
        let google_maps_api_key = optional_var("GOOGLE_MAPS_API_KEY");
        let allow_anonymous = parse_var::<bool>("ALLOW_ANONYMOUS", "true")?;
        let anonymous_user_id =
            std::env::var("ANONYMOUS_USER_ID").unwrap_or_else(|_| "dev-user".to_string());
        let cors_allowed_origin =
            std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string());

        // --- Plan Settings ---
        let budget_tolerance = parse_var::<f64>("BUDGET_TOLERANCE", "0.25")?;
        if !(0.0..=1.0).contains(&budget_tolerance) {
            return Err(ConfigError::InvalidValue(
                "BUDGET_TOLERANCE".to_string(),
                "must be a fraction between 0 and 1".to_string(),
            ));
        }
        let currency = std::env::var("CURRENCY").unwrap_or_else(|_| "INR".to_string());

        Ok(Self {
            bind_address,
            log_level,
            environment,
            database_url,
            openai_api_key,
            openai_base_url,
            generation_model,
            generation_temperature,
            generation_max_tokens,
            generation_timeout,
            generation_transport_retries,
            google_maps_api_key,
            allow_anonymous,
            anonymous_user_id,
            cors_allowed_origin,
            budget_tolerance,
            currency,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_the_default() {
        let value = parse_var::<u32>("ITINERARY_TEST_UNSET_VARIABLE", "8000").unwrap();
        assert_eq!(value, 8000);
    }

    #[test]
    fn parse_var_reports_the_variable_name() {
        let err = parse_var::<u32>("ITINERARY_TEST_UNSET_VARIABLE", "lots").unwrap_err();
        assert!(err.to_string().contains("ITINERARY_TEST_UNSET_VARIABLE"));
    }
}
