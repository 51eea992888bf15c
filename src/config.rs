//! Environment configuration

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub currency_symbol: String,
    pub design_fee: Decimal,
    /// Per-layer timeout for booking history lookups
    pub bogof_lookup_timeout: Duration,
    /// Max prior bookings fetched per soft-warning layer
    pub bogof_warning_limit: i64,
    pub catalog_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine in production
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or_else(|| "£".to_string()),
            design_fee: parse_or(&lookup, "DESIGN_FEE", dec!(75.00))?,
            bogof_lookup_timeout: Duration::from_millis(non_zero_or(
                &lookup,
                "BOGOF_LOOKUP_TIMEOUT_MS",
                2000,
            )?),
            bogof_warning_limit: parse_or(&lookup, "BOGOF_WARNING_LIMIT", 10)?,
            catalog_ttl: Duration::from_secs(parse_or(&lookup, "CATALOG_TTL_SECS", 600)?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// A zero lookup timeout would fail every BOGOF check open.
fn non_zero_or<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(lookup, name, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/ads")]).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.design_fee, dec!(75));
        assert_eq!(config.bogof_lookup_timeout, Duration::from_millis(2000));
        assert_eq!(config.bogof_warning_limit, 10);
        assert_eq!(config.catalog_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/ads"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DESIGN_FEE", "99.50"),
            ("BOGOF_LOOKUP_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.design_fee, dec!(99.50));
        assert_eq!(config.bogof_lookup_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_invalid_value() {
        let err = config(&[
            ("DATABASE_URL", "postgres://localhost/ads"),
            ("DESIGN_FEE", "lots"),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "DESIGN_FEE has an invalid value 'lots'");
    }

    #[test]
    fn test_zero_lookup_timeout_is_rejected() {
        let err = config(&[
            ("DATABASE_URL", "postgres://localhost/ads"),
            ("BOGOF_LOOKUP_TIMEOUT_MS", "0"),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "BOGOF_LOOKUP_TIMEOUT_MS",
                ..
            }
        ));
    }
}
