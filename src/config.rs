//! Application configuration

use std::str::FromStr;

use anyhow::{bail, Context};
use rust_decimal::Decimal;

use crate::pricing::DEFAULT_TAX_RATE;

/// Server and pricing settings loaded from environment variables.
///
/// | Env Var        | Default                  |
/// |----------------|--------------------------|
/// | `HOST`         | `0.0.0.0`                |
/// | `PORT`         | `3000`                   |
/// | `TAX_RATE`     | `0.10`                   |
/// | `CURRENCY`     | `USD`                    |
/// | `CORS_ORIGINS` | `http://localhost:5173`  |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Fraction applied to booking subtotals
    pub tax_rate: Decimal,
    pub currency: String,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            tax_rate: DEFAULT_TAX_RATE,
            currency: "USD".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let tax_rate = parse_var(&lookup, "TAX_RATE", defaults.tax_rate)?;
        if tax_rate < Decimal::ZERO {
            bail!("TAX_RATE cannot be negative");
        }
        let currency = lookup("CURRENCY").unwrap_or(defaults.currency);
        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            host,
            port,
            tax_rate,
            currency,
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be valid, got '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.tax_rate, dec!(0.10));
        assert_eq!(config.currency, "USD");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("TAX_RATE", "0.0725"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tax_rate, dec!(0.0725));
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("TAX_RATE", "-0.1")]).is_err());
        assert!(load(&[("PORT", "70000")]).is_err());
    }
}
