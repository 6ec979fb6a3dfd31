//! # CLI Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`SHOPKEEP_*`)
//! 3. Defaults (this file)
//!
//! The low-stock threshold is not configurable; it is a domain constant in
//! `shopkeep-core`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shopkeep_store::{StoreConfig, DEFAULT_DATA_DIR};
use thiserror::Error;

/// Data directory override.
pub const ENV_DATA_DIR: &str = "SHOPKEEP_DATA_DIR";

/// Currency suffix override.
pub const ENV_CURRENCY_SUFFIX: &str = "SHOPKEEP_CURRENCY_SUFFIX";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but unusable.
    ///
    /// ## When This Occurs
    /// - `SHOPKEEP_DATA_DIR` is set to an empty or blank string
    /// - A variable holds bytes that are not valid UTF-8
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding `items.json`.
    /// Default: `data`
    pub data_dir: PathBuf,

    /// Text appended to every rendered amount.
    /// Default: "원"
    pub currency_suffix: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            currency_suffix: "원".to_string(),
        }
    }
}

impl CliConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `lookup` follows the `std::env::var` contract, so tests can feed a
    /// map instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let mut config = CliConfig::default();

        if let Some(dir) = read_var(&lookup, ENV_DATA_DIR)? {
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue(ENV_DATA_DIR.to_string()));
            }
            config.data_dir = PathBuf::from(dir);
        }

        // An empty suffix is allowed: amounts render as bare numbers.
        if let Some(suffix) = read_var(&lookup, ENV_CURRENCY_SUFFIX)? {
            config.currency_suffix = suffix;
        }

        Ok(config)
    }

    /// Applies a `--data-dir` flag on top of the environment.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Store configuration for the resolved data directory.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir)
    }

    /// Formats an amount with thousands separators, no decimals and the
    /// configured suffix.
    ///
    /// ## Example
    /// ```rust
    /// use shopkeep_cli::config::CliConfig;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_money(1_000_000.0), "1,000,000원");
    /// ```
    pub fn format_money(&self, amount: f64) -> String {
        format!("{}{}", group_thousands(amount), self.currency_suffix)
    }
}

fn read_var<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Rounds to a whole number and inserts `,` every three digits.
pub fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.store_config().path(), PathBuf::from("data/items.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/srv/shop"),
            (ENV_CURRENCY_SUFFIX, " KRW"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/shop"));
        assert_eq!(config.format_money(1500.0), "1,500 KRW");
    }

    #[test]
    fn test_blank_data_dir_is_invalid() {
        let err = CliConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue(ENV_DATA_DIR.to_string()));
    }

    #[test]
    fn test_flag_beats_env() {
        let config = CliConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "/srv/shop")]))
            .unwrap()
            .with_data_dir(Some(PathBuf::from("./local")));
        assert_eq!(config.data_dir, PathBuf::from("./local"));
    }

    #[test]
    fn test_format_money() {
        let config = CliConfig::default();
        assert_eq!(config.format_money(0.0), "0원");
        assert_eq!(config.format_money(999.0), "999원");
        assert_eq!(config.format_money(1000.0), "1,000원");
        assert_eq!(config.format_money(6_000_000.0), "6,000,000원");
        assert_eq!(config.format_money(20_000.5), "20,001원");
    }

    #[test]
    fn test_group_thousands_negative() {
        assert_eq!(group_thousands(-1234567.0), "-1,234,567");
        assert_eq!(group_thousands(-0.2), "0");
    }
}
