//! # Salespoint Configuration
//!
//! Configuration for carts and pricing.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     SALESPOINT_CART_MAX_ITEMS=50                                        │
//! │     SALESPOINT_ROUNDING=half_even:2                                     │
//! │                                                                         │
//! │  2. TOML Config File (path supplied by the embedding application)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     100 cart items, euros, monetary rounding                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! max_items = 100
//!
//! [pricing]
//! currency_name = "Euro"
//! currency_symbol = "€"
//! rounding = "monetary"   # monetary | integral | <mode>:<scale>
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CoreResult;
use crate::metric::Metric;
use crate::money::Money;
use crate::quantity::parse_decimal;
use crate::rounding::{RoundingPolicy, MONETARY_ROUNDING};
use crate::validation::{validate_limit, ValidationResult};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Maximum number of distinct items in one cart.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    MAX_CART_ITEMS
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            max_items: default_max_items(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Currency and rounding used when turning text into money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_currency_name")]
    pub currency_name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_rounding")]
    pub rounding: RoundingPolicy,
}

fn default_currency_name() -> String {
    Metric::EURO.name().to_string()
}

fn default_currency_symbol() -> String {
    Metric::EURO.symbol().to_string()
}

fn default_rounding() -> RoundingPolicy {
    MONETARY_ROUNDING
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency_name: default_currency_name(),
            currency_symbol: default_currency_symbol(),
            rounding: default_rounding(),
        }
    }
}

impl PricingSettings {
    /// The configured currency as a metric.
    ///
    /// ## Errors
    /// The currency name must be non-empty and at most 50 characters.
    pub fn currency(&self) -> ValidationResult<Metric> {
        if self.currency_name == Metric::EURO.name() && self.currency_symbol == Metric::EURO.symbol()
        {
            return Ok(Metric::EURO);
        }
        Metric::new(self.currency_name.clone(), self.currency_symbol.clone())
    }

    /// Converts text input (e.g. a submitted price field) into money using
    /// the configured currency and rounding.
    ///
    /// ## Errors
    /// - `CoreError::Parse` if the text is not a decimal number
    /// - `CoreError::Validation` if the configured currency is invalid
    pub fn parse_money(&self, text: &str) -> CoreResult<Money> {
        let amount = parse_decimal(text)?;
        Ok(Money::with_rounding(amount, self.currency()?, self.rounding))
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete salespoint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalespointConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl SalespointConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading salespoint config from file");
                let contents = std::fs::read_to_string(path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load salespoint config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        validate_limit("cart.max_items", self.cart.max_items)?;
        self.pricing.currency()?;
        Ok(())
    }

    /// Applies `SALESPOINT_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SALESPOINT_CART_MAX_ITEMS") {
            match value.parse::<usize>() {
                Ok(max_items) => {
                    debug!(max_items, "Overriding cart limit from environment");
                    self.cart.max_items = max_items;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid SALESPOINT_CART_MAX_ITEMS"),
            }
        }

        if let Some(name) = lookup("SALESPOINT_CURRENCY_NAME") {
            self.pricing.currency_name = name;
        }

        if let Some(symbol) = lookup("SALESPOINT_CURRENCY_SYMBOL") {
            self.pricing.currency_symbol = symbol;
        }

        if let Some(value) = lookup("SALESPOINT_ROUNDING") {
            match value.parse::<RoundingPolicy>() {
                Ok(rounding) => {
                    debug!(%rounding, "Overriding rounding policy from environment");
                    self.pricing.rounding = rounding;
                }
                Err(e) => warn!(value = %value, error = %e, "Ignoring invalid SALESPOINT_ROUNDING"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use crate::error::{CoreError, ValidationError};
    use crate::rounding::{RoundingMode, ROUND_ONE};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SalespointConfig::default();
        assert_eq!(config.cart.max_items, 100);
        assert_eq!(config.pricing.rounding, MONETARY_ROUNDING);
        assert_eq!(config.pricing.currency().unwrap(), Metric::EURO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let config = SalespointConfig::from_toml_str(
            r#"
            [cart]
            max_items = 5

            [pricing]
            currency_name = "Swiss Franc"
            currency_symbol = "CHF"
            rounding = "half_even:2"
            "#,
        )
        .unwrap();

        assert_eq!(config.cart.max_items, 5);
        assert_eq!(config.pricing.currency().unwrap().symbol(), "CHF");
        assert_eq!(
            config.pricing.rounding,
            RoundingPolicy::custom(2, RoundingMode::HalfEven).unwrap()
        );
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = SalespointConfig::from_toml_str("[cart]\nmax_items = 7\n").unwrap();
        assert_eq!(config.cart.max_items, 7);
        assert_eq!(config.pricing, PricingSettings::default());

        let empty = SalespointConfig::from_toml_str("").unwrap();
        assert_eq!(empty, SalespointConfig::default());
    }

    #[test]
    fn test_toml_errors() {
        assert!(matches!(
            SalespointConfig::from_toml_str("[pricing]\nrounding = \"wobbly\"\n"),
            Err(CoreError::ConfigLoadFailed(_))
        ));
        assert!(SalespointConfig::from_toml_str("cart = 3").is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = SalespointConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("rounding = \"monetary\""));
        assert_eq!(SalespointConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation() {
        let mut config = SalespointConfig::default();
        config.cart.max_items = 0;
        assert!(matches!(config.validate(), Err(CoreError::Validation(_))));

        config.cart.max_items = 1;
        config.pricing.currency_name = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = SalespointConfig::default();
        config.apply_overrides(lookup(&[
            ("SALESPOINT_CART_MAX_ITEMS", "12"),
            ("SALESPOINT_CURRENCY_NAME", "Pound"),
            ("SALESPOINT_CURRENCY_SYMBOL", "£"),
            ("SALESPOINT_ROUNDING", "integral"),
        ]));

        assert_eq!(config.cart.max_items, 12);
        assert_eq!(config.pricing.currency().unwrap().name(), "Pound");
        assert_eq!(config.pricing.rounding, ROUND_ONE);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = SalespointConfig::default();
        config.apply_overrides(lookup(&[
            ("SALESPOINT_CART_MAX_ITEMS", "lots"),
            ("SALESPOINT_ROUNDING", "sideways:1"),
        ]));
        assert_eq!(config, SalespointConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = SalespointConfig::load_or_default(Some(Path::new(
            "/nonexistent/salespoint/config.toml",
        )));
        assert!(config.cart.max_items > 0);
    }

    #[test]
    fn test_parse_money() {
        let pricing = PricingSettings {
            rounding: RoundingPolicy::custom(2, RoundingMode::HalfUp).unwrap(),
            ..PricingSettings::default()
        };
        let money = pricing.parse_money("19.995").unwrap();
        assert_eq!(money.amount(), Decimal::new(2000, 2));
        assert_eq!(money.to_string(), "20.00€");

        assert!(matches!(
            pricing.parse_money("abc"),
            Err(CoreError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_currency_is_reported() {
        let pricing = PricingSettings {
            currency_name: "x".repeat(51),
            currency_symbol: "X".to_string(),
            ..PricingSettings::default()
        };
        assert!(matches!(
            pricing.currency(),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        assert!(matches!(
            pricing.parse_money("1"),
            Err(CoreError::Validation(_))
        ));

        let config = SalespointConfig {
            pricing,
            ..SalespointConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
