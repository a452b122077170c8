//! Ledger configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::PartyResult;

/// The amount below which a balance or remaining transfer counts as zero
pub fn default_epsilon() -> BigDecimal {
    BigDecimal::new(1i64.into(), 2)
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_display_scale() -> i64 {
    2
}

/// Tolerances and display settings shared by the ledger, the validators
/// and the balance summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// "Effectively zero" threshold, in currency units
    #[serde(default = "default_epsilon", with = "bigdecimal::serde::json_num")]
    pub epsilon: BigDecimal,
    /// Prefix used when rendering amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Decimal places used when rendering amounts
    #[serde(default = "default_display_scale")]
    pub display_scale: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            currency_symbol: default_currency_symbol(),
            display_scale: default_display_scale(),
        }
    }
}

impl LedgerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> PartyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the zero threshold
    pub fn with_epsilon(mut self, epsilon: BigDecimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Override the currency symbol
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Render an amount with the configured symbol and scale
    pub fn format_amount(&self, amount: &BigDecimal) -> String {
        let rounded = amount
            .round(self.display_scale)
            .with_scale(self.display_scale);
        format!("{}{}", self.currency_symbol, rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.epsilon, BigDecimal::from_str("0.01").unwrap());
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.display_scale, 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.epsilon, default_epsilon());
        assert_eq!(config.display_scale, 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(LedgerConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_format_amount() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_amount(&BigDecimal::from(50)), "₹50.00");
        assert_eq!(
            config.format_amount(&BigDecimal::from_str("33.333333").unwrap()),
            "₹33.33"
        );
    }
}
