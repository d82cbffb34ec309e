//! Monetary amounts as issued by the commerce platform.
//!
//! Amounts are kept as the decimal strings Shopify returns so that no
//! precision is lost and no currency math happens locally. [`Money::decimal_amount`]
//! parses the string on demand for callers that need to check it.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when checking a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is not a decimal number.
    #[error("amount `{0}` is not a decimal number")]
    NotDecimal(String),
    /// The amount is below zero.
    #[error("amount `{0}` is negative")]
    Negative(String),
    /// The currency code is not three ASCII letters.
    #[error("currency code `{0}` is not an ISO 4217 code")]
    InvalidCurrency(String),
}

/// Monetary amount with currency code.
///
/// ## Constraints
///
/// - `amount` is a non-negative decimal string (e.g. `"29.99"`)
/// - `currency_code` is a 3-letter ISO 4217 code, passed through unmodified
///
/// ```
/// use storefront_api_core::Money;
///
/// let price = Money::new("29.99", "USD");
/// assert!(price.validate().is_ok());
/// assert!(Money::new("-1.00", "USD").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parse the amount as a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NotDecimal`] if the string does not parse and
    /// [`MoneyError::Negative`] if it parses to a value below zero.
    pub fn decimal_amount(&self) -> Result<Decimal, MoneyError> {
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| MoneyError::NotDecimal(self.amount.clone()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(self.amount.clone()));
        }
        Ok(amount)
    }

    /// Check both the amount and the currency code.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoneyError`] found.
    pub fn validate(&self) -> Result<(), MoneyError> {
        self.decimal_amount()?;
        let code = self.currency_code.as_str();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrency(self.currency_code.clone()));
        }
        Ok(())
    }
}
