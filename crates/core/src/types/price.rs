//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when converting a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount has a fraction smaller than one cent.
    #[error("amount {0} is not a whole number of cents")]
    FractionalCents(Decimal),
    /// The amount does not fit in an i64 number of cents.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
    /// The amount is negative.
    #[error("amount {0} is negative")]
    Negative(Decimal),
}

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit (dollars, not cents)
/// with decimal arithmetic. Conversion to and from integer cents is provided
/// for payment-processor APIs, which charge in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// Convert the price to an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, has sub-cent precision,
    /// or does not fit in an `i64`.
    pub fn to_cents(&self) -> Result<i64, PriceError> {
        if self.amount.is_sign_negative() {
            return Err(PriceError::Negative(self.amount));
        }
        let cents = self
            .amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::OutOfRange(self.amount))?;
        if cents.normalize().scale() > 0 {
            return Err(PriceError::FractionalCents(self.amount));
        }
        cents
            .try_into()
            .map_err(|_| PriceError::OutOfRange(self.amount))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The currency symbol used for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// The lowercase code expected by payment-processor APIs.
    #[must_use]
    pub const fn as_lowercase(self) -> &'static str {
        match self {
            Self::USD => "usd",
            Self::EUR => "eur",
            Self::GBP => "gbp",
            Self::CAD => "cad",
            Self::AUD => "aud",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::USD => write!(f, "USD"),
            Self::EUR => write!(f, "EUR"),
            Self::GBP => write!(f, "GBP"),
            Self::CAD => write!(f, "CAD"),
            Self::AUD => write!(f, "AUD"),
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}
