//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are formatted the way the storefront's locale expects them:
//!
//! ```
//! use kiosk_core::{CurrencyCode, Price};
//! use rust_decimal::Decimal;
//!
//! let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::EUR);
//! assert_eq!(price.display(), "1.234,50\u{a0}€");
//!
//! let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::USD);
//! assert_eq!(price.display(), "$1,234.50");
//! ```

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the supported ISO 4217 codes.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
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

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "12,90 €" or "$12.90").
    ///
    /// Amounts are rounded half away from zero to two decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let style = self.currency_code.style();
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let plain = format!("{:.2}", rounded.abs());
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
        let number = format!(
            "{}{}{fraction}",
            group_digits(whole, style.group_separator),
            style.decimal_separator
        );

        let sign = if negative { "-" } else { "" };
        if style.symbol_after {
            format!("{sign}{number}\u{a0}{}", style.symbol)
        } else {
            format!("{sign}{}{number}", style.symbol)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CAD,
    AUD,
}

/// How a currency is written in the storefront's locale.
struct CurrencyStyle {
    symbol: &'static str,
    symbol_after: bool,
    decimal_separator: char,
    group_separator: char,
}

impl CurrencyCode {
    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// The symbol shown next to amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.style().symbol
    }

    const fn style(&self) -> CurrencyStyle {
        match self {
            // de-DE
            Self::EUR => CurrencyStyle {
                symbol: "€",
                symbol_after: true,
                decimal_separator: ',',
                group_separator: '.',
            },
            Self::USD => CurrencyStyle {
                symbol: "$",
                symbol_after: false,
                decimal_separator: '.',
                group_separator: ',',
            },
            Self::GBP => CurrencyStyle {
                symbol: "£",
                symbol_after: false,
                decimal_separator: '.',
                group_separator: ',',
            },
            Self::CAD => CurrencyStyle {
                symbol: "CA$",
                symbol_after: false,
                decimal_separator: '.',
                group_separator: ',',
            },
            Self::AUD => CurrencyStyle {
                symbol: "A$",
                symbol_after: false,
                decimal_separator: '.',
                group_separator: ',',
            },
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyError::Unsupported(s.to_owned())),
        }
    }
}

/// Insert `separator` between every group of three digits, counted from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
