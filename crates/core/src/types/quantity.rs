//! Item quantity that can never drop below one.
//!
//! A cart line leaves the cart by removal, never by reaching zero, so the
//! type makes zero unrepresentable and every arithmetic path clamps.

use core::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A quantity of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, clamping anything below one up to one.
    #[must_use]
    pub fn new(value: u32) -> Self {
        NonZeroU32::new(value).map_or(Self::ONE, Self)
    }

    /// Create a quantity from a signed value, clamping to `1..=u32::MAX`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self::new(u32::try_from(value.max(1)).unwrap_or(u32::MAX))
    }

    /// Coerce free-form input (an `<input type="number">` value) to a quantity.
    ///
    /// Integers are taken as-is, decimals are floored, anything unparseable
    /// or below one becomes one.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let input = input.trim();
        if let Ok(value) = input.parse::<i64>() {
            return Self::clamped(value);
        }
        match input.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation)] // `as` saturates
            Ok(value) if value.is_finite() => Self::clamped(value.floor() as i64),
            Ok(value) if value == f64::INFINITY => Self::new(u32::MAX),
            _ => Self::ONE,
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }

    /// Apply a signed step, clamping the result to at least one.
    #[must_use]
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.get()).saturating_add(delta))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
