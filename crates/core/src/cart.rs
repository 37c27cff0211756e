//! In-memory cart store.
//!
//! A [`Cart`] maps skus to [`CartLine`]s and keeps them in insertion order
//! for display. Every operation is total: absent skus are created on first
//! add or ignored, nothing ever fails.
//!
//! # Invariants
//!
//! - Every line has a quantity of at least one ([`Quantity`] cannot be zero).
//! - A sku appears at most once.
//! - Unit prices are never negative.
//!
//! ```
//! use kiosk_core::{Cart, CurrencyCode, Quantity, Sku};
//! use rust_decimal::Decimal;
//!
//! let mut cart = Cart::new(CurrencyCode::EUR);
//! let sku = Sku::parse("a").unwrap();
//! cart.add(sku.clone(), "Widget", Decimal::from(5), Quantity::ONE);
//! cart.add(sku, "Widget", Decimal::from(5), Quantity::ONE);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.subtotal().amount, Decimal::from(10));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Quantity, Sku};

/// One cart entry: a sku's aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub sku: Sku,
    /// Display name, not used for identity.
    pub name: String,
    /// Price of a single item in the cart's currency.
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// The cart of one page session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    currency: CurrencyCode,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            lines: Vec::new(),
        }
    }

    /// Add `quantity` of an item.
    ///
    /// An existing line keeps its position, gains the quantity and takes the
    /// latest name and unit price. Otherwise a new line is appended.
    /// Negative unit prices are stored as zero.
    pub fn add(&mut self, sku: Sku, name: impl Into<String>, unit_price: Decimal, quantity: Quantity) {
        let name = name.into();
        let unit_price = unit_price.max(Decimal::ZERO);

        if let Some(line) = self.line_mut(&sku) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.name = name;
            line.unit_price = unit_price;
            return;
        }

        self.lines.push(CartLine {
            sku,
            name,
            unit_price,
            quantity,
        });
    }

    /// Apply a signed step to a line's quantity, never going below one.
    ///
    /// Returns `false` (and changes nothing) if the sku is not in the cart.
    pub fn adjust_quantity(&mut self, sku: &Sku, delta: i64) -> bool {
        match self.line_mut(sku) {
            Some(line) => {
                line.quantity = line.quantity.offset(delta);
                true
            }
            None => false,
        }
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, sku: &Sku) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| &line.sku == sku)?;
        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()));
        Price::new(amount, self.currency)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Look up a line by sku.
    #[must_use]
    pub fn get(&self, sku: &Sku) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.sku == sku)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    fn line_mut(&mut self, sku: &Sku) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.sku == sku)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::parse(s).unwrap()
    }

    fn eur_cart() -> Cart {
        Cart::new(CurrencyCode::EUR)
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_add_same_sku_twice_merges_lines() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&sku("a")).unwrap().quantity.get(), 2);
        assert_eq!(cart.subtotal().amount, Decimal::from(10));
    }

    #[test]
    fn test_adjust_clamps_at_one() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);

        assert!(cart.adjust_quantity(&sku("a"), -5));
        assert_eq!(cart.get(&sku("a")).unwrap().quantity, Quantity::ONE);
        assert_eq!(cart.subtotal().amount, Decimal::from(5));
    }

    #[test]
    fn test_adjust_absent_sku_is_noop() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);
        let before = cart.clone();

        assert!(!cart.adjust_quantity(&sku("b"), 3));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_last_line_empties_cart() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);

        let removed = cart.remove(&sku("a")).unwrap();
        assert_eq!(removed.name, "Widget");
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_remove_absent_sku_is_noop() {
        let mut cart = eur_cart();
        assert!(cart.remove(&sku("a")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::new(3));
        cart.add(sku("b"), "Gadget", Decimal::new(1999, 2), Quantity::ONE);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Price::zero(CurrencyCode::EUR));
    }

    #[test]
    fn test_add_keeps_position_and_refreshes_name_and_price() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::ONE);
        cart.add(sku("b"), "Gadget", Decimal::from(2), Quantity::ONE);
        cart.add(sku("a"), "Widget XL", Decimal::from(6), Quantity::new(2));

        let skus: Vec<&str> = cart.lines().iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, ["a", "b"]);

        let line = cart.get(&sku("a")).unwrap();
        assert_eq!(line.name, "Widget XL");
        assert_eq!(line.unit_price, Decimal::from(6));
        assert_eq!(line.quantity.get(), 3);
        assert_eq!(line.line_total(), Decimal::from(18));
    }

    #[test]
    fn test_negative_price_is_stored_as_zero() {
        let mut cart = eur_cart();
        cart.add(sku("a"), "Widget", Decimal::from(-5), Quantity::ONE);
        assert_eq!(cart.get(&sku("a")).unwrap().unit_price, Decimal::ZERO);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_subtotal_uses_cart_currency() {
        let mut cart = Cart::new(CurrencyCode::USD);
        cart.add(sku("a"), "Widget", Decimal::new(250, 2), Quantity::new(2));
        assert_eq!(cart.subtotal().display(), "$5.00");
        assert_eq!(cart.currency(), CurrencyCode::USD);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Add { sku: usize, cents: i64, quantity: u32 },
        Adjust { sku: usize, delta: i64 },
        Remove { sku: usize },
        Clear,
    }

    const SKUS: [&str; 4] = ["a", "b", "c", "d"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..SKUS.len(), 0..100_000i64, 1..50u32)
                .prop_map(|(sku, cents, quantity)| Op::Add { sku, cents, quantity }),
            3 => (0..SKUS.len(), -100..100i64).prop_map(|(sku, delta)| Op::Adjust { sku, delta }),
            2 => (0..SKUS.len()).prop_map(|sku| Op::Remove { sku }),
            1 => Just(Op::Clear),
        ]
    }

    fn apply(cart: &mut Cart, op: &Op) {
        match *op {
            Op::Add {
                sku: i,
                cents,
                quantity,
            } => cart.add(
                sku(SKUS[i]),
                SKUS[i],
                Decimal::new(cents, 2),
                Quantity::new(quantity),
            ),
            Op::Adjust { sku: i, delta } => {
                cart.adjust_quantity(&sku(SKUS[i]), delta);
            }
            Op::Remove { sku: i } => {
                cart.remove(&sku(SKUS[i]));
            }
            Op::Clear => cart.clear(),
        }
    }

    proptest! {
        #[test]
        fn prop_repeated_adds_sum_quantities(quantities in proptest::collection::vec(1..1000u32, 1..20)) {
            let mut cart = eur_cart();
            for &quantity in &quantities {
                cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::new(quantity));
            }
            let expected: u64 = quantities.iter().map(|&q| u64::from(q)).sum();
            prop_assert_eq!(cart.len(), 1);
            prop_assert_eq!(cart.count(), expected);
        }

        #[test]
        fn prop_adjust_never_below_one(start in 1..1000u32, deltas in proptest::collection::vec(any::<i64>(), 0..20)) {
            let mut cart = eur_cart();
            cart.add(sku("a"), "Widget", Decimal::from(5), Quantity::new(start));
            for delta in deltas {
                cart.adjust_quantity(&sku("a"), delta);
                prop_assert!(cart.get(&sku("a")).unwrap().quantity.get() >= 1);
            }
        }

        #[test]
        fn prop_derived_reads_match_lines(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut cart = eur_cart();
            for op in &ops {
                apply(&mut cart, op);

                let subtotal: Decimal = cart
                    .lines()
                    .iter()
                    .map(|line| line.unit_price * Decimal::from(line.quantity.get()))
                    .sum();
                let count: u64 = cart.lines().iter().map(|line| u64::from(line.quantity.get())).sum();

                prop_assert_eq!(cart.subtotal().amount, subtotal);
                prop_assert_eq!(cart.count(), count);
                prop_assert!(cart.lines().iter().all(|line| line.quantity.get() >= 1));

                let mut skus: Vec<&Sku> = cart.lines().iter().map(|line| &line.sku).collect();
                skus.sort();
                skus.dedup();
                prop_assert_eq!(skus.len(), cart.len());
            }
        }
    }
}
