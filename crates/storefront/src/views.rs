//! View models for templates.
//!
//! Everything the templates print is computed here, so rendering is a pure
//! function of the cart, the catalog and a few flags. Rendering the same
//! state twice produces the same bytes.

use std::time::Duration;

use kiosk_core::{Cart, CartLine, CurrencyCode, Price};

use crate::catalog::Product;
use crate::page::FeedbackTicket;

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub count: u64,
    pub is_empty: bool,
}

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub sku: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let currency = cart.currency();
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView::new(line, currency))
                .collect(),
            subtotal: cart.subtotal().display(),
            count: cart.count(),
            is_empty: cart.is_empty(),
        }
    }
}

impl CartLineView {
    fn new(line: &CartLine, currency: CurrencyCode) -> Self {
        Self {
            sku: line.sku.to_string(),
            name: line.name.clone(),
            unit_price: Price::new(line.unit_price, currency).display(),
            quantity: line.quantity.get(),
            line_total: Price::new(line.line_total(), currency).display(),
        }
    }
}

/// A product card on the storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub sku: String,
    pub name: String,
    description: Option<String>,
    /// Formatted for display.
    pub price: String,
    /// Plain decimal posted back with the card.
    pub price_value: String,
    badge: Option<String>,
    quantity_input: QuantityInputView,
    button: AddButtonView,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let sku = product.sku.to_string();
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            price_value: product.price.amount.to_string(),
            badge: product.badge.clone(),
            quantity_input: QuantityInputView {
                sku: sku.clone(),
                value: 1,
            },
            button: AddButtonView::idle(sku.clone()),
            sku,
        }
    }
}

impl ProductCardView {
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    #[must_use]
    pub const fn quantity_input(&self) -> &QuantityInputView {
        &self.quantity_input
    }

    #[must_use]
    pub const fn button(&self) -> &AddButtonView {
        &self.button
    }
}

/// The quantity input of a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityInputView {
    pub sku: String,
    pub value: u32,
}

/// The add-to-cart button of a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddButtonView {
    pub sku: String,
    /// Set while the button shows its confirmation.
    pub revert: Option<RevertView>,
}

/// When and with which ticket a confirming add button asks to be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertView {
    pub ticket: u64,
    pub delay_ms: u64,
}

impl AddButtonView {
    /// The button in its normal, clickable state.
    #[must_use]
    pub const fn idle(sku: String) -> Self {
        Self { sku, revert: None }
    }

    /// The disabled confirmation state, reverting after `delay`.
    #[must_use]
    pub fn confirming(sku: String, ticket: FeedbackTicket, delay: Duration) -> Self {
        Self {
            sku,
            revert: Some(RevertView {
                ticket: ticket.get(),
                delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}
