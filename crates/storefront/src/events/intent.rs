//! Decoding a click into an intent.
//!
//! Every control on the page posts its own attributes as form fields. The
//! fields are decoded exactly once into an [`Intent`]; nothing downstream
//! looks at raw fields again.
//!
//! Malformed input never fails: missing or unparseable values fall back to
//! safe defaults (price 0, quantity 1, delta 0, sku derived from the name).
//! A field posted more than once keeps its first value.

use std::str::FromStr;

use kiosk_core::{Quantity, Sku};
use rust_decimal::Decimal;

use crate::page::FeedbackTicket;

/// Display name used when a product card carries none.
pub const DEFAULT_PRODUCT_NAME: &str = "Produkt";

/// Attributes of the clicked control, as posted by HTMX.
#[derive(Debug, Default, Clone)]
pub struct ClickPayload {
    /// Step of a product card's quantity stepper (`-1` / `1`).
    pub qty: Option<String>,
    /// Present when the add-to-cart button was pressed.
    pub add: Option<String>,
    /// Sku of the cart line whose remove control was pressed.
    pub remove: Option<String>,
    /// Step of a cart line's quantity stepper.
    pub cart_qty: Option<String>,
    /// Sku the cart stepper or a revert refers to.
    pub sku: Option<String>,
    /// Product card fields.
    pub product_sku: Option<String>,
    pub product_name: Option<String>,
    pub product_price: Option<String>,
    /// Value of the product card's quantity input.
    pub quantity: Option<String>,
    /// Explicit trigger: `open`, `close`, `clear`, `checkout` or `revert`.
    pub action: Option<String>,
    /// Ticket of a scheduled add-button revert.
    pub ticket: Option<String>,
}

impl<K, V> FromIterator<(K, V)> for ClickPayload
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Collect posted fields; unknown names are skipped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(fields: I) -> Self {
        let mut payload = Self::default();
        for (name, value) in fields {
            let slot = match name.as_ref() {
                "qty" => &mut payload.qty,
                "add" => &mut payload.add,
                "remove" => &mut payload.remove,
                "cart_qty" => &mut payload.cart_qty,
                "sku" => &mut payload.sku,
                "product_sku" => &mut payload.product_sku,
                "product_name" => &mut payload.product_name,
                "product_price" => &mut payload.product_price,
                "quantity" => &mut payload.quantity,
                "action" => &mut payload.action,
                "ticket" => &mut payload.ticket,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        payload
    }
}

/// What a click asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Step a product card's quantity input. Does not touch the cart.
    StepProductQuantity {
        sku: Sku,
        current: Quantity,
        delta: i64,
    },
    AddToCart(AddToCart),
    RemoveLine {
        sku: Sku,
    },
    AdjustLineQuantity {
        sku: Sku,
        delta: i64,
    },
    OpenCart,
    CloseCart,
    ClearCart,
    Checkout,
    /// Restore an add button after its confirmation delay.
    RevertFeedback {
        sku: Sku,
        ticket: FeedbackTicket,
    },
    Ignored,
}

/// An add-to-cart request read from a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub sku: Sku,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl Intent {
    /// Decode the posted attributes.
    ///
    /// Precedence follows the nesting of controls on the page: product
    /// stepper, add button, line remove, line stepper, then the explicit
    /// drawer and checkout triggers.
    #[must_use]
    pub fn decode(payload: &ClickPayload) -> Self {
        if let Some(delta) = payload.qty.as_deref() {
            let (sku, _) = product_identity(payload);
            return Self::StepProductQuantity {
                sku,
                current: quantity_or_one(payload.quantity.as_deref()),
                delta: parse_delta(delta),
            };
        }

        if payload.add.is_some() {
            let (sku, name) = product_identity(payload);
            return Self::AddToCart(AddToCart {
                sku,
                name,
                unit_price: parse_price(payload.product_price.as_deref()),
                quantity: quantity_or_one(payload.quantity.as_deref()),
            });
        }

        if let Some(remove) = payload.remove.as_deref() {
            return Sku::parse(remove).map_or(Self::Ignored, |sku| Self::RemoveLine { sku });
        }

        if let Some(delta) = payload.cart_qty.as_deref() {
            return match parse_sku(payload.sku.as_deref()) {
                Some(sku) => Self::AdjustLineQuantity {
                    sku,
                    delta: parse_delta(delta),
                },
                None => Self::Ignored,
            };
        }

        match payload.action.as_deref().map(str::trim) {
            Some("open") => Self::OpenCart,
            Some("close") => Self::CloseCart,
            Some("clear") => Self::ClearCart,
            Some("checkout") => Self::Checkout,
            Some("revert") => {
                let sku = parse_sku(payload.sku.as_deref());
                let ticket = payload
                    .ticket
                    .as_deref()
                    .and_then(|t| FeedbackTicket::from_str(t).ok());
                match (sku, ticket) {
                    (Some(sku), Some(ticket)) => Self::RevertFeedback { sku, ticket },
                    _ => Self::Ignored,
                }
            }
            _ => Self::Ignored,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::StepProductQuantity { .. } => "step_product_quantity",
            Self::AddToCart(_) => "add_to_cart",
            Self::RemoveLine { .. } => "remove_line",
            Self::AdjustLineQuantity { .. } => "adjust_line_quantity",
            Self::OpenCart => "open_cart",
            Self::CloseCart => "close_cart",
            Self::ClearCart => "clear_cart",
            Self::Checkout => "checkout",
            Self::RevertFeedback { .. } => "revert_feedback",
            Self::Ignored => "ignored",
        }
    }
}

// =============================================================================
// Lenient field coercion
// =============================================================================

/// Sku and display name of the product card, with fallbacks.
fn product_identity(payload: &ClickPayload) -> (Sku, String) {
    let name = payload
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_NAME)
        .to_string();
    let sku = parse_sku(payload.product_sku.as_deref()).unwrap_or_else(|| Sku::from_name(&name));
    (sku, name)
}

fn parse_sku(raw: Option<&str>) -> Option<Sku> {
    raw.and_then(|raw| Sku::parse(raw).ok())
}

fn quantity_or_one(raw: Option<&str>) -> Quantity {
    raw.map_or(Quantity::ONE, Quantity::parse_lenient)
}

/// Non-numeric steps count as no step.
fn parse_delta(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Missing, unparseable and negative prices count as zero.
fn parse_price(raw: Option<&str>) -> Decimal {
    raw.and_then(|raw| Decimal::from_str(raw.trim()).ok())
        .filter(|price| !price.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}
