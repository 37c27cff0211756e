//! Event router: turns clicks into cart operations.
//!
//! The page posts every click to one endpoint. [`EventRouter::route`]
//! decodes the posted attributes into an [`Intent`] once and dispatches it
//! with a single `match`. The returned [`Outcome`] tells the caller which
//! fragments to re-render; every cart mutation re-renders the whole drawer.

pub mod intent;

use kiosk_core::{Quantity, Sku};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::add_breadcrumb;
use crate::page::{FeedbackTicket, PageSession};

pub use intent::{AddToCart, ClickPayload, Intent};

/// Notice shown when checkout is pressed with an empty cart.
pub const EMPTY_CART_NOTICE: &str = "Dein Warenkorb ist leer.";

/// What to render after a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Only a product card's quantity input changed.
    ProductQuantity { sku: Sku, quantity: Quantity },
    /// Re-render the drawer, both badges and the subtotal.
    Cart {
        /// Add button to switch into its confirmation state.
        feedback: Option<Feedback>,
        /// Message to show inside the drawer.
        notice: Option<String>,
    },
    /// Restore the add button of `sku`.
    FeedbackReverted { sku: Sku },
    /// Nothing to do.
    Ignored,
}

/// A scheduled add-button revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub sku: Sku,
    pub ticket: FeedbackTicket,
}

impl Outcome {
    const fn cart() -> Self {
        Self::Cart {
            feedback: None,
            notice: None,
        }
    }
}

/// Dispatches decoded clicks against a page session.
#[derive(Debug, Clone)]
pub struct EventRouter {
    catalog: Catalog,
    checkout_notice: String,
}

impl EventRouter {
    /// Create a router backed by `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog, checkout_notice: impl Into<String>) -> Self {
        Self {
            catalog,
            checkout_notice: checkout_notice.into(),
        }
    }

    /// The product catalog used to resolve add-to-cart requests.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Decode a click and apply it to `page`.
    pub fn route(&self, page: &mut PageSession, payload: &ClickPayload) -> Outcome {
        self.dispatch(page, Intent::decode(payload))
    }

    /// Apply an intent to `page`.
    pub fn dispatch(&self, page: &mut PageSession, intent: Intent) -> Outcome {
        debug!(intent = intent.kind(), "dispatching click");

        match intent {
            Intent::StepProductQuantity {
                sku,
                current,
                delta,
            } => Outcome::ProductQuantity {
                sku,
                quantity: current.offset(delta),
            },
            Intent::AddToCart(add) => {
                let on_page = self.catalog.get(&add.sku).is_some();
                let add = self.resolve(add);
                info!(sku = %add.sku, quantity = add.quantity.get(), "adding to cart");
                add_breadcrumb("cart", "Added to cart", Some(&[("sku", add.sku.as_str())]));

                page.cart
                    .add(add.sku.clone(), add.name, add.unit_price, add.quantity);
                page.drawer.open();

                // Only product cards have an add button to confirm
                let feedback = on_page.then(|| Feedback {
                    ticket: page.feedback.schedule(&add.sku),
                    sku: add.sku,
                });

                Outcome::Cart {
                    feedback,
                    notice: None,
                }
            }
            Intent::RemoveLine { sku } => {
                if page.cart.remove(&sku).is_some() {
                    info!(sku = %sku, "removed from cart");
                    add_breadcrumb("cart", "Removed from cart", Some(&[("sku", sku.as_str())]));
                }
                Outcome::cart()
            }
            Intent::AdjustLineQuantity { sku, delta } => {
                if page.cart.adjust_quantity(&sku, delta) {
                    debug!(sku = %sku, delta, "adjusted cart quantity");
                }
                Outcome::cart()
            }
            Intent::OpenCart => {
                page.drawer.open();
                Outcome::cart()
            }
            Intent::CloseCart => {
                page.drawer.close();
                Outcome::cart()
            }
            Intent::ClearCart => {
                info!(lines = page.cart.len(), "clearing cart");
                add_breadcrumb("cart", "Cleared cart", None);
                page.cart.clear();
                Outcome::cart()
            }
            Intent::Checkout => {
                // TODO: hand the cart to a payment provider once one is chosen
                info!(
                    lines = page.cart.len(),
                    subtotal = %page.cart.subtotal(),
                    "checkout requested"
                );
                let notice = if page.cart.is_empty() {
                    EMPTY_CART_NOTICE.to_string()
                } else {
                    self.checkout_notice.clone()
                };
                Outcome::Cart {
                    feedback: None,
                    notice: Some(notice),
                }
            }
            Intent::RevertFeedback { sku, ticket } => {
                if page.feedback.settle(&sku, ticket) {
                    Outcome::FeedbackReverted { sku }
                } else {
                    debug!(sku = %sku, ticket = ticket.get(), "ignoring superseded revert");
                    Outcome::Ignored
                }
            }
            Intent::Ignored => Outcome::Ignored,
        }
    }

    /// Prefer the catalog's name and price over what the card posted.
    fn resolve(&self, add: AddToCart) -> AddToCart {
        match self.catalog.get(&add.sku) {
            Some(product) => AddToCart {
                name: product.name.clone(),
                unit_price: product.price.amount,
                ..add
            },
            None => add,
        }
    }
}
