//! Storefront page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::page::PageId;
use crate::state::AppState;
use crate::views::{CartView, ProductCardView};

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Where the page posts its clicks.
    pub events_url: String,
    pub products: Vec<ProductCardView>,
    pub cart: CartView,
    pub drawer_open: bool,
    /// Message shown inside the drawer; empty for none.
    pub notice: String,
    /// Always false on a full page.
    pub oob: bool,
}

/// URL the page with `page_id` posts its clicks to.
#[must_use]
pub fn events_url(page_id: PageId) -> String {
    format!("/pages/{page_id}/events")
}

/// Display the storefront page.
///
/// Every load opens a fresh page session with an empty cart.
#[instrument(skip(state), fields(page_id))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (page_id, page) = state.pages().open().await;
    tracing::Span::current().record("page_id", tracing::field::display(page_id));

    let (cart, drawer_open) = {
        let page = page.lock().await;
        (CartView::from(&page.cart), page.drawer.is_open())
    };

    IndexTemplate {
        events_url: events_url(page_id),
        products: state
            .catalog()
            .products()
            .iter()
            .map(ProductCardView::from)
            .collect(),
        cart,
        drawer_open,
        notice: String::new(),
        oob: false,
    }
}
