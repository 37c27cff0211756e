//! Click handler for a storefront page.
//!
//! All controls post here. The response is a set of out-of-band fragments
//! (`hx-swap-oob`) that HTMX swaps into the elements with matching ids; a
//! click that changes nothing answers `204 No Content`. So does a body that
//! is not a form at all.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::events::{ClickPayload, Outcome};
use crate::page::{PageId, PageSession};
use crate::routes::home::events_url;
use crate::state::AppState;
use crate::views::{AddButtonView, CartView, QuantityInputView};

/// Drawer, badges and subtotal after a cart change (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "fragments/cart_update.html")]
pub struct CartUpdateTemplate {
    pub events_url: String,
    pub cart: CartView,
    pub drawer_open: bool,
    /// Message shown inside the drawer; empty for none.
    pub notice: String,
    /// Add button switching into its confirmation state, if any.
    pub feedback: Option<AddButtonView>,
    pub oob: bool,
}

/// A product card's quantity input (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_quantity.html")]
pub struct QuantityInputTemplate {
    pub input: QuantityInputView,
    pub oob: bool,
}

/// A product card's add button (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_button.html")]
pub struct AddButtonTemplate {
    pub events_url: String,
    pub button: AddButtonView,
    pub oob: bool,
}

/// Handle one click on the page `page_id`.
///
/// # Errors
///
/// Returns [`AppError::PageExpired`] if the page session is gone and
/// [`AppError::BadRequest`] if `page_id` is not a page ID at all.
#[instrument(skip(state, page_id, form), fields(page_id))]
pub async fn handle(
    State(state): State<AppState>,
    page_id: std::result::Result<Path<PageId>, PathRejection>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response> {
    let Path(page_id) = page_id.map_err(|err| AppError::BadRequest(err.body_text()))?;
    tracing::Span::current().record("page_id", tracing::field::display(page_id));

    let Some(page) = state.pages().get(page_id).await else {
        tracing::info!(%page_id, "click for expired page session");
        return Err(AppError::PageExpired);
    };

    let payload: ClickPayload = match form {
        Ok(Form(fields)) => fields.into_iter().collect(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable click body");
            ClickPayload::default()
        }
    };

    let mut page = page.lock().await;
    let outcome = state.events().route(&mut page, &payload);

    Ok(render(
        outcome,
        &page,
        events_url(page_id),
        state.config().pages.add_feedback_delay,
    ))
}

/// Render the fragments an outcome calls for.
fn render(
    outcome: Outcome,
    page: &PageSession,
    events_url: String,
    feedback_delay: Duration,
) -> Response {
    match outcome {
        Outcome::Ignored => StatusCode::NO_CONTENT.into_response(),
        Outcome::ProductQuantity { sku, quantity } => QuantityInputTemplate {
            input: QuantityInputView {
                sku: sku.to_string(),
                value: quantity.get(),
            },
            oob: true,
        }
        .into_response(),
        Outcome::FeedbackReverted { sku } => AddButtonTemplate {
            events_url,
            button: AddButtonView::idle(sku.to_string()),
            oob: true,
        }
        .into_response(),
        Outcome::Cart { feedback, notice } => CartUpdateTemplate {
            events_url,
            cart: CartView::from(&page.cart),
            drawer_open: page.drawer.is_open(),
            notice: notice.unwrap_or_default(),
            feedback: feedback.map(|feedback| {
                AddButtonView::confirming(feedback.sku.to_string(), feedback.ticket, feedback_delay)
            }),
            oob: true,
        }
        .into_response(),
    }
}
