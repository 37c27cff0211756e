//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for route handlers, which return
//! `Result<T, AppError>`. Cart operations themselves never fail; these
//! errors cover the page session lookup and routing around them, and none
//! of them is a server fault. Panics reach Sentry through its panic
//! integration; requests are traced by the `sentry-tower` layers.
//!
//! [`add_breadcrumb`] leaves the trail of cart actions that Sentry attaches
//! to those reports.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Header telling HTMX to reload the whole page.
const HX_REFRESH: &str = "hx-refresh";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The page session expired or never existed.
    #[error("Page session expired")]
    PageExpired,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PageExpired => StatusCode::GONE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        tracing::debug!(error = %self, status = status.as_u16(), "Request error");

        let mut response = (status, self.to_string()).into_response();

        // An expired page cannot be repaired by a fragment; start a new one
        if matches!(self, Self::PageExpired) {
            response
                .headers_mut()
                .insert(HX_REFRESH, HeaderValue::from_static("true"));
        }

        response
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("sku", "kaffee-crema")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
