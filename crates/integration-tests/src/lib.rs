//! Integration tests for Kiosk.
//!
//! Tests drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kiosk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Click sequences against one page session
//! - `storefront` - Page rendering, errors and HTTP plumbing

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
};
use kiosk_core::CurrencyCode;
use kiosk_storefront::catalog::Catalog;
use kiosk_storefront::config::StorefrontConfig;
use kiosk_storefront::state::AppState;
use tower::ServiceExt;

/// The catalog shipped with the storefront.
pub const BUNDLED_CATALOG: &str = include_str!("../../storefront/content/products.json");

/// A storefront router wired up the way the binary does it, minus Sentry.
pub struct TestContext {
    router: Router,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Text of the element with `id`, assuming it has no child elements.
    #[must_use]
    pub fn text_of(&self, id: &str) -> Option<&str> {
        let marker = format!(r#"id="{id}""#);
        let start = self.body.find(&marker)?;
        let rest = self.body.get(start..)?;
        let open = rest.find('>')? + 1;
        let close = rest.find('<')?;
        rest.get(open..close).map(str::trim)
    }

    /// The ticket of the add-button revert scheduled in this response.
    #[must_use]
    pub fn revert_ticket(&self) -> Option<&str> {
        let marker = r#""ticket":""#;
        let start = self.body.find(marker)? + marker.len();
        let rest = self.body.get(start..)?;
        rest.get(..rest.find('"')?)
    }
}

/// A storefront page opened by `GET /`.
pub struct TestPage<'a> {
    ctx: &'a TestContext,
    pub events_url: String,
    pub html: String,
}

impl TestContext {
    /// Storefront with the bundled catalog and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// Storefront with the bundled catalog and `config`.
    #[must_use]
    pub fn with_config(mut config: StorefrontConfig) -> Self {
        config.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static");
        let catalog = Catalog::from_json(BUNDLED_CATALOG, CurrencyCode::EUR).unwrap();
        let state = AppState::new(config, catalog);

        Self {
            router: kiosk_storefront::app(state),
        }
    }

    /// Send a request and buffer the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// `POST uri` with a form-encoded body.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Load the storefront page, opening a fresh page session.
    pub async fn open_page(&self) -> TestPage<'_> {
        let response = self.get("/").await;
        assert_eq!(response.status, StatusCode::OK);

        let start = response.body.find("/pages/").unwrap();
        let rest = response.body.get(start..).unwrap();
        let end = rest.find("/events").unwrap() + "/events".len();
        let events_url = rest.get(..end).unwrap().to_string();

        TestPage {
            ctx: self,
            events_url,
            html: response.body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPage<'_> {
    /// Post one click to this page.
    pub async fn click(&self, fields: &[(&str, &str)]) -> TestResponse {
        self.ctx.post_form(&self.events_url, fields).await
    }

    /// Press the add button of a product card.
    pub async fn add(&self, sku: &str, name: &str, price: &str, quantity: &str) -> TestResponse {
        self.click(&[
            ("product_sku", sku),
            ("product_name", name),
            ("product_price", price),
            ("quantity", quantity),
            ("add", sku),
        ])
        .await
    }
}
