//! Integration tests for the storefront page and HTTP plumbing.

use axum::http::StatusCode;
use kiosk_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let response = ctx.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_page_renders_catalog_and_empty_cart() {
    let ctx = TestContext::new();
    let page = ctx.open_page().await;

    for name in [
        "Kaffee Crema",
        "Espresso Forte",
        "Grüner Tee Sencha",
        "Keramiktasse",
        "Handfilter Set",
    ] {
        assert!(page.html.contains(name), "missing product {name}");
    }
    assert!(page.html.contains("12,90\u{a0}€"));
    assert!(page.html.contains(r#"id="qty-handfilter-set""#));
    assert!(page.html.contains("Noch nichts im Warenkorb."));
    assert!(page.html.contains(r#"id="cartDrawer""#));
    assert!(!page.html.contains("drawer open"));
    assert!(!page.html.contains("hx-swap-oob"));
}

#[tokio::test]
async fn test_reload_starts_with_empty_cart() {
    let ctx = TestContext::new();
    let page = ctx.open_page().await;
    page.add("kaffee-crema", "Kaffee Crema", "12.90", "1").await;

    let reloaded = ctx.open_page().await;
    assert!(reloaded.html.contains("Noch nichts im Warenkorb."));
}

#[tokio::test]
async fn test_unknown_page_asks_for_refresh() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form(
            "/pages/00000000-0000-4000-8000-000000000000/events",
            &[("action", "open")],
        )
        .await;

    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.header("hx-refresh"), Some("true"));
}

#[tokio::test]
async fn test_malformed_page_id() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form("/pages/not-a-page/events", &[("action", "open")])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = TestContext::new();
    let response = ctx.get("/products").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;

    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(response.header("cache-control"), Some("no-store"));
    assert!(
        response
            .header("content-security-policy")
            .is_some_and(|csp| csp.contains("https://unpkg.com"))
    );
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_htmx_script_origin_is_allowed() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;

    let marker = r#"<script src=""#;
    let start = response.body.find(marker).unwrap() + marker.len();
    let src = response.body.get(start..).unwrap();
    let host_start = src.find("://").unwrap() + "://".len();
    let host_len = src.get(host_start..).unwrap().find('/').unwrap();
    let origin = src.get(..host_start + host_len).unwrap();

    let csp = response.header("content-security-policy").unwrap();
    assert!(
        csp.split(';')
            .any(|directive| directive.trim().starts_with("script-src")
                && directive.split_whitespace().any(|source| source == origin)),
        "{origin} missing from script-src in {csp}"
    );
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let ctx = TestContext::new();
    let response = ctx.get("/static/css/main.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".drawer.open"));
    assert_eq!(
        response.header("cache-control"),
        Some("public, max-age=3600")
    );
}
