//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::events::EventRouter;
use crate::page::PageSessions;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the event router and the live page sessions.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    events: EventRouter,
    pages: PageSessions,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products offered on the page
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let events = EventRouter::new(catalog, config.checkout_notice.clone());
        let pages = PageSessions::new(&config.pages, config.currency);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                events,
                pages,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the event router.
    #[must_use]
    pub fn events(&self) -> &EventRouter {
        &self.inner.events
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.inner.events.catalog()
    }

    /// Get a reference to the page session registry.
    #[must_use]
    pub fn pages(&self) -> &PageSessions {
        &self.inner.pages
    }
}
