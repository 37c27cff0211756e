//! Page sessions: the state behind one rendered storefront page.
//!
//! Every `GET /` opens a fresh page session that owns a cart, the drawer
//! state and the pending add-button reverts. Reloading the page starts
//! over with an empty cart. Sessions are kept in a `moka` cache and dropped
//! after a period of inactivity.

pub mod drawer;
pub mod feedback;

use std::fmt;
use std::sync::Arc;

use kiosk_core::{Cart, CurrencyCode};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::PageConfig;

pub use drawer::DrawerState;
pub use feedback::{FeedbackTicket, FeedbackTimers};

/// Identifier of a page session, embedded in the page's event URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    /// Generate a new random page ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything one page can change.
#[derive(Debug)]
pub struct PageSession {
    pub cart: Cart,
    pub drawer: DrawerState,
    pub feedback: FeedbackTimers,
}

impl PageSession {
    /// A page with an empty cart and a closed drawer.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            cart: Cart::new(currency),
            drawer: DrawerState::default(),
            feedback: FeedbackTimers::default(),
        }
    }
}

/// A page session shared between the requests of one page.
///
/// Requests of the same page take the lock in turn, so each click runs to
/// completion before the next one is looked at.
pub type SharedPage = Arc<Mutex<PageSession>>;

/// Registry of live page sessions.
#[derive(Clone)]
pub struct PageSessions {
    cache: Cache<PageId, SharedPage>,
    currency: CurrencyCode,
}

impl PageSessions {
    /// Create an empty registry.
    #[must_use]
    pub fn new(config: &PageConfig, currency: CurrencyCode) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_pages)
            .time_to_idle(config.idle_timeout)
            .build();

        Self { cache, currency }
    }

    /// Open a new page session.
    pub async fn open(&self) -> (PageId, SharedPage) {
        let id = PageId::generate();
        let page = Arc::new(Mutex::new(PageSession::new(self.currency)));
        self.cache.insert(id, Arc::clone(&page)).await;
        tracing::debug!(page_id = %id, "page session opened");
        (id, page)
    }

    /// Look up a live page session. Touching it resets its idle timer.
    pub async fn get(&self, id: PageId) -> Option<SharedPage> {
        self.cache.get(&id).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sessions() -> PageSessions {
        PageSessions::new(&PageConfig::default(), CurrencyCode::EUR)
    }

    #[tokio::test]
    async fn test_open_and_get() {
        let sessions = sessions();
        let (id, page) = sessions.open().await;

        let found = sessions.get(id).await;
        assert!(found.is_some_and(|found| Arc::ptr_eq(&found, &page)));
    }

    #[tokio::test]
    async fn test_pages_are_isolated() {
        let sessions = sessions();
        let (first, _) = sessions.open().await;
        let (second, _) = sessions.open().await;
        assert_ne!(first, second);

        if let Some(page) = sessions.get(first).await {
            page.lock().await.drawer.open();
        }
        let Some(other) = sessions.get(second).await else {
            panic!("second page session missing");
        };
        assert!(!other.lock().await.drawer.is_open());
    }

    #[tokio::test]
    async fn test_unknown_page() {
        assert!(sessions().get(PageId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_page_expires() {
        let config = PageConfig {
            idle_timeout: Duration::from_millis(50),
            ..PageConfig::default()
        };
        let sessions = PageSessions::new(&config, CurrencyCode::EUR);
        let (id, _) = sessions.open().await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(sessions.get(id).await.is_none());
    }

    #[test]
    fn test_new_page_is_empty_and_closed() {
        let page = PageSession::new(CurrencyCode::USD);
        assert!(page.cart.is_empty());
        assert_eq!(page.cart.currency(), CurrencyCode::USD);
        assert_eq!(page.drawer, DrawerState::Closed);
    }
}
