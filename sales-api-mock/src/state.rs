//! Mock server state

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::Sale;
use tokio::sync::RwLock;

/// Shared state of the mock sales API
///
/// Cheap to clone; clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    sales: RwLock<Vec<Sale>>,
    /// Raw request lines (`GET /sales?page=1...`) in arrival order
    requests: RwLock<Vec<String>>,
    /// When set, every route answers 500
    failing: AtomicBool,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales(sales: Vec<Sale>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sales: RwLock::new(sales),
                ..Default::default()
            }),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.inner.failing.load(Ordering::SeqCst)
    }

    pub async fn sales(&self) -> Vec<Sale> {
        self.inner.sales.read().await.clone()
    }

    pub(crate) async fn read_sales(&self) -> tokio::sync::RwLockReadGuard<'_, Vec<Sale>> {
        self.inner.sales.read().await
    }

    pub(crate) async fn insert(&self, sale: Sale) {
        self.inner.sales.write().await.push(sale);
    }

    pub(crate) async fn record_request(&self, line: String) {
        self.inner.requests.write().await.push(line);
    }

    /// Request lines received so far
    pub async fn requests(&self) -> Vec<String> {
        self.inner.requests.read().await.clone()
    }

    pub async fn clear_requests(&self) {
        self.inner.requests.write().await.clear();
    }
}
