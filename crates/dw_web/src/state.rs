use std::sync::Arc;

use dw_core::ArticleStorage;
use dw_fetcher::FetchManager;

pub struct AppState {
    pub storage: Arc<dyn ArticleStorage>,
    pub manager: Arc<FetchManager>,
}

impl AppState {
    /// Reads go through the same storage the manager writes to.
    pub fn new(manager: FetchManager) -> Self {
        Self {
            storage: manager.storage().clone(),
            manager: Arc::new(manager),
        }
    }
}
