use std::sync::Arc;

use stockroom_inventory::{InMemoryItemStore, ItemStore};

/// Everything the handlers need, shared behind one `Arc`.
#[derive(Clone)]
pub struct AppServices {
    items: Arc<dyn ItemStore>,
}

impl AppServices {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// Fresh, empty in-memory store for the lifetime of the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryItemStore::new()))
    }

    pub fn items(&self) -> &dyn ItemStore {
        self.items.as_ref()
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}
