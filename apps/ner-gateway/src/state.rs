//! Application state management

use std::sync::Arc;

use crate::ner::EntityExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    extractor: EntityExtractor,
}

impl AppState {
    pub fn new(extractor: EntityExtractor) -> Self {
        Self {
            inner: Arc::new(AppStateInner { extractor }),
        }
    }

    /// Get the entity extractor
    pub fn extractor(&self) -> &EntityExtractor {
        &self.inner.extractor
    }
}
