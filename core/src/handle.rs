use crate::error::QueryError;
use crate::index::Index;
use crate::query::recommend;
use crate::record::Recommendation;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared slot for the live [`Index`].
///
/// Readers take an `Arc` snapshot and run against it without holding the lock;
/// a rebuild swaps the whole pointer, so in-flight queries finish on the index
/// they started with.
#[derive(Default)]
pub struct IndexHandle {
    current: RwLock<Option<Arc<Index>>>,
}

impl IndexHandle {
    pub fn new() -> Self { Self::default() }

    pub fn with_index(index: Index) -> Self {
        Self { current: RwLock::new(Some(Arc::new(index))) }
    }

    pub fn is_ready(&self) -> bool { self.current.read().is_some() }

    pub fn current(&self) -> Result<Arc<Index>, QueryError> {
        self.current.read().clone().ok_or(QueryError::NotReady)
    }

    /// Install `index`, returning the one it replaced.
    pub fn replace(&self, index: Index) -> Option<Arc<Index>> {
        let next = Arc::new(index);
        self.current.write().replace(next)
    }

    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation>, QueryError> {
        let index = self.current()?;
        recommend(&index, title, k)
    }
}
