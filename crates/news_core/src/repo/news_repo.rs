//! News repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide get/get_all/put/remove primitives over news storage.
//! - Keep storage details out of the service's validation logic.
//!
//! # Invariants
//! - Each call is atomic on its own; no call observes a half-written record.
//! - `get_all` returns an owned snapshot, never a live view.

use crate::model::news::{NewsId, NewsRecord};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A writer panicked while holding the storage lock.
    LockPoisoned(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockPoisoned(op) => write!(f, "news storage lock poisoned during {op}"),
        }
    }
}

impl Error for RepoError {}

/// Storage primitives used by `NewsService`.
pub trait NewsRepository: Send + Sync {
    fn get(&self, id: NewsId) -> RepoResult<Option<NewsRecord>>;
    fn get_all(&self) -> RepoResult<Vec<NewsRecord>>;
    /// Inserts `record`, replacing any record stored under the same id.
    fn put(&self, record: NewsRecord) -> RepoResult<()>;
    fn remove(&self, id: NewsId) -> RepoResult<Option<NewsRecord>>;
    fn len(&self) -> RepoResult<usize>;

    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R: NewsRepository + ?Sized> NewsRepository for Arc<R> {
    fn get(&self, id: NewsId) -> RepoResult<Option<NewsRecord>> {
        (**self).get(id)
    }

    fn get_all(&self) -> RepoResult<Vec<NewsRecord>> {
        (**self).get_all()
    }

    fn put(&self, record: NewsRecord) -> RepoResult<()> {
        (**self).put(record)
    }

    fn remove(&self, id: NewsId) -> RepoResult<Option<NewsRecord>> {
        (**self).remove(id)
    }

    fn len(&self) -> RepoResult<usize> {
        (**self).len()
    }
}

/// Process-lifetime repository backed by a lock-guarded hash map.
#[derive(Debug, Default)]
pub struct InMemoryNewsRepository {
    records: RwLock<HashMap<NewsId, NewsRecord>>,
}

impl InMemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NewsRepository for InMemoryNewsRepository {
    fn get(&self, id: NewsId) -> RepoResult<Option<NewsRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepoError::LockPoisoned("get"))?;
        Ok(records.get(&id).cloned())
    }

    fn get_all(&self) -> RepoResult<Vec<NewsRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepoError::LockPoisoned("get_all"))?;
        Ok(records.values().cloned().collect())
    }

    fn put(&self, record: NewsRecord) -> RepoResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepoError::LockPoisoned("put"))?;
        records.insert(record.id, record);
        Ok(())
    }

    fn remove(&self, id: NewsId) -> RepoResult<Option<NewsRecord>> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepoError::LockPoisoned("remove"))?;
        Ok(records.remove(&id))
    }

    fn len(&self) -> RepoResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| RepoError::LockPoisoned("len"))?;
        Ok(records.len())
    }
}
