//! News store use-case service.
//!
//! # Responsibility
//! - Validate submitted news against configured limits.
//! - Assign ids and timestamps, then write through the repository.
//! - Map every failure to a typed error with a status category.
//!
//! # Invariants
//! - Ids come from a monotonic counter and are never reissued.
//! - A failed call leaves storage unchanged.
//! - Mutations are serialized so exists-check and write cannot interleave.
//! - Log lines carry ids and lengths only, never title/text bodies.

use crate::model::news::{NewsId, NewsLimits, NewsPayload, NewsRecord, NewsValidationError};
use crate::repo::news_repo::{NewsRepository, RepoError};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

pub type NewsServiceResult<T> = Result<T, NewsServiceError>;

/// Service error for news use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsServiceError {
    /// No record with the requested id.
    NotFound(NewsId),
    /// Submitted title or text exceeds its limit.
    InvalidInput(NewsValidationError),
    /// Storage-layer failure.
    Repo(RepoError),
}

impl NewsServiceError {
    /// HTTP-style status category for boundary layers.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Repo(_) => 500,
        }
    }
}

impl Display for NewsServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "news with id {id} not found"),
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NewsServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NewsValidationError> for NewsServiceError {
    fn from(value: NewsValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for NewsServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// In-memory news store over an injected repository.
pub struct NewsService<R: NewsRepository> {
    repo: R,
    limits: NewsLimits,
    next_id: AtomicU64,
    write_lock: Mutex<()>,
}

impl<R: NewsRepository> NewsService<R> {
    /// Creates an empty-counter service; the first created record gets id 1.
    pub fn new(repo: R, limits: NewsLimits) -> Self {
        Self {
            repo,
            limits,
            next_id: AtomicU64::new(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn limits(&self) -> NewsLimits {
        self.limits
    }

    /// Number of currently stored records.
    pub fn len(&self) -> NewsServiceResult<usize> {
        Ok(self.repo.len()?)
    }

    pub fn is_empty(&self) -> NewsServiceResult<bool> {
        Ok(self.repo.is_empty()?)
    }

    /// Gets one record by id.
    pub fn get_by_id(&self, id: NewsId) -> NewsServiceResult<NewsRecord> {
        match self.repo.get(id)? {
            Some(record) => {
                info!("event=news_get module=news_service status=ok id={id}");
                Ok(record)
            }
            None => {
                info!("event=news_get module=news_service status=error reason=not_found id={id}");
                Err(NewsServiceError::NotFound(id))
            }
        }
    }

    /// Returns an owned snapshot of every stored record, in no particular order.
    pub fn get_all(&self) -> NewsServiceResult<Vec<NewsRecord>> {
        let records = self.repo.get_all()?;
        info!(
            "event=news_list module=news_service status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    /// Validates and stores a new record.
    ///
    /// # Contract
    /// - Any `id` in `payload` is ignored.
    /// - Validation runs before an id is consumed, so rejected input does not
    ///   leave gaps in the id sequence.
    /// - Returns the stored record with its assigned `id` and `date`.
    pub fn create(&self, payload: NewsPayload) -> NewsServiceResult<NewsRecord> {
        let _guard = self.lock_writes()?;
        self.validate("news_create", None, &payload)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = NewsRecord {
            id,
            title: payload.title,
            text: payload.text,
            date: Utc::now(),
        };
        self.repo.put(record.clone())?;

        info!("event=news_create module=news_service status=ok id={id}");
        Ok(record)
    }

    /// Replaces an existing record wholesale.
    ///
    /// # Contract
    /// - `NotFound` is checked before validation.
    /// - The stored id is always `id`, whatever `payload.id` says.
    /// - `date` is refreshed to the current time.
    pub fn update(&self, id: NewsId, payload: NewsPayload) -> NewsServiceResult<NewsRecord> {
        let _guard = self.lock_writes()?;
        if self.repo.get(id)?.is_none() {
            info!("event=news_update module=news_service status=error reason=not_found id={id}");
            return Err(NewsServiceError::NotFound(id));
        }
        self.validate("news_update", Some(id), &payload)?;

        let record = NewsRecord {
            id,
            title: payload.title,
            text: payload.text,
            date: Utc::now(),
        };
        self.repo.put(record.clone())?;

        info!("event=news_update module=news_service status=ok id={id}");
        Ok(record)
    }

    /// Deletes one record by id. Deleting twice fails with `NotFound`.
    pub fn delete_by_id(&self, id: NewsId) -> NewsServiceResult<()> {
        let _guard = self.lock_writes()?;
        if self.repo.remove(id)?.is_none() {
            info!("event=news_delete module=news_service status=error reason=not_found id={id}");
            return Err(NewsServiceError::NotFound(id));
        }

        info!("event=news_delete module=news_service status=ok id={id}");
        Ok(())
    }

    fn validate(
        &self,
        event: &str,
        id: Option<NewsId>,
        payload: &NewsPayload,
    ) -> NewsServiceResult<()> {
        self.limits
            .validate(&payload.title, &payload.text)
            .map_err(|err| {
                let NewsValidationError::TooLong { field, length, max } = &err;
                info!(
                    "event={event} module=news_service status=error reason=too_long field={field} length={length} max={max} id={}",
                    id.map_or_else(|| "-".to_string(), |id| id.to_string())
                );
                NewsServiceError::from(err)
            })
    }

    fn lock_writes(&self) -> NewsServiceResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| {
            warn!("event=news_write_lock module=news_service status=error reason=poisoned");
            NewsServiceError::Repo(RepoError::LockPoisoned("write_lock"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NewsService, NewsServiceError};
    use crate::model::news::{NewsField, NewsLimits, NewsPayload};
    use crate::repo::news_repo::{InMemoryNewsRepository, RepoError};

    fn service() -> NewsService<InMemoryNewsRepository> {
        NewsService::new(InMemoryNewsRepository::new(), NewsLimits::new(10, 20))
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(NewsServiceError::NotFound(3).status_code(), 404);

        let invalid = service()
            .create(NewsPayload::new("a title that is too long", "ok"))
            .unwrap_err();
        assert_eq!(invalid.status_code(), 400);

        let repo = NewsServiceError::Repo(RepoError::LockPoisoned("get"));
        assert_eq!(repo.status_code(), 500);
    }

    #[test]
    fn not_found_message_carries_id() {
        let err = service().get_by_id(42).unwrap_err();
        assert_eq!(err.to_string(), "news with id 42 not found");
    }

    #[test]
    fn rejected_create_does_not_consume_an_id() {
        let service = service();
        service
            .create(NewsPayload::new("ok", "x".repeat(21)))
            .unwrap_err();

        let created = service.create(NewsPayload::new("ok", "ok")).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn update_checks_existence_before_validation() {
        let err = service()
            .update(5, NewsPayload::new("a title that is too long", "ok"))
            .unwrap_err();
        assert_eq!(err, NewsServiceError::NotFound(5));
    }

    #[test]
    fn update_rejects_long_text_and_keeps_old_record() {
        let service = service();
        let created = service.create(NewsPayload::new("title", "text")).unwrap();

        let err = service
            .update(created.id, NewsPayload::new("title", "y".repeat(21)))
            .unwrap_err();
        assert!(
            matches!(&err, NewsServiceError::InvalidInput(inner) if inner.field() == NewsField::Text)
        );
        assert_eq!(service.get_by_id(created.id).unwrap(), created);
    }
}
