//! Core domain logic for the news store.
//! This crate is the single source of truth for news validation and identity.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, TEXT_LENGTH_MAX_ENV, TITLE_LENGTH_MAX_ENV};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::news::{
    NewsField, NewsId, NewsLimits, NewsPayload, NewsRecord, NewsValidationError,
};
pub use repo::news_repo::{InMemoryNewsRepository, NewsRepository, RepoError, RepoResult};
pub use service::news_service::{NewsService, NewsServiceError, NewsServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
