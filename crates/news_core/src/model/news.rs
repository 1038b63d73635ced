//! News domain model.
//!
//! # Responsibility
//! - Define the stored news record and the client-submitted payload.
//! - Own field length limits and their validation.
//!
//! # Invariants
//! - `id` and `date` on a stored record are assigned by the store only.
//! - Stored `title`/`text` never exceed the configured limits.
//! - Lengths are counted in UTF-16 code units, so characters outside the
//!   Basic Multilingual Plane count twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned numeric identifier of a news record.
pub type NewsId = u64;

/// Canonical stored news record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Positive, unique within one store.
    pub id: NewsId,
    pub title: String,
    pub text: String,
    /// Time of the most recent create or update.
    pub date: DateTime<Utc>,
}

/// Client input for create/update.
///
/// `id` is accepted on the wire for compatibility but never trusted: the
/// store assigns ids on create and uses the path id on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPayload {
    #[serde(default)]
    pub id: Option<NewsId>,
    pub title: String,
    pub text: String,
}

impl NewsPayload {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Length-validated field of a news record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsField {
    Title,
    Text,
}

impl NewsField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
        }
    }
}

impl Display for NewsField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for submitted news fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsValidationError {
    /// `field` is `length` UTF-16 units long, above the allowed `max`.
    TooLong {
        field: NewsField,
        length: usize,
        max: usize,
    },
}

impl NewsValidationError {
    /// Returns the field that violated its constraint.
    pub fn field(&self) -> NewsField {
        match self {
            Self::TooLong { field, .. } => *field,
        }
    }
}

impl Display for NewsValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong { field, length, max } => {
                write!(f, "{field} is too long ({length} > {max})")
            }
        }
    }
}

impl Error for NewsValidationError {}

/// Maximum field lengths, fixed for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsLimits {
    pub max_title_length: usize,
    pub max_text_length: usize,
}

impl NewsLimits {
    pub fn new(max_title_length: usize, max_text_length: usize) -> Self {
        Self {
            max_title_length,
            max_text_length,
        }
    }

    /// Checks `title` first, then `text`, and reports the first violation.
    pub fn validate(&self, title: &str, text: &str) -> Result<(), NewsValidationError> {
        check_length(NewsField::Title, title, self.max_title_length)?;
        check_length(NewsField::Text, text, self.max_text_length)
    }
}

fn check_length(field: NewsField, value: &str, max: usize) -> Result<(), NewsValidationError> {
    let length = value.encode_utf16().count();
    if length > max {
        return Err(NewsValidationError::TooLong { field, length, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewsField, NewsLimits, NewsValidationError};

    #[test]
    fn validate_accepts_values_at_the_limit() {
        let limits = NewsLimits::new(3, 5);
        assert!(limits.validate("abc", "abcde").is_ok());
        assert!(limits.validate("", "").is_ok());
    }

    #[test]
    fn validate_reports_title_before_text() {
        let limits = NewsLimits::new(1, 1);
        let err = limits.validate("too long", "also too long").unwrap_err();
        assert_eq!(err.field(), NewsField::Title);
    }

    #[test]
    fn validate_counts_utf16_units_not_bytes() {
        let limits = NewsLimits::new(6, 10);
        assert!(limits.validate("новост", "ok").is_ok());

        let err = limits.validate("новости", "ok").unwrap_err();
        assert_eq!(
            err,
            NewsValidationError::TooLong {
                field: NewsField::Title,
                length: 7,
                max: 6,
            }
        );
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        let limits = NewsLimits::new(5, 4);
        assert!(limits.validate("😀😀", "ok").is_ok());

        let err = limits.validate("😀😀😀", "ok").unwrap_err();
        assert_eq!(
            err,
            NewsValidationError::TooLong {
                field: NewsField::Title,
                length: 6,
                max: 5,
            }
        );

        let err = limits.validate("ok", "a😀😀").unwrap_err();
        assert_eq!(err.field(), NewsField::Text);
    }

    #[test]
    fn error_message_names_the_field() {
        let err = NewsLimits::new(10, 2).validate("fine", "abc").unwrap_err();
        assert_eq!(err.to_string(), "text is too long (3 > 2)");
    }
}
