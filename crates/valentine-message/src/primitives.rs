//! Constrained string types shared by every message schema.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use thiserror::Error;
use url::Url;

use crate::error::IssueKind;
use crate::types::MAX_TEXT_LENGTH;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("Text is required.")]
    EmptyText,

    #[error("Text is too long.")]
    TextTooLong,

    #[error("URL is required.")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL must be absolute and include a host.")]
    MissingHost,
}

impl PrimitiveError {
    pub fn kind(&self) -> IssueKind {
        match self {
            PrimitiveError::TextTooLong => IssueKind::Range,
            _ => IssueKind::Shape,
        }
    }
}

/// User-authored prose, 1 to 256 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn new(input: impl Into<String>) -> Result<Self, PrimitiveError> {
        validate_non_empty_text(input.into())
    }

    /// For compile-time constants known to satisfy the bounds.
    pub(crate) fn from_static(text: &'static str) -> Self {
        debug_assert!(!text.is_empty() && text.chars().count() <= MAX_TEXT_LENGTH);
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn validate_non_empty_text(input: String) -> Result<NonEmptyText, PrimitiveError> {
    if input.is_empty() {
        return Err(PrimitiveError::EmptyText);
    }
    if input.chars().count() > MAX_TEXT_LENGTH {
        return Err(PrimitiveError::TextTooLong);
    }
    Ok(NonEmptyText(input))
}

/// An absolute URL, kept exactly as the author wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlString {
    raw: String,
    parsed: Url,
}

impl UrlString {
    pub fn new(input: impl Into<String>) -> Result<Self, PrimitiveError> {
        validate_url_string(input.into())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

pub fn validate_url_string(input: String) -> Result<UrlString, PrimitiveError> {
    if input.is_empty() {
        return Err(PrimitiveError::EmptyUrl);
    }
    let parsed = Url::parse(&input).map_err(|e| PrimitiveError::InvalidUrl(e.to_string()))?;
    if !parsed.has_host() {
        return Err(PrimitiveError::MissingHost);
    }
    Ok(UrlString { raw: input, parsed })
}

impl Serialize for UrlString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl Deref for NonEmptyText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Deref for UrlString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UrlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<&str> for NonEmptyText {
    type Error = PrimitiveError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UrlString {
    type Error = PrimitiveError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
