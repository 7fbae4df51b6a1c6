//! Error types for tag parsing and validation.

use thiserror::Error;

use crate::Kind;

/// Errors produced when a string cannot become a tag.
///
/// Exactly one variant is returned per failure, and every variant keeps the
/// offending input so callers can branch on the variant instead of matching
/// message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The input is not of the form `<kind>-<id>`.
    #[error("tags must be in the \"<kind>-<id>\" format, got {tag:?}")]
    Format { tag: String },

    /// The input is well formed but names a kind outside the registry.
    #[error("{tag:?} is not a valid tag: unsupported tag kind {kind:?}")]
    UnsupportedKind { tag: String, kind: String },

    /// The kind is known but the id does not satisfy its grammar.
    #[error("{tag:?} is not a valid {kind} tag: {source}")]
    Invalid {
        tag: String,
        kind: Kind,
        #[source]
        source: IdError,
    },
}

impl TagError {
    /// Returns true if the input lacked the `<kind>-<id>` shape.
    pub fn is_format(&self) -> bool {
        matches!(self, TagError::Format { .. })
    }

    /// Returns true if the kind was not in the registry.
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, TagError::UnsupportedKind { .. })
    }

    /// Returns true if the id failed its kind's grammar.
    pub fn is_invalid(&self) -> bool {
        matches!(self, TagError::Invalid { .. })
    }

    /// The raw input that was rejected.
    pub fn tag(&self) -> &str {
        match self {
            TagError::Format { tag }
            | TagError::UnsupportedKind { tag, .. }
            | TagError::Invalid { tag, .. } => tag,
        }
    }

    /// The kind the input was checked against, when one was recognized.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            TagError::Invalid { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Grammar-level causes for an invalid id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id is empty.
    #[error("id cannot be empty")]
    Empty,

    /// The id does not match the kind's grammar.
    #[error("id does not match the {0} grammar")]
    Grammar(Kind),

    /// The id is not a UUID.
    #[error("invalid UUID: {0}")]
    Uuid(#[from] uuid::Error),

    /// The id parses as a UUID but is not in hyphenated form.
    #[error("UUID must be in hyphenated 8-4-4-4-12 form")]
    UuidForm,

    /// The id is not a canonical CIDR.
    #[error("invalid CIDR: {0}")]
    Cidr(String),

    /// The tag is valid but of a different kind than requested.
    #[error("expected a {expected} tag, got a {actual} tag")]
    WrongKind { expected: Kind, actual: Kind },
}
