//! Error types for projectlink-core

use thiserror::Error;

/// Result type alias for projectlink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for projectlink operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed owner type, empty owner name or empty required field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Template project URL does not have the expected shape
    #[error("Invalid project URL: {0}")]
    InvalidProjectUrl(String),

    /// Triggering event lacks the repository owner or issue/PR context
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Lookup target does not exist on the platform
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error reported by the project platform (GraphQL `errors`, bad shape)
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid glob pattern
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// GitHub event parsing error
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Runtime error (Tokio)
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<globset::Error> for Error {
    fn from(err: globset::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

/// Fieldless error category for cheap pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Invalid input error
    InvalidInput,
    /// Invalid project URL error
    InvalidProjectUrl,
    /// Missing event context
    PreconditionFailed,
    /// Lookup miss
    NotFound,
    /// Platform reported failure
    Upstream,
    /// HTTP transport error
    Http,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Glob pattern error
    Pattern,
    /// GitHub event parsing error
    EventParse,
    /// I/O operation error
    Io,
    /// Runtime error
    Runtime,
}

impl Error {
    /// Get the error kind. Zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::InvalidProjectUrl(_) => ErrorKind::InvalidProjectUrl,
            Error::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Upstream(_) => ErrorKind::Upstream,
            Error::Http(_) => ErrorKind::Http,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Pattern(_) => ErrorKind::Pattern,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Borrow the error message without the category prefix.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidInput(msg)
            | Error::InvalidProjectUrl(msg)
            | Error::PreconditionFailed(msg)
            | Error::NotFound(msg)
            | Error::Upstream(msg)
            | Error::Http(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Pattern(msg)
            | Error::EventParse(msg)
            | Error::Runtime(msg) => msg,
            Error::Io(_) => "I/O error",
        }
    }

    /// Whether this is a lookup miss.
    ///
    /// The linker recovers from a missing template project by creating a
    /// blank one.
    #[inline]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::InvalidInput("test".to_string());
        let k = err.kind();
        let k2 = k;
        assert_eq!(k, k2);
    }

    #[test]
    fn test_error_kind_repr_u8() {
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_error_message_borrows() {
        let err = Error::InvalidProjectUrl("bad url".to_string());
        let msg: &str = err.message();
        assert_eq!(msg, "bad url");
    }

    #[test]
    fn test_display_has_category_prefix() {
        let err = Error::PreconditionFailed("missing repository owner".into());
        assert_eq!(err.to_string(), "Precondition failed: missing repository owner");
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::InvalidInput("i".into()), ErrorKind::InvalidInput),
            (
                Error::InvalidProjectUrl("u".into()),
                ErrorKind::InvalidProjectUrl,
            ),
            (
                Error::PreconditionFailed("p".into()),
                ErrorKind::PreconditionFailed,
            ),
            (Error::NotFound("n".into()), ErrorKind::NotFound),
            (Error::Upstream("up".into()), ErrorKind::Upstream),
            (Error::Http("h".into()), ErrorKind::Http),
            (
                Error::RateLimitExceeded("rl".into()),
                ErrorKind::RateLimitExceeded,
            ),
            (Error::Pattern("pat".into()), ErrorKind::Pattern),
            (Error::EventParse("ep".into()), ErrorKind::EventParse),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
            (Error::Runtime("r".into()), ErrorKind::Runtime),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_only_not_found_is_recoverable() {
        assert!(Error::NotFound("project 3".into()).is_not_found());
        assert!(!Error::Upstream("boom".into()).is_not_found());
        assert!(!Error::Http("timeout".into()).is_not_found());
    }

    #[test]
    fn test_globset_error_maps_to_pattern() {
        let err: Error = globset::Glob::new("release/[").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Pattern);
    }
}
