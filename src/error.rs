//! Error types for mirror
//!
//! Data-shape problems (a failing accessor, a name that is not a valid element
//! name) are normally absorbed by the traversal and never reach the caller.
//! What does surface is sink I/O, builder misuse, and member failures when the
//! caller opted into [`MemberErrorPolicy::Fail`](crate::policy::MemberErrorPolicy::Fail).

use std::io;
use thiserror::Error;

/// Failure raised while invoking a single accessor
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The value does not expose an accessor with this name
    #[error("no accessor named `{0}`")]
    NoSuchAccessor(String),
    /// The accessor exists but may not be called on this value
    #[error("accessor `{0}` is not accessible")]
    Inaccessible(String),
    /// The accessor ran and reported a failure of its own
    #[error("accessor raised: {0}")]
    Raised(String),
}

impl AccessError {
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised(message.into())
    }
}

/// Main error type for mirror
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to write to sink: {0}")]
    Io(#[from] io::Error),

    #[error("accessor `{accessor}` on `{type_path}` failed: {source}")]
    Member {
        type_path: &'static str,
        accessor: String,
        #[source]
        source: AccessError,
    },

    #[error("attribute list must hold key/value pairs, got {count} entries")]
    OddAttributeCount { count: usize },

    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for mirror
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_display() {
        let err = AccessError::NoSuchAccessor("getName".to_string());
        assert_eq!(err.to_string(), "no accessor named `getName`");

        let err = AccessError::raised("boom");
        assert_eq!(err.to_string(), "accessor raised: boom");
    }

    #[test]
    fn test_member_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Member {
            type_path: "app::Menu",
            accessor: "getIcon".to_string(),
            source: AccessError::Inaccessible("getIcon".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("getIcon"));
        assert!(display.contains("app::Menu"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("failed to write to sink"));
    }
}
