//! Error types for PRNG construction.
//!
//! Generation never fails; every error here is raised while choosing or
//! constructing a generator.

use std::fmt;
use thiserror::Error;

/// An identifier that did not name one of the recognized algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownIdentifier {
    /// Numeric code from the external enumeration.
    Code(u32),
    /// Textual name, as read from a command line or configuration file.
    Name(String),
}

impl fmt::Display for UnknownIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownIdentifier::Code(code) => write!(f, "code {}", code),
            UnknownIdentifier::Name(name) => write!(f, "name `{}`", name),
        }
    }
}

/// Errors produced while selecting or constructing a generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrngError {
    /// The identifier does not match any recognized algorithm.
    #[error("unknown PRNG algorithm ({0})")]
    InvalidAlgorithm(UnknownIdentifier),

    /// The seed buffer's address/length pair is inconsistent.
    #[error("seed buffer contract violated: {0}")]
    SeedContractViolation(&'static str),

    /// Textual seed could not be decoded into bytes.
    #[error("malformed seed text `{text}`: {reason}")]
    MalformedSeed { text: String, reason: &'static str },

    /// The wrapped reference library refused to initialize.
    #[error("{library} failed to initialize: {reason}")]
    LibraryInit { library: &'static str, reason: String },

    /// A generator configuration could not be parsed.
    #[error("invalid generator configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PrngError>;

#[cfg(test)] mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_code() {
        let err = PrngError::InvalidAlgorithm(UnknownIdentifier::Code(42));
        assert_eq!(format!("{}", err), "unknown PRNG algorithm (code 42)");
    }

    #[test]
    fn test_display_invalid_name() {
        let err = PrngError::InvalidAlgorithm(UnknownIdentifier::Name("XORSHIFT".into()));
        assert_eq!(format!("{}", err), "unknown PRNG algorithm (name `XORSHIFT`)");
    }

    #[test]
    fn test_display_library_init() {
        let err = PrngError::LibraryInit { library: "ranlib", reason: "no handles left".into() };
        assert_eq!(format!("{}", err), "ranlib failed to initialize: no handles left");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            PrngError::SeedContractViolation("null"),
            PrngError::SeedContractViolation("null")
        );
        assert_ne!(
            PrngError::InvalidAlgorithm(UnknownIdentifier::Code(6)),
            PrngError::InvalidAlgorithm(UnknownIdentifier::Code(7))
        );
    }
}
