//! Error types for password derivation.
//!
//! Every failure is an input problem the caller can fix and retry; nothing
//! here is transient. Secret material never appears in error messages.

use thiserror::Error;

/// Result type alias for derivation operations.
pub type Result<T> = std::result::Result<T, DerivationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("Empty master phrase")]
    EmptyMasterPhrase,

    #[error("Empty domain")]
    EmptyDomain,

    /// The requested length exceeds the encoded digest.
    #[error("Cannot generate password with so many symbols, the current limit is {max}")]
    PasswordTooLong { max: usize },

    /// The special-character suffix does not fit into the requested length.
    #[error("Password must be at least {min} characters long to include special characters")]
    TooShortForSpecialCharacters { min: usize },
}
