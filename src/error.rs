//! Error types for passphrase secure cell operations

use std::fmt;
use thiserror::Error;

/// Result type alias for secure cell operations
pub type Result<T> = std::result::Result<T, SecureCellError>;

/// Error taxonomy for passphrase-mode encrypt/decrypt.
///
/// `BufferTooSmall` is a recoverable sizing signal, not a failure: the
/// required size has already been written to the caller's out-length.
/// `CorruptedToken` and `GenericFailure` are deliberately not
/// distinguishable by callers of [`crate::decrypt`] beyond this enum —
/// authentication failure and structural parse failure both surface
/// through this same pair of variants, never as a more specific "bad MAC"
/// variant, so a caller can't use error specificity as a decryption
/// oracle.
#[derive(Error, Debug)]
pub enum SecureCellError {
    /// Precondition violated at the API edge: empty passphrase, empty
    /// message, zero-length (but non-absent) context, or a missing
    /// required out-length pointer. Never generated after the first
    /// primitive call.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An output buffer was absent or undersized. The required size has
    /// been written back to the corresponding out-length; the caller is
    /// expected to reallocate and retry.
    #[error("buffer too small")]
    BufferTooSmall,

    /// The token failed structural parse, declared reserved bits were
    /// nonzero, the declared KDF was not PBKDF2, the key length was not
    /// one of {128, 192, 256}, or the declared message length disagreed
    /// with the supplied ciphertext length.
    #[error("corrupted token: {0}")]
    CorruptedToken(String),

    /// A downstream primitive (CSPRNG, KDF, AEAD) failed, or
    /// authentication did not verify.
    #[error("operation failed: {0}")]
    GenericFailure(String),
}

impl SecureCellError {
    /// Build an `InvalidParameter` with a formatted message
    pub fn invalid_parameter(msg: impl fmt::Display) -> Self {
        Self::InvalidParameter(msg.to_string())
    }

    /// Build a `CorruptedToken` with a formatted message
    pub fn corrupted_token(msg: impl fmt::Display) -> Self {
        Self::CorruptedToken(msg.to_string())
    }

    /// Build a `GenericFailure` with a formatted message
    pub fn generic_failure(msg: impl fmt::Display) -> Self {
        Self::GenericFailure(msg.to_string())
    }

    /// True for the one variant that is a sizing signal rather than an error
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self, Self::BufferTooSmall)
    }
}
