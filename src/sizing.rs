//! Buffer-size negotiation (C6)
//!
//! The two-phase contract shared by [`crate::encrypt`] and
//! [`crate::decrypt`]: if the caller's output buffers are missing or
//! undersized, the operation does not run — required sizes are reported
//! back and [`crate::SecureCellError::BufferTooSmall`] is returned
//! instead. The contract is idempotent: computing these sizes touches no
//! randomness, no token bytes beyond a shallow parse, and performs no
//! AEAD or KDF work.

use crate::config::{IV_LEN, SALT_LEN, TAG_LEN};
use crate::error::Result;
use crate::kdf_context;
use crate::token::{self, FIXED_ENVELOPE_LEN};

/// Upper bound on the serialized size of a token produced by the default
/// algorithm. Exact today (there is only one default algorithm, so its
/// IV/tag/salt lengths are all fixed constants) but framed as an upper
/// bound because a future default with larger fields must never cause
/// this to under-report.
pub fn max_token_size() -> usize {
    FIXED_ENVELOPE_LEN + IV_LEN + TAG_LEN + kdf_context::serialized_len(SALT_LEN)
}

/// Required output sizes for an encrypt call: `(token_len, ciphertext_len)`.
/// The ciphertext is never padded, so its required size is always exactly
/// `message_len`.
pub fn encrypt_required_sizes(message_len: usize) -> (usize, usize) {
    (max_token_size(), message_len)
}

/// Required message-buffer size for a decrypt call, read via a shallow
/// parse of the token (C3's `message_size`). Does not validate the rest
/// of the token's framing.
pub fn decrypt_required_size(token: &[u8]) -> Result<usize> {
    token::message_size(token).map(|len| len as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probing_is_idempotent() {
        let a = encrypt_required_sizes(42);
        let b = encrypt_required_sizes(42);
        assert_eq!(a, b);
    }

    #[test]
    fn max_token_size_is_stable() {
        assert_eq!(max_token_size(), max_token_size());
        assert!(max_token_size() > 0);
    }
}
