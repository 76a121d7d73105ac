//! PBKDF2-HMAC-SHA256 key derivation, wrapped so the derived key is
//! always wiped when it drops.
//!
//! Invoked exactly once per encrypt/decrypt call (spec §1): the outer
//! pipeline derives the final key and hands it to the AEAD primitive
//! with its own KDF selector stripped (see [`crate::algorithm::strip_kdf`]),
//! so the AEAD layer never re-derives anything.
//!
//! The buffer is always sized for the maximum 256-bit case (spec §9,
//! "Maximum-key-size stack buffer on decrypt"): PBKDF2 output blocks
//! depend only on the block index, not on the requested output length,
//! so the first `key_len` bytes of a 32-byte derivation are identical to
//! a direct `key_len`-byte derivation. This avoids a variable-sized
//! allocation in the secret-handling path.

use sha2::Sha256;
use zeroize::Zeroizing;

/// Derive the maximum-size (32-byte) PBKDF2-HMAC-SHA256 output for
/// `passphrase`/`salt`/`iterations`. Callers take a `key_len`-byte prefix
/// for algorithms with a shorter key.
pub fn derive_key_max(passphrase: &[u8], salt: &[u8], iterations: u32) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut *key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_inputs() {
        let a = derive_key_max(b"hunter2", b"salt1234salt1234", 1_000);
        let b = derive_key_max(b"hunter2", b"salt1234salt1234", 1_000);
        assert_eq!(*a, *b);
    }

    #[test]
    fn differs_for_different_passphrase() {
        let a = derive_key_max(b"hunter2", b"salt1234salt1234", 1_000);
        let b = derive_key_max(b"hunter3", b"salt1234salt1234", 1_000);
        assert_ne!(*a, *b);
    }

    #[test]
    fn differs_for_different_salt() {
        let a = derive_key_max(b"hunter2", b"salt1234salt1234", 1_000);
        let b = derive_key_max(b"hunter2", b"saltsaltsaltsalt", 1_000);
        assert_ne!(*a, *b);
    }

    #[test]
    fn shorter_key_is_a_prefix_of_the_longer_one() {
        let full = derive_key_max(b"hunter2", b"salt1234salt1234", 1_000);
        let mut short = [0u8; 16];
        pbkdf2::pbkdf2_hmac::<Sha256>(b"hunter2", b"salt1234salt1234", 1_000, &mut short);
        assert_eq!(&full[..16], &short[..]);
    }
}
