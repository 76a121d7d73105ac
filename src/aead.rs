//! The "plain AEAD" external collaborator (spec §1): AES in Galois/Counter
//! Mode, dispatched over the three key lengths spec's algorithm identifier
//! can name. Callers are responsible for deriving the key themselves and
//! passing `algorithm::strip_kdf(alg)` downstream conceptually — this
//! module never derives or re-derives a key, it only runs the cipher.

use aes::Aes192;
use aes_gcm::aead::generic_array::{typenum::U12, GenericArray};
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};

use crate::error::{Result, SecureCellError};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encrypt `msg` with `key` (16/24/32 bytes), `iv` (12 bytes) and `aad`,
/// returning ciphertext with the authentication tag appended.
pub fn encrypt(key: &[u8], iv: &[u8], aad: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
    let nonce = GenericArray::from_slice(iv);
    let payload = Payload { msg, aad };
    match key.len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-128 key: {e}")))?;
            cipher
                .encrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-128-GCM encryption failed"))
        }
        24 => {
            let cipher = Aes192Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-192 key: {e}")))?;
            cipher
                .encrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-192-GCM encryption failed"))
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-256 key: {e}")))?;
            cipher
                .encrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-256-GCM encryption failed"))
        }
        other => Err(SecureCellError::generic_failure(format!(
            "unsupported key length: {other} bytes"
        ))),
    }
}

/// Decrypt `ciphertext_and_tag` with `key` (16/24/32 bytes), `iv` (12
/// bytes) and `aad`. Authentication failure and any other AEAD-level
/// failure are both reported as [`SecureCellError::GenericFailure`].
pub fn decrypt(key: &[u8], iv: &[u8], aad: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>> {
    let nonce = GenericArray::from_slice(iv);
    let payload = Payload {
        msg: ciphertext_and_tag,
        aad,
    };
    match key.len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-128 key: {e}")))?;
            cipher
                .decrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-128-GCM authentication failed"))
        }
        24 => {
            let cipher = Aes192Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-192 key: {e}")))?;
            cipher
                .decrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-192-GCM authentication failed"))
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(key)
                .map_err(|e| SecureCellError::generic_failure(format!("invalid AES-256 key: {e}")))?;
            cipher
                .decrypt(nonce, payload)
                .map_err(|_| SecureCellError::generic_failure("AES-256-GCM authentication failed"))
        }
        other => Err(SecureCellError::generic_failure(format!(
            "unsupported key length: {other} bytes"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_each_key_length() {
        for key_len in [16usize, 24, 32] {
            let key = vec![0x42u8; key_len];
            let iv = [0x11u8; 12];
            let aad = b"context";
            let msg = b"hello, world";
            let ct = encrypt(&key, &iv, aad, msg).unwrap();
            let pt = decrypt(&key, &iv, aad, &ct).unwrap();
            assert_eq!(pt, msg);
        }
    }

    #[test]
    fn wrong_key_fails() {
        let key = vec![0x42u8; 32];
        let wrong = vec![0x43u8; 32];
        let iv = [0x11u8; 12];
        let ct = encrypt(&key, &iv, b"", b"data").unwrap();
        assert!(decrypt(&wrong, &iv, b"", &ct).is_err());
    }
}
