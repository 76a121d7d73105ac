//! PBKDF2 KDF-context codec (C2)
//!
//! Serializes/deserializes the PBKDF2 parameters embedded in every
//! passphrase auth-token: a 32-bit iteration count followed by a
//! length-prefixed salt.
//!
//! ```text
//! offset  size  field
//! 0       4     iteration count (u32, little-endian)
//! 4       4     salt length (u32, little-endian)
//! 8       ..    salt bytes
//! ```

use crate::error::{Result, SecureCellError};

const FIXED_PREFIX_LEN: usize = 8;

/// Size in bytes of a serialized KDF context carrying a salt of `salt_len`
/// bytes.
pub fn serialized_len(salt_len: usize) -> usize {
    FIXED_PREFIX_LEN + salt_len
}

/// Write the KDF context (iteration count, salt) into `buf`.
///
/// `buf` must be exactly [`serialized_len`]`(salt.len())` bytes — callers
/// own the size accounting (the token header codec reserves the slot),
/// so a length mismatch here is an internal bug, not a recoverable error.
pub fn write(buf: &mut [u8], iterations: u32, salt: &[u8]) {
    // Fatal, not debug-only (spec §4.3/§9): callers own the size
    // accounting for this slot, so a mismatch here means the token
    // header codec reserved the wrong number of bytes.
    assert_eq!(buf.len(), serialized_len(salt.len()));
    buf[0..4].copy_from_slice(&iterations.to_le_bytes());
    buf[4..8].copy_from_slice(&(salt.len() as u32).to_le_bytes());
    buf[8..].copy_from_slice(salt);
}

/// A parsed KDF context borrowing its salt from the token buffer it was
/// read out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfContext<'a> {
    /// PBKDF2 iteration count
    pub iterations: u32,
    /// PBKDF2 salt, aliased into the caller's buffer
    pub salt: &'a [u8],
}

/// Parse a KDF context out of `buf`. Any salt length that parses is
/// accepted here — validation that it matches the encrypt-time constant
/// is a caller concern; decrypt must tolerate other lengths since they
/// get fed verbatim into PBKDF2 regardless.
pub fn read(buf: &[u8]) -> Result<KdfContext<'_>> {
    if buf.len() < FIXED_PREFIX_LEN {
        return Err(SecureCellError::corrupted_token(
            "kdf context shorter than fixed prefix",
        ));
    }
    let iterations = u32::from_le_bytes(buf[0..4].try_into().unwrap());
    let salt_len = u32::from_le_bytes(buf[4..8].try_into().unwrap()) as usize;
    let salt_end = FIXED_PREFIX_LEN
        .checked_add(salt_len)
        .ok_or_else(|| SecureCellError::corrupted_token("kdf context salt length overflow"))?;
    if buf.len() != salt_end {
        return Err(SecureCellError::corrupted_token(
            "kdf context declared salt length does not match available bytes",
        ));
    }
    Ok(KdfContext {
        iterations,
        salt: &buf[FIXED_PREFIX_LEN..salt_end],
    })
}
