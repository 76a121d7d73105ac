//! Passphrase auth-token envelope codec (C3)
//!
//! Bit-exact, little-endian wire format:
//!
//! ```text
//! offset  size  field
//! 0       4     algorithm id (u32)
//! 4       4     iv length (u32)
//! 8       4     auth tag length (u32)
//! 12      4     message length (u32)
//! 16      4     kdf context length (u32)
//! 20      ivL   iv bytes
//! 20+ivL  tagL  tag bytes
//! ...     kdfL  kdf context bytes
//! ```
//!
//! Two write passes are required because the fixed envelope names the
//! KDF-context size before the KDF context itself exists: callers write
//! the envelope plus IV/tag via [`write`], then write the KDF context
//! into the slot [`HeaderFields::kdf_context_offset`] reports, via
//! [`crate::kdf_context::write`]. [`HeaderFields::size`] is the contract
//! both the write side and the caller's buffer-size probe rely on; a
//! mismatch between it and the bytes actually written is a fatal
//! internal bug, never a recoverable error.

use crate::error::{Result, SecureCellError};

/// Size of the fixed-width envelope preceding the variable-length fields.
pub const FIXED_ENVELOPE_LEN: usize = 20;

/// The fields needed to write a passphrase auth-token envelope. IV and
/// tag are borrowed from the pipeline's stack frame; only their lengths
/// and the KDF context's length are embedded in the fixed envelope.
pub struct HeaderFields<'a> {
    /// Algorithm identifier (see [`crate::algorithm`])
    pub algorithm: u32,
    /// IV used for this message
    pub iv: &'a [u8],
    /// Authentication tag produced by the AEAD
    pub tag: &'a [u8],
    /// Declared plaintext length
    pub message_len: u32,
    /// Size in bytes of the KDF context that will be written into the
    /// reserved slot after [`write`] returns
    pub kdf_context_len: usize,
}

impl<'a> HeaderFields<'a> {
    /// Exact serialized size of the full token (envelope + iv + tag + kdf
    /// context). The pipeline trusts this equality; any drift between
    /// this value and what gets written is a fatal internal error.
    pub fn size(&self) -> usize {
        FIXED_ENVELOPE_LEN + self.iv.len() + self.tag.len() + self.kdf_context_len
    }

    /// Byte offset, within a buffer sized by [`Self::size`], where the
    /// KDF context must be written after [`write`] returns.
    pub fn kdf_context_offset(&self) -> usize {
        FIXED_ENVELOPE_LEN + self.iv.len() + self.tag.len()
    }
}

/// Write the envelope, IV and tag into `buf`. Leaves the KDF-context slot
/// (`buf[hdr.kdf_context_offset()..]`) untouched — the caller writes the
/// KDF context into it separately.
///
/// Returns [`SecureCellError::BufferTooSmall`] if `buf.len() < hdr.size()`.
pub fn write(hdr: &HeaderFields, buf: &mut [u8]) -> Result<()> {
    let size = hdr.size();
    if buf.len() < size {
        return Err(SecureCellError::BufferTooSmall);
    }
    buf[0..4].copy_from_slice(&hdr.algorithm.to_le_bytes());
    buf[4..8].copy_from_slice(&(hdr.iv.len() as u32).to_le_bytes());
    buf[8..12].copy_from_slice(&(hdr.tag.len() as u32).to_le_bytes());
    buf[12..16].copy_from_slice(&hdr.message_len.to_le_bytes());
    buf[16..20].copy_from_slice(&(hdr.kdf_context_len as u32).to_le_bytes());

    let iv_start = FIXED_ENVELOPE_LEN;
    let iv_end = iv_start + hdr.iv.len();
    buf[iv_start..iv_end].copy_from_slice(hdr.iv);

    let tag_end = iv_end + hdr.tag.len();
    buf[iv_end..tag_end].copy_from_slice(hdr.tag);

    Ok(())
}

/// A token header parsed out of a buffer. IV, tag and KDF context are
/// aliased slices into that buffer — nothing here is copied.
#[derive(Debug, Clone, Copy)]
pub struct ParsedToken<'a> {
    /// Algorithm identifier, not yet validated
    pub algorithm: u32,
    /// IV bytes, borrowed from the token buffer
    pub iv: &'a [u8],
    /// Authentication tag bytes, borrowed from the token buffer
    pub tag: &'a [u8],
    /// Declared plaintext length
    pub message_len: u32,
    /// KDF context bytes, borrowed from the token buffer
    pub kdf_context: &'a [u8],
}

fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
}

/// Full parse: validates the declared field lengths against the buffer's
/// actual size and returns a [`ParsedToken`] aliasing into `buf`. Fails
/// with [`SecureCellError::CorruptedToken`] on any framing error.
pub fn read(buf: &[u8]) -> Result<ParsedToken<'_>> {
    if buf.len() < FIXED_ENVELOPE_LEN {
        return Err(SecureCellError::corrupted_token(
            "token shorter than fixed envelope",
        ));
    }

    let algorithm = read_u32(buf, 0);
    let iv_len = read_u32(buf, 4) as usize;
    let tag_len = read_u32(buf, 8) as usize;
    let message_len = read_u32(buf, 12);
    let kdf_context_len = read_u32(buf, 16) as usize;

    let iv_start = FIXED_ENVELOPE_LEN;
    let iv_end = iv_start
        .checked_add(iv_len)
        .ok_or_else(|| SecureCellError::corrupted_token("iv length overflow"))?;
    let tag_end = iv_end
        .checked_add(tag_len)
        .ok_or_else(|| SecureCellError::corrupted_token("tag length overflow"))?;
    let kdf_end = tag_end
        .checked_add(kdf_context_len)
        .ok_or_else(|| SecureCellError::corrupted_token("kdf context length overflow"))?;

    if buf.len() != kdf_end {
        return Err(SecureCellError::corrupted_token(
            "declared field lengths do not add up to the token's actual size",
        ));
    }

    Ok(ParsedToken {
        algorithm,
        iv: &buf[iv_start..iv_end],
        tag: &buf[iv_end..tag_end],
        message_len,
        kdf_context: &buf[tag_end..kdf_end],
    })
}

/// Shallow parse used by the buffer-size negotiation (C6): returns only
/// the declared message length, without validating the rest of the
/// token's framing. Used to answer decrypt sizing probes cheaply.
pub fn message_size(buf: &[u8]) -> Result<u32> {
    if buf.len() < FIXED_ENVELOPE_LEN {
        return Err(SecureCellError::corrupted_token(
            "token shorter than fixed envelope",
        ));
    }
    Ok(read_u32(buf, 12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let iv = [1u8; 12];
        let tag = [2u8; 16];
        let kdf_ctx = [3u8; 24];
        let hdr = HeaderFields {
            algorithm: 0xdead_beef,
            iv: &iv,
            tag: &tag,
            message_len: 5,
            kdf_context_len: kdf_ctx.len(),
        };
        let mut buf = vec![0u8; hdr.size()];
        write(&hdr, &mut buf).unwrap();
        let slot = hdr.kdf_context_offset();
        buf[slot..].copy_from_slice(&kdf_ctx);

        let parsed = read(&buf).unwrap();
        assert_eq!(parsed.algorithm, 0xdead_beef);
        assert_eq!(parsed.iv, &iv[..]);
        assert_eq!(parsed.tag, &tag[..]);
        assert_eq!(parsed.message_len, 5);
        assert_eq!(parsed.kdf_context, &kdf_ctx[..]);

        assert_eq!(message_size(&buf).unwrap(), 5);
    }

    #[test]
    fn write_reports_buffer_too_small() {
        let hdr = HeaderFields {
            algorithm: 0,
            iv: &[0u8; 12],
            tag: &[0u8; 16],
            message_len: 0,
            kdf_context_len: 8,
        };
        let mut buf = vec![0u8; hdr.size() - 1];
        assert!(matches!(
            write(&hdr, &mut buf),
            Err(SecureCellError::BufferTooSmall)
        ));
    }

    #[test]
    fn read_rejects_truncated_token() {
        let iv = [1u8; 12];
        let tag = [2u8; 16];
        let hdr = HeaderFields {
            algorithm: 1,
            iv: &iv,
            tag: &tag,
            message_len: 1,
            kdf_context_len: 8,
        };
        let mut buf = vec![0u8; hdr.size()];
        write(&hdr, &mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        assert!(read(&buf).is_err());
    }

    #[test]
    fn message_size_is_shallow() {
        // Garbage past the fixed envelope must not stop a shallow probe.
        let mut buf = vec![0u8; FIXED_ENVELOPE_LEN];
        buf[12..16].copy_from_slice(&42u32.to_le_bytes());
        assert_eq!(message_size(&buf).unwrap(), 42);
    }
}
