//! Fixed parameters for new passphrase-mode tokens, and the one local,
//! non-negotiated override a caller may apply to them.
//!
//! Mirrors `cryypt_key::api::key_generator::derive::KdfConfig`'s preset
//! pattern, but scoped down: this crate does not expose KDF *algorithm*
//! choice (spec fixes PBKDF2-HMAC-SHA256) or salt-length choice (spec
//! fixes the salt length for new tokens), only the iteration count, and
//! only for encrypt — decrypt always uses whatever iteration count the
//! token declares.

/// PBKDF2 iteration count used for every newly encrypted token unless
/// overridden via [`EncryptOptions`].
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length, in bytes, drawn fresh for every encrypt call.
pub const SALT_LEN: usize = 16;

/// IV length, in bytes, for the default algorithm (AES-GCM).
pub const IV_LEN: usize = 12;

/// Authentication tag length, in bytes, for the default algorithm (AES-GCM).
pub const TAG_LEN: usize = 16;

/// Local override of the PBKDF2 iteration count used by [`crate::encrypt`].
///
/// This is not parameter negotiation with a peer — it never changes what
/// a decrypt call accepts, since decrypt always reads the iteration count
/// back out of the token. It exists so test suites and benchmarks can
/// trade off the KDF's cost without touching the wire format or the
/// production default.
#[derive(Debug, Clone, Copy)]
pub struct EncryptOptions {
    /// PBKDF2 iteration count to use for this encrypt call
    pub pbkdf2_iterations: u32,
}

impl Default for EncryptOptions {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}
