//! Decrypt pipeline (C5)

use zeroize::Zeroizing;

use crate::aead;
use crate::algorithm;
use crate::derive::derive_key_max;
use crate::error::{Result, SecureCellError};
use crate::kdf_context;
use crate::sizing;
use crate::token;

/// Decrypt `token`/`ciphertext` under `passphrase`, checking `context` as
/// associated data.
///
/// Two-phase buffer contract (spec §4.6): a shallow parse of `token`
/// answers the required plaintext buffer size without fully validating
/// the token. Pass `None` (or an undersized buffer) for `message_out` to
/// probe; the required size is written to `*message_len` and
/// [`SecureCellError::BufferTooSmall`] is returned without touching the
/// KDF or the AEAD, and without the full structural validation that
/// would otherwise run. Decryption does not distinguish authentication
/// failure from structural failure to callers — both surface as
/// [`SecureCellError::GenericFailure`]/[`SecureCellError::CorruptedToken`],
/// never as a more specific variant that would give a decryption oracle.
pub fn decrypt(
    passphrase: &[u8],
    context: Option<&[u8]>,
    token_bytes: &[u8],
    ciphertext: &[u8],
    message_out: Option<&mut [u8]>,
    message_len: &mut usize,
) -> Result<()> {
    if passphrase.is_empty() {
        return Err(SecureCellError::invalid_parameter("passphrase must not be empty"));
    }
    if let Some(ctx) = context {
        if ctx.is_empty() {
            return Err(SecureCellError::invalid_parameter(
                "context, if present, must not be empty",
            ));
        }
    }
    if token_bytes.is_empty() {
        return Err(SecureCellError::invalid_parameter("token must not be empty"));
    }
    if message_out.is_some() && ciphertext.is_empty() {
        return Err(SecureCellError::invalid_parameter(
            "ciphertext must be supplied and non-empty when a message buffer is provided",
        ));
    }

    // C6: shallow parse only, no full validation, no KDF/AEAD work.
    let required_len = sizing::decrypt_required_size(token_bytes)?;
    let buffer_ok = message_out.as_ref().is_some_and(|b| b.len() >= required_len);
    if !buffer_ok {
        *message_len = required_len;
        return Err(SecureCellError::BufferTooSmall);
    }
    let message_out = message_out.expect("checked above");

    tracing::debug!(token_len = token_bytes.len(), ciphertext_len = ciphertext.len(), "secure cell decrypt");

    let result = decrypt_inner(passphrase, context, token_bytes, ciphertext, message_out);
    if let Err(ref e) = result {
        tracing::warn!(error = %e, "secure cell decrypt failed");
    }
    result?;

    *message_len = required_len;
    Ok(())
}

fn decrypt_inner(
    passphrase: &[u8],
    context: Option<&[u8]>,
    token_bytes: &[u8],
    ciphertext: &[u8],
    message_out: &mut [u8],
) -> Result<()> {
    let parsed = token::read(token_bytes)?;

    if !algorithm::reserved_bits_valid(parsed.algorithm) {
        return Err(SecureCellError::corrupted_token("reserved algorithm bits set"));
    }
    let kdf = algorithm::kdf_selector(parsed.algorithm);
    if kdf == algorithm::KDF_NONE {
        // Reserved for the key-mode API; must never appear in a
        // passphrase-mode token even if everything else would parse.
        return Err(SecureCellError::corrupted_token(
            "token declares no-KDF, which is invalid for passphrase mode",
        ));
    }
    if kdf != algorithm::KDF_PBKDF2 {
        return Err(SecureCellError::corrupted_token("unsupported KDF selector"));
    }
    if !algorithm::key_length_is_valid(parsed.algorithm) {
        return Err(SecureCellError::corrupted_token("unsupported key length"));
    }

    if parsed.message_len as usize != ciphertext.len() {
        return Err(SecureCellError::corrupted_token(
            "declared message length does not match supplied ciphertext length",
        ));
    }

    let kdf_ctx = kdf_context::read(parsed.kdf_context)?;

    let key_len = algorithm::key_length_bytes(parsed.algorithm);
    // Stack-sized for the maximum (256-bit) case; only a prefix is used
    // when a smaller key length is selected, avoiding a variable-sized
    // allocation in the secret-handling path.
    let key_buf = derive_key_max(passphrase, kdf_ctx.salt, kdf_ctx.iterations);
    let key = &key_buf[..key_len];

    // The AEAD primitive must be told the KDF has already run, so it
    // never re-derives the key from what it's handed.
    assert_eq!(
        algorithm::kdf_selector(algorithm::strip_kdf(parsed.algorithm)),
        algorithm::KDF_NONE
    );

    let aad = context.unwrap_or(&[]);
    let mut ciphertext_and_tag = Zeroizing::new(Vec::with_capacity(ciphertext.len() + parsed.tag.len()));
    ciphertext_and_tag.extend_from_slice(ciphertext);
    ciphertext_and_tag.extend_from_slice(parsed.tag);

    let plaintext = aead::decrypt(key, parsed.iv, aad, &ciphertext_and_tag)?;

    if plaintext.len() != ciphertext.len() {
        return Err(SecureCellError::generic_failure(
            "decrypted plaintext length does not match ciphertext length",
        ));
    }

    message_out[..plaintext.len()].copy_from_slice(&plaintext);
    Ok(())
}
