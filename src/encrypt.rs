//! Encrypt pipeline (C4)

use rand::RngCore;
use zeroize::Zeroizing;

use crate::aead;
use crate::algorithm::{self, DEFAULT_ALGORITHM};
use crate::config::{EncryptOptions, IV_LEN, SALT_LEN};
use crate::derive::derive_key_max;
use crate::error::{Result, SecureCellError};
use crate::kdf_context;
use crate::sizing;
use crate::token::{self, HeaderFields};

/// Encrypt `message` under `passphrase`, binding `context` as associated
/// data, using the default iteration count.
///
/// Two-phase buffer contract (spec §4.6): pass `None` for either output
/// buffer (or a buffer shorter than required) to probe; the required
/// sizes are written to `*token_len` / `*ciphertext_len` and
/// [`SecureCellError::BufferTooSmall`] is returned without touching the
/// CSPRNG, the KDF, or the AEAD. Pass correctly sized buffers to perform
/// the operation.
pub fn encrypt(
    passphrase: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    token_out: Option<&mut [u8]>,
    token_len: &mut usize,
    ciphertext_out: Option<&mut [u8]>,
    ciphertext_len: &mut usize,
) -> Result<()> {
    encrypt_with_options(
        passphrase,
        message,
        context,
        EncryptOptions::default(),
        token_out,
        token_len,
        ciphertext_out,
        ciphertext_len,
    )
}

/// Same as [`encrypt`] but with an explicit [`EncryptOptions`] override
/// (see that type's docs — this is a local knob, not peer negotiation).
pub fn encrypt_with_options(
    passphrase: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    options: EncryptOptions,
    token_out: Option<&mut [u8]>,
    token_len: &mut usize,
    ciphertext_out: Option<&mut [u8]>,
    ciphertext_len: &mut usize,
) -> Result<()> {
    if passphrase.is_empty() {
        return Err(SecureCellError::invalid_parameter("passphrase must not be empty"));
    }
    if message.is_empty() {
        return Err(SecureCellError::invalid_parameter("message must not be empty"));
    }
    if message.len() > u32::MAX as usize {
        return Err(SecureCellError::invalid_parameter("message too long"));
    }
    if let Some(ctx) = context {
        if ctx.is_empty() {
            return Err(SecureCellError::invalid_parameter(
                "context, if present, must not be empty",
            ));
        }
    }

    // C6: decide up front whether this call can proceed at all. This must
    // happen before any randomness is drawn — a probe (undersized or
    // absent buffers) must be side-effect free.
    let (required_token_len, required_ct_len) = sizing::encrypt_required_sizes(message.len());
    let token_ok = token_out.as_ref().is_some_and(|b| b.len() >= required_token_len);
    let ct_ok = ciphertext_out.as_ref().is_some_and(|b| b.len() >= required_ct_len);
    if !token_ok || !ct_ok {
        *token_len = required_token_len;
        *ciphertext_len = required_ct_len;
        return Err(SecureCellError::BufferTooSmall);
    }
    let token_out = token_out.expect("checked above");
    let ciphertext_out = ciphertext_out.expect("checked above");

    tracing::debug!(
        message_len = message.len(),
        context_present = context.is_some(),
        algorithm = DEFAULT_ALGORITHM,
        "secure cell encrypt"
    );

    let result = encrypt_inner(passphrase, message, context, options, token_out, ciphertext_out);
    if let Err(ref e) = result {
        tracing::warn!(error = %e, "secure cell encrypt failed");
    }
    result?;

    *token_len = required_token_len;
    *ciphertext_len = required_ct_len;
    Ok(())
}

fn encrypt_inner(
    passphrase: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    options: EncryptOptions,
    token_out: &mut [u8],
    ciphertext_out: &mut [u8],
) -> Result<()> {
    let algorithm = DEFAULT_ALGORITHM;
    let key_len = algorithm::key_length_bytes(algorithm);

    let mut salt = Zeroizing::new(vec![0u8; SALT_LEN]);
    rand::rng().fill_bytes(&mut salt);

    let key_buf = derive_key_max(passphrase, &salt, options.pbkdf2_iterations);
    let key = &key_buf[..key_len];

    let mut iv = Zeroizing::new(vec![0u8; IV_LEN]);
    rand::rng().fill_bytes(&mut iv);

    let aad = context.unwrap_or(&[]);
    // The external AEAD is invoked with the KDF stripped out of the
    // algorithm id — it must be handed the already-derived key as-is,
    // never re-derive it from the passphrase.
    assert_eq!(
        algorithm::kdf_selector(algorithm::strip_kdf(algorithm)),
        algorithm::KDF_NONE
    );
    let mut combined = Zeroizing::new(aead::encrypt(key, &iv, aad, message)?);

    if combined.len() < message.len() {
        return Err(SecureCellError::generic_failure(
            "AEAD output shorter than plaintext",
        ));
    }
    let (ciphertext, tag) = combined.split_at_mut(message.len());
    if ciphertext.len() != message.len() {
        return Err(SecureCellError::generic_failure(
            "ciphertext length does not match plaintext length",
        ));
    }

    let kdf_context_len = kdf_context::serialized_len(salt.len());
    let hdr = HeaderFields {
        algorithm,
        iv: &iv,
        tag: &*tag,
        message_len: message.len() as u32,
        kdf_context_len,
    };
    // Fatal, not debug-only (spec §4.3/§9): a release build must never
    // report a token length to the caller that differs from what
    // `token::write` below actually serializes.
    assert_eq!(hdr.size(), sizing::max_token_size());

    token::write(&hdr, token_out)?;
    let slot = hdr.kdf_context_offset();
    kdf_context::write(&mut token_out[slot..slot + kdf_context_len], options.pbkdf2_iterations, &salt);

    ciphertext_out[..ciphertext.len()].copy_from_slice(ciphertext);

    // `salt`, `key`, `iv` and `combined` (which aliases `tag`) are all
    // `Zeroizing` — every exit path past this point, success or error,
    // wipes them on drop.
    Ok(())
}
