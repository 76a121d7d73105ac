//! # Cryypt Secure Cell
//!
//! Passphrase-keyed authenticated encryption: given a passphrase, a
//! message, and an optional associated-data context, produces an
//! encrypted message body and a self-describing auth token carrying
//! everything needed to decrypt and verify later — except the
//! passphrase. See [`encrypt`] / [`decrypt`] for the low-level two-phase
//! buffer API, or [`SecureCell`] for one-shot helpers that manage their
//! own buffers.
//!
//! ## Quick start
//!
//! ```
//! use cryypt_secure_cell::SecureCell;
//!
//! let (token, ciphertext) = SecureCell::seal(b"correct horse battery staple", b"hello", None).unwrap();
//! let message = SecureCell::open(b"correct horse battery staple", None, &token, &ciphertext).unwrap();
//! assert_eq!(message, b"hello");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aead;
pub mod algorithm;
pub mod config;
mod decrypt;
mod derive;
mod encrypt;
pub mod error;
pub mod kdf_context;
mod sizing;
pub mod token;

pub use config::EncryptOptions;
pub use decrypt::decrypt;
pub use encrypt::{encrypt, encrypt_with_options};
pub use error::{Result, SecureCellError};

/// One-shot entry point that manages its own buffers, doing the
/// probe-then-allocate dance [`encrypt`]/[`decrypt`] expect from callers
/// who own their buffers.
pub struct SecureCell;

impl SecureCell {
    /// Encrypt `message` under `passphrase`, returning `(token, ciphertext)`.
    ///
    /// Equivalent to calling [`encrypt`] once to learn the required
    /// sizes and once more to perform the operation.
    pub fn seal(
        passphrase: &[u8],
        message: &[u8],
        context: Option<&[u8]>,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        Self::seal_with_options(passphrase, message, context, EncryptOptions::default())
    }

    /// Same as [`Self::seal`] but with an explicit [`EncryptOptions`] override.
    pub fn seal_with_options(
        passphrase: &[u8],
        message: &[u8],
        context: Option<&[u8]>,
        options: EncryptOptions,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut token_len = 0usize;
        let mut ciphertext_len = 0usize;
        match encrypt::encrypt_with_options(
            passphrase,
            message,
            context,
            options,
            None,
            &mut token_len,
            None,
            &mut ciphertext_len,
        ) {
            Err(SecureCellError::BufferTooSmall) => {}
            Err(e) => return Err(e),
            Ok(()) => unreachable!("probe call with no buffers cannot succeed"),
        }

        let mut token = vec![0u8; token_len];
        let mut ciphertext = vec![0u8; ciphertext_len];
        encrypt::encrypt_with_options(
            passphrase,
            message,
            context,
            options,
            Some(&mut token),
            &mut token_len,
            Some(&mut ciphertext),
            &mut ciphertext_len,
        )?;
        token.truncate(token_len);
        ciphertext.truncate(ciphertext_len);
        Ok((token, ciphertext))
    }

    /// Decrypt `token`/`ciphertext` under `passphrase`, checking `context`,
    /// returning the plaintext.
    ///
    /// Equivalent to calling [`decrypt`] once to learn the required
    /// message-buffer size and once more to perform the operation.
    pub fn open(
        passphrase: &[u8],
        context: Option<&[u8]>,
        token: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let mut message_len = 0usize;
        match decrypt::decrypt(passphrase, context, token, ciphertext, None, &mut message_len) {
            Err(SecureCellError::BufferTooSmall) => {}
            Err(e) => return Err(e),
            Ok(()) => unreachable!("probe call with no message buffer cannot succeed"),
        }

        let mut message = vec![0u8; message_len];
        decrypt::decrypt(
            passphrase,
            context,
            token,
            ciphertext,
            Some(&mut message),
            &mut message_len,
        )?;
        message.truncate(message_len);
        Ok(message)
    }
}
