//! Algorithm-field codec (C1)
//!
//! Bit-manipulates the 32-bit algorithm identifier carried in every token.
//! Four disjoint fields, least-significant bits first:
//!
//! ```text
//! bits 00..09  key length, in bits (0..=511)
//! bits 09..13  padding selector
//! bits 13..21  symmetric algorithm/mode selector
//! bits 21..29  KDF selector
//! bits 29..32  reserved, must be zero
//! ```
//!
//! All four fields plus the reserved bits are pure bit-twiddling — no
//! allocation, no fallible parsing. Validation of *values* (is the key
//! length one of the three allowed sizes, is the KDF selector one this
//! crate supports) is the caller's job; this module only knows about bit
//! positions.

const KEY_LEN_SHIFT: u32 = 0;
const KEY_LEN_BITS: u32 = 9;
const PADDING_SHIFT: u32 = KEY_LEN_SHIFT + KEY_LEN_BITS;
const PADDING_BITS: u32 = 4;
const ALG_SHIFT: u32 = PADDING_SHIFT + PADDING_BITS;
const ALG_BITS: u32 = 8;
const KDF_SHIFT: u32 = ALG_SHIFT + ALG_BITS;
const KDF_BITS: u32 = 8;
const RESERVED_SHIFT: u32 = KDF_SHIFT + KDF_BITS;

fn mask(bits: u32) -> u32 {
    (1u32 << bits) - 1
}

/// KDF selector: no KDF applied; the AEAD layer is handed the final key
/// directly. Reserved for the key-mode API — a passphrase-mode token must
/// never carry this selector.
pub const KDF_NONE: u32 = 0;
/// KDF selector: PBKDF2-HMAC-SHA256, the only KDF this crate's
/// passphrase-mode pipelines understand.
pub const KDF_PBKDF2: u32 = 1;

/// Symmetric algorithm/mode selector: AES in Galois/Counter Mode.
pub const ALG_AES_GCM: u32 = 1;

/// Padding selector: no padding (AEAD ciphertext length equals plaintext length).
pub const PADDING_NONE: u32 = 0;

/// The three key lengths, in bits, this crate accepts.
pub const VALID_KEY_LENGTHS_BITS: [u32; 3] = [128, 192, 256];

/// Default passphrase-mode algorithm: AES-256-GCM, KDF=PBKDF2, no padding,
/// 256-bit key. Implementations may upgrade this default in a later
/// release but must keep decrypt support for every historical default —
/// there is currently exactly one, so no history to carry yet.
pub const DEFAULT_ALGORITHM: u32 = compose(KDF_PBKDF2, ALG_AES_GCM, PADDING_NONE, 256);

/// Build an algorithm identifier from its four fields. Does not validate
/// that the values fit their field widths or name anything this crate
/// recognizes — use this only to build identifiers this crate itself
/// controls (the default, and unit-test fixtures).
pub const fn compose(kdf: u32, alg: u32, padding: u32, key_length_bits: u32) -> u32 {
    (kdf << KDF_SHIFT) | (alg << ALG_SHIFT) | (padding << PADDING_SHIFT) | (key_length_bits << KEY_LEN_SHIFT)
}

/// Extract the KDF selector field.
pub fn kdf_selector(a: u32) -> u32 {
    (a >> KDF_SHIFT) & mask(KDF_BITS)
}

/// Extract the symmetric algorithm/mode selector field.
pub fn alg_selector(a: u32) -> u32 {
    (a >> ALG_SHIFT) & mask(ALG_BITS)
}

/// Extract the padding selector field.
pub fn padding_selector(a: u32) -> u32 {
    (a >> PADDING_SHIFT) & mask(PADDING_BITS)
}

/// Extract the key-length field, in bits.
pub fn key_length_bits(a: u32) -> u32 {
    (a >> KEY_LEN_SHIFT) & mask(KEY_LEN_BITS)
}

/// `key-length-bytes(A)`: the key-length field divided by 8.
pub fn key_length_bytes(a: u32) -> usize {
    (key_length_bits(a) / 8) as usize
}

/// `reserved-bits-valid(A)`: true iff `A` has no bits set outside the
/// union of the four recognized fields. Old implementations refuse
/// tokens that set bits they don't understand rather than silently
/// ignoring them — this is the forward-compatibility trap spec'd for
/// upgrading the wire format later.
pub fn reserved_bits_valid(a: u32) -> bool {
    (a >> RESERVED_SHIFT) == 0
}

/// `strip-kdf(A)`: clear all KDF-selector bits, then set the "no KDF"
/// selector. Tells the AEAD layer the caller has already derived the
/// final key and must not re-derive it.
pub fn strip_kdf(a: u32) -> u32 {
    let cleared = a & !(mask(KDF_BITS) << KDF_SHIFT);
    cleared | (KDF_NONE << KDF_SHIFT)
}

/// True iff the key-length field names one of the three allowed sizes.
pub fn key_length_is_valid(a: u32) -> bool {
    VALID_KEY_LENGTHS_BITS.contains(&key_length_bits(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_algorithm_fields() {
        assert_eq!(kdf_selector(DEFAULT_ALGORITHM), KDF_PBKDF2);
        assert_eq!(alg_selector(DEFAULT_ALGORITHM), ALG_AES_GCM);
        assert_eq!(padding_selector(DEFAULT_ALGORITHM), PADDING_NONE);
        assert_eq!(key_length_bits(DEFAULT_ALGORITHM), 256);
        assert_eq!(key_length_bytes(DEFAULT_ALGORITHM), 32);
        assert!(reserved_bits_valid(DEFAULT_ALGORITHM));
        assert!(key_length_is_valid(DEFAULT_ALGORITHM));
    }

    #[test]
    fn strip_kdf_clears_selector_only() {
        let stripped = strip_kdf(DEFAULT_ALGORITHM);
        assert_eq!(kdf_selector(stripped), KDF_NONE);
        assert_eq!(alg_selector(stripped), alg_selector(DEFAULT_ALGORITHM));
        assert_eq!(key_length_bits(stripped), key_length_bits(DEFAULT_ALGORITHM));
        assert_eq!(padding_selector(stripped), padding_selector(DEFAULT_ALGORITHM));
    }

    #[test]
    fn reserved_bit_rejected() {
        let poisoned = DEFAULT_ALGORITHM | (1u32 << RESERVED_SHIFT);
        assert!(!reserved_bits_valid(poisoned));
    }

    #[test]
    fn every_reserved_bit_individually_rejected() {
        for bit in RESERVED_SHIFT..32 {
            let poisoned = DEFAULT_ALGORITHM | (1u32 << bit);
            assert!(!reserved_bits_valid(poisoned), "bit {bit} should be reserved");
        }
    }

    #[test]
    fn key_length_validity() {
        for &len in &VALID_KEY_LENGTHS_BITS {
            let a = compose(KDF_PBKDF2, ALG_AES_GCM, PADDING_NONE, len);
            assert!(key_length_is_valid(a));
            assert_eq!(key_length_bytes(a), (len / 8) as usize);
        }
        let bad = compose(KDF_PBKDF2, ALG_AES_GCM, PADDING_NONE, 127);
        assert!(!key_length_is_valid(bad));
    }
}
