//! Property-based coverage of the round-trip, context-binding and
//! bit-flip-sensitivity invariants, with a slimmed-down PBKDF2 cost so the
//! suite stays fast.

use cryypt_secure_cell::{EncryptOptions, SecureCell};
use proptest::prelude::*;

const FAST: EncryptOptions = EncryptOptions {
    pbkdf2_iterations: 10,
};

proptest! {
    #[test]
    fn round_trip_holds_for_arbitrary_passphrase_and_message(
        passphrase in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..4096),
    ) {
        let (token, ciphertext) =
            SecureCell::seal_with_options(&passphrase, &message, None, FAST).unwrap();
        let recovered = SecureCell::open(&passphrase, None, &token, &ciphertext).unwrap();
        prop_assert_eq!(recovered, message);
    }

    #[test]
    fn round_trip_holds_with_a_context(
        passphrase in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..4096),
        context in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let (token, ciphertext) =
            SecureCell::seal_with_options(&passphrase, &message, Some(&context), FAST).unwrap();
        let recovered = SecureCell::open(&passphrase, Some(&context), &token, &ciphertext).unwrap();
        prop_assert_eq!(recovered, message);
    }

    #[test]
    fn wrong_context_never_decrypts(
        passphrase in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..256),
        context in prop::collection::vec(any::<u8>(), 1..32),
        wrong_context in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        prop_assume!(context != wrong_context);
        let (token, ciphertext) =
            SecureCell::seal_with_options(&passphrase, &message, Some(&context), FAST).unwrap();
        prop_assert!(SecureCell::open(&passphrase, Some(&wrong_context), &token, &ciphertext).is_err());
    }

    #[test]
    fn two_seals_of_the_same_message_never_collide(
        passphrase in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        let (token1, ciphertext1) =
            SecureCell::seal_with_options(&passphrase, &message, None, FAST).unwrap();
        let (token2, ciphertext2) =
            SecureCell::seal_with_options(&passphrase, &message, None, FAST).unwrap();
        prop_assert_ne!(token1, token2);
        prop_assert_ne!(ciphertext1, ciphertext2);
    }

    #[test]
    fn flipping_a_single_ciphertext_bit_breaks_decryption(
        passphrase in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..256),
        flip_index in 0usize..256,
        flip_bit in 0u8..8,
    ) {
        let (token, ciphertext) =
            SecureCell::seal_with_options(&passphrase, &message, None, FAST).unwrap();
        let index = flip_index % ciphertext.len();
        let mut flipped = ciphertext.clone();
        flipped[index] ^= 1 << flip_bit;
        prop_assert!(SecureCell::open(&passphrase, None, &token, &flipped).is_err());
    }
}
