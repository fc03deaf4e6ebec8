#![no_main]

use libfuzzer_sys::fuzz_target;
use nanolink_integrity::{
    ByteOrder, DIGEST_LENGTH, DigestKey, IntegrityError, KEY_LENGTH, MAX_MESSAGE_SIZE,
    SignatureMask, keyed_digest, keyed_digest_from_slice, verify_keyed_digest,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < KEY_LENGTH {
        // Short keys must be rejected, never padded
        let mut digest = [0u8; DIGEST_LENGTH];
        assert!(keyed_digest_from_slice(data, b"", &mut digest).is_err());
        return;
    }

    let (key_bytes, message) = data.split_at(KEY_LENGTH);
    let key = DigestKey::try_from_slice(key_bytes).expect("correct length");

    let mut digest = [0x5Au8; DIGEST_LENGTH];
    match keyed_digest(&key, message, &mut digest) {
        Ok(()) => {
            assert!(message.len() <= MAX_MESSAGE_SIZE);
            verify_keyed_digest(&key, message, &digest).expect("own tag must verify");

            let mut tampered = digest;
            tampered[message.len() % DIGEST_LENGTH] ^= 0x01;
            assert_eq!(
                verify_keyed_digest(&key, message, &tampered),
                Err(IntegrityError::TagMismatch)
            );

            let signature = SignatureMask::default().apply(&digest, ByteOrder::LittleEndian);
            assert_eq!(signature.len(), DIGEST_LENGTH / 2);
        }
        Err(IntegrityError::LengthExceeded { length, max }) => {
            assert_eq!(length, message.len());
            assert_eq!(max, MAX_MESSAGE_SIZE);
            assert!(digest.iter().all(|&b| b == 0x5A), "digest written on error");
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
