//! Kani verification harnesses for the integrity primitives
//!
//! Bounded model checking over symbolic seeds and short symbolic buffers.
//!
//! # Running Proofs
//!
//! ```bash
//! cargo kani --package nanolink-integrity
//! cargo kani --harness verify_resume_matches_one_shot
//! ```

#[cfg(kani)]
mod verification {
    use crate::crc32::{INITIAL_SEED, TableVariant, checksum, checksum_with, resume};
    use crate::hash::{BlockHash, HASH_LENGTH};
    use crate::keyed_digest::{DIGEST_LENGTH, DigestKey, KeyedDigest, MAX_MESSAGE_SIZE};

    /// Constant hash so the harness explores the digest control flow only.
    struct ConstantHash;

    impl BlockHash for ConstantHash {
        fn hash(&self, _input: &[u8]) -> [u8; HASH_LENGTH] {
            [0xA5; HASH_LENGTH]
        }
    }

    /// **Proof 1: empty input returns the complemented seed**
    #[kani::proof]
    fn verify_empty_input_complements_seed() {
        let seed: u32 = kani::any();
        assert_eq!(checksum(seed, &[]), !seed);
    }

    /// **Proof 2: resuming a finalized checksum equals the one-shot value**
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_resume_matches_one_shot() {
        let a: [u8; 2] = kani::any();
        let b: [u8; 2] = kani::any();
        let joined = [a[0], a[1], b[0], b[1]];

        assert_eq!(
            resume(checksum(INITIAL_SEED, &a), &b),
            checksum(INITIAL_SEED, &joined)
        );
    }

    /// **Proof 3: the tables only disagree when the fold index is 255**
    #[kani::proof]
    fn verify_single_byte_divergence_needs_index_255() {
        let seed: u32 = kani::any();
        let byte: u8 = kani::any();
        kani::assume((seed ^ u32::from(byte)) & 0xFF != 0xFF);

        assert_eq!(
            checksum(seed, &[byte]),
            checksum_with(TableVariant::Ieee, seed, &[byte])
        );
    }

    /// **Proof 4: oversized messages never touch the output buffer**
    #[kani::proof]
    #[kani::unwind(2)]
    fn verify_oversized_message_leaves_digest() {
        let fill: u8 = kani::any();
        let message = [0u8; MAX_MESSAGE_SIZE + 1];
        let mut digest = [fill; DIGEST_LENGTH];

        let result = KeyedDigest::with_hash(ConstantHash).compute(
            &DigestKey::null(),
            &message,
            &mut digest,
        );

        assert!(result.is_err());
        assert_eq!(digest, [fill; DIGEST_LENGTH]);
    }
}
