//! Double-hash keyed digest used to sign telecommands.
//!
//! The tag is computed as
//!
//! ```text
//! inner = H(key ‖ message)
//! tag   = H(key ‖ inner)
//! ```
//!
//! with a 32-byte key and a 32-byte block hash. This is NOT RFC 2104 HMAC:
//! there is no ipad/opad masking and the key is not padded to the hash block
//! size. Ground and flight software both produce exactly these bytes, so the
//! construction must not be "upgraded".
//!
//! Scratch buffers are fixed-size stack arrays sized for
//! [`MAX_MESSAGE_SIZE`]. Lengths are validated before any copy, and the
//! scratch space is zeroed after use because it holds key material.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{IntegrityError, Result};
use crate::hash::{BlockHash, HASH_LENGTH, Sha256Hash};

/// Key length in bytes. Equal to the hash output length.
pub const KEY_LENGTH: usize = HASH_LENGTH;

/// Tag length in bytes.
pub const DIGEST_LENGTH: usize = HASH_LENGTH;

/// Largest message the scratch layout accepts.
pub const MAX_MESSAGE_SIZE: usize = 256;

const FIRST_SCRATCH_LENGTH: usize = KEY_LENGTH + MAX_MESSAGE_SIZE;
const SECOND_SCRATCH_LENGTH: usize = KEY_LENGTH + DIGEST_LENGTH;

// -----------------------------------------------------------------------------
// Key
// -----------------------------------------------------------------------------

/// Secret key for the keyed digest.
///
/// Key material is zeroed from memory when dropped and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DigestKey {
    bytes: [u8; KEY_LENGTH],
}

impl DigestKey {
    /// Creates a key from exactly [`KEY_LENGTH`] bytes.
    pub fn from_bytes(bytes: &[u8; KEY_LENGTH]) -> Self {
        Self { bytes: *bytes }
    }

    /// Creates a key from a runtime-length slice.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let array: &[u8; KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| IntegrityError::InvalidKeyLength {
                    expected: KEY_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self::from_bytes(array))
    }

    /// Parses a key from hex, ignoring surrounding whitespace.
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut decoded = hex::decode(text.trim())?;
        let key = Self::try_from_slice(&decoded);
        decoded.zeroize();
        key
    }

    /// The all-zero key the ground software falls back to when none is
    /// provisioned.
    pub fn null() -> Self {
        Self {
            bytes: [0u8; KEY_LENGTH],
        }
    }

    /// Returns true for the all-zero key.
    pub fn is_null(&self) -> bool {
        bool::from(self.bytes[..].ct_eq(&[0u8; KEY_LENGTH][..]))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.bytes
    }
}

impl fmt::Debug for DigestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestKey").finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for DigestKey {
    type Error = IntegrityError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_slice(bytes)
    }
}

// -----------------------------------------------------------------------------
// Digest
// -----------------------------------------------------------------------------

/// Keyed digest over a pluggable [`BlockHash`].
#[derive(Debug, Clone, Default)]
pub struct KeyedDigest<H = Sha256Hash> {
    hasher: H,
}

impl KeyedDigest<Sha256Hash> {
    /// Keyed digest over SHA-256.
    pub fn new() -> Self {
        Self { hasher: Sha256Hash }
    }
}

impl<H: BlockHash> KeyedDigest<H> {
    /// Keyed digest over a caller-supplied block hash.
    pub fn with_hash(hasher: H) -> Self {
        Self { hasher }
    }

    /// Writes the tag for `message` under `key` into `digest`.
    ///
    /// On error `digest` is left untouched.
    pub fn compute(
        &self,
        key: &DigestKey,
        message: &[u8],
        digest: &mut [u8; DIGEST_LENGTH],
    ) -> Result<()> {
        if message.len() > MAX_MESSAGE_SIZE {
            tracing::debug!(
                length = message.len(),
                max = MAX_MESSAGE_SIZE,
                "rejecting oversized message for keyed digest"
            );
            return Err(IntegrityError::LengthExceeded {
                length: message.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }

        // key ‖ message
        let mut first = [0u8; FIRST_SCRATCH_LENGTH];
        let first_length = KEY_LENGTH + message.len();
        first[..KEY_LENGTH].copy_from_slice(key.as_bytes());
        first[KEY_LENGTH..first_length].copy_from_slice(message);
        let mut inner = self.hasher.hash(&first[..first_length]);
        first.zeroize();

        // key ‖ inner
        let mut second = [0u8; SECOND_SCRATCH_LENGTH];
        second[..KEY_LENGTH].copy_from_slice(key.as_bytes());
        second[KEY_LENGTH..].copy_from_slice(&inner);
        *digest = self.hasher.hash(&second);
        second.zeroize();
        inner.zeroize();

        tracing::trace!(message_length = message.len(), "computed keyed digest");
        Ok(())
    }

    /// Returns the tag for `message` under `key`.
    pub fn tag(&self, key: &DigestKey, message: &[u8]) -> Result<[u8; DIGEST_LENGTH]> {
        let mut digest = [0u8; DIGEST_LENGTH];
        self.compute(key, message, &mut digest)?;
        Ok(digest)
    }

    /// Checks `expected` against the tag for `message` in constant time.
    pub fn verify(&self, key: &DigestKey, message: &[u8], expected: &[u8]) -> Result<()> {
        let tag = self.tag(key, message)?;
        if bool::from(tag.as_slice().ct_eq(expected)) {
            Ok(())
        } else {
            tracing::debug!(message_length = message.len(), "keyed digest mismatch");
            Err(IntegrityError::TagMismatch)
        }
    }
}

/// Computes the SHA-256 keyed digest of `message` into `digest`.
///
/// # Examples
///
/// ```
/// use nanolink_integrity::{DigestKey, keyed_digest};
///
/// let key = DigestKey::from_bytes(&[0x42; 32]);
/// let mut digest = [0u8; 32];
/// keyed_digest(&key, b"PING", &mut digest).unwrap();
/// ```
pub fn keyed_digest(
    key: &DigestKey,
    message: &[u8],
    digest: &mut [u8; DIGEST_LENGTH],
) -> Result<()> {
    KeyedDigest::new().compute(key, message, digest)
}

/// Like [`keyed_digest`] for a key whose length is only known at runtime.
pub fn keyed_digest_from_slice(
    key: &[u8],
    message: &[u8],
    digest: &mut [u8; DIGEST_LENGTH],
) -> Result<()> {
    let key = DigestKey::try_from_slice(key)?;
    keyed_digest(&key, message, digest)
}

/// Verifies a SHA-256 keyed digest in constant time.
pub fn verify_keyed_digest(key: &DigestKey, message: &[u8], expected: &[u8]) -> Result<()> {
    KeyedDigest::new().verify(key, message, expected)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bit_distance(a: &[u8; DIGEST_LENGTH], b: &[u8; DIGEST_LENGTH]) -> u32 {
        a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
    }

    proptest! {
        /// Property: Determinism - same key and message always produce the same tag
        #[test]
        fn prop_keyed_digest_deterministic(
            key in prop::array::uniform32(any::<u8>()),
            message in prop::collection::vec(any::<u8>(), 0..=MAX_MESSAGE_SIZE)
        ) {
            let key = DigestKey::from_bytes(&key);
            let first = KeyedDigest::new().tag(&key, &message).unwrap();
            let second = KeyedDigest::new().tag(&key, &message).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: Oversized messages are always rejected
        #[test]
        fn prop_oversized_rejected(
            extra in 1usize..512,
            fill: u8
        ) {
            let message = vec![fill; MAX_MESSAGE_SIZE + extra];
            let mut digest = [fill; DIGEST_LENGTH];
            let result = keyed_digest(&DigestKey::null(), &message, &mut digest);
            let is_length_exceeded = matches!(result, Err(IntegrityError::LengthExceeded { .. }));
            prop_assert!(is_length_exceeded);
            prop_assert_eq!(digest, [fill; DIGEST_LENGTH]);
        }
    }

    #[test]
    fn single_bit_flips_avalanche() {
        const TRIALS: usize = 512;
        let mut rng = StdRng::seed_from_u64(0x6e61_6e6f_6c69_6e6b);
        let mut total = 0u64;

        for trial in 0..TRIALS {
            let mut key = [0u8; KEY_LENGTH];
            rng.fill(&mut key[..]);
            let length = rng.gen_range(1..=MAX_MESSAGE_SIZE);
            let mut message = vec![0u8; length];
            rng.fill(&mut message[..]);

            let base = KeyedDigest::new()
                .tag(&DigestKey::from_bytes(&key), &message)
                .unwrap();

            let flipped = if trial % 2 == 0 {
                let bit = rng.gen_range(0..KEY_LENGTH * 8);
                key[bit / 8] ^= 1 << (bit % 8);
                KeyedDigest::new().tag(&DigestKey::from_bytes(&key), &message)
            } else {
                let bit = rng.gen_range(0..length * 8);
                message[bit / 8] ^= 1 << (bit % 8);
                KeyedDigest::new().tag(&DigestKey::from_bytes(&key), &message)
            }
            .unwrap();

            let distance = bit_distance(&base, &flipped);
            assert!(
                (64..=192).contains(&distance),
                "trial {trial}: only {distance} of 256 bits changed"
            );
            total += u64::from(distance);
        }

        let mean = total as f64 / TRIALS as f64;
        assert!((120.0..=136.0).contains(&mean), "mean bit distance {mean}");
    }
}
