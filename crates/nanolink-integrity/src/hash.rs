//! Block hash seam for the keyed digest.
//!
//! The keyed digest treats its hash as an opaque `input -> [u8; 32]`
//! function. [`BlockHash`] is that seam; [`Sha256Hash`] wraps the `sha2`
//! crate and is what the flight software links against (mbedTLS SHA-256).

use sha2::{Digest, Sha256};

/// Length in bytes of every block hash output.
pub const HASH_LENGTH: usize = 32;

/// A hash primitive producing a 32-byte digest.
pub trait BlockHash {
    /// Hashes `input` in one shot.
    fn hash(&self, input: &[u8]) -> [u8; HASH_LENGTH];
}

/// SHA-256 block hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hash;

impl BlockHash for Sha256Hash {
    fn hash(&self, input: &[u8]) -> [u8; HASH_LENGTH] {
        let mut hasher = Sha256::new();
        hasher.update(input);
        hasher.finalize().into()
    }
}

impl<H: BlockHash + ?Sized> BlockHash for &H {
    fn hash(&self, input: &[u8]) -> [u8; HASH_LENGTH] {
        (**self).hash(input)
    }
}
