//! # nanolink-integrity: integrity primitives for the nanolink telecommand link
//!
//! Bit-exact implementations of the checksums and the keyed digest shared by
//! the ground segment and the on-board controller. Every output here is
//! checked byte-for-byte by a peer, so the constructions reproduce the flight
//! software exactly, including where it departs from textbook algorithms.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`crc32`] | Chained CRC32 over the reflected IEEE polynomial (flight table) |
//! | [`payload_crc`] | STM32 CRC-unit compatible payload checksum |
//! | [`keyed_digest`] | Double-hash keyed digest over SHA-256 |
//! | [`signature`] | Tag masking for the packet signature field |
//! | [`hash`] | Block hash seam used by the keyed digest |
//!
//! ## Quick Start
//!
//! ```
//! use nanolink_integrity::{
//!     ByteOrder, DigestKey, SignatureMask, checksum, keyed_digest, INITIAL_SEED,
//! };
//!
//! // Frame checksum
//! let crc = checksum(INITIAL_SEED, b"123456789");
//! assert_eq!(crc, 0xCBF4_3926);
//!
//! // Keyed digest and the signature bytes that go on the wire
//! let key = DigestKey::from_bytes(&[0x42; 32]);
//! let mut tag = [0u8; 32];
//! keyed_digest(&key, b"TC set-mode safe", &mut tag)?;
//! let signature = SignatureMask::default().apply(&tag, ByteOrder::BigEndian);
//! assert_eq!(signature.len(), 16);
//! # Ok::<(), nanolink_integrity::IntegrityError>(())
//! ```

pub mod crc32;
pub mod error;
pub mod hash;
pub mod keyed_digest;
pub mod payload_crc;
pub mod signature;

mod kani_proofs;

// Re-export primary types at crate root for convenience
pub use crc32::{Crc32, INITIAL_SEED, TableVariant, checksum, checksum_with, resume};
pub use error::IntegrityError;
pub use hash::{BlockHash, HASH_LENGTH, Sha256Hash};
pub use keyed_digest::{
    DIGEST_LENGTH, DigestKey, KEY_LENGTH, KeyedDigest, MAX_MESSAGE_SIZE, keyed_digest,
    keyed_digest_from_slice, verify_keyed_digest,
};
pub use payload_crc::payload_crc32;
pub use signature::{ByteOrder, SignatureMask};
