//! # nanolink-bench: Performance benchmarks for nanolink
//!
//! ## Benchmarks
//!
//! - **integrity**: frame checksum, payload checksum, keyed digest and
//!   signature masking over telecommand-sized inputs
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p nanolink-bench
//!
//! # Save baseline for comparison
//! cargo bench -p nanolink-bench --bench integrity -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -p nanolink-bench --bench integrity -- --baseline main
//! ```

use nanolink_integrity::{DigestKey, KEY_LENGTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Input sizes shared by the benchmarks, up to the largest signable message.
pub const FRAME_SIZES: [usize; 5] = [16, 64, 128, 255, 256];

/// Reproducible pseudo-random frame of `len` bytes.
pub fn frame(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(data.as_mut_slice());
    data
}

/// Reproducible non-null digest key.
pub fn bench_key(seed: u64) -> DigestKey {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = [0u8; KEY_LENGTH];
    rng.fill(&mut bytes[..]);
    bytes[0] |= 1;
    DigestKey::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_reproducible() {
        assert_eq!(frame(64, 7), frame(64, 7));
        assert_ne!(frame(64, 7), frame(64, 8));
        assert_eq!(frame(0, 7).len(), 0);
    }

    #[test]
    fn test_bench_key_is_not_null() {
        assert!(!bench_key(0).is_null());
        assert_eq!(bench_key(3).as_bytes(), bench_key(3).as_bytes());
    }
}
