//! Signature masking.
//!
//! Telecommand packets only carry part of the 32-byte keyed digest. A mask of
//! 32 `1`/`0` characters selects which tag bytes travel on the wire; the
//! selected bytes keep their order, and are reversed when the link runs
//! little-endian.

use std::fmt;
use std::str::FromStr;

use crate::error::{IntegrityError, Result};
use crate::keyed_digest::DIGEST_LENGTH;

/// Order in which masked signature bytes are placed in the packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Selection of tag bytes placed in a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureMask {
    keep: [bool; DIGEST_LENGTH],
}

impl SignatureMask {
    /// Keeps every byte of the tag.
    pub const FULL: Self = Self {
        keep: [true; DIGEST_LENGTH],
    };

    /// Parses a mask from 32 `1`/`0` characters.
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        let length = pattern.chars().count();
        if length != DIGEST_LENGTH {
            return Err(IntegrityError::InvalidMask(format!(
                "expected {DIGEST_LENGTH} characters, got {length}"
            )));
        }

        let mut keep = [false; DIGEST_LENGTH];
        for (slot, ch) in keep.iter_mut().zip(pattern.chars()) {
            *slot = match ch {
                '1' => true,
                '0' => false,
                other => {
                    return Err(IntegrityError::InvalidMask(format!(
                        "unexpected character {other:?}"
                    )));
                }
            };
        }
        Ok(Self { keep })
    }

    /// Number of bytes the mask keeps.
    pub fn kept(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Extracts the wire signature from a full tag.
    pub fn apply(&self, tag: &[u8; DIGEST_LENGTH], order: ByteOrder) -> Vec<u8> {
        let mut signature: Vec<u8> = tag
            .iter()
            .zip(self.keep)
            .filter_map(|(&byte, keep)| keep.then_some(byte))
            .collect();
        if order == ByteOrder::LittleEndian {
            signature.reverse();
        }
        signature
    }
}

impl Default for SignatureMask {
    /// First half of the tag, as flown.
    fn default() -> Self {
        let mut keep = [false; DIGEST_LENGTH];
        keep[..DIGEST_LENGTH / 2].fill(true);
        Self { keep }
    }
}

impl FromStr for SignatureMask {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SignatureMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &keep in &self.keep {
            f.write_str(if keep { "1" } else { "0" })?;
        }
        Ok(())
    }
}
