//! Chained CRC32 checksum over the reflected IEEE polynomial.
//!
//! Table-driven CRC32 using the reflected polynomial (0xEDB88320). The
//! checksum protects every telecommand and telemetry frame on the link, so
//! the output must match the flight software byte for byte.
//!
//! ## Table variants
//!
//! The flight software builds its lookup table with the loop bound
//! `byte < 255`, so entry 255 is never assigned and stays zero. Any fold
//! step whose index `(crc ^ byte) & 0xFF` lands on 255 therefore diverges
//! from textbook CRC-32. [`TableVariant::Legacy`] reproduces that table and
//! is what [`checksum`] uses. [`TableVariant::Ieee`] is the complete table and
//! is only reachable by asking for it explicitly.
//!
//! ## Chaining
//!
//! [`checksum`] starts from `seed` and complements at the end. Feeding one
//! call's result into the next call as `seed` is how the flight software
//! chains buffers, and it does NOT reproduce the checksum of the
//! concatenation. [`resume`] and [`Crc32`] undo the final complement and do
//! reproduce it.
//!
//! ## Usage
//!
//! ```
//! use nanolink_integrity::crc32::{self, Crc32, INITIAL_SEED, TableVariant};
//!
//! // One-shot calculation, flight-software compatible
//! let checksum = crc32::checksum(INITIAL_SEED, b"123456789");
//! assert_eq!(checksum, 0xCBF4_3926);
//!
//! // Streaming calculation over chunks
//! let mut hasher = Crc32::new(TableVariant::Legacy);
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), checksum);
//! ```

/// IEEE 802.3 CRC32 polynomial (reversed): 0xEDB88320
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Seed used by every frame checksum on the link.
pub const INITIAL_SEED: u32 = 0xFFFF_FFFF;

/// Lookup table as built by the flight software (entry 255 left at zero).
pub const LEGACY_TABLE: [u32; 256] = generate_table(255);

/// Complete IEEE lookup table.
pub const IEEE_TABLE: [u32; 256] = generate_table(256);

/// Selects which lookup table a checksum folds through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TableVariant {
    /// Flight-software table: entry 255 is zero.
    #[default]
    Legacy,
    /// Standard CRC-32/ISO-HDLC table.
    Ieee,
}

impl TableVariant {
    /// Returns the lookup table for this variant.
    pub const fn table(self) -> &'static [u32; 256] {
        match self {
            TableVariant::Legacy => &LEGACY_TABLE,
            TableVariant::Ieee => &IEEE_TABLE,
        }
    }
}

/// Generates the first `entries` slots of the CRC32 lookup table at compile
/// time. Remaining slots stay zero.
const fn generate_table(entries: usize) -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < entries {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn fold(table: &[u32; 256], mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ table[index];
    }
    crc
}

/// Computes the flight-software CRC32 of `data` starting from `seed`.
///
/// Folds through [`LEGACY_TABLE`] and returns the complemented register.
/// An empty buffer returns `!seed`.
///
/// # Examples
///
/// ```
/// use nanolink_integrity::crc32::{checksum, INITIAL_SEED};
/// assert_eq!(checksum(INITIAL_SEED, b"123456789"), 0xCBF4_3926);
/// assert_eq!(checksum(0x1234_5678, b""), 0xEDCB_A987);
/// ```
pub fn checksum(seed: u32, data: &[u8]) -> u32 {
    checksum_with(TableVariant::Legacy, seed, data)
}

/// Computes the CRC32 of `data` from `seed` using the given table variant.
pub fn checksum_with(variant: TableVariant, seed: u32, data: &[u8]) -> u32 {
    !fold(variant.table(), seed, data)
}

/// Continues a checksum from a previously finalized value.
///
/// `resume(checksum(INITIAL_SEED, a), b) == checksum(INITIAL_SEED, a ‖ b)`.
pub fn resume(previous: u32, data: &[u8]) -> u32 {
    checksum(!previous, data)
}

/// Incremental CRC32 hasher for chunked data.
///
/// Keeps the raw register between calls, so splitting the input anywhere
/// yields the same value as a single [`checksum_with`] call.
///
/// # Examples
///
/// ```
/// use nanolink_integrity::crc32::{Crc32, TableVariant};
///
/// let mut hasher = Crc32::new(TableVariant::Ieee);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// let checksum = hasher.finalize();
/// ```
#[derive(Debug, Clone)]
pub struct Crc32 {
    table: &'static [u32; 256],
    state: u32,
}

impl Crc32 {
    /// Creates a hasher seeded with [`INITIAL_SEED`].
    #[must_use]
    pub fn new(variant: TableVariant) -> Self {
        Self::with_seed(variant, INITIAL_SEED)
    }

    /// Creates a hasher seeded with an arbitrary register value.
    #[must_use]
    pub fn with_seed(variant: TableVariant, seed: u32) -> Self {
        Self {
            table: variant.table(),
            state: seed,
        }
    }

    /// Folds `data` into the running register.
    pub fn update(&mut self, data: &[u8]) {
        self.state = fold(self.table, self.state, data);
    }

    /// Finalizes the computation and returns the checksum.
    ///
    /// Consumes the hasher to prevent reuse after finalization.
    #[must_use]
    pub fn finalize(self) -> u32 {
        !self.state
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new(TableVariant::default())
    }
}
