//! Payload CRC compatible with the STM32 hardware CRC unit.
//!
//! Firmware patch payloads are checked on board by the microcontroller's CRC
//! peripheral rather than by [`crate::crc32`]. The peripheral works MSB-first
//! on the unreflected polynomial 0x04C11DB7, starts at 0xFFFFFFFF, applies no
//! final XOR, and is fed one 32-bit word per payload byte (`00 00 00 b`).

/// Unreflected CRC-32 polynomial used by the STM32 CRC unit.
pub const PAYLOAD_POLYNOMIAL: u32 = 0x04C1_1DB7;

/// Reset value of the STM32 CRC data register.
pub const PAYLOAD_INITIAL: u32 = 0xFFFF_FFFF;

const PAYLOAD_TABLE: [u32; 256] = generate_table();

const fn generate_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u32) << 24;
        let mut j = 0;
        while j < 8 {
            if crc & 0x8000_0000 != 0 {
                crc = (crc << 1) ^ PAYLOAD_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the payload CRC the way the on-board CRC unit does.
///
/// # Examples
///
/// ```
/// use nanolink_integrity::payload_crc32;
/// assert_eq!(payload_crc32(b""), 0xFFFF_FFFF);
/// assert_eq!(payload_crc32(b"123456789"), 0x1556_F485);
/// ```
pub fn payload_crc32(data: &[u8]) -> u32 {
    let mut crc = PAYLOAD_INITIAL;
    for &byte in data {
        for lane in [0, 0, 0, byte] {
            let index = ((crc >> 24) ^ u32::from(lane)) as usize;
            crc = (crc << 8) ^ PAYLOAD_TABLE[index];
        }
    }
    crc
}
