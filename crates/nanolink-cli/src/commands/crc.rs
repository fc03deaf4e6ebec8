//! Checksum commands.

use anyhow::{Context, Result};
use nanolink_config::NanolinkConfig;
use nanolink_integrity::{TableVariant, checksum_with, payload_crc32};

use super::input::read_message;
use crate::InputArgs;

/// Frame checksum with the configured (or overridden) seed and table.
pub fn frame(
    config: &NanolinkConfig,
    input: &InputArgs,
    seed: Option<&str>,
    ieee: bool,
) -> Result<()> {
    let data = read_message(input)?;
    let seed = match seed {
        Some(text) => parse_seed(text)?,
        None => config.checksum.seed,
    };
    let variant = if ieee {
        TableVariant::Ieee
    } else {
        config.checksum.variant()
    };

    let crc = checksum_with(variant, seed, &data);
    tracing::debug!(length = data.len(), ?variant, seed, "computed frame checksum");
    println!("0x{crc:08X}");
    Ok(())
}

/// Payload checksum as produced by the STM32 CRC unit.
pub fn payload(input: &InputArgs) -> Result<()> {
    let data = read_message(input)?;
    println!("0x{:08X}", payload_crc32(&data));
    Ok(())
}

fn parse_seed(text: &str) -> Result<u32> {
    let digits = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16).with_context(|| format!("Invalid seed '{text}'"))
}
