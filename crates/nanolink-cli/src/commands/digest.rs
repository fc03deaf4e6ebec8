//! Keyed digest and signature commands.

use anyhow::{Context, Result, bail};
use nanolink_config::NanolinkConfig;
use nanolink_integrity::{DIGEST_LENGTH, DigestKey, KeyedDigest};
use subtle::ConstantTimeEq;

use super::input::{read_message, resolve_key};
use crate::{InputArgs, KeyArgs};

/// Prints the full 32-byte tag.
pub fn digest(config: &NanolinkConfig, input: &InputArgs, key: &KeyArgs) -> Result<()> {
    let message = read_message(input)?;
    let key = resolve_key(key, config)?;
    let tag = compute(&key, &message)?;
    println!("{}", hex::encode(tag));
    Ok(())
}

/// Prints the signature bytes as they go into the packet.
pub fn sign(config: &NanolinkConfig, input: &InputArgs, key: &KeyArgs) -> Result<()> {
    let message = read_message(input)?;
    let key = resolve_key(key, config)?;
    let tag = compute(&key, &message)?;
    let mask = config.signature.parsed_mask()?;
    let signature = mask.apply(&tag, config.signature.byte_order());
    println!("{}", hex::encode(signature));
    Ok(())
}

/// Checks `expected` against the message.
///
/// Accepts either the full tag or the signature `sign` prints under the
/// configured mask and byte order. A full-width mask can make both 32 bytes
/// long, so both are always compared.
pub fn verify(
    config: &NanolinkConfig,
    input: &InputArgs,
    key: &KeyArgs,
    expected: &str,
) -> Result<()> {
    let message = read_message(input)?;
    let key = resolve_key(key, config)?;
    let expected = hex::decode(expected.trim()).context("--tag is not valid hex")?;

    let tag = compute(&key, &message)?;
    let mask = config.signature.parsed_mask()?;
    let signature = mask.apply(&tag, config.signature.byte_order());

    let matches = tag.as_slice().ct_eq(&expected) | signature.as_slice().ct_eq(&expected);
    if !bool::from(matches) {
        tracing::debug!(
            expected_length = expected.len(),
            signature_length = signature.len(),
            "tag and signature mismatch"
        );
        bail!("Signature does not match");
    }

    println!("OK");
    Ok(())
}

fn compute(key: &DigestKey, message: &[u8]) -> Result<[u8; DIGEST_LENGTH]> {
    KeyedDigest::new()
        .tag(key, message)
        .context("Failed to compute keyed digest")
}
