//! Message and key sources shared by the commands.

use std::fs;
use std::io::Read;

use anyhow::{Context, Result, bail};
use nanolink_config::NanolinkConfig;
use nanolink_integrity::{DigestKey, KEY_LENGTH};
use zeroize::Zeroizing;

use crate::{InputArgs, KeyArgs};

/// Reads the message bytes named by `args`.
pub fn read_message(args: &InputArgs) -> Result<Vec<u8>> {
    if args.hex {
        return hex::decode(args.input.trim()).context("INPUT is not valid hex");
    }

    if args.input == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input))
}

/// Resolves the digest key.
///
/// Order: `--key`, `--key-file`, the configured key file, then the null key
/// when the configuration allows it.
pub fn resolve_key(args: &KeyArgs, config: &NanolinkConfig) -> Result<DigestKey> {
    if let Some(text) = &args.key {
        return DigestKey::from_hex(text).context("--key must be 64 hex characters");
    }

    let key_file = args.key_file.as_ref().or(config.digest.key_file.as_ref());
    if let Some(path) = key_file {
        let contents = Zeroizing::new(
            fs::read(path).with_context(|| format!("Failed to read key file {}", path.display()))?,
        );
        return parse_key_file(&contents)
            .with_context(|| format!("Invalid key file {}", path.display()));
    }

    if !config.digest.allow_null_key {
        bail!("No key provided and digest.allow_null_key is false");
    }
    tracing::warn!("no key provisioned, signing with the null key");
    Ok(DigestKey::null())
}

/// A key file holds either the raw key bytes or their hex encoding.
fn parse_key_file(contents: &[u8]) -> Result<DigestKey> {
    if contents.len() == KEY_LENGTH {
        return Ok(DigestKey::try_from_slice(contents)?);
    }
    let text = std::str::from_utf8(contents).context("key file is neither raw nor hex")?;
    Ok(DigestKey::from_hex(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "d65337101b3ade40e0591ea652e71657b604e53f641aa941231ae2821bae91a5";

    #[test]
    fn test_key_file_raw_and_hex_agree() {
        let raw = hex::decode(KEY_HEX).unwrap();
        let from_raw = parse_key_file(&raw).unwrap();
        let from_hex = parse_key_file(format!("{KEY_HEX}\n").as_bytes()).unwrap();
        assert_eq!(from_raw.as_bytes(), from_hex.as_bytes());
    }

    #[test]
    fn test_key_file_wrong_length_rejected() {
        assert!(parse_key_file(&[0u8; 16]).is_err());
        assert!(parse_key_file(b"abcd").is_err());
    }

    #[test]
    fn test_null_key_fallback() {
        let args = KeyArgs {
            key: None,
            key_file: None,
        };
        let mut config = NanolinkConfig::default();
        assert!(resolve_key(&args, &config).unwrap().is_null());

        config.digest.allow_null_key = false;
        assert!(resolve_key(&args, &config).is_err());
    }

    #[test]
    fn test_hex_message() {
        let args = InputArgs {
            input: " deadbeef ".to_string(),
            hex: true,
        };
        assert_eq!(read_message(&args).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }
}
