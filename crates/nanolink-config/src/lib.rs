//! Configuration management for nanolink
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (NANOLINK_* prefix, `__` between nested keys)
//! 2. nanolink.local.toml (gitignored, local overrides)
//! 3. nanolink.toml (git-tracked, ground-station config)
//! 4. ~/.config/nanolink/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use nanolink_integrity::{ByteOrder, SignatureMask, TableVariant};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main nanolink configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanolinkConfig {
    pub checksum: ChecksumConfig,
    pub digest: DigestConfig,
    pub signature: SignatureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
    pub table: CrcTable,
    pub seed: u32,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            table: CrcTable::Legacy,
            seed: nanolink_integrity::INITIAL_SEED,
        }
    }
}

impl ChecksumConfig {
    /// Table variant the checksum folds through.
    pub fn variant(&self) -> TableVariant {
        self.table.into()
    }
}

/// Lookup table selection. `ieee` must be chosen explicitly; the default
/// matches the flight software.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CrcTable {
    Legacy,
    Ieee,
}

impl From<CrcTable> for TableVariant {
    fn from(table: CrcTable) -> Self {
        match table {
            CrcTable::Legacy => TableVariant::Legacy,
            CrcTable::Ieee => TableVariant::Ieee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    pub allow_null_key: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            key_file: None,
            allow_null_key: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub mask: String,
    pub byte_order: WireByteOrder,
    /// Size of the packet's signature field; the mask must keep exactly this
    /// many bytes.
    pub length: usize,
}

/// Signature field size in flown telecommand packets.
pub const DEFAULT_SIGNATURE_LENGTH: usize = 16;

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            mask: SignatureMask::default().to_string(),
            byte_order: WireByteOrder::BigEndian,
            length: DEFAULT_SIGNATURE_LENGTH,
        }
    }
}

impl SignatureConfig {
    /// Parsed signature mask.
    pub fn parsed_mask(&self) -> Result<SignatureMask, ConfigError> {
        SignatureMask::parse(&self.mask)
            .map_err(|e| ConfigError::ValidationError(format!("signature.mask: {e}")))
    }

    /// Byte order of the signature field.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order.into()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WireByteOrder {
    BigEndian,
    LittleEndian,
}

impl From<WireByteOrder> for ByteOrder {
    fn from(order: WireByteOrder) -> Self {
        match order {
            WireByteOrder::BigEndian => ByteOrder::BigEndian,
            WireByteOrder::LittleEndian => ByteOrder::LittleEndian,
        }
    }
}

impl NanolinkConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Parse a single TOML file, without layering
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the integrity primitives cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mask = self.signature.parsed_mask()?;
        if mask.kept() != self.signature.length {
            return Err(ConfigError::ValidationError(format!(
                "signature.mask keeps {} bytes but signature.length is {}",
                mask.kept(),
                self.signature.length
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if let Some(key_file) = &self.digest.key_file {
            if key_file.is_relative() {
                self.digest.key_file = Some(base.join(key_file));
            }
        }
    }

    /// Render as TOML, as shown by `nanolink config show`
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = NanolinkConfig::default();
        assert_eq!(config.checksum.table, CrcTable::Legacy);
        assert_eq!(config.checksum.seed, 0xFFFF_FFFF);
        assert_eq!(config.checksum.variant(), TableVariant::Legacy);
        assert!(config.digest.allow_null_key);
        assert_eq!(config.digest.key_file, None);
        assert_eq!(config.signature.mask, format!("{}{}", "1".repeat(16), "0".repeat(16)));
        assert_eq!(config.signature.byte_order(), ByteOrder::BigEndian);
        assert_eq!(config.signature.length, DEFAULT_SIGNATURE_LENGTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_resolution() {
        let mut config = NanolinkConfig::default();
        config.digest.key_file = Some(PathBuf::from("keys/uplink.key"));
        config.resolve_paths("/srv/ground");

        assert_eq!(
            config.digest.key_file,
            Some(PathBuf::from("/srv/ground/keys/uplink.key"))
        );
    }

    #[test]
    fn test_absolute_key_path_untouched() {
        let mut config = NanolinkConfig::default();
        config.digest.key_file = Some(PathBuf::from("/etc/nanolink/uplink.key"));
        config.resolve_paths("/srv/ground");

        assert_eq!(
            config.digest.key_file,
            Some(PathBuf::from("/etc/nanolink/uplink.key"))
        );
    }

    #[test_case("1111"; "short mask")]
    #[test_case("11111111111111100000000000000000"; "keeps fifteen")]
    #[test_case("11111111111111111000000000000000"; "keeps seventeen")]
    #[test_case("0000000000000000000000000000000x"; "bad character")]
    #[test_case("00000000000000000000000000000000"; "keeps nothing")]
    fn test_invalid_mask_fails_validation(mask: &str) {
        let mut config = NanolinkConfig::default();
        config.signature.mask = mask.to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_mask_spread_across_tag_is_accepted() {
        let mut config = NanolinkConfig::default();
        config.signature.mask = "10".repeat(16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_mask_requires_matching_length() {
        let mut config = NanolinkConfig::default();
        config.signature.mask = "1".repeat(32);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.signature.length = 32;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = NanolinkConfig::default();
        config.checksum.table = CrcTable::Ieee;
        config.signature.byte_order = WireByteOrder::LittleEndian;
        config.signature.mask = "1".repeat(32);
        config.signature.length = 32;

        let text = config.to_toml().expect("Failed to render config");
        assert!(text.contains("table = \"ieee\""));
        assert!(text.contains("byte_order = \"little-endian\""));
        assert!(text.contains("length = 32"));

        let parsed: NanolinkConfig = toml::from_str(&text).expect("Failed to parse config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_toml_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("station.toml");
        std::fs::write(
            &path,
            r#"
[checksum]
table = "ieee"
seed = 0

[signature]
byte_order = "little-endian"
"#,
        )
        .expect("Failed to write config");

        let config = NanolinkConfig::from_toml_file(&path).expect("Failed to load config");
        assert_eq!(config.checksum.variant(), TableVariant::Ieee);
        assert_eq!(config.checksum.seed, 0);
        assert_eq!(config.signature.byte_order(), ByteOrder::LittleEndian);
        assert!(config.digest.allow_null_key);
    }

    #[test]
    fn test_from_toml_file_errors() {
        let temp_dir = tempdir().expect("Failed to create temp dir");

        let missing = temp_dir.path().join("missing.toml");
        let err = NanolinkConfig::from_toml_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("nanolink config file"));

        let broken = temp_dir.path().join("broken.toml");
        std::fs::write(&broken, "[checksum\ntable = ").expect("Failed to write config");
        assert!(matches!(
            NanolinkConfig::from_toml_file(&broken),
            Err(ConfigError::ParseError { .. })
        ));

        let unknown_table = temp_dir.path().join("unknown.toml");
        std::fs::write(&unknown_table, "[checksum]\ntable = \"crc32c\"\n")
            .expect("Failed to write config");
        assert!(matches!(
            NanolinkConfig::from_toml_file(&unknown_table),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
