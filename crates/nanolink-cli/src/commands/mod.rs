//! CLI command implementations.

pub mod config;
pub mod crc;
pub mod digest;
pub mod input;
pub mod version;
