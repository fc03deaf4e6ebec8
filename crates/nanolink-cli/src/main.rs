//! nanolink ground-station CLI.
//!
//! Computes the frame checksums and telecommand signatures the on-board
//! controller expects, so operators can build and check packets by hand.
//!
//! # Quick Start
//!
//! ```bash
//! # Frame checksum of a file
//! nanolink crc frame.bin
//!
//! # Keyed digest of a hex message with an explicit key
//! nanolink digest --key d653...91a5 --hex 0102030405
//!
//! # Signature bytes as placed in the packet (mask from nanolink.toml)
//! nanolink sign --key-file uplink.key frame.bin
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

/// nanolink - checksums and telecommand signatures for the nanolink link.
#[derive(Parser)]
#[command(name = "nanolink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Ground-station directory holding nanolink.toml.
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Read configuration from this file only, skipping the layered lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Frame checksum (flight-software CRC32).
    Crc {
        #[command(flatten)]
        input: InputArgs,

        /// Starting register value in hex (defaults to the configured seed).
        #[arg(long)]
        seed: Option<String>,

        /// Use the complete IEEE table instead of the flight table.
        #[arg(long)]
        ieee: bool,
    },

    /// Payload checksum (STM32 CRC unit).
    PayloadCrc {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Full 32-byte keyed digest.
    Digest {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Masked signature bytes as placed in the packet.
    Sign {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Check a full tag or a signature produced by `sign` against a message.
    Verify {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        key: KeyArgs,

        /// Expected tag or masked signature, in hex.
        #[arg(long)]
        tag: String,
    },

    /// Configuration commands.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
}

/// Message source shared by every command that reads data.
#[derive(Args)]
pub struct InputArgs {
    /// File to read, `-` for stdin, or hex bytes with --hex.
    pub input: String,

    /// Treat INPUT as hex-encoded bytes.
    #[arg(long)]
    pub hex: bool,
}

/// Key source shared by the digest commands.
#[derive(Args)]
pub struct KeyArgs {
    /// Key as 64 hex characters.
    #[arg(long, conflicts_with = "key_file")]
    pub key: Option<String>,

    /// File holding the key, raw (32 bytes) or hex.
    #[arg(long)]
    pub key_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging on stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let load_config = || commands::config::load(&cli.project_dir, cli.config.as_deref());

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Crc { input, seed, ieee } => {
            commands::crc::frame(&load_config()?, &input, seed.as_deref(), ieee)
        }
        Commands::PayloadCrc { input } => commands::crc::payload(&input),
        Commands::Digest { input, key } => {
            commands::digest::digest(&load_config()?, &input, &key)
        }
        Commands::Sign { input, key } => commands::digest::sign(&load_config()?, &input, &key),
        Commands::Verify { input, key, tag } => {
            commands::digest::verify(&load_config()?, &input, &key, &tag)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&load_config()?),
        },
    }
}
