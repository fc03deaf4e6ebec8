//! Version command implementation.

use nanolink_integrity::{MAX_MESSAGE_SIZE, crc32};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

pub fn run() {
    println!("{NAME} {VERSION}");
    println!();
    println!("Checksums and telecommand signatures for the nanolink link.");
    println!();
    println!("Link parameters:");
    println!("  CRC polynomial:   0x{:08X} (reflected)", crc32::POLYNOMIAL);
    println!("  CRC seed:         0x{:08X}", crc32::INITIAL_SEED);
    println!("  Max signed bytes: {MAX_MESSAGE_SIZE}");
    println!();
    println!("Build info:");
    println!("  Target: {}", std::env::consts::ARCH);
    println!("  OS:     {}", std::env::consts::OS);
}
