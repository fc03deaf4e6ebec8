#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nanolink_integrity::{Crc32, TableVariant, checksum_with, payload_crc32, resume};

#[derive(Debug, Arbitrary)]
struct Input {
    ieee: bool,
    seed: u32,
    split: usize,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let variant = if input.ieee {
        TableVariant::Ieee
    } else {
        TableVariant::Legacy
    };
    let split = input.split % (input.data.len() + 1);
    let (head, tail) = input.data.split_at(split);

    // ── One-shot vs streaming ───────────────────────────────────────────────

    let whole = checksum_with(variant, input.seed, &input.data);
    let mut crc = Crc32::with_seed(variant, input.seed);
    crc.update(head);
    crc.update(tail);
    assert_eq!(crc.finalize(), whole, "streaming diverged from one-shot");

    // ── Resume through the public register ──────────────────────────────────

    if variant == TableVariant::Legacy {
        let first = checksum_with(variant, input.seed, head);
        assert_eq!(resume(first, tail), whole, "resume diverged from one-shot");
    }

    // ── Empty input returns the complemented seed ───────────────────────────

    assert_eq!(checksum_with(variant, input.seed, &[]), !input.seed);

    let _ = payload_crc32(&input.data);
});
