#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::error::Result;
use nbtree::{from_bytes_with_opts, DeOpts, Endian, Value};

fuzz_target!(|data: &[u8]| {
    // Use the first byte to pick the byte order so both variants get coverage.
    let (endian, data) = match data.split_first() {
        Some((b, rest)) if b & 1 == 1 => (Endian::Little, rest),
        Some((_, rest)) => (Endian::Big, rest),
        None => return,
    };

    let value: Result<Value> = from_bytes_with_opts(data, DeOpts::new().endian(endian).max_depth(64));
    if let Ok(v) = value {
        let _ = v.tag();
    }
});
