#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{compress, DeOpts};

fuzz_target!(|data: &[u8]| {
    let _ = compress::from_compressed_bytes(data, DeOpts::new());
});
