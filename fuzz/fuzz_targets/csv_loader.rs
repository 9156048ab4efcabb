#![no_main]

use abtest::loader::{parse_aggregated, parse_row_level};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loaders must return an error, never panic, on malformed input
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_aggregated(input);
        let _ = parse_row_level(input);
    }
});
