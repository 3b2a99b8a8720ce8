#![no_main]

use libfuzzer_sys::fuzz_target;
use rep_syntax::RepParser;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 must surface as an error, never a panic.
    let mut parser = RepParser::new();
    if parser.parse_reader(data).is_ok() {
        // A successful parse renders without panicking.
        let _ = parser.ast().to_string();
    }
});
