#![no_main]

use libfuzzer_sys::fuzz_target;
use litevec_decoder::Decoder;

// Fuzz target: raw decoder entry point.
//
// Drives `next()` over arbitrary bytes until a terminal status. The
// decoder must terminate for every input, touch only bytes inside the
// buffer, and report one of the defined statuses without panicking.
//
// Catches bugs in:
// - Tag splitting and size-code validation
// - NOP skipping at end of input
// - Struct key/value alternation and nesting tracking
// - Length-prefix reads and overflow-safe bounds checks
// - UTF-8 validation of string payloads
fuzz_target!(|data: &[u8]| {
    let mut dec = Decoder::new(data);
    loop {
        match dec.next() {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => break,
        }
    }
});
