//! Implementation of `litevec validate`.
//!
//! Walks the stream to the end of input and reports either a series of
//! success checkmarks or a diagnostic failure line with the wire-contract
//! status code. Exit code 0 means the stream is structurally valid; the
//! main dispatcher converts `Err` into exit code 1.
//!
//! # Success output
//!
//! ```text
//! ✓ Stream: 42 elements parsed
//! ✓ Framing: structs and lists balanced
//! ✓ Bytes: 180 of 180 consumed
//! ```
//!
//! # Failure output
//!
//! ```text
//! ✗ Error: unexpected end of input at offset 6 (status 2)
//! ```

use anyhow::{Result, anyhow};
use litevec_decoder::Decoder;

use crate::ValidateArgs;

/// Run the `litevec validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the stream fails any
/// structural or lexical check.
pub fn run(args: &ValidateArgs, validate_utf8: bool) -> Result<()> {
    let bytes = crate::read_input(&args.file)?;
    let mut dec = Decoder::with_utf8_validation(&bytes, validate_utf8);

    let mut elements = 0usize;
    loop {
        match dec.next() {
            Ok(Some(_)) => elements += 1,
            Ok(None) => break,
            Err(err) => {
                println!("✗ Error: {err} (status {})", err.code());
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!(
        "✓ Stream: {elements} element{} parsed",
        if elements == 1 { "" } else { "s" }
    );
    println!("✓ Framing: structs and lists balanced");
    println!("✓ Bytes: {} of {} consumed", dec.offset(), bytes.len());
    Ok(())
}
