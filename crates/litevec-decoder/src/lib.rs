#![warn(clippy::pedantic)]

//! Pull-style LiteVector decoder.
//!
//! [`Decoder`] parses a caller-owned immutable byte buffer one element at
//! a time, enforcing the format's structural and lexical invariants as it
//! goes: size-code validity, struct key/value alternation, nesting
//! balance and depth, vector length and bounds checks, and (optionally)
//! UTF-8 validation of string payloads.
//!
//! Decoding is zero-copy: string and vector elements borrow their
//! payload from the input buffer. The decoder never blocks, allocates
//! nothing, and holds no resources beyond its fixed-size nesting stack,
//! so abandoning one mid-stream is always safe.

pub mod decoder;

pub use decoder::{Decoder, MAX_NESTING_DEPTH};
