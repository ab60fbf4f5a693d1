#![warn(clippy::pedantic)]

//! Wire-level definitions shared by the LiteVector encoder and decoder:
//! the tag grammar (type codes, size codes, the NOP filler byte), the
//! decoded-element record, the decode error taxonomy, and the UTF-8
//! validation automaton.
//!
//! A LiteVector stream is a flat sequence of tagged values. Every value
//! begins with a one-byte tag whose high nibble is the type code and whose
//! low nibble is the size code. There is no magic number, no version byte,
//! and no checksum; transport framing is the caller's responsibility.

pub mod element;
pub mod error;
pub mod tag;
pub mod utf8;

pub use element::{Element, Value};
pub use error::DecodeError;
pub use tag::{NOP_TAG, SizeCode, TypeCode};
