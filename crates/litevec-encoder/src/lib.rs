#![warn(clippy::pedantic)]

//! Push-style LiteVector encoder.
//!
//! [`Encoder`] accepts a sequence of typed-value calls and emits tagged
//! bytes to any [`std::io::Write`] sink. It performs no I/O of its own
//! beyond delegating to the sink, keeps no buffer, and owns no payload
//! data; values are borrowed for the duration of each call.
//!
//! The encoder does not validate structural balance: a `struct_start`
//! without a matching `struct_end` is written as-is and rejected later by
//! a decoder. The only state it carries is a running output offset and a
//! sticky first-error status (see [`Encoder::status`]).

pub mod encoder;

pub use encoder::Encoder;
