#![warn(clippy::pedantic)]

//! Shared helpers for the LiteVector integration tests and benches.

use litevec_decoder::Decoder;
use litevec_encoder::Encoder;
use litevec_wire::{DecodeError, Element, SizeCode, TypeCode, Value};

/// An element detached from the decode buffer, for whole-stream
/// comparisons.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedElement {
    pub type_code: TypeCode,
    pub size_code: SizeCode,
    pub length: usize,
    pub value: OwnedValue,
}

/// Owned counterpart of [`Value`]. Floats compare by bit pattern, so NaN
/// equals NaN and `+0.0` differs from `-0.0`, the equality the format's
/// round-trip guarantee is stated in.
#[derive(Clone, Debug)]
pub enum OwnedValue {
    None,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
}

impl PartialEq for OwnedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Element<'_>> for OwnedElement {
    fn from(el: Element<'_>) -> Self {
        let value = match el.value {
            Value::None => OwnedValue::None,
            Value::Bool(v) => OwnedValue::Bool(v),
            Value::Int(v) => OwnedValue::Int(v),
            Value::Uint(v) => OwnedValue::Uint(v),
            Value::Float32(v) => OwnedValue::Float32(v),
            Value::Float64(v) => OwnedValue::Float64(v),
            Value::Bytes(b) => OwnedValue::Bytes(b.to_vec()),
        };
        Self {
            type_code: el.type_code,
            size_code: el.size_code,
            length: el.length,
            value,
        }
    }
}

/// Encode a document into memory.
///
/// # Panics
///
/// Panics if the in-memory sink reports an error, which it cannot.
#[must_use]
pub fn encode_to_vec(build: impl FnOnce(&mut Encoder<Vec<u8>>)) -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    build(&mut enc);
    enc.finish().expect("in-memory sink cannot fail")
}

/// Same, with vector alignment forced on or off.
#[must_use]
pub fn encode_to_vec_aligned(
    align: bool,
    build: impl FnOnce(&mut Encoder<Vec<u8>>),
) -> Vec<u8> {
    let mut enc = Encoder::with_alignment(Vec::new(), align);
    build(&mut enc);
    enc.finish().expect("in-memory sink cannot fail")
}

/// Decode a whole stream into owned elements.
///
/// # Errors
///
/// Propagates the first decode error.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<OwnedElement>, DecodeError> {
    let mut dec = Decoder::new(bytes);
    let mut elements = Vec::new();
    while let Some(el) = dec.next()? {
        elements.push(OwnedElement::from(el));
    }
    Ok(elements)
}
