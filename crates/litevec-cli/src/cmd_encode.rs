//! Implementation of `litevec encode`, the inverse of `litevec json`.
//!
//! Reads a JSON document and writes the equivalent LiteVector stream:
//! objects become structs, arrays become lists, `null` becomes NIL.
//! Integers are written at their narrowest width; a decoder widens them
//! back to 64 bits, so no information is lost. Fractional numbers are
//! written as F64.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use litevec_encoder::Encoder;
use serde_json::Value as Json;

use crate::EncodeArgs;

/// Run the `litevec encode` command.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let text = crate::read_input(&args.manifest)?;
    let doc: Json = serde_json::from_slice(&text).context("manifest is not valid JSON")?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut enc = Encoder::with_alignment(sink, !args.no_align);
    emit(&mut enc, &doc);
    enc.finish().context("cannot write stream")?;
    Ok(())
}

/// Append one JSON value, recursing into arrays and objects.
pub(crate) fn emit<W: Write>(enc: &mut Encoder<W>, value: &Json) {
    match value {
        Json::Null => {
            enc.nil();
        }
        Json::Bool(b) => {
            enc.bool(*b);
        }
        Json::Number(n) => emit_number(enc, n),
        Json::String(s) => {
            enc.string(s);
        }
        Json::Array(items) => {
            enc.list_start();
            for item in items {
                emit(enc, item);
            }
            enc.list_end();
        }
        Json::Object(map) => {
            enc.struct_start();
            for (key, val) in map {
                enc.string(key);
                emit(enc, val);
            }
            enc.struct_end();
        }
    }
}

/// Write a number at its narrowest integer width, or as F64.
fn emit_number<W: Write>(enc: &mut Encoder<W>, n: &serde_json::Number) {
    if let Some(v) = n.as_u64() {
        if let Ok(v) = u8::try_from(v) {
            enc.u8(v);
        } else if let Ok(v) = u16::try_from(v) {
            enc.u16(v);
        } else if let Ok(v) = u32::try_from(v) {
            enc.u32(v);
        } else {
            enc.u64(v);
        }
    } else if let Some(v) = n.as_i64() {
        // Non-negative integers took the unsigned branch above.
        if let Ok(v) = i8::try_from(v) {
            enc.i8(v);
        } else if let Ok(v) = i16::try_from(v) {
            enc.i16(v);
        } else if let Ok(v) = i32::try_from(v) {
            enc.i32(v);
        } else {
            enc.i64(v);
        }
    } else {
        enc.f64(n.as_f64().unwrap_or(f64::NAN));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litevec_decoder::Decoder;
    use litevec_wire::{TypeCode, Value};

    fn encode_doc(doc: &Json) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        emit(&mut enc, doc);
        enc.finish().unwrap()
    }

    #[test]
    fn json_round_trips_through_the_codec() {
        let doc = serde_json::json!({
            "name": "sensor-4",
            "vals": [1, 2, 3],
            "on": true,
            "none": null,
            "scale": 1.25
        });
        let bytes = encode_doc(&doc);
        let rendered = crate::cmd_json::render(&bytes, true).unwrap();
        assert_eq!(rendered, doc);
    }

    #[test]
    fn integers_take_their_narrowest_width() {
        let doc = serde_json::json!([0, 255, 256, 70000, 5_000_000_000u64, -1, -200, -70000]);
        let bytes = encode_doc(&doc);

        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.next().unwrap().unwrap().type_code, TypeCode::List);
        let widths = [
            TypeCode::U8,
            TypeCode::U8,
            TypeCode::U16,
            TypeCode::U32,
            TypeCode::U64,
            TypeCode::I8,
            TypeCode::I16,
            TypeCode::I32,
        ];
        for expected in widths {
            assert_eq!(dec.next().unwrap().unwrap().type_code, expected);
        }
        assert_eq!(dec.next().unwrap().unwrap().type_code, TypeCode::End);
    }

    #[test]
    fn fractions_are_f64() {
        let bytes = encode_doc(&serde_json::json!(0.5));
        let mut dec = Decoder::new(&bytes);
        let el = dec.next().unwrap().unwrap();
        assert_eq!(el.type_code, TypeCode::F64);
        assert_eq!(el.value, Value::Float64(0.5));
    }
}
