//! Implementation of `litevec json`.
//!
//! Renders a LiteVector stream as JSON: structs become objects, lists and
//! vectors become arrays, NIL becomes `null`. Two families of values have
//! no faithful JSON representation and fall back to strings:
//!
//! - Integers outside the JavaScript safe range (±2⁵³−1) are quoted so
//!   consumers do not silently lose precision.
//! - `NaN` and the infinities render as `"NaN"`, `"Infinity"`, and
//!   `"-Infinity"`.
//!
//! A stream with a single top-level value renders as that value; a stream
//! with several renders as an array of them.

use anyhow::{Result, bail};
use litevec_decoder::Decoder;
use litevec_wire::{Element, TypeCode, Value};
use serde_json::{Map, Number, Value as Json};

use crate::JsonArgs;

/// Largest integer JSON consumers can hold in an IEEE-754 double.
const JS_MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Run the `litevec json` command.
pub fn run(args: &JsonArgs, validate_utf8: bool) -> Result<()> {
    let bytes = crate::read_input(&args.file)?;
    let rendered = render(&bytes, validate_utf8)?;
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

/// Decode a whole stream into a JSON value.
///
/// # Errors
///
/// Fails on any decode error, and on a struct key that is not a string
/// (which the decoder itself already rejects).
pub(crate) fn render(bytes: &[u8], validate_utf8: bool) -> Result<Json> {
    let mut dec = Decoder::with_utf8_validation(bytes, validate_utf8);
    let mut top = Vec::new();
    while let Some(el) = dec.next()? {
        top.push(value_of(&mut dec, &el)?);
    }
    if top.len() == 1 {
        Ok(top.remove(0))
    } else {
        Ok(Json::Array(top))
    }
}

/// Convert one element, consuming the body first if it opens a
/// struct or list.
fn value_of(dec: &mut Decoder<'_>, el: &Element<'_>) -> Result<Json> {
    match el.value {
        Value::None => match el.type_code {
            TypeCode::Struct => object(dec),
            TypeCode::List => array(dec),
            _ => Ok(Json::Null),
        },
        Value::Bool(b) => Ok(Json::Bool(b)),
        Value::Int(v) => Ok(int_json(v)),
        Value::Uint(v) => Ok(uint_json(v)),
        Value::Float32(v) => Ok(float_json(f64::from(v))),
        Value::Float64(v) => Ok(float_json(v)),
        Value::Bytes(b) if el.type_code == TypeCode::String => {
            Ok(Json::String(String::from_utf8_lossy(b).into_owned()))
        }
        Value::Bytes(b) => Ok(vector_json(el.type_code, b)),
    }
}

/// Consume a struct body up to its END and build an object.
fn object(dec: &mut Decoder<'_>) -> Result<Json> {
    let mut map = Map::new();
    loop {
        let Some(key_el) = dec.next()? else {
            bail!("unterminated struct");
        };
        if key_el.type_code == TypeCode::End {
            return Ok(Json::Object(map));
        }
        let Value::Bytes(key_bytes) = key_el.value else {
            bail!("struct key is not a string");
        };
        let key = String::from_utf8_lossy(key_bytes).into_owned();

        let Some(val_el) = dec.next()? else {
            bail!("unterminated struct");
        };
        map.insert(key, value_of(dec, &val_el)?);
    }
}

/// Consume a list body up to its END and build an array.
fn array(dec: &mut Decoder<'_>) -> Result<Json> {
    let mut items = Vec::new();
    loop {
        let Some(el) = dec.next()? else {
            bail!("unterminated list");
        };
        if el.type_code == TypeCode::End {
            return Ok(Json::Array(items));
        }
        items.push(value_of(dec, &el)?);
    }
}

fn int_json(v: i64) -> Json {
    if v.unsigned_abs() > JS_MAX_SAFE_INTEGER {
        Json::String(v.to_string())
    } else {
        Json::Number(Number::from(v))
    }
}

fn uint_json(v: u64) -> Json {
    if v > JS_MAX_SAFE_INTEGER {
        Json::String(v.to_string())
    } else {
        Json::Number(Number::from(v))
    }
}

fn float_json(v: f64) -> Json {
    if v.is_nan() {
        return Json::String("NaN".to_string());
    }
    if v.is_infinite() {
        let text = if v < 0.0 { "-Infinity" } else { "Infinity" };
        return Json::String(text.to_string());
    }
    match Number::from_f64(v) {
        Some(n) => Json::Number(n),
        None => Json::String(v.to_string()),
    }
}

/// Expand a vector payload into an array of per-element values.
fn vector_json(type_code: TypeCode, payload: &[u8]) -> Json {
    let width = type_code.width();
    let items = payload
        .chunks_exact(width)
        .map(|chunk| scalar_json(type_code, chunk))
        .collect();
    Json::Array(items)
}

/// One vector element, decoded from its little-endian bytes.
fn scalar_json(type_code: TypeCode, chunk: &[u8]) -> Json {
    match type_code {
        TypeCode::Bool => Json::Bool(chunk[0] != 0),
        TypeCode::U8 => Json::Number(Number::from(chunk[0])),
        TypeCode::U16 => Json::Number(Number::from(u16::from_le_bytes(le(chunk)))),
        TypeCode::U32 => Json::Number(Number::from(u32::from_le_bytes(le(chunk)))),
        TypeCode::U64 => uint_json(u64::from_le_bytes(le(chunk))),
        TypeCode::I8 => Json::Number(Number::from(chunk[0] as i8)),
        TypeCode::I16 => Json::Number(Number::from(i16::from_le_bytes(le(chunk)))),
        TypeCode::I32 => Json::Number(Number::from(i32::from_le_bytes(le(chunk)))),
        TypeCode::I64 => int_json(i64::from_le_bytes(le(chunk))),
        TypeCode::F32 => float_json(f64::from(f32::from_le_bytes(le(chunk)))),
        TypeCode::F64 => float_json(f64::from_le_bytes(le(chunk))),
        _ => Json::Null,
    }
}

fn le<const N: usize>(chunk: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&chunk[..N]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use litevec_encoder::Encoder;

    fn encode(build: impl FnOnce(&mut Encoder<Vec<u8>>)) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        build(&mut enc);
        enc.finish().unwrap()
    }

    #[test]
    fn renders_a_struct_document() {
        let bytes = encode(|e| {
            e.struct_start()
                .string("name")
                .string("telemetry")
                .string("count")
                .u32(3)
                .string("ok")
                .bool(true)
                .string("tags")
                .list_start()
                .string("a")
                .nil()
                .list_end()
                .struct_end();
        });
        let rendered = render(&bytes, true).unwrap();
        insta::assert_snapshot!(serde_json::to_string_pretty(&rendered).unwrap(), @r#"
        {
          "name": "telemetry",
          "count": 3,
          "ok": true,
          "tags": [
            "a",
            null
          ]
        }
        "#);
    }

    #[test]
    fn unsafe_integers_are_quoted() {
        let bytes = encode(|e| {
            e.list_start()
                .u64(u64::MAX)
                .i64(-9_007_199_254_740_993)
                .u32(7)
                .list_end();
        });
        let rendered = render(&bytes, true).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!(["18446744073709551615", "-9007199254740993", 7])
        );
    }

    #[test]
    fn float_specials_render_as_strings() {
        let bytes = encode(|e| {
            e.list_start()
                .f64(f64::NAN)
                .f32(f32::INFINITY)
                .f64(f64::NEG_INFINITY)
                .f64(1.5)
                .list_end();
        });
        let rendered = render(&bytes, true).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!(["NaN", "Infinity", "-Infinity", 1.5])
        );
    }

    #[test]
    fn vectors_expand_to_arrays() {
        let bytes = encode(|e| {
            e.struct_start()
                .string("u16")
                .u16_vec(&[1, 2, 3])
                .string("flags")
                .bool_vec(&[true, false])
                .string("i8")
                .i8_vec(&[-1, 2])
                .struct_end();
        });
        let rendered = render(&bytes, true).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({"u16": [1, 2, 3], "flags": [true, false], "i8": [-1, 2]})
        );
    }

    #[test]
    fn multiple_top_level_values_become_an_array() {
        let bytes = encode(|e| {
            e.u8(1).u8(2);
        });
        let rendered = render(&bytes, true).unwrap();
        assert_eq!(rendered, serde_json::json!([1, 2]));
    }

    #[test]
    fn empty_stream_renders_as_empty_array() {
        let rendered = render(&[], true).unwrap();
        assert_eq!(rendered, serde_json::json!([]));
    }
}
