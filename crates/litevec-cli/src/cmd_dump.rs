//! Implementation of `litevec dump`.
//!
//! Walks a stream element by element and prints one line per element:
//! the byte offset the parse started at, indentation tracking the open
//! struct/list depth, and a short rendering of the value. Vector payloads
//! preview at most eight elements. On a malformed stream everything up to
//! the failure is still printed before the error is reported.

use anyhow::{Context, Result};
use litevec_decoder::Decoder;
use litevec_wire::{Element, TypeCode, Value};

use crate::DumpArgs;

/// Run the `litevec dump` command.
pub fn run(args: &DumpArgs, validate_utf8: bool) -> Result<()> {
    let bytes = crate::read_input(&args.file)?;
    let mut out = String::new();
    let result = dump(&bytes, validate_utf8, &mut out);
    print!("{out}");
    result
}

/// Write the dump of `bytes` into `out`, stopping at the first error.
pub(crate) fn dump(bytes: &[u8], validate_utf8: bool, out: &mut String) -> Result<()> {
    use std::fmt::Write;

    let mut dec = Decoder::with_utf8_validation(bytes, validate_utf8);
    let mut depth = 0usize;
    loop {
        let offset = dec.offset();
        match dec.next() {
            Ok(Some(el)) => {
                if el.type_code == TypeCode::End {
                    depth = depth.saturating_sub(1);
                }
                let _ = writeln!(
                    out,
                    "{offset:06x}  {:indent$}{}",
                    "",
                    describe(&el),
                    indent = depth * 2
                );
                if matches!(el.type_code, TypeCode::Struct | TypeCode::List) {
                    depth += 1;
                }
            }
            Ok(None) => return Ok(()),
            Err(err) => {
                return Err(err).with_context(|| format!("decode failed near offset {offset}"));
            }
        }
    }
}

fn describe(el: &Element<'_>) -> String {
    match el.value {
        Value::None => type_name(el.type_code).to_string(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Int(v) => format!("{} {v}", type_name(el.type_code)),
        Value::Uint(v) => format!("{} {v}", type_name(el.type_code)),
        Value::Float32(v) => format!("f32 {v}"),
        Value::Float64(v) => format!("f64 {v}"),
        Value::Bytes(b) if el.type_code == TypeCode::String => {
            format!("string({}) {:?}", el.length, String::from_utf8_lossy(b))
        }
        Value::Bytes(b) => {
            let width = el.type_code.width();
            format!(
                "{}[{}] {}",
                type_name(el.type_code),
                el.length / width,
                preview(el.type_code, b)
            )
        }
    }
}

fn type_name(type_code: TypeCode) -> &'static str {
    match type_code {
        TypeCode::Nil => "nil",
        TypeCode::Struct => "struct",
        TypeCode::List => "list",
        TypeCode::End => "end",
        TypeCode::String => "string",
        TypeCode::Bool => "bool",
        TypeCode::U8 => "u8",
        TypeCode::U16 => "u16",
        TypeCode::U32 => "u32",
        TypeCode::U64 => "u64",
        TypeCode::I8 => "i8",
        TypeCode::I16 => "i16",
        TypeCode::I32 => "i32",
        TypeCode::I64 => "i64",
        TypeCode::F32 => "f32",
        TypeCode::F64 => "f64",
    }
}

/// Render up to the first eight vector elements.
fn preview(type_code: TypeCode, payload: &[u8]) -> String {
    const MAX_PREVIEW: usize = 8;

    let width = type_code.width();
    let count = payload.len() / width;
    let mut items: Vec<String> = payload
        .chunks_exact(width)
        .take(MAX_PREVIEW)
        .map(|chunk| scalar_text(type_code, chunk))
        .collect();
    if count > MAX_PREVIEW {
        items.push("…".to_string());
    }
    format!("[{}]", items.join(", "))
}

fn scalar_text(type_code: TypeCode, chunk: &[u8]) -> String {
    match type_code {
        TypeCode::Bool => (chunk[0] != 0).to_string(),
        TypeCode::U8 => chunk[0].to_string(),
        TypeCode::U16 => u16::from_le_bytes(le(chunk)).to_string(),
        TypeCode::U32 => u32::from_le_bytes(le(chunk)).to_string(),
        TypeCode::U64 => u64::from_le_bytes(le(chunk)).to_string(),
        TypeCode::I8 => (chunk[0] as i8).to_string(),
        TypeCode::I16 => i16::from_le_bytes(le(chunk)).to_string(),
        TypeCode::I32 => i32::from_le_bytes(le(chunk)).to_string(),
        TypeCode::I64 => i64::from_le_bytes(le(chunk)).to_string(),
        TypeCode::F32 => f32::from_le_bytes(le(chunk)).to_string(),
        TypeCode::F64 => f64::from_le_bytes(le(chunk)).to_string(),
        _ => String::new(),
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

    fn dump_str(bytes: &[u8]) -> String {
        let mut out = String::new();
        dump(bytes, true, &mut out).unwrap();
        out
    }

    #[test]
    fn dumps_scalars_with_types() {
        let mut enc = Encoder::new(Vec::new());
        enc.struct_start().string("n").u32(3).struct_end();
        let out = dump_str(&enc.finish().unwrap());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("struct"));
        assert!(lines[1].contains("string(1) \"n\""));
        assert!(lines[2].contains("u32 3"));
        assert!(lines[3].ends_with("end"));
    }

    #[test]
    fn indents_nested_bodies() {
        let mut enc = Encoder::new(Vec::new());
        enc.list_start().list_start().u8(1).list_end().list_end();
        let out = dump_str(&enc.finish().unwrap());

        let lines: Vec<&str> = out.lines().collect();
        // Offsets are six hex digits plus two spaces; depth adds two
        // spaces per open frame.
        assert!(lines[0].starts_with("000000  list"));
        assert!(lines[1].starts_with("000001    list"));
        assert!(lines[2].starts_with("000002      u8 1"));
        assert!(lines[3].starts_with("000004    end"));
        assert!(lines[4].starts_with("000005  end"));
    }

    #[test]
    fn long_vectors_are_truncated() {
        let mut enc = Encoder::new(Vec::new());
        enc.u8_vec(&[0; 20]);
        let out = dump_str(&enc.finish().unwrap());
        assert!(out.contains("u8[20]"));
        assert!(out.contains("…"));
    }

    #[test]
    fn partial_dump_survives_a_bad_stream() {
        // A valid nil, then a truncated u32.
        let mut out = String::new();
        let result = dump(&[0x00, 0x80, 0x01], true, &mut out);
        assert!(result.is_err());
        assert!(out.contains("nil"));
    }
}
