#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use litevec_decoder::{Decoder, MAX_NESTING_DEPTH};
use litevec_encoder::Encoder;

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Nil,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    U16Vec(Vec<u16>),
    I64Vec(Vec<i64>),
    F64Vec(Vec<f64>),
    List(Vec<FuzzValue>),
    Struct(Vec<(String, FuzzValue)>),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    align: bool,
    values: Vec<FuzzValue>,
}

// Containers past the decoder's nesting ceiling degrade to NIL so the
// generated document stays decodable; `depth` counts open frames.
fn emit<W: std::io::Write>(enc: &mut Encoder<W>, value: &FuzzValue, depth: usize) {
    match value {
        FuzzValue::Nil => {
            enc.nil();
        }
        FuzzValue::Bool(v) => {
            enc.bool(*v);
        }
        FuzzValue::U8(v) => {
            enc.u8(*v);
        }
        FuzzValue::U16(v) => {
            enc.u16(*v);
        }
        FuzzValue::U32(v) => {
            enc.u32(*v);
        }
        FuzzValue::U64(v) => {
            enc.u64(*v);
        }
        FuzzValue::I8(v) => {
            enc.i8(*v);
        }
        FuzzValue::I16(v) => {
            enc.i16(*v);
        }
        FuzzValue::I32(v) => {
            enc.i32(*v);
        }
        FuzzValue::I64(v) => {
            enc.i64(*v);
        }
        FuzzValue::F32(v) => {
            enc.f32(*v);
        }
        FuzzValue::F64(v) => {
            enc.f64(*v);
        }
        FuzzValue::Str(v) => {
            enc.string(v);
        }
        FuzzValue::Bytes(v) => {
            enc.u8_vec(v);
        }
        FuzzValue::U16Vec(v) => {
            enc.u16_vec(v);
        }
        FuzzValue::I64Vec(v) => {
            enc.i64_vec(v);
        }
        FuzzValue::F64Vec(v) => {
            enc.f64_vec(v);
        }
        FuzzValue::List(items) => {
            if depth == MAX_NESTING_DEPTH {
                enc.nil();
                return;
            }
            enc.list_start();
            for item in items.iter().take(16) {
                emit(enc, item, depth + 1);
            }
            enc.list_end();
        }
        FuzzValue::Struct(fields) => {
            if depth == MAX_NESTING_DEPTH {
                enc.nil();
                return;
            }
            enc.struct_start();
            for (key, val) in fields.iter().take(16) {
                enc.string(key);
                emit(enc, val, depth + 1);
            }
            enc.struct_end();
        }
    }
}

// Fuzz target: Encoder -> Decoder roundtrip.
//
// Generates structured documents via the encoder, with and without
// vector alignment, then decodes them. The decoder must accept anything
// the encoder produces and walk it to a clean end of input.
fuzz_target!(|input: FuzzInput| {
    let mut enc = Encoder::with_alignment(Vec::new(), input.align);
    for value in input.values.iter().take(64) {
        emit(&mut enc, value, 0);
    }
    let bytes = enc.finish().expect("in-memory sink cannot fail");

    let mut dec = Decoder::new(&bytes);
    loop {
        match dec.next() {
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(err) => panic!("decoder rejected encoder output: {err} (status {})", err.code()),
        }
    }
});
