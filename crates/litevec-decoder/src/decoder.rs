use litevec_wire::element::{Element, Value};
use litevec_wire::error::DecodeError;
use litevec_wire::tag::{NOP_TAG, SizeCode, TypeCode};
use litevec_wire::utf8;

/// Maximum struct/list nesting depth the decoder tracks.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Per-frame state on the nesting stack.
///
/// Struct frames alternate between `Key` and `Value` so the decoder can
/// enforce that a record body is a strict sequence of (string key, value)
/// pairs. List frames impose no ordering on their contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    /// Inside a struct; the next tag must be a string key or END.
    Key,
    /// Inside a struct; the next tag must be a value, not END.
    Value,
    /// Inside a list; any value or END.
    List,
}

/// Pull-style decoder over an immutable byte buffer.
///
/// Elements are yielded in buffer order by [`next`](Self::next). The
/// decoder's only state is a cursor, a fixed-capacity nesting stack, and
/// the UTF-8 validation switch; it performs no allocation and no I/O.
///
/// Returned [`Element`]s with byte-slice values alias the input buffer
/// and stay valid only as long as it does.
///
/// # Example
///
/// ```rust
/// use litevec_decoder::Decoder;
/// use litevec_wire::{TypeCode, Value};
///
/// // STRUCT { "k": i8 -1 } END
/// let bytes = [0x10, 0x41, 0x01, 0x6B, 0xA0, 0xFF, 0x30];
/// let mut dec = Decoder::new(&bytes);
///
/// assert_eq!(dec.next().unwrap().unwrap().type_code, TypeCode::Struct);
/// assert!(dec.next().unwrap().unwrap().string_equals("k"));
/// assert_eq!(dec.next().unwrap().unwrap().value, Value::Int(-1));
/// assert_eq!(dec.next().unwrap().unwrap().type_code, TypeCode::End);
/// assert!(dec.next().unwrap().is_none()); // clean EOF
/// ```
pub struct Decoder<'buf> {
    buf: &'buf [u8],
    idx: usize,
    nest: [Frame; MAX_NESTING_DEPTH],
    depth: usize,
    validate_utf8: bool,
}

impl<'buf> Decoder<'buf> {
    /// Create a decoder over `buf`.
    ///
    /// UTF-8 validation of string payloads follows the crate's
    /// `validate-utf8` feature (enabled by default).
    #[must_use]
    pub fn new(buf: &'buf [u8]) -> Self {
        Self::with_utf8_validation(buf, cfg!(feature = "validate-utf8"))
    }

    /// Create a decoder with UTF-8 validation explicitly on or off.
    ///
    /// Skipping validation saves a pass over every string payload and is
    /// acceptable when strings are only compared as byte keys.
    #[must_use]
    pub fn with_utf8_validation(buf: &'buf [u8], validate_utf8: bool) -> Self {
        Self {
            buf,
            idx: 0,
            nest: [Frame::List; MAX_NESTING_DEPTH],
            depth: 0,
            validate_utf8,
        }
    }

    /// Current cursor position. After an error this is unspecified and
    /// only useful for diagnostics.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.idx
    }

    /// Number of currently open structs and lists.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Parse the next element from the stream.
    ///
    /// Every value on the wire has the same shape; which trailing parts
    /// are present follows from the tag:
    ///
    /// ```text
    /// ┌────────────────┬──────────────────────────────────────────┐
    /// │ NOP*           │ filler bytes (0xFF), skipped silently    │
    /// │ tag            │ type code high nibble, size code low     │
    /// │ length prefix  │ vectors only: 1, 2, 4, or 8 bytes, LE    │
    /// │ payload        │ scalar width, or length bytes; none for  │
    /// │                │ structural tags                          │
    /// └────────────────┴──────────────────────────────────────────┘
    /// ```
    ///
    /// Returns `Ok(Some(element))` for each parsed value, `Ok(None)` at a
    /// clean end of input (no struct or list left open), and an error for
    /// any malformed input. Parsing must not be resumed after an error.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`] for the complete taxonomy. End of input inside
    /// an open struct or list is [`DecodeError::UnexpectedEof`], not a
    /// clean EOF.
    pub fn next(&mut self) -> Result<Option<Element<'buf>>, DecodeError> {
        if self.idx == self.buf.len() {
            return self.end_of_input();
        }

        // NOP tags are ignorable filler between values.
        while self.buf[self.idx] == NOP_TAG {
            self.idx += 1;
            if self.idx == self.buf.len() {
                return self.end_of_input();
            }
        }

        let tag_offset = self.idx;
        let tag = self.buf[self.idx];
        self.idx += 1;

        let type_code = TypeCode::from_nibble(tag >> 4);
        let size_nibble = tag & 0x0F;
        let invalid_size = || DecodeError::InvalidSizeCode {
            type_code,
            size_code: size_nibble,
            offset: tag_offset,
        };
        let Some(size_code) = SizeCode::from_nibble(size_nibble) else {
            return Err(invalid_size());
        };
        if type_code.is_structural() && size_code != SizeCode::Single {
            return Err(invalid_size());
        }

        // Struct key/value alternation, checked against the frame that
        // contains this tag, before any push or pop below, so an END
        // in value position is reported as a missing value rather than
        // as a premature pop.
        if self.depth > 0 {
            match self.nest[self.depth - 1] {
                Frame::Key => {
                    if type_code != TypeCode::String && type_code != TypeCode::End {
                        return Err(DecodeError::InvalidStructKey {
                            found: type_code,
                            offset: tag_offset,
                        });
                    }
                    self.nest[self.depth - 1] = Frame::Value;
                }
                Frame::Value => {
                    if type_code == TypeCode::End {
                        return Err(DecodeError::ExpectedStructValue { offset: tag_offset });
                    }
                    self.nest[self.depth - 1] = Frame::Key;
                }
                Frame::List => {}
            }
        }

        if type_code == TypeCode::Struct || type_code == TypeCode::List {
            if self.depth == MAX_NESTING_DEPTH {
                return Err(DecodeError::MaxDepthReached {
                    max: MAX_NESTING_DEPTH,
                });
            }
            self.nest[self.depth] = if type_code == TypeCode::Struct {
                Frame::Key
            } else {
                Frame::List
            };
            self.depth += 1;
        }

        if type_code == TypeCode::End {
            if self.depth == 0 {
                return Err(DecodeError::NestMismatch { offset: tag_offset });
            }
            self.depth -= 1;
        }

        if type_code.is_structural() {
            return Ok(Some(Element {
                type_code,
                size_code,
                length: 0,
                value: Value::None,
            }));
        }

        let width = type_code.width();

        if size_code == SizeCode::Single {
            let end = self.bounded_end(width)?;
            let raw = &self.buf[self.idx..end];
            let value = decode_scalar(type_code, raw);
            self.idx = end;
            return Ok(Some(Element {
                type_code,
                size_code,
                length: width,
                value,
            }));
        }

        // Vector: little-endian length prefix, then the payload bytes.
        let prefix_len = size_code.prefix_len();
        let end = self.bounded_end(prefix_len)?;
        let mut le = [0u8; 8];
        le[..prefix_len].copy_from_slice(&self.buf[self.idx..end]);
        let length = u64::from_le_bytes(le);
        self.idx = end;

        // Widths are powers of two; the mask tests divisibility exactly.
        if length & (width as u64 - 1) != 0 {
            return Err(DecodeError::InvalidVectorLength { length, width });
        }

        let remaining = self.buf.len() - self.idx;
        if length > remaining as u64 {
            return Err(DecodeError::UnexpectedEof {
                offset: self.buf.len(),
            });
        }
        let length = length as usize;
        let payload_offset = self.idx;
        let payload = &self.buf[self.idx..self.idx + length];
        self.idx += length;

        if self.validate_utf8 && type_code == TypeCode::String && !utf8::is_valid_utf8(payload) {
            return Err(DecodeError::InvalidUtf8 {
                offset: payload_offset,
            });
        }

        Ok(Some(Element {
            type_code,
            size_code,
            length,
            value: Value::Bytes(payload),
        }))
    }

    /// Clean EOF only when no struct or list is left open.
    fn end_of_input(&self) -> Result<Option<Element<'buf>>, DecodeError> {
        if self.depth == 0 {
            Ok(None)
        } else {
            Err(DecodeError::UnexpectedEof {
                offset: self.buf.len(),
            })
        }
    }

    /// The end offset of an `n`-byte read at the cursor, or
    /// `UnexpectedEof` if it would overflow or pass the end of input.
    fn bounded_end(&self, n: usize) -> Result<usize, DecodeError> {
        match self.idx.checked_add(n) {
            Some(end) if end <= self.buf.len() => Ok(end),
            _ => Err(DecodeError::UnexpectedEof {
                offset: self.buf.len(),
            }),
        }
    }
}

/// Recover a typed value from a SINGLE scalar payload of exactly
/// `type_code.width()` bytes. Signed integers sign-extend and unsigned
/// integers zero-extend to 64 bits.
fn decode_scalar(type_code: TypeCode, raw: &[u8]) -> Value<'_> {
    match type_code {
        TypeCode::String => Value::Bytes(raw),
        TypeCode::Bool => Value::Bool(raw[0] != 0),
        TypeCode::U8 => Value::Uint(u64::from(raw[0])),
        TypeCode::U16 => Value::Uint(u64::from(u16::from_le_bytes(le_bytes(raw)))),
        TypeCode::U32 => Value::Uint(u64::from(u32::from_le_bytes(le_bytes(raw)))),
        TypeCode::U64 => Value::Uint(u64::from_le_bytes(le_bytes(raw))),
        TypeCode::I8 => Value::Int(i64::from(raw[0] as i8)),
        TypeCode::I16 => Value::Int(i64::from(i16::from_le_bytes(le_bytes(raw)))),
        TypeCode::I32 => Value::Int(i64::from(i32::from_le_bytes(le_bytes(raw)))),
        TypeCode::I64 => Value::Int(i64::from_le_bytes(le_bytes(raw))),
        TypeCode::F32 => Value::Float32(f32::from_le_bytes(le_bytes(raw))),
        TypeCode::F64 => Value::Float64(f64::from_le_bytes(le_bytes(raw))),
        // Structural types never reach scalar recovery.
        TypeCode::Nil | TypeCode::Struct | TypeCode::List | TypeCode::End => Value::None,
    }
}

/// Copy the first `N` bytes of `raw` into an array for the `from_le_bytes`
/// constructors. Callers guarantee `raw` holds at least `N` bytes.
fn le_bytes<const N: usize>(raw: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&raw[..N]);
    out
}
