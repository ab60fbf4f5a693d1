use crate::tag::TypeCode;

/// Errors produced while parsing a LiteVector stream.
///
/// Clean end of input is not an error; the decoder reports it as the
/// absence of a next element. Everything else maps onto one of the wire
/// contract's numbered statuses (see [`DecodeError::code`]):
///
/// ```text
///   2  UnexpectedEof       input ended mid-value
///   3  InvalidSizeCode     size nibble > 4, or structural type not SINGLE
///   4  InvalidVectorLength vector length not a multiple of element width
///   5  InvalidStructKey    struct key position held a non-string value
///   6  ExpectedStructValue struct value position held an END tag
///   7  InvalidUtf8         string payload failed UTF-8 validation
///   8  MaxDepthReached     nesting deeper than the supported maximum
///   9  NestMismatch        END tag with no open struct or list
/// ```
///
/// The cursor position after any of these is unspecified; callers must
/// not resume parsing a failed stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The end of the buffer was reached, but more data was expected.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A size code nibble above 4 was encountered, or a structural type
    /// carried a non-SINGLE size code.
    #[error("invalid size code {size_code} for {type_code:?} at offset {offset}")]
    InvalidSizeCode {
        type_code: TypeCode,
        size_code: u8,
        offset: usize,
    },

    /// A vector's byte length was not a multiple of its element width.
    #[error("vector length {length} is not a multiple of the {width}-byte element width")]
    InvalidVectorLength { length: u64, width: usize },

    /// A string struct key was expected, but another type was found.
    #[error("expected a string struct key, found {found:?} at offset {offset}")]
    InvalidStructKey { found: TypeCode, offset: usize },

    /// A struct value was expected, but an END tag was found.
    #[error("expected a struct value, found an end tag at offset {offset}")]
    ExpectedStructValue { offset: usize },

    /// A string payload was not valid UTF-8.
    #[error("string payload at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// The incoming structure is nested deeper than the decoder tracks.
    #[error("nesting exceeds the maximum supported depth of {max}")]
    MaxDepthReached { max: usize },

    /// An END tag was found with no open struct or list.
    #[error("unbalanced end tag at offset {offset}")]
    NestMismatch { offset: usize },
}

impl DecodeError {
    /// The stable numeric status of this error in the wire contract.
    ///
    /// Status 0 is success and status 1 is clean end of input; neither is
    /// representable here, so codes start at 2.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::UnexpectedEof { .. } => 2,
            Self::InvalidSizeCode { .. } => 3,
            Self::InvalidVectorLength { .. } => 4,
            Self::InvalidStructKey { .. } => 5,
            Self::ExpectedStructValue { .. } => 6,
            Self::InvalidUtf8 { .. } => 7,
            Self::MaxDepthReached { .. } => 8,
            Self::NestMismatch { .. } => 9,
        }
    }
}
