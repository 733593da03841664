use crate::kind::HessianKind;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced by the byte buffer and the Hessian codec.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HessianError {
    /// Buffer or value storage could not be grown
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The byte read as a tag does not belong to any known kind
    #[error("unknown Hessian tag 0x{tag:02x}")]
    UnknownTag { tag: u8 },

    /// A kind-specific codec was handed a tag it does not accept
    #[error("tag 0x{tag:02x} does not encode a {expected} value")]
    TypeMismatch { expected: HessianKind, tag: u8 },

    /// A chunk segment declares more bytes than the buffer holds
    #[error("{kind} segment declares {declared} bytes but only {available} are buffered")]
    MalformedSegment {
        kind: HessianKind,
        declared: usize,
        available: usize,
    },

    /// No bytes left where a value was expected
    #[error("end of buffer reached where a value was expected")]
    EndOfBuffer,

    /// The buffer ran out in the middle of a value
    #[error("unexpected end of buffer while decoding {kind}")]
    UnexpectedEof { kind: HessianKind },

    /// Reassembled string or xml payload is not valid UTF-8
    #[error("{kind} payload is not valid UTF-8")]
    InvalidUtf8 {
        kind: HessianKind,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A list announced a length different from the number of decoded elements
    #[error("list announced {declared} elements but contained {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// A list holds more elements than a 32-bit length prefix can announce
    #[error("list of {len} elements exceeds the 32-bit length prefix")]
    TooManyElements { len: usize },

    /// A type name does not fit the 16-bit length prefix
    #[error("type name of {len} bytes exceeds the 65535 byte limit")]
    TypeNameTooLong { len: usize },

    /// Nested containers exceed the decoder depth limit
    #[error("value nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },
}
