//! Tag dispatch between [`HessianValue`] and its wire encoding.
//!
//! Serializing appends the tag byte(s) and payload of a value at the write
//! cursor of a [`ByteBuffer`]. Deserializing reads one tag, looks the kind up
//! in the tag table and hands the rest of the payload to that kind's codec.

mod chunked;
mod container;
mod numeric;

pub use chunked::CHUNK_SIZE;

use crate::buffer::ByteBuffer;
use crate::error::HessianError;
use crate::kind::{HessianKind, TAG_FALSE, TAG_NULL, TAG_TRUE};
use crate::value::HessianValue;

/// Deepest container nesting the decoder accepts.
pub const MAX_DEPTH: usize = 64;

impl HessianValue {
    /// Appends the encoding of this value to `out`.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if `out` cannot grow, or a
    /// length error when a list or type name does not fit its prefix.
    pub fn serialize(&self, out: &mut ByteBuffer) -> Result<(), HessianError> {
        encode_value(self, out)
    }

    /// Decodes the value starting at the read cursor of `input`.
    ///
    /// # Errors
    /// Returns [`HessianError::UnknownTag`] when the first byte is not a
    /// value tag, or the error of the kind-specific decoder.
    pub fn deserialize(input: &mut ByteBuffer) -> Result<Self, HessianError> {
        decode_value(input, 0)
    }

    /// Encodes this value into a fresh byte vector.
    ///
    /// # Errors
    /// Same as [`HessianValue::serialize`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, HessianError> {
        let mut out = ByteBuffer::new();
        self.serialize(&mut out)?;
        Ok(out.into_vec())
    }

    /// Decodes the first value held in `bytes`. Trailing bytes are ignored.
    ///
    /// # Errors
    /// Same as [`HessianValue::deserialize`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HessianError> {
        let mut input = ByteBuffer::from_slice(bytes)?;
        Self::deserialize(&mut input)
    }
}

pub(crate) fn encode_value(value: &HessianValue, out: &mut ByteBuffer) -> Result<(), HessianError> {
    match value {
        HessianValue::Null => out.put_byte(TAG_NULL),
        HessianValue::Boolean(b) => out.put_byte(if *b { TAG_TRUE } else { TAG_FALSE }),
        HessianValue::Integer(v) => numeric::write_int(out, HessianKind::Integer, *v),
        HessianValue::Ref(v) => numeric::write_int(out, HessianKind::Ref, *v),
        HessianValue::Long(v) => numeric::write_long(out, HessianKind::Long, *v),
        HessianValue::Date(v) => numeric::write_long(out, HessianKind::Date, *v),
        HessianValue::Double(v) => numeric::write_double(out, *v),
        HessianValue::String(s) => chunked::write_chunked(out, HessianKind::String, s.as_bytes()),
        HessianValue::Xml(s) => chunked::write_chunked(out, HessianKind::Xml, s.as_bytes()),
        HessianValue::Binary(b) => chunked::write_chunked(out, HessianKind::Binary, b),
        HessianValue::List(items) => container::write_list(out, items),
        HessianValue::Map(map) => container::write_map(out, map),
        HessianValue::Remote(remote) => container::write_remote(out, remote),
    }
}

pub(crate) fn decode_value(
    input: &mut ByteBuffer,
    depth: usize,
) -> Result<HessianValue, HessianError> {
    let tag = input.get_byte().ok_or(HessianError::EndOfBuffer)?;
    let Some(kind) = HessianKind::from_tag(tag) else {
        tracing::debug!(tag, offset = input.read_position() - 1, "unknown Hessian tag");
        return Err(HessianError::UnknownTag { tag });
    };

    let value = match kind {
        HessianKind::Null => HessianValue::Null,
        HessianKind::Boolean => HessianValue::Boolean(tag == TAG_TRUE),
        HessianKind::Integer => HessianValue::Integer(numeric::read_int(input, kind, tag)?),
        HessianKind::Ref => HessianValue::Ref(numeric::read_int(input, kind, tag)?),
        HessianKind::Long => HessianValue::Long(numeric::read_long(input, kind, tag)?),
        HessianKind::Date => HessianValue::Date(numeric::read_long(input, kind, tag)?),
        HessianKind::Double => HessianValue::Double(numeric::read_double(input, tag)?),
        HessianKind::String => HessianValue::String(chunked::read_text(input, kind, tag)?),
        HessianKind::Xml => HessianValue::Xml(chunked::read_text(input, kind, tag)?),
        HessianKind::Binary => HessianValue::Binary(chunked::read_chunked(input, kind, tag)?),
        HessianKind::List => HessianValue::List(container::read_list(input, depth)?),
        HessianKind::Map => HessianValue::Map(container::read_map(input, depth)?),
        HessianKind::Remote => HessianValue::Remote(container::read_remote(input)?),
    };
    Ok(value)
}
