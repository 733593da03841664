//! List, map and remote framing.
//!
//! ```text
//! list   := 'V' type? ('l' u32)? value* 'z'
//! map    := 'M' type? (value value)* 'z'
//! remote := 'r' type string
//! type   := 't' u16 utf8
//! ```
//!
//! Lists are written without a type and always with their length. Maps are
//! always written with a type, empty when the map has no type name.

use super::{MAX_DEPTH, chunked, decode_value, encode_value};
use crate::buffer::ByteBuffer;
use crate::error::HessianError;
use crate::kind::{HessianKind, TAG_END, TAG_LENGTH, TAG_LIST, TAG_MAP, TAG_REMOTE, TAG_TYPE};
use crate::value::{HessianMap, HessianRemote, HessianValue};

pub(super) fn write_list(out: &mut ByteBuffer, items: &[HessianValue]) -> Result<(), HessianError> {
    let len = u32::try_from(items.len())
        .map_err(|_| HessianError::TooManyElements { len: items.len() })?;
    out.put_byte(TAG_LIST)?;
    out.put_byte(TAG_LENGTH)?;
    out.write_bytes(&len.to_be_bytes())?;
    for item in items {
        encode_value(item, out)?;
    }
    out.put_byte(TAG_END)
}

pub(super) fn read_list(
    input: &mut ByteBuffer,
    depth: usize,
) -> Result<Vec<HessianValue>, HessianError> {
    enter(depth)?;
    read_type(input, HessianKind::List)?;
    let declared = read_length(input)?;

    let mut items = Vec::new();
    if let Some(declared) = declared {
        // never trust the prefix beyond what could possibly be buffered
        items.try_reserve(declared.min(input.len()))?;
    }
    while !at_end(input, HessianKind::List)? {
        items.push(decode_child(input, depth, HessianKind::List)?);
    }

    match declared {
        Some(declared) if declared != items.len() => Err(HessianError::LengthMismatch {
            declared,
            actual: items.len(),
        }),
        _ => Ok(items),
    }
}

pub(super) fn write_map(out: &mut ByteBuffer, map: &HessianMap) -> Result<(), HessianError> {
    out.put_byte(TAG_MAP)?;
    write_type(out, map.type_name().unwrap_or_default())?;
    for (key, value) in map.iter() {
        encode_value(key, out)?;
        encode_value(value, out)?;
    }
    out.put_byte(TAG_END)
}

pub(super) fn read_map(input: &mut ByteBuffer, depth: usize) -> Result<HessianMap, HessianError> {
    enter(depth)?;
    let mut map = HessianMap::new();
    map.set_type_name(read_type(input, HessianKind::Map)?);

    while !at_end(input, HessianKind::Map)? {
        let key = decode_child(input, depth, HessianKind::Map)?;
        let value = decode_child(input, depth, HessianKind::Map)?;
        map.insert(key, value);
    }
    Ok(map)
}

pub(super) fn write_remote(out: &mut ByteBuffer, remote: &HessianRemote) -> Result<(), HessianError> {
    out.put_byte(TAG_REMOTE)?;
    write_type(out, &remote.type_name)?;
    chunked::write_chunked(out, HessianKind::String, remote.url.as_bytes())
}

pub(super) fn read_remote(input: &mut ByteBuffer) -> Result<HessianRemote, HessianError> {
    let kind = HessianKind::Remote;
    let tag = input.get_byte().ok_or(HessianError::UnexpectedEof { kind })?;
    if tag != TAG_TYPE {
        return Err(HessianError::TypeMismatch { expected: kind, tag });
    }
    let type_name = read_type_body(input, kind)?;

    let tag = input.get_byte().ok_or(HessianError::UnexpectedEof { kind })?;
    if !HessianKind::String.accepts(tag) {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::String,
            tag,
        });
    }
    let url = chunked::read_text(input, HessianKind::String, tag)?;
    Ok(HessianRemote { type_name, url })
}

fn enter(depth: usize) -> Result<(), HessianError> {
    if depth >= MAX_DEPTH {
        return Err(HessianError::DepthExceeded { max: MAX_DEPTH });
    }
    Ok(())
}

fn decode_child(
    input: &mut ByteBuffer,
    depth: usize,
    parent: HessianKind,
) -> Result<HessianValue, HessianError> {
    decode_value(input, depth + 1).map_err(|err| match err {
        HessianError::EndOfBuffer => HessianError::UnexpectedEof { kind: parent },
        other => other,
    })
}

/// Consumes the terminator if it is next. Running out of input first is an
/// error, containers must always be closed.
fn at_end(input: &mut ByteBuffer, kind: HessianKind) -> Result<bool, HessianError> {
    match input.peek_byte() {
        Some(TAG_END) => {
            input.get_byte();
            Ok(true)
        }
        Some(_) => Ok(false),
        None => Err(HessianError::UnexpectedEof { kind }),
    }
}

fn write_type(out: &mut ByteBuffer, name: &str) -> Result<(), HessianError> {
    let len = u16::try_from(name.len())
        .map_err(|_| HessianError::TypeNameTooLong { len: name.len() })?;
    out.put_byte(TAG_TYPE)?;
    out.write_bytes(&len.to_be_bytes())?;
    out.write_bytes(name.as_bytes())?;
    Ok(())
}

/// Reads an optional `t` type string. Any other byte is pushed back.
fn read_type(input: &mut ByteBuffer, kind: HessianKind) -> Result<Option<String>, HessianError> {
    match input.get_byte() {
        Some(TAG_TYPE) => read_type_body(input, kind).map(Some),
        Some(other) => {
            input.unget_byte(other)?;
            Ok(None)
        }
        None => Err(HessianError::UnexpectedEof { kind }),
    }
}

fn read_type_body(input: &mut ByteBuffer, kind: HessianKind) -> Result<String, HessianError> {
    let len = input
        .take_array::<2>()
        .map(|b| usize::from(u16::from_be_bytes(b)))
        .ok_or(HessianError::UnexpectedEof { kind })?;
    let available = input.len();
    let bytes = input.take(len).ok_or(HessianError::MalformedSegment {
        kind,
        declared: len,
        available,
    })?;
    String::from_utf8(bytes.to_vec()).map_err(|source| HessianError::InvalidUtf8 { kind, source })
}

/// Reads an optional `l` element count.
fn read_length(input: &mut ByteBuffer) -> Result<Option<usize>, HessianError> {
    let kind = HessianKind::List;
    if input.peek_byte() != Some(TAG_LENGTH) {
        return Ok(None);
    }
    input.get_byte();
    let count = input
        .take_array::<4>()
        .map(u32::from_be_bytes)
        .ok_or(HessianError::UnexpectedEof { kind })?;
    usize::try_from(count)
        .map(Some)
        .map_err(|_| HessianError::TooManyElements { len: usize::MAX })
}
