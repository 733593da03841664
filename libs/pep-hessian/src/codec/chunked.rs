//! Length-prefixed chunk protocol shared by string, xml and binary.
//!
//! ```text
//! [chunk tag][len: u16 BE = CHUNK_SIZE][payload] ... [final tag][len: u16 BE][payload]
//! ```
//!
//! Lengths count raw bytes for every kind, text included.

use crate::buffer::ByteBuffer;
use crate::error::HessianError;
use crate::kind::HessianKind;

/// Largest payload carried by a single segment.
pub const CHUNK_SIZE: usize = 0x8000;

const _: () = assert!(CHUNK_SIZE <= u16::MAX as usize);

pub(super) fn write_chunked(
    out: &mut ByteBuffer,
    kind: HessianKind,
    payload: &[u8],
) -> Result<(), HessianError> {
    let Some(chunk_tag) = kind.chunk_tag() else {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::String,
            tag: kind.tag(),
        });
    };

    let mut rest = payload;
    while rest.len() > CHUNK_SIZE {
        let (segment, tail) = rest.split_at(CHUNK_SIZE);
        write_segment(out, kind, chunk_tag, segment)?;
        rest = tail;
    }
    write_segment(out, kind, kind.tag(), rest)
}

fn write_segment(
    out: &mut ByteBuffer,
    kind: HessianKind,
    tag: u8,
    segment: &[u8],
) -> Result<(), HessianError> {
    let len = u16::try_from(segment.len()).map_err(|_| HessianError::MalformedSegment {
        kind,
        declared: segment.len(),
        available: CHUNK_SIZE,
    })?;
    out.put_byte(tag)?;
    out.write_bytes(&len.to_be_bytes())?;
    out.write_bytes(segment)?;
    Ok(())
}

/// Reassembles a chunked payload whose first tag has already been read.
pub(super) fn read_chunked(
    input: &mut ByteBuffer,
    kind: HessianKind,
    first_tag: u8,
) -> Result<Vec<u8>, HessianError> {
    let final_tag = kind.tag();
    let Some(chunk_tag) = kind.chunk_tag() else {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::String,
            tag: first_tag,
        });
    };

    let mut payload = Vec::new();
    let mut tag = first_tag;
    loop {
        if tag != final_tag && tag != chunk_tag {
            return Err(HessianError::TypeMismatch {
                expected: kind,
                tag,
            });
        }

        let len = input
            .take_array::<2>()
            .map(|b| usize::from(u16::from_be_bytes(b)))
            .ok_or(HessianError::UnexpectedEof { kind })?;
        let available = input.len();
        let segment = input.take(len).ok_or(HessianError::MalformedSegment {
            kind,
            declared: len,
            available,
        })?;
        payload.try_reserve(segment.len())?;
        payload.extend_from_slice(segment);

        if tag == final_tag {
            return Ok(payload);
        }
        tag = input.get_byte().ok_or(HessianError::UnexpectedEof { kind })?;
    }
}

/// Reads a chunked payload and validates it as UTF-8.
pub(super) fn read_text(
    input: &mut ByteBuffer,
    kind: HessianKind,
    first_tag: u8,
) -> Result<String, HessianError> {
    let bytes = read_chunked(input, kind, first_tag)?;
    String::from_utf8(bytes).map_err(|source| HessianError::InvalidUtf8 { kind, source })
}
