//! Fixed-width big-endian codecs.
//!
//! Integer and Ref share the 32-bit codec, Long and Date share the 64-bit
//! one. Doubles travel as the big-endian IEEE-754 bit pattern.

use crate::buffer::ByteBuffer;
use crate::error::HessianError;
use crate::kind::{HessianKind, TAG_DATE, TAG_DOUBLE, TAG_INTEGER, TAG_LONG, TAG_REF};

pub(super) fn write_int(out: &mut ByteBuffer, kind: HessianKind, value: i32) -> Result<(), HessianError> {
    if !matches!(kind, HessianKind::Integer | HessianKind::Ref) {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::Integer,
            tag: kind.tag(),
        });
    }
    out.put_byte(kind.tag())?;
    out.write_bytes(&value.to_be_bytes())?;
    Ok(())
}

pub(super) fn read_int(input: &mut ByteBuffer, kind: HessianKind, tag: u8) -> Result<i32, HessianError> {
    if !matches!(tag, TAG_INTEGER | TAG_REF) {
        return Err(HessianError::TypeMismatch {
            expected: kind,
            tag,
        });
    }
    input
        .take_array::<4>()
        .map(i32::from_be_bytes)
        .ok_or(HessianError::UnexpectedEof { kind })
}

pub(super) fn write_long(out: &mut ByteBuffer, kind: HessianKind, value: i64) -> Result<(), HessianError> {
    if !matches!(kind, HessianKind::Long | HessianKind::Date) {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::Long,
            tag: kind.tag(),
        });
    }
    out.put_byte(kind.tag())?;
    out.write_bytes(&value.to_be_bytes())?;
    Ok(())
}

pub(super) fn read_long(input: &mut ByteBuffer, kind: HessianKind, tag: u8) -> Result<i64, HessianError> {
    if !matches!(tag, TAG_LONG | TAG_DATE) {
        return Err(HessianError::TypeMismatch {
            expected: kind,
            tag,
        });
    }
    input
        .take_array::<8>()
        .map(i64::from_be_bytes)
        .ok_or(HessianError::UnexpectedEof { kind })
}

pub(super) fn write_double(out: &mut ByteBuffer, value: f64) -> Result<(), HessianError> {
    out.put_byte(TAG_DOUBLE)?;
    out.write_bytes(&value.to_bits().to_be_bytes())?;
    Ok(())
}

pub(super) fn read_double(input: &mut ByteBuffer, tag: u8) -> Result<f64, HessianError> {
    if tag != TAG_DOUBLE {
        return Err(HessianError::TypeMismatch {
            expected: HessianKind::Double,
            tag,
        });
    }
    input
        .take_array::<8>()
        .map(|bytes| f64::from_bits(u64::from_be_bytes(bytes)))
        .ok_or(HessianError::UnexpectedEof {
            kind: HessianKind::Double,
        })
}
