#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Hessian 1.0 binary codec
//!
//! This crate provides the subset of Hessian 1.0 spoken by the Argus PEP daemon:
//! - A growable [`ByteBuffer`] with independent read and write cursors
//! - The closed [`HessianKind`] tag table
//! - The [`HessianValue`] tree (scalars, chunked text and binary, lists,
//!   typed maps, references and remote objects)
//! - Serialization and deserialization through the buffer
//!
//! String, xml and binary payloads longer than [`CHUNK_SIZE`] bytes are split
//! into continuation segments. Lists and maps are closed by a `z` terminator.
//!
//! # Example
//!
//! ```
//! use pep_hessian::{ByteBuffer, HessianMap, HessianValue};
//!
//! let value = HessianValue::map(HessianMap::typed("Point").with("x", 1_i32));
//! let mut buffer = ByteBuffer::new();
//! value.serialize(&mut buffer)?;
//! assert_eq!(HessianValue::deserialize(&mut buffer)?, value);
//! # Ok::<(), pep_hessian::HessianError>(())
//! ```

mod buffer;
mod codec;
mod error;
mod kind;
mod value;

pub use buffer::{ByteBuffer, MIN_CAPACITY};
pub use codec::{CHUNK_SIZE, MAX_DEPTH};
pub use error::HessianError;
pub use kind::{
    HessianKind, TAG_BINARY, TAG_BINARY_CHUNK, TAG_DATE, TAG_DOUBLE, TAG_END, TAG_FALSE,
    TAG_INTEGER, TAG_LENGTH, TAG_LIST, TAG_LONG, TAG_MAP, TAG_NULL, TAG_REF, TAG_REMOTE,
    TAG_STRING, TAG_STRING_CHUNK, TAG_TRUE, TAG_TYPE, TAG_XML, TAG_XML_CHUNK,
};
pub use value::{HessianMap, HessianRemote, HessianValue};
