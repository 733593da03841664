//! Kind descriptors and the tag table.
//!
//! Every Hessian value belongs to exactly one [`HessianKind`]. The kind knows
//! its display name, the primary wire tag and, for the chunked kinds, the
//! tag used by non-final segments.

use std::fmt;

pub const TAG_NULL: u8 = b'N';
pub const TAG_TRUE: u8 = b'T';
pub const TAG_FALSE: u8 = b'F';
pub const TAG_INTEGER: u8 = b'I';
pub const TAG_LONG: u8 = b'L';
pub const TAG_DOUBLE: u8 = b'D';
pub const TAG_DATE: u8 = b'd';
pub const TAG_STRING: u8 = b'S';
pub const TAG_STRING_CHUNK: u8 = b's';
pub const TAG_XML: u8 = b'X';
pub const TAG_XML_CHUNK: u8 = b'x';
pub const TAG_BINARY: u8 = b'B';
pub const TAG_BINARY_CHUNK: u8 = b'b';
pub const TAG_LIST: u8 = b'V';
pub const TAG_MAP: u8 = b'M';
pub const TAG_REF: u8 = b'R';
pub const TAG_REMOTE: u8 = b'r';

// Container framing bytes. They never start a value on their own.
pub const TAG_TYPE: u8 = b't';
pub const TAG_LENGTH: u8 = b'l';
pub const TAG_END: u8 = b'z';

/// Closed set of Hessian value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HessianKind {
    Null,
    Boolean,
    Integer,
    Long,
    Double,
    Date,
    String,
    Xml,
    Binary,
    List,
    Map,
    Ref,
    Remote,
}

impl HessianKind {
    /// All kinds, in descriptor table order.
    pub const ALL: [HessianKind; 13] = [
        HessianKind::Null,
        HessianKind::Boolean,
        HessianKind::Integer,
        HessianKind::Long,
        HessianKind::Double,
        HessianKind::Date,
        HessianKind::String,
        HessianKind::Xml,
        HessianKind::Binary,
        HessianKind::List,
        HessianKind::Map,
        HessianKind::Ref,
        HessianKind::Remote,
    ];

    /// Stable numeric identifier of the kind.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            HessianKind::Null => 0,
            HessianKind::Boolean => 1,
            HessianKind::Integer => 2,
            HessianKind::Long => 3,
            HessianKind::Double => 4,
            HessianKind::Date => 5,
            HessianKind::String => 6,
            HessianKind::Xml => 7,
            HessianKind::Binary => 8,
            HessianKind::List => 9,
            HessianKind::Map => 10,
            HessianKind::Ref => 11,
            HessianKind::Remote => 12,
        }
    }

    /// Human readable kind name, used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HessianKind::Null => "null",
            HessianKind::Boolean => "boolean",
            HessianKind::Integer => "integer",
            HessianKind::Long => "long",
            HessianKind::Double => "double",
            HessianKind::Date => "date",
            HessianKind::String => "string",
            HessianKind::Xml => "xml",
            HessianKind::Binary => "binary",
            HessianKind::List => "list",
            HessianKind::Map => "map",
            HessianKind::Ref => "ref",
            HessianKind::Remote => "remote",
        }
    }

    /// Primary wire tag. For booleans this is the `true` tag, for the
    /// chunked kinds it is the final-segment tag.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            HessianKind::Null => TAG_NULL,
            HessianKind::Boolean => TAG_TRUE,
            HessianKind::Integer => TAG_INTEGER,
            HessianKind::Long => TAG_LONG,
            HessianKind::Double => TAG_DOUBLE,
            HessianKind::Date => TAG_DATE,
            HessianKind::String => TAG_STRING,
            HessianKind::Xml => TAG_XML,
            HessianKind::Binary => TAG_BINARY,
            HessianKind::List => TAG_LIST,
            HessianKind::Map => TAG_MAP,
            HessianKind::Ref => TAG_REF,
            HessianKind::Remote => TAG_REMOTE,
        }
    }

    /// Tag of a non-final segment, only defined for string, xml and binary.
    #[must_use]
    pub fn chunk_tag(self) -> Option<u8> {
        match self {
            HessianKind::String => Some(TAG_STRING_CHUNK),
            HessianKind::Xml => Some(TAG_XML_CHUNK),
            HessianKind::Binary => Some(TAG_BINARY_CHUNK),
            _ => None,
        }
    }

    /// Maps a tag byte to its kind. Returns `None` for bytes outside the
    /// tag table, including the container framing bytes.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<HessianKind> {
        let kind = match tag {
            TAG_NULL => HessianKind::Null,
            TAG_TRUE | TAG_FALSE => HessianKind::Boolean,
            TAG_INTEGER => HessianKind::Integer,
            TAG_LONG => HessianKind::Long,
            TAG_DOUBLE => HessianKind::Double,
            TAG_DATE => HessianKind::Date,
            TAG_STRING | TAG_STRING_CHUNK => HessianKind::String,
            TAG_XML | TAG_XML_CHUNK => HessianKind::Xml,
            TAG_BINARY | TAG_BINARY_CHUNK => HessianKind::Binary,
            TAG_LIST => HessianKind::List,
            TAG_MAP => HessianKind::Map,
            TAG_REF => HessianKind::Ref,
            TAG_REMOTE => HessianKind::Remote,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether `tag` is one of the tags this kind is encoded with.
    #[must_use]
    pub fn accepts(self, tag: u8) -> bool {
        HessianKind::from_tag(tag) == Some(self)
    }
}

impl fmt::Display for HessianKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
