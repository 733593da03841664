//! The Hessian value model.

use crate::kind::HessianKind;

/// A single Hessian value. Container variants own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum HessianValue {
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    /// Milliseconds since the Unix epoch
    Date(i64),
    String(String),
    Xml(String),
    Binary(Vec<u8>),
    List(Vec<HessianValue>),
    Map(HessianMap),
    /// Back-reference index into a previously seen object graph
    Ref(i32),
    Remote(HessianRemote),
}

impl HessianValue {
    #[must_use]
    pub fn null() -> Self {
        HessianValue::Null
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        HessianValue::Boolean(value)
    }

    #[must_use]
    pub fn integer(value: i32) -> Self {
        HessianValue::Integer(value)
    }

    #[must_use]
    pub fn long(value: i64) -> Self {
        HessianValue::Long(value)
    }

    #[must_use]
    pub fn double(value: f64) -> Self {
        HessianValue::Double(value)
    }

    #[must_use]
    pub fn date(epoch_millis: i64) -> Self {
        HessianValue::Date(epoch_millis)
    }

    pub fn string(value: impl Into<String>) -> Self {
        HessianValue::String(value.into())
    }

    pub fn xml(value: impl Into<String>) -> Self {
        HessianValue::Xml(value.into())
    }

    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        HessianValue::Binary(value.into())
    }

    #[must_use]
    pub fn list(items: Vec<HessianValue>) -> Self {
        HessianValue::List(items)
    }

    #[must_use]
    pub fn map(map: HessianMap) -> Self {
        HessianValue::Map(map)
    }

    #[must_use]
    pub fn reference(index: i32) -> Self {
        HessianValue::Ref(index)
    }

    pub fn remote(type_name: impl Into<String>, url: impl Into<String>) -> Self {
        HessianValue::Remote(HessianRemote {
            type_name: type_name.into(),
            url: url.into(),
        })
    }

    /// Wraps an optional string, producing `Null` for `None`.
    pub fn optional_string(value: Option<impl Into<String>>) -> Self {
        value.map_or(HessianValue::Null, HessianValue::string)
    }

    /// Kind this value was constructed as.
    #[must_use]
    pub fn kind(&self) -> HessianKind {
        match self {
            HessianValue::Null => HessianKind::Null,
            HessianValue::Boolean(_) => HessianKind::Boolean,
            HessianValue::Integer(_) => HessianKind::Integer,
            HessianValue::Long(_) => HessianKind::Long,
            HessianValue::Double(_) => HessianKind::Double,
            HessianValue::Date(_) => HessianKind::Date,
            HessianValue::String(_) => HessianKind::String,
            HessianValue::Xml(_) => HessianKind::Xml,
            HessianValue::Binary(_) => HessianKind::Binary,
            HessianValue::List(_) => HessianKind::List,
            HessianValue::Map(_) => HessianKind::Map,
            HessianValue::Ref(_) => HessianKind::Ref,
            HessianValue::Remote(_) => HessianKind::Remote,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, HessianValue::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HessianValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            HessianValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HessianValue::Long(v) | HessianValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HessianValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Text of a `String` or `Xml` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HessianValue::String(s) | HessianValue::Xml(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            HessianValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[HessianValue]> {
        match self {
            HessianValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&HessianMap> {
        match self {
            HessianValue::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_remote(&self) -> Option<&HessianRemote> {
        match self {
            HessianValue::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

impl From<bool> for HessianValue {
    fn from(value: bool) -> Self {
        HessianValue::Boolean(value)
    }
}

impl From<i32> for HessianValue {
    fn from(value: i32) -> Self {
        HessianValue::Integer(value)
    }
}

impl From<i64> for HessianValue {
    fn from(value: i64) -> Self {
        HessianValue::Long(value)
    }
}

impl From<f64> for HessianValue {
    fn from(value: f64) -> Self {
        HessianValue::Double(value)
    }
}

impl From<&str> for HessianValue {
    fn from(value: &str) -> Self {
        HessianValue::String(value.to_owned())
    }
}

impl From<String> for HessianValue {
    fn from(value: String) -> Self {
        HessianValue::String(value)
    }
}

impl From<HessianMap> for HessianValue {
    fn from(value: HessianMap) -> Self {
        HessianValue::Map(value)
    }
}

impl From<Vec<HessianValue>> for HessianValue {
    fn from(value: Vec<HessianValue>) -> Self {
        HessianValue::List(value)
    }
}

/// Ordered sequence of key/value pairs with an optional type name.
///
/// Insertion order is kept exactly as written and as read off the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HessianMap {
    type_name: Option<String>,
    entries: Vec<(HessianValue, HessianValue)>,
}

impl HessianMap {
    /// Untyped, empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map tagged with `type_name`.
    ///
    /// The wire writes an untyped map with an empty type name, so an empty
    /// `type_name` yields an untyped map.
    #[must_use]
    pub fn typed(type_name: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.set_type_name(Some(type_name.into()));
        map
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Sets or clears the type name. `Some("")` clears it.
    pub fn set_type_name(&mut self, type_name: Option<String>) {
        self.type_name = type_name.filter(|name| !name.is_empty());
    }

    /// Appends a pair. Existing pairs with an equal key are kept.
    pub fn insert(&mut self, key: impl Into<HessianValue>, value: impl Into<HessianValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder form of [`HessianMap::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<HessianValue>, value: impl Into<HessianValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value stored under the string key `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HessianValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(HessianValue, HessianValue)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<(HessianValue, HessianValue)> {
        self.entries
    }
}

/// Reference to a remote object: its type and the URL it lives at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HessianRemote {
    pub type_name: String,
    pub url: String,
}
