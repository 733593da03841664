//! Mapping between the XACML model and typed Hessian maps.
//!
//! Every model type is written as a map tagged with its Java class name on
//! the PEP daemon side, holding one entry per field. Absent optional fields
//! are written as `Null` and read back as `None`.

pub mod dictionary;
mod request;
mod response;

use crate::error::MarshalError;
use dictionary::CLASS_PREFIX;
use pep_hessian::{ByteBuffer, HessianMap, HessianValue};

/// Conversion of a model type to and from its Hessian representation.
pub trait HessianMarshal: Sized {
    /// Fully qualified class name used as the map type name.
    const CLASS: &'static str;

    fn marshal(&self) -> HessianValue;

    /// # Errors
    /// Returns [`MarshalError::SchemaMismatch`] when `value` is not a map of
    /// this class or a mandatory field is missing or of the wrong kind.
    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError>;
}

/// Marshals `object` and appends its encoding to `out`.
///
/// # Errors
/// Returns [`MarshalError::Codec`] if the buffer cannot grow.
pub fn write_object<T: HessianMarshal>(object: &T, out: &mut ByteBuffer) -> Result<(), MarshalError> {
    object.marshal().serialize(out)?;
    Ok(())
}

/// Decodes one value from `input` and unmarshals it.
///
/// # Errors
/// Returns [`MarshalError::Codec`] for malformed bytes and
/// [`MarshalError::SchemaMismatch`] for a well-formed value of the wrong shape.
pub fn read_object<T: HessianMarshal>(input: &mut ByteBuffer) -> Result<T, MarshalError> {
    let value = HessianValue::deserialize(input)?;
    T::unmarshal(&value)
}

fn short_name(class: &'static str) -> &'static str {
    class.strip_prefix(CLASS_PREFIX).unwrap_or(class)
}

pub(crate) fn list_of<T: HessianMarshal>(items: &[T]) -> HessianValue {
    HessianValue::list(items.iter().map(HessianMarshal::marshal).collect())
}

pub(crate) fn optional<T: HessianMarshal>(item: Option<&T>) -> HessianValue {
    item.map_or(HessianValue::Null, HessianMarshal::marshal)
}

/// Typed view over the map of one model object.
pub(crate) struct Fields<'a> {
    class: &'static str,
    map: &'a HessianMap,
}

impl<'a> Fields<'a> {
    /// Checks the map's class and warns about keys outside `known`.
    pub(crate) fn open(
        value: &'a HessianValue,
        class: &'static str,
        known: &[&str],
    ) -> Result<Self, MarshalError> {
        let name = short_name(class);
        let Some(map) = value.as_map() else {
            return Err(MarshalError::schema(
                name,
                format!("expected a map, found {}", value.kind()),
            ));
        };
        if let Some(type_name) = map.type_name()
            && type_name != class
        {
            return Err(MarshalError::schema(
                name,
                format!("map is typed as {type_name}"),
            ));
        }
        for (key, _) in map.iter() {
            match key.as_str() {
                Some(key) if known.contains(&key) => {}
                Some(key) => tracing::warn!(class = name, key, "ignoring unrecognized key"),
                None => tracing::warn!(class = name, kind = %key.kind(), "ignoring non-string key"),
            }
        }
        Ok(Self { class: name, map })
    }

    fn present(&self, key: &str) -> Option<&'a HessianValue> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn wrong_kind(&self, key: &str, expected: &str, found: &HessianValue) -> MarshalError {
        MarshalError::schema(
            self.class,
            format!("field {key} should be {expected}, found {}", found.kind()),
        )
    }

    fn missing(&self, key: &str) -> MarshalError {
        MarshalError::schema(self.class, format!("missing mandatory field {key}"))
    }

    pub(crate) fn optional_string(&self, key: &str) -> Result<Option<String>, MarshalError> {
        self.present(key)
            .map(|v| {
                v.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| self.wrong_kind(key, "a string", v))
            })
            .transpose()
    }

    pub(crate) fn string(&self, key: &str) -> Result<String, MarshalError> {
        self.optional_string(key)?.ok_or_else(|| self.missing(key))
    }

    pub(crate) fn integer(&self, key: &str) -> Result<i32, MarshalError> {
        let value = self.present(key).ok_or_else(|| self.missing(key))?;
        value
            .as_i32()
            .ok_or_else(|| self.wrong_kind(key, "an integer", value))
    }

    pub(crate) fn object<T: HessianMarshal>(&self, key: &str) -> Result<Option<T>, MarshalError> {
        self.present(key).map(T::unmarshal).transpose()
    }

    fn items(&self, key: &str) -> Result<&'a [HessianValue], MarshalError> {
        match self.present(key) {
            None => Ok(&[]),
            Some(v) => v.as_list().ok_or_else(|| self.wrong_kind(key, "a list", v)),
        }
    }

    /// Missing or `Null` lists read as empty.
    pub(crate) fn list<T: HessianMarshal>(&self, key: &str) -> Result<Vec<T>, MarshalError> {
        self.items(key)?.iter().map(T::unmarshal).collect()
    }

    pub(crate) fn string_list(&self, key: &str) -> Result<Vec<String>, MarshalError> {
        self.items(key)?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| self.wrong_kind(key, "a list of strings", v))
            })
            .collect()
    }

    pub(crate) fn class(&self) -> &'static str {
        self.class
    }
}
