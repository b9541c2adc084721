//! The record contract shared by the attribute store, the model and the
//! sync adapter.
//!
//! # Design
//! A record is anything whose JSON form is an object. Field lookup by name
//! goes through that JSON form, so statically typed structs and dynamic
//! `serde_json::Map` records answer `get("name")` the same way. Writes never
//! go through JSON: each record says how a partial update is merged into it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ModelError;

/// Name of the attribute used as the remote resource identifier.
pub const ID_FIELD: &str = "id";

/// A record held by a model.
///
/// `Patch` is the partial-update shape: every field it carries overwrites the
/// matching field of the record, every field it omits is left untouched.
pub trait Record: Serialize + Clone {
    type Patch: Serialize + DeserializeOwned;

    /// Shallow-merge `patch` into `self` in place.
    fn merge(&mut self, patch: Self::Patch);

    /// The raw `id` attribute. Records with a typed id field should override
    /// this; the default reads the record's JSON form.
    fn id(&self) -> Option<Value> {
        field(self, ID_FIELD)
    }
}

impl Record for Map<String, Value> {
    type Patch = Map<String, Value>;

    fn merge(&mut self, patch: Self::Patch) {
        for (key, value) in patch {
            self.insert(key, value);
        }
    }

    fn id(&self) -> Option<Value> {
        self.get(ID_FIELD).filter(|v| !v.is_null()).cloned()
    }
}

/// Read one field of `record` by name.
///
/// Missing fields and JSON `null` both read as `None`. A record that fails to
/// serialize reads as having no fields at all.
pub fn field<T: Serialize + ?Sized>(record: &T, key: &str) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut fields)) => fields.remove(key).filter(|v| !v.is_null()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "record could not be serialized for field lookup");
            None
        }
    }
}

/// Interpret an attribute value as a remote identifier.
///
/// Anything that is not a JSON number is `InvalidId`. Numbers must be
/// integral and fit in an `i64`; `1.0` reads as `1`, `7.5` does not.
pub fn parse_id(value: Option<&Value>) -> Result<i64, ModelError> {
    let Some(Value::Number(number)) = value else {
        return Err(ModelError::InvalidId);
    };
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    match number.as_f64() {
        // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(ModelError::IdOutOfRange(number.clone())),
    }
}

/// The record's identifier, if it has a valid one.
pub fn record_id<T: Record>(record: &T) -> Option<i64> {
    parse_id(record.id().as_ref()).ok()
}
