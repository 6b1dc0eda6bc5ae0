//! Wire-format coercion.
//!
//! Inbound payloads are keyed JSON mappings whose scalars may arrive as
//! numbers or as numeric strings. The helpers here parse or fail; the typed
//! entities never re-check their fields afterwards.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Keyed mapping of field name to wire value.
pub type WireMap = Map<String, Value>;

/// An entity with a keyed-mapping wire form.
pub trait WireRecord: Sized {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Serialize into a mapping holding one key per present field.
    fn to_wire(&self) -> WireMap;

    /// Validate and coerce a wire payload into the entity.
    fn from_wire(value: &Value) -> Result<Self, ValidationError>;
}

/// Coerce a wire value into a finite `f64`.
///
/// Accepts JSON numbers and strings holding a float literal. Non-finite
/// values are rejected since they have no JSON representation.
pub fn coerce_f64(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::invalid(field, "a float", value))
}

/// Coerce a wire value into an `i64`.
///
/// Integral numbers pass through, fractional numbers are truncated toward
/// zero, and strings must hold an integer literal.
pub fn coerce_i64(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && v.abs() < 9.0e18)
                .map(|v| v.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::invalid(field, "an integer", value))
}

pub fn coerce_bool(field: &'static str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::invalid(field, "a boolean", value))
}

pub fn coerce_string(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::invalid(field, "a string", value))
}

/// Field accessor over one object payload.
///
/// A key holding `null` is treated the same as an absent key. Keys the
/// entity does not define are ignored.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a WireMap,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(entity: &'static str, value: &'a Value) -> Result<Self, ValidationError> {
        value
            .as_object()
            .map(|map| Self { entity, map })
            .ok_or(ValidationError::NotAnObject { entity })
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, ValidationError> {
        self.present(field).ok_or(ValidationError::MissingField {
            entity: self.entity,
            field,
        })
    }

    pub(crate) fn f64(&self, field: &'static str) -> Result<f64, ValidationError> {
        coerce_f64(field, self.required(field)?)
    }

    pub(crate) fn opt_f64(&self, field: &'static str) -> Result<Option<f64>, ValidationError> {
        self.present(field).map(|v| coerce_f64(field, v)).transpose()
    }

    pub(crate) fn i64(&self, field: &'static str) -> Result<i64, ValidationError> {
        coerce_i64(field, self.required(field)?)
    }

    pub(crate) fn opt_i64(&self, field: &'static str) -> Result<Option<i64>, ValidationError> {
        self.present(field).map(|v| coerce_i64(field, v)).transpose()
    }

    pub(crate) fn bool(&self, field: &'static str) -> Result<bool, ValidationError> {
        coerce_bool(field, self.required(field)?)
    }

    pub(crate) fn opt_bool(&self, field: &'static str) -> Result<Option<bool>, ValidationError> {
        self.present(field).map(|v| coerce_bool(field, v)).transpose()
    }

    pub(crate) fn string(&self, field: &'static str) -> Result<String, ValidationError> {
        coerce_string(field, self.required(field)?)
    }

    pub(crate) fn record<T: WireRecord>(&self, field: &'static str) -> Result<T, ValidationError> {
        T::from_wire(self.required(field)?)
    }

    /// Nested list of records. An absent list is empty.
    pub(crate) fn records<T: WireRecord>(
        &self,
        field: &'static str,
    ) -> Result<Vec<T>, ValidationError> {
        match self.present(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(T::from_wire).collect(),
            Some(other) => Err(ValidationError::invalid(field, "a list", other)),
        }
    }
}

pub(crate) fn records_to_wire<T: WireRecord>(records: &[T]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| Value::Object(record.to_wire()))
            .collect(),
    )
}

/// Route serde through the wire form so that every decode path, including
/// HTTP extractors, applies the same coercion.
macro_rules! wire_conversions {
    ($($ty:ty),+ $(,)?) => {$(
        impl TryFrom<serde_json::Value> for $ty {
            type Error = $crate::error::ValidationError;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                <$ty as $crate::wire::WireRecord>::from_wire(&value)
            }
        }

        impl From<$ty> for serde_json::Value {
            fn from(record: $ty) -> Self {
                serde_json::Value::Object($crate::wire::WireRecord::to_wire(&record))
            }
        }
    )+};
}

pub(crate) use wire_conversions;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_coerce_to_float() {
        assert_eq!(coerce_f64("latitude", &json!("38")).unwrap(), 38.0);
        assert_eq!(coerce_f64("latitude", &json!(" -76.5 ")).unwrap(), -76.5);
        assert_eq!(coerce_f64("latitude", &json!(12)).unwrap(), 12.0);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        for value in [json!("a"), json!(true), json!([1]), json!({}), json!("nan")] {
            let err = coerce_f64("latitude", &value).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::InvalidValue { field: "latitude", .. }
            ));
        }
    }

    #[test]
    fn integers_truncate_floats_but_not_float_strings() {
        assert_eq!(coerce_i64("order", &json!(3)).unwrap(), 3);
        assert_eq!(coerce_i64("order", &json!(3.7)).unwrap(), 3);
        assert_eq!(coerce_i64("order", &json!("4")).unwrap(), 4);
        assert!(coerce_i64("order", &json!("4.5")).is_err());
    }

    #[test]
    fn null_counts_as_absent() {
        let payload = json!({ "altitude_msl": null });
        let fields = Fields::of("waypoint", &payload).unwrap();
        assert_eq!(fields.opt_f64("altitude_msl").unwrap(), None);
        assert_eq!(
            fields.f64("altitude_msl").unwrap_err(),
            ValidationError::MissingField {
                entity: "waypoint",
                field: "altitude_msl"
            }
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert_eq!(
            Fields::of("telemetry", &json!([1, 2])).err(),
            Some(ValidationError::NotAnObject { entity: "telemetry" })
        );
    }
}
