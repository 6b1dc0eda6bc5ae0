//! Validation failures raised at the wire boundary.

use thiserror::Error;

/// A payload or constructor argument that cannot become a valid entity.
///
/// Errors from nested entities reach the caller unchanged, so the variant
/// always names the innermost field that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{entity} payload must be an object")]
    NotAnObject { entity: &'static str },

    #[error("{entity} is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("field `{field}` must be {expected}, got {found}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("unknown target type `{0}`")]
    UnknownTargetType(String),

    #[error("fly zone needs at least one boundary point")]
    EmptyBoundary,

    #[error("fly zone altitude_msl_min ({min}) exceeds altitude_msl_max ({max})")]
    InvertedAltitudeRange { min: f64, max: f64 },
}

impl ValidationError {
    pub(crate) fn invalid(
        field: &'static str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::InvalidValue {
            field,
            expected,
            found: found.to_string(),
        }
    }
}
