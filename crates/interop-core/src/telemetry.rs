//! Aircraft telemetry reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::wire::{coerce_f64, wire_conversions, Fields, WireMap, WireRecord};

/// Position and heading reported by the UAS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Telemetry {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_msl: f64,
    /// Degrees; not normalized to [0, 360).
    pub uas_heading: f64,
}

impl Telemetry {
    pub fn new(
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
        altitude_msl: impl Into<Value>,
        uas_heading: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
            altitude_msl: coerce_f64("altitude_msl", &altitude_msl.into())?,
            uas_heading: coerce_f64("uas_heading", &uas_heading.into())?,
        })
    }
}

impl WireRecord for Telemetry {
    const ENTITY: &'static str = "telemetry";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        map.insert("altitude_msl".into(), self.altitude_msl.into());
        map.insert("uas_heading".into(), self.uas_heading.into());
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            latitude: fields.f64("latitude")?,
            longitude: fields.f64("longitude")?,
            altitude_msl: fields.f64("altitude_msl")?,
            uas_heading: fields.f64("uas_heading")?,
        })
    }
}

wire_conversions!(Telemetry);
