//! Geographic primitives shared by every other entity.
//!
//! These are shape gates only: no range checking is done on latitude or
//! longitude.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::wire::{coerce_f64, coerce_i64, wire_conversions, Fields, WireMap, WireRecord};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPosition {
    pub fn new(
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
        })
    }
}

impl WireRecord for GpsPosition {
    const ENTITY: &'static str = "gps position";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            latitude: fields.f64("latitude")?,
            longitude: fields.f64("longitude")?,
        })
    }
}

/// A sequenced point on a route, boundary or search grid.
///
/// `order` is a caller-supplied hint. Duplicate or gapped orders are
/// accepted and never re-derived from list position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Waypoint {
    pub order: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Search grid points are commonly sent without an altitude.
    pub altitude_msl: Option<f64>,
}

impl Waypoint {
    pub fn new(
        order: impl Into<Value>,
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            order: coerce_i64("order", &order.into())?,
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
            altitude_msl: None,
        })
    }

    /// Set the altitude above mean sea level.
    pub fn with_altitude(mut self, altitude_msl: impl Into<Value>) -> Result<Self, ValidationError> {
        self.altitude_msl = Some(coerce_f64("altitude_msl", &altitude_msl.into())?);
        Ok(self)
    }

    pub fn position(&self) -> GpsPosition {
        GpsPosition {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl WireRecord for Waypoint {
    const ENTITY: &'static str = "waypoint";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("order".into(), self.order.into());
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        if let Some(altitude_msl) = self.altitude_msl {
            map.insert("altitude_msl".into(), altitude_msl.into());
        }
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            order: fields.i64("order")?,
            latitude: fields.f64("latitude")?,
            longitude: fields.f64("longitude")?,
            altitude_msl: fields.opt_f64("altitude_msl")?,
        })
    }
}

wire_conversions!(GpsPosition, Waypoint);
