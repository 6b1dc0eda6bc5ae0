//! Mission plans and the fly zones they contain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::geo::{GpsPosition, Waypoint};
use crate::wire::{coerce_f64, records_to_wire, wire_conversions, Fields, WireMap, WireRecord};

/// Airspace the UAS must stay inside, bounded by a polygon and an
/// altitude band.
///
/// Fields are private so that a constructed zone always has a boundary and
/// an ordered altitude band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct FlyZone {
    boundary_pts: Vec<Waypoint>,
    altitude_msl_min: f64,
    altitude_msl_max: f64,
}

impl FlyZone {
    pub fn new(
        boundary_pts: Vec<Waypoint>,
        altitude_msl_min: impl Into<Value>,
        altitude_msl_max: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        let min = coerce_f64("altitude_msl_min", &altitude_msl_min.into())?;
        let max = coerce_f64("altitude_msl_max", &altitude_msl_max.into())?;
        Self::checked(boundary_pts, min, max)
    }

    fn checked(boundary_pts: Vec<Waypoint>, min: f64, max: f64) -> Result<Self, ValidationError> {
        if boundary_pts.is_empty() {
            return Err(ValidationError::EmptyBoundary);
        }
        if min > max {
            return Err(ValidationError::InvertedAltitudeRange { min, max });
        }
        Ok(Self {
            boundary_pts,
            altitude_msl_min: min,
            altitude_msl_max: max,
        })
    }

    pub fn boundary_pts(&self) -> &[Waypoint] {
        &self.boundary_pts
    }

    pub fn altitude_msl_min(&self) -> f64 {
        self.altitude_msl_min
    }

    pub fn altitude_msl_max(&self) -> f64 {
        self.altitude_msl_max
    }
}

impl WireRecord for FlyZone {
    const ENTITY: &'static str = "fly zone";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("boundary_pts".into(), records_to_wire(&self.boundary_pts));
        map.insert("altitude_msl_min".into(), self.altitude_msl_min.into());
        map.insert("altitude_msl_max".into(), self.altitude_msl_max.into());
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        let boundary_pts = fields.records("boundary_pts")?;
        let min = fields.f64("altitude_msl_min")?;
        let max = fields.f64("altitude_msl_max")?;
        Self::checked(boundary_pts, min, max)
    }
}

/// A complete mission configuration.
///
/// Only one mission is expected to be active at a time; that rule belongs
/// to the mission store, not to this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Mission {
    pub id: i64,
    pub active: bool,
    pub air_drop_pos: GpsPosition,
    pub home_pos: GpsPosition,
    pub off_axis_target_pos: GpsPosition,
    pub sric_pos: GpsPosition,
    pub fly_zones: Vec<FlyZone>,
    pub mission_waypoints: Vec<Waypoint>,
    pub search_grid_points: Vec<Waypoint>,
}

impl WireRecord for Mission {
    const ENTITY: &'static str = "mission";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("id".into(), self.id.into());
        map.insert("active".into(), self.active.into());
        map.insert("air_drop_pos".into(), self.air_drop_pos.into());
        map.insert("home_pos".into(), self.home_pos.into());
        map.insert("off_axis_target_pos".into(), self.off_axis_target_pos.into());
        map.insert("sric_pos".into(), self.sric_pos.into());
        map.insert("fly_zones".into(), records_to_wire(&self.fly_zones));
        map.insert("mission_waypoints".into(), records_to_wire(&self.mission_waypoints));
        map.insert("search_grid_points".into(), records_to_wire(&self.search_grid_points));
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.i64("id")?,
            active: fields.bool("active")?,
            air_drop_pos: fields.record("air_drop_pos")?,
            home_pos: fields.record("home_pos")?,
            off_axis_target_pos: fields.record("off_axis_target_pos")?,
            sric_pos: fields.record("sric_pos")?,
            fly_zones: fields.records("fly_zones")?,
            mission_waypoints: fields.records("mission_waypoints")?,
            search_grid_points: fields.records("search_grid_points")?,
        })
    }
}

wire_conversions!(FlyZone, Mission);
