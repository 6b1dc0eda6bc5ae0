//! Stationary and moving obstacles published to teams.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::wire::{coerce_f64, wire_conversions, Fields, WireMap, WireRecord};

/// A cylinder standing on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct StationaryObstacle {
    pub latitude: f64,
    pub longitude: f64,
    pub cylinder_radius: f64,
    pub cylinder_height: f64,
}

impl StationaryObstacle {
    pub fn new(
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
        cylinder_radius: impl Into<Value>,
        cylinder_height: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
            cylinder_radius: coerce_f64("cylinder_radius", &cylinder_radius.into())?,
            cylinder_height: coerce_f64("cylinder_height", &cylinder_height.into())?,
        })
    }
}

impl WireRecord for StationaryObstacle {
    const ENTITY: &'static str = "stationary obstacle";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        map.insert("cylinder_radius".into(), self.cylinder_radius.into());
        map.insert("cylinder_height".into(), self.cylinder_height.into());
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            latitude: fields.f64("latitude")?,
            longitude: fields.f64("longitude")?,
            cylinder_radius: fields.f64("cylinder_radius")?,
            cylinder_height: fields.f64("cylinder_height")?,
        })
    }
}

/// A sphere in flight, reported at its current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct MovingObstacle {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_msl: f64,
    pub sphere_radius: f64,
}

impl MovingObstacle {
    pub fn new(
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
        altitude_msl: impl Into<Value>,
        sphere_radius: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
            altitude_msl: coerce_f64("altitude_msl", &altitude_msl.into())?,
            sphere_radius: coerce_f64("sphere_radius", &sphere_radius.into())?,
        })
    }
}

impl WireRecord for MovingObstacle {
    const ENTITY: &'static str = "moving obstacle";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        map.insert("altitude_msl".into(), self.altitude_msl.into());
        map.insert("sphere_radius".into(), self.sphere_radius.into());
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        Ok(Self {
            latitude: fields.f64("latitude")?,
            longitude: fields.f64("longitude")?,
            altitude_msl: fields.f64("altitude_msl")?,
            sphere_radius: fields.f64("sphere_radius")?,
        })
    }
}

wire_conversions!(StationaryObstacle, MovingObstacle);

/// Every obstacle currently on the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    #[serde(default)]
    pub stationary_obstacles: Vec<StationaryObstacle>,
    #[serde(default)]
    pub moving_obstacles: Vec<MovingObstacle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stationary_rejects_each_bad_field() {
        StationaryObstacle::new(38, -76, 100, 200).unwrap();
        assert!(StationaryObstacle::new("a", -76, 100, 200).is_err());
        assert!(StationaryObstacle::new(38, "a", 100, 200).is_err());
        assert!(StationaryObstacle::new(38, -76, "a", 200).is_err());
        assert!(StationaryObstacle::new(38, -76, 100, "a").is_err());
    }

    #[test]
    fn stationary_serialize_and_deserialize() {
        let o = StationaryObstacle::new(38, -76, 100, 200).unwrap();
        let wire = o.to_wire();
        assert_eq!(wire.len(), 4);
        assert_eq!(wire["cylinder_height"], json!(200.0));

        let decoded = StationaryObstacle::from_wire(&json!({
            "latitude": "38",
            "longitude": -76,
            "cylinder_radius": 100,
            "cylinder_height": 200
        }))
        .unwrap();
        assert_eq!(decoded, o);
    }

    #[test]
    fn moving_rejects_each_bad_field() {
        MovingObstacle::new(38, -76, 100, 200).unwrap();
        assert!(MovingObstacle::new("a", -76, 100, 200).is_err());
        assert!(MovingObstacle::new(38, "a", 100, 200).is_err());
        assert!(MovingObstacle::new(38, -76, "a", -200).is_err());
        assert!(MovingObstacle::new(38, -76, 100, "a").is_err());
    }

    #[test]
    fn moving_serialize_and_deserialize() {
        let o = MovingObstacle::new(38, -76, 100, 200).unwrap();
        let wire = o.to_wire();
        assert_eq!(wire.len(), 4);
        assert_eq!(wire["sphere_radius"], json!(200.0));
        assert_eq!(MovingObstacle::from_wire(&Value::Object(wire)).unwrap(), o);
    }

    #[test]
    fn obstacle_set_decodes_nested_lists() {
        let set: ObstacleSet = serde_json::from_value(json!({
            "stationary_obstacles": [
                { "latitude": 38, "longitude": -76, "cylinder_radius": 50, "cylinder_height": 300 }
            ],
            "moving_obstacles": []
        }))
        .unwrap();
        assert_eq!(set.stationary_obstacles.len(), 1);
        assert!(set.moving_obstacles.is_empty());

        let bad = serde_json::from_value::<ObstacleSet>(json!({
            "moving_obstacles": [{ "latitude": 38 }]
        }));
        assert!(bad.is_err());
    }
}
