//! Circular test track used to generate telemetry.

use interop_core::{Telemetry, ValidationError};
use std::f64::consts::PI;

const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// A constant-altitude orbit around a center point, flown clockwise as
/// seen from above.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_m: f64,
    pub altitude_msl: f64,
    period_s: f64,
}

impl Orbit {
    pub fn new(center_lat: f64, center_lon: f64, radius_m: f64, altitude_msl: f64, speed_mps: f64) -> Self {
        let period_s = 2.0 * PI * radius_m / speed_mps;
        Self {
            center_lat,
            center_lon,
            radius_m,
            altitude_msl,
            period_s,
        }
    }

    /// Bearing from the center at time `t`, in radians clockwise from north.
    fn bearing(&self, t: f64) -> f64 {
        2.0 * PI * t / self.period_s
    }

    /// (latitude, longitude) at `t` seconds after start.
    pub fn position(&self, t: f64) -> (f64, f64) {
        let bearing = self.bearing(t);
        let dlat = self.radius_m * bearing.cos() / METERS_PER_DEG_LAT;
        let dlon = self.radius_m * bearing.sin()
            / (METERS_PER_DEG_LAT * self.center_lat.to_radians().cos());
        (self.center_lat + dlat, self.center_lon + dlon)
    }

    /// Heading of the aircraft at `t`, degrees in [0, 360).
    pub fn heading(&self, t: f64) -> f64 {
        (self.bearing(t).to_degrees() + 90.0).rem_euclid(360.0)
    }

    pub fn telemetry(&self, t: f64) -> Result<Telemetry, ValidationError> {
        let (lat, lon) = self.position(t);
        Telemetry::new(lat, lon, self.altitude_msl, self.heading(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_north_of_center_heading_east() {
        let orbit = Orbit::new(38.0, -76.0, 200.0, 100.0, 10.0);
        let (lat, lon) = orbit.position(0.0);
        assert!(lat > 38.0);
        assert!((lon + 76.0).abs() < 1e-9);
        assert!((orbit.heading(0.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn full_period_returns_to_start() {
        let orbit = Orbit::new(38.0, -76.0, 200.0, 100.0, 10.0);
        let period = 2.0 * PI * 200.0 / 10.0;
        let (lat0, lon0) = orbit.position(0.0);
        let (lat1, lon1) = orbit.position(period);
        assert!((lat0 - lat1).abs() < 1e-9);
        assert!((lon0 - lon1).abs() < 1e-9);
    }

    #[test]
    fn telemetry_carries_altitude_and_heading() {
        let orbit = Orbit::new(38.0, -76.0, 200.0, 120.0, 10.0);
        let period = 2.0 * PI * 200.0 / 10.0;
        let t = orbit.telemetry(period / 4.0).unwrap();
        assert_eq!(t.altitude_msl, 120.0);
        assert!((t.uas_heading - 180.0).abs() < 1e-6);
    }
}
