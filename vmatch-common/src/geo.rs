//! Geographic primitives
//!
//! Points are WGS84 longitude/latitude in decimal degrees. Distances are
//! great-circle (haversine) on a spherical Earth.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius (IUGG) in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Geographic point (longitude, latitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates outside valid bounds
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for non-finite values, longitude outside
    /// [-180, 180] or latitude outside [-90, 90].
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let point = Self { lon, lat };
        point.validate()?;
        Ok(point)
    }

    /// Check bounds of a point that was deserialized without validation
    pub fn validate(&self) -> Result<()> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Non-finite coordinates: ({}, {})",
                self.lon, self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(Error::InvalidInput(format!(
                "Longitude out of range: {}",
                self.lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidInput(format!(
                "Latitude out of range: {}",
                self.lat
            )));
        }
        Ok(())
    }

    /// Great-circle distance to another point in kilometres
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Haversine great-circle distance in kilometres
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp guards against h drifting just above 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Kilometres spanned by one degree of latitude
pub fn km_per_degree_lat() -> f64 {
    EARTH_RADIUS_KM * std::f64::consts::PI / 180.0
}
