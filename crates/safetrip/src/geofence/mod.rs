//! Great-circle distance and risk-zone matching.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assessment::AssessmentError;
use crate::catalog::domain::coordinates_in_range;
use crate::catalog::RiskZone;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Position reported by a device-location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    accuracy_meters: Option<f64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64, accuracy_meters: Option<f64>) -> Result<Self, AssessmentError> {
        if !coordinates_in_range(lat, lng) {
            return Err(AssessmentError::InvalidInput(format!(
                "coordinates ({lat}, {lng}) are outside lat [-90, 90] / lng [-180, 180]"
            )));
        }
        if let Some(accuracy) = accuracy_meters {
            if !(accuracy.is_finite() && accuracy >= 0.0) {
                return Err(AssessmentError::InvalidInput(format!(
                    "location accuracy must be a non-negative distance, got {accuracy}"
                )));
            }
        }

        Ok(Self {
            lat,
            lng,
            accuracy_meters,
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn accuracy_meters(&self) -> Option<f64> {
        self.accuracy_meters
    }
}

impl RiskZone {
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
            accuracy_meters: None,
        }
    }
}

/// Haversine distance in kilometres.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // rounding can push antipodal points just past 1
    let h = h.min(1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// A zone whose radius contains the queried point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyZone {
    pub zone: RiskZone,
    pub distance_km: f64,
}

/// Zones containing `point` (boundary inclusive), nearest first. Equal distances keep
/// catalog order.
pub fn find_nearby_zones(point: &GeoPoint, zones: &[RiskZone]) -> Vec<NearbyZone> {
    let mut nearby: Vec<NearbyZone> = zones
        .iter()
        .filter_map(|zone| {
            let distance_km = haversine_km(point, &zone.center());
            (distance_km <= zone.radius_km).then(|| NearbyZone {
                zone: zone.clone(),
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(
        lat = point.lat,
        lng = point.lng,
        matches = nearby.len(),
        "geofence lookup completed"
    );

    nearby
}
