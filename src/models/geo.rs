use serde::Serialize;

use super::{GameId, UserId};

/// Mean Earth radius in kilometers, as assumed by the Haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A (latitude, longitude) pair in decimal degrees.
///
/// Always holds both fields: "location unset" is `Option<GeoPoint>` on the
/// owning profile, never a half-filled pair. [`GeoPoint::new`] is the
/// checked constructor; a point built through it is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, returning `None` for out-of-range or non-finite
    /// coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        valid_coordinates(latitude, longitude).then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometers (Haversine).
    ///
    /// Unrounded; callers producing a [`ProximityResult`] round to two
    /// decimals there.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Range check for decimal-degree coordinates, boundaries inclusive.
/// NaN and infinities are rejected.
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Immutable snapshot of another user considered during one proximity
/// query. Candidates without coordinates are skipped by the ranking.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub user_id: UserId,
    pub location: Option<GeoPoint>,
    pub game_ids: Vec<GameId>,
}

/// A candidate plus its computed distance, rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityResult {
    pub candidate: Candidate,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW: GeoPoint = GeoPoint {
        latitude: 55.7558,
        longitude: 37.6173,
    };
    const SAINT_PETERSBURG: GeoPoint = GeoPoint {
        latitude: 59.9343,
        longitude: 30.3351,
    };

    #[test]
    fn boundaries_are_inclusive() {
        assert!(valid_coordinates(90.0, 180.0));
        assert!(valid_coordinates(-90.0, -180.0));
        assert!(!valid_coordinates(91.0, 0.0));
        assert!(!valid_coordinates(0.0, 181.0));
        assert!(!valid_coordinates(-90.1, 0.0));
        assert!(!valid_coordinates(0.0, -180.1));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        assert!(!valid_coordinates(f64::NAN, 0.0));
        assert!(!valid_coordinates(0.0, f64::NAN));
        assert!(!valid_coordinates(f64::INFINITY, 0.0));
        assert!(!valid_coordinates(0.0, f64::NEG_INFINITY));
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(GeoPoint::new(55.7558, 37.6173).is_some());
        assert!(GeoPoint::new(90.0, -180.0).is_some());
        assert!(GeoPoint::new(-90.5, 0.0).is_none());
        assert!(GeoPoint::new(0.0, 200.0).is_none());
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(MOSCOW.distance_km(&MOSCOW), 0.0);
        assert_eq!(SAINT_PETERSBURG.distance_km(&SAINT_PETERSBURG), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = MOSCOW.distance_km(&SAINT_PETERSBURG);
        let back = SAINT_PETERSBURG.distance_km(&MOSCOW);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn moscow_to_nearby_point_is_under_a_kilometer() {
        let nearby = GeoPoint::new(55.7520, 37.6156).unwrap();
        let dist = MOSCOW.distance_km(&nearby);
        assert!(dist > 0.0 && dist < 1.0, "got {dist} km");
    }

    #[test]
    fn moscow_to_saint_petersburg_is_about_635_km() {
        let dist = MOSCOW.distance_km(&SAINT_PETERSBURG);
        assert!((dist - 635.0).abs() < 5.0, "got {dist} km");
    }
}
