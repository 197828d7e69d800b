//! Great-circle distance between two WGS84 coordinates.

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between `(lat1, lon1)` and `(lat2, lon2)`.
///
/// Identical points return exactly `0.0`. The haversine term is clamped to
/// `[0, 1]` so floating-point drift near antipodal points cannot push the
/// arcsine argument out of its domain and produce `NaN`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: (f64, f64) = (51.5074, -0.1278);
    const MANCHESTER: (f64, f64) = (53.4808, -2.2426);

    #[test]
    fn london_to_manchester_is_about_262_km() {
        let d = distance_km(LONDON.0, LONDON.1, MANCHESTER.0, MANCHESTER.1);
        assert!((d - 262.0).abs() <= 5.0, "got {d}");
    }

    #[test]
    fn identical_points_are_zero() {
        for (lat, lon) in [(0.0, 0.0), LONDON, (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (LONDON, MANCHESTER),
            ((40.7, -74.0), (34.05, -118.24)),
            ((-33.9, 151.2), (51.5, -0.1)),
        ];
        for (a, b) in pairs {
            let ab = distance_km(a.0, a.1, b.0, b.1);
            let ba = distance_km(b.0, b.1, a.0, a.1);
            assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
        }
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1.0, "got {d}");

        let pole_to_pole = distance_km(90.0, 0.0, -90.0, 0.0);
        assert!(pole_to_pole.is_finite());
    }

    #[test]
    fn distance_is_never_negative() {
        let d = distance_km(10.0, 10.0, 10.000_001, 10.000_001);
        assert!(d >= 0.0);
    }
}
