pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Inclusive latitude/longitude window, `(min, max)` corners in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

/// Smallest box containing every point within `radius_km` of the center.
/// Used to prefilter candidates at database level before the exact
/// haversine check.
pub fn bounding_box(latitude: f64, longitude: f64, radius_km: f64) -> BoundingBox {
    let lat_rad = latitude.to_radians();
    let lon_rad = longitude.to_radians();

    let lat_delta = radius_km / EARTH_RADIUS_KM;
    // longitude degrees shrink towards the poles
    let lon_delta = radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    BoundingBox {
        min_latitude: (lat_rad - lat_delta).to_degrees(),
        min_longitude: (lon_rad - lon_delta).to_degrees(),
        max_latitude: (lat_rad + lat_delta).to_degrees(),
        max_longitude: (lon_rad + lon_delta).to_degrees(),
    }
}

/// Great circle distance in kilometers.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = latitude_1.to_radians();
    let lat2_rad = latitude_2.to_radians();

    let dlat = lat2_rad - lat1_rad;
    let dlon = (longitude_2 - longitude_1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_distance(-12.0464, -77.0428, -12.0464, -77.0428) < 1e-9);
    }

    #[test]
    fn distance_between_lima_stations() {
        // Villa El Salvador -> Bayóvar, roughly 28 km apart
        let distance = haversine_distance(-12.204444, -76.940694, -11.955833, -76.9725);
        assert!((27.0..29.0).contains(&distance), "got {}", distance);
    }

    #[test]
    fn bounding_box_spans_radius() {
        let bbox = bounding_box(-12.0464, -77.0428, 2.0);
        assert!(bbox.min_latitude < -12.0464 - 0.017 && bbox.max_latitude > -12.0464 + 0.017);
        assert!(bbox.max_latitude < -12.0464 + 0.05);
        // wider in longitude than in latitude away from the equator
        assert!(bbox.max_longitude - bbox.min_longitude > bbox.max_latitude - bbox.min_latitude);
    }

    #[test]
    fn coordinate_ranges() {
        assert!(is_valid_coordinate(-12.0, -77.0));
        assert!(!is_valid_coordinate(-91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, 181.0));
    }
}
