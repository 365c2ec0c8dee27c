use thiserror::Error;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A resolved geographic position.
///
/// The geocoding provider emits positions as `"<lon> <lat>"`, longitude
/// first. This struct keeps that order explicit so the two never get
/// silently swapped between the wire format and distance math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Request(String),
    #[error("geocoder returned malformed payload: {0}")]
    MalformedResponse(String),
}

/// Great-circle distance between two positions in kilometers, via the
/// haversine formula.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(longitude: f64, latitude: f64) -> Coordinates {
        Coordinates {
            longitude,
            latitude,
        }
    }

    #[test]
    fn identical_points_are_zero_km_apart() {
        let p = coords(37.62, 55.75);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(coords(0.0, 0.0), coords(0.0, 1.0));
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn short_hop_at_sixty_degrees_north() {
        // Longitude degrees shrink with latitude; at 60°N a 0.1°/0.1° step
        // works out to roughly 12.4 km.
        let d = distance_km(coords(30.0, 60.0), coords(30.1, 60.1));
        assert!((d - 12.43).abs() < 0.05, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coords(30.0, 60.0);
        let b = coords(37.62, 55.75);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }
}
