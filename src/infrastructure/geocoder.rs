use std::time::Duration;

use serde::Deserialize;

use crate::domain::geo::{Coordinates, GeocodeError};
use crate::domain::ports::Geocoder;

pub const DEFAULT_ENDPOINT: &str = "https://geocode-maps.yandex.ru/1.x";
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Client for the external geocoding provider.
///
/// One GET per lookup, no retries; the retry policy belongs to the caller.
/// The request timeout bounds worst-case latency of a batch annotation run.
#[derive(Clone)]
pub struct HttpGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create geocoder HTTP client");
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("geocode", address),
                ("apikey", &self.api_key),
                ("format", "json"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let payload: GeocoderPayload = response
            .json()
            .map_err(|e| GeocodeError::MalformedResponse(e.to_string()))?;

        first_position(&payload)
    }
}

// ── Provider payload ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GeocoderPayload {
    response: GeoResponse,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember")]
    feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    pos: String,
}

/// Pick the most relevant (first) feature. Zero features means the provider
/// answered but knows no such place.
fn first_position(payload: &GeocoderPayload) -> Result<Option<Coordinates>, GeocodeError> {
    match payload.response.collection.feature_member.first() {
        Some(member) => parse_pos(&member.geo_object.point.pos).map(Some),
        None => Ok(None),
    }
}

/// `pos` is `"<lon> <lat>"`, longitude first. Keep that order.
fn parse_pos(pos: &str) -> Result<Coordinates, GeocodeError> {
    let mut parts = pos.split_whitespace();
    let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GeocodeError::MalformedResponse(format!(
            "expected \"<lon> <lat>\", got {pos:?}"
        )));
    };
    let longitude: f64 = lon
        .parse()
        .map_err(|_| GeocodeError::MalformedResponse(format!("bad longitude {lon:?}")))?;
    let latitude: f64 = lat
        .parse()
        .map_err(|_| GeocodeError::MalformedResponse(format!("bad latitude {lat:?}")))?;
    Ok(Coordinates {
        longitude,
        latitude,
    })
}
