use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{ensure_success, http_client, ApiError};
use crate::models::{Coordinates, LocationData};

const SERVICE: &str = "geocoding API";

pub const UNKNOWN_CITY: &str = "Unknown City";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

pub trait ReverseGeocoder {
    fn reverse(&self, coords: Coordinates) -> Result<LocationData, ApiError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BigDataCloudResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl From<BigDataCloudResponse> for LocationData {
    fn from(r: BigDataCloudResponse) -> Self {
        LocationData {
            city: non_empty(r.city).unwrap_or_else(|| UNKNOWN_CITY.to_string()),
            country_name: non_empty(r.country_name).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }
}

pub struct BigDataCloudClient {
    http: Client,
    base_url: String,
}

impl BigDataCloudClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ReverseGeocoder for BigDataCloudClient {
    fn reverse(&self, coords: Coordinates) -> Result<LocationData, ApiError> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);
        debug!("GET {} ({})", url, coords);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()?;
        let body: BigDataCloudResponse = ensure_success(SERVICE, response)?
            .json()
            .map_err(|e| ApiError::Decode {
                service: SERVICE,
                reason: e.to_string(),
            })?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn blank_fields_fall_back_to_unknown() {
        let r: BigDataCloudResponse =
            serde_json::from_value(json!({ "city": "  ", "countryName": "Pakistan" })).unwrap();
        let loc = LocationData::from(r);
        assert_eq!(loc.city, UNKNOWN_CITY);
        assert_eq!(loc.country_name, "Pakistan");

        let loc = LocationData::from(BigDataCloudResponse::default());
        assert_eq!(loc.country_name, UNKNOWN_COUNTRY);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reverse_geocodes_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/reverse-geocode-client"))
            .and(query_param("latitude", "24.8607"))
            .and(query_param("localityLanguage", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 24.8607,
                "longitude": 67.0011,
                "city": "Karachi",
                "countryName": "Pakistan",
                "countryCode": "PK"
            })))
            .mount(&server)
            .await;

        let base = server.uri();
        let loc = tokio::task::spawn_blocking(move || {
            BigDataCloudClient::new(&base, Duration::from_secs(5))?.reverse(Coordinates {
                latitude: 24.8607,
                longitude: 67.0011,
            })
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(loc.city, "Karachi");
        assert_eq!(loc.country_name, "Pakistan");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn not_found_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            BigDataCloudClient::new(&base, Duration::from_secs(5))?.reverse(Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            })
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
    }
}
