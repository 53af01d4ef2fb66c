use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{ensure_success, http_client, ApiError};
use crate::models::Coordinates;

const SERVICE: &str = "geolocation service";

/// Where is this machine? Terminal stand-in for browser geolocation.
pub trait Geolocator {
    fn locate(&self) -> Result<Coordinates, ApiError>;
}

#[derive(Debug, Deserialize)]
struct IpLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
}

impl IpLocation {
    fn coordinates(self) -> Result<Coordinates, ApiError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(ApiError::Unavailable(
                self.reason
                    .unwrap_or_else(|| "no coordinates in geolocation response".to_string()),
            )),
        }
    }
}

/// IP-based lookup against an ipapi.co-compatible endpoint. The HTTP
/// timeout doubles as the geolocation timeout.
pub struct IpGeolocator {
    http: Client,
    url: String,
}

impl IpGeolocator {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(timeout)?,
            url: url.to_string(),
        })
    }
}

impl Geolocator for IpGeolocator {
    fn locate(&self) -> Result<Coordinates, ApiError> {
        debug!("GET {}", self.url);
        let response = self.http.get(&self.url).send()?;
        let body: IpLocation = ensure_success(SERVICE, response)?
            .json()
            .map_err(|e| ApiError::Decode {
                service: SERVICE,
                reason: e.to_string(),
            })?;
        body.coordinates()
    }
}
