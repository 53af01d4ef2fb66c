//! Clients for the external services: prayer timings, reverse geocoding and
//! IP geolocation. Each sits behind a small trait so the session logic can be
//! driven by fakes in tests.

pub mod error;
pub mod geocode;
pub mod geolocate;
pub mod timings;

use std::time::Duration;

use reqwest::blocking::Client;

pub use error::ApiError;
pub use geocode::{BigDataCloudClient, ReverseGeocoder, UNKNOWN_CITY, UNKNOWN_COUNTRY};
pub use geolocate::{Geolocator, IpGeolocator};
pub use timings::{AladhanClient, DayTimings, TimingsApi};

const USER_AGENT: &str = concat!("waqt/", env!("CARGO_PKG_VERSION"), " (prayer times in the terminal)");

fn http_client(timeout: Duration) -> Result<Client, ApiError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Turn a non-2xx response into [`ApiError::Status`].
fn ensure_success(
    service: &'static str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            service,
            status: status.as_u16(),
        })
    }
}
