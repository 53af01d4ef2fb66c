use anyhow::{Context, Result};
use log::info;

use crate::api::{
    AladhanClient, ApiError, BigDataCloudClient, Geolocator, IpGeolocator, ReverseGeocoder,
    TimingsApi, UNKNOWN_CITY,
};
use crate::config::AppConfig;
use crate::models::{Coordinates, LocationData};
use crate::session::state::{FetchRequest, Snapshot};
use crate::utils::hijri::hijri_string;

const SELECTED_LOCATION: &str = "Selected Location";

/// The three external services plus the settings that shape their output.
pub struct Services {
    pub timings: Box<dyn TimingsApi + Send + Sync>,
    pub geocoder: Box<dyn ReverseGeocoder + Send + Sync>,
    pub geolocator: Box<dyn Geolocator + Send + Sync>,
    pub hijri_offset: i32,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.api.request_timeout();
        Ok(Self {
            timings: Box::new(
                AladhanClient::new(&config.api.timings_base_url, timeout)
                    .context("Building timings client")?,
            ),
            geocoder: Box::new(
                BigDataCloudClient::new(&config.api.geocode_base_url, timeout)
                    .context("Building geocoding client")?,
            ),
            geolocator: Box::new(
                IpGeolocator::new(
                    &config.api.geolocation_url,
                    config.location.geolocation_timeout(),
                )
                .context("Building geolocation client")?,
            ),
            hijri_offset: config.display.hijri_offset,
        })
    }

    /// Timings first, then the place name. Either failing fails the fetch.
    pub fn fetch(&self, req: &FetchRequest) -> Result<Snapshot, ApiError> {
        info!("Fetching timings for {} on {}", req.coords, req.date);
        let day = self.timings.timings(req.date, req.coords, req.method)?;
        let place = self.geocoder.reverse(req.coords)?;

        Ok(Snapshot {
            date: req.date,
            times: day.times,
            location: LocationData {
                city: display_city(&place.city, req.fallback_city.as_deref()),
                country_name: place.country_name,
            },
            hijri: day
                .hijri
                .or_else(|| hijri_string(req.date, self.hijri_offset))
                .unwrap_or_default(),
            method_label: day
                .method_name
                .unwrap_or_else(|| req.method.label().to_string()),
        })
    }

    pub fn locate(&self) -> Result<Coordinates, ApiError> {
        self.geolocator.locate()
    }
}

/// The geocoded name, unless the geocoder could not name the place.
pub fn display_city(geocoded: &str, fallback: Option<&str>) -> String {
    if geocoded != UNKNOWN_CITY {
        return geocoded.to_string();
    }
    fallback.unwrap_or(SELECTED_LOCATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DayTimings;
    use crate::models::{CalculationMethod, PrayerTimes};
    use chrono::{NaiveDate, NaiveTime};

    struct FixedTimings(Option<String>);

    impl TimingsApi for FixedTimings {
        fn timings(
            &self,
            _date: NaiveDate,
            _coords: Coordinates,
            _method: CalculationMethod,
        ) -> Result<DayTimings, ApiError> {
            let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
            Ok(DayTimings {
                times: PrayerTimes {
                    fajr: t(5, 0),
                    sunrise: t(6, 15),
                    dhuhr: t(12, 30),
                    asr: t(15, 45),
                    maghrib: t(18, 20),
                    isha: t(19, 40),
                },
                hijri: self.0.clone(),
                method_name: None,
            })
        }
    }

    struct FixedPlace(&'static str);

    impl ReverseGeocoder for FixedPlace {
        fn reverse(&self, _coords: Coordinates) -> Result<LocationData, ApiError> {
            Ok(LocationData {
                city: self.0.to_string(),
                country_name: "Pakistan".to_string(),
            })
        }
    }

    struct Down;

    impl ReverseGeocoder for Down {
        fn reverse(&self, _coords: Coordinates) -> Result<LocationData, ApiError> {
            Err(ApiError::Status {
                service: "geocoding API",
                status: 502,
            })
        }
    }

    impl Geolocator for Down {
        fn locate(&self) -> Result<Coordinates, ApiError> {
            Err(ApiError::Unavailable("offline".into()))
        }
    }

    fn services(hijri: Option<&str>, geocoder: Box<dyn ReverseGeocoder + Send + Sync>) -> Services {
        Services {
            timings: Box::new(FixedTimings(hijri.map(str::to_string))),
            geocoder,
            geolocator: Box::new(Down),
            hijri_offset: 0,
        }
    }

    fn request(fallback: Option<&str>) -> FetchRequest {
        FetchRequest {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            coords: Coordinates {
                latitude: 24.8607,
                longitude: 67.0011,
            },
            method: CalculationMethod(5),
            fallback_city: fallback.map(str::to_string),
        }
    }

    #[test]
    fn display_city_fallback_chain() {
        assert_eq!(display_city("Karachi", Some("X")), "Karachi");
        assert_eq!(display_city(UNKNOWN_CITY, Some("Karachi")), "Karachi");
        assert_eq!(display_city(UNKNOWN_CITY, None), SELECTED_LOCATION);
    }

    #[test]
    fn builds_snapshot_from_both_services() {
        let s = services(Some("15 Ramadan 1446 AH"), Box::new(FixedPlace(UNKNOWN_CITY)));
        let snap = s.fetch(&request(Some("Karachi"))).unwrap();
        assert_eq!(snap.location.city, "Karachi");
        assert_eq!(snap.location.country_name, "Pakistan");
        assert_eq!(snap.hijri, "15 Ramadan 1446 AH");
        assert_eq!(snap.method_label, "Egyptian General Authority of Survey");
    }

    #[test]
    fn missing_hijri_is_computed_locally() {
        let s = services(None, Box::new(FixedPlace("Karachi")));
        let snap = s.fetch(&request(None)).unwrap();
        assert!(snap.hijri.contains("1446"), "{}", snap.hijri);
    }

    #[test]
    fn geocoder_failure_fails_the_fetch() {
        let s = services(None, Box::new(Down));
        assert!(s.fetch(&request(None)).is_err());
        assert!(s.locate().is_err());
    }
}
