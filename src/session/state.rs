use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};

use crate::data;
use crate::models::{
    CalculationMethod, City, Coordinates, LocationData, PrayerName, PrayerTimes,
};
use crate::prayer_times::{countdown, status_at, PrayerStatus};
use crate::session::resolver::Startup;
use crate::utils::format::format_12h;

pub const FETCH_ERROR: &str = "Could not fetch prayer times. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Detecting,
    Manual,
    Loading,
    Loaded,
    Error,
}

/// Everything needed to ask for one day's timings.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub id: u64,
    pub date: NaiveDate,
    pub coords: Coordinates,
    pub method: CalculationMethod,
    /// Shown when the geocoder cannot name the place.
    pub fallback_city: Option<String>,
}

/// The result of one successful fetch. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub times: PrayerTimes,
    pub location: LocationData,
    pub hijri: String,
    pub method_label: String,
}

/// Side effects requested by [`Session::update`]. The caller runs them and
/// feeds results back as messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Geolocate,
    Fetch(FetchRequest),
    SaveCity(City),
    SetNotifications(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Detect,
    Located(Result<Coordinates, String>),
    ChangeLocation,
    SelectCountry(String),
    SelectCity(String),
    SubmitCoordinates { latitude: String, longitude: String },
    Fetched { id: u64, result: Result<Snapshot, String> },
    Refresh,
    ToggleNotifications,
}

/// One line of the prayer table as the views show it.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerRow {
    pub name: PrayerName,
    pub time: String,
    pub is_current: bool,
    pub is_next: bool,
    pub countdown: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    pub selected_country: Option<String>,
    pub available_cities: Vec<&'static City>,
    pub selected_city: Option<String>,
    /// Inline message for bad coordinate input.
    pub coord_error: Option<String>,
    pub error: Option<String>,
    pub snapshot: Option<Snapshot>,
    pub status: Option<PrayerStatus>,
    pub countdown: Option<String>,
    pub notifications: bool,

    clear_on_country_change: bool,
    in_flight: Option<u64>,
    next_id: u64,
    last_request: Option<FetchRequest>,
    generation: u64,
}

impl Session {
    pub fn new(notifications: bool, clear_on_country_change: bool) -> Self {
        Self {
            phase: Phase::Manual,
            selected_country: None,
            available_cities: Vec::new(),
            selected_city: None,
            coord_error: None,
            error: None,
            snapshot: None,
            status: None,
            countdown: None,
            notifications,
            clear_on_country_change,
            in_flight: None,
            next_id: 1,
            last_request: None,
            generation: 0,
        }
    }

    /// Enter the first state and return what has to happen next.
    pub fn start(&mut self, startup: Startup, now: NaiveDateTime) -> Vec<Effect> {
        match startup {
            Startup::City(city) => {
                info!("Starting with {} ({})", city.name, city.country);
                self.preselect(city);
                vec![self.begin_fetch(
                    now.date(),
                    city.coordinates(),
                    data::method_for_country(&city.country),
                    Some(city.name.clone()),
                )]
            }
            Startup::Detect => {
                info!("No saved or default city; detecting location");
                self.phase = Phase::Detecting;
                vec![Effect::Geolocate]
            }
            Startup::Manual => {
                info!("No location resolved; waiting for manual selection");
                self.phase = Phase::Manual;
                Vec::new()
            }
        }
    }

    /// Bumped every time the snapshot is replaced or cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update(&mut self, msg: Msg, now: NaiveDateTime) -> Vec<Effect> {
        match msg {
            Msg::Detect => {
                if matches!(self.phase, Phase::Manual | Phase::Error) {
                    self.phase = Phase::Detecting;
                    self.error = None;
                    return vec![Effect::Geolocate];
                }
                Vec::new()
            }

            Msg::Located(result) => {
                if self.phase != Phase::Detecting {
                    return Vec::new();
                }
                match result {
                    Ok(coords) => vec![self.begin_fetch(
                        now.date(),
                        coords,
                        CalculationMethod::DEFAULT,
                        None,
                    )],
                    Err(reason) => {
                        debug!("Geolocation failed: {}", reason);
                        self.phase = Phase::Manual;
                        Vec::new()
                    }
                }
            }

            Msg::ChangeLocation => {
                if matches!(self.phase, Phase::Loaded | Phase::Error) {
                    self.phase = Phase::Manual;
                    self.error = None;
                    self.coord_error = None;
                }
                Vec::new()
            }

            Msg::SelectCountry(code) => {
                if self.phase != Phase::Manual {
                    return Vec::new();
                }
                let Some(country) = data::find_country(&code) else {
                    return Vec::new();
                };
                self.selected_country = Some(country.code.to_string());
                self.available_cities = data::cities_in(country.code);
                self.selected_city = None;
                if self.clear_on_country_change && self.snapshot.is_some() {
                    self.clear_snapshot();
                }
                Vec::new()
            }

            Msg::SelectCity(name) => {
                if self.phase != Phase::Manual {
                    return Vec::new();
                }
                let Some(city) = self
                    .available_cities
                    .iter()
                    .copied()
                    .find(|c| c.name == name)
                else {
                    return Vec::new();
                };
                self.selected_city = Some(city.name.clone());
                let fetch = self.begin_fetch(
                    now.date(),
                    city.coordinates(),
                    data::method_for_country(&city.country),
                    Some(city.name.clone()),
                );
                vec![Effect::SaveCity(city.clone()), fetch]
            }

            Msg::SubmitCoordinates {
                latitude,
                longitude,
            } => {
                if self.phase != Phase::Manual {
                    return Vec::new();
                }
                match Coordinates::parse(&latitude, &longitude) {
                    Ok(coords) => {
                        self.coord_error = None;
                        vec![self.begin_fetch(now.date(), coords, CalculationMethod::DEFAULT, None)]
                    }
                    Err(e) => {
                        self.coord_error = Some(e);
                        Vec::new()
                    }
                }
            }

            Msg::Fetched { id, result } => {
                if self.in_flight != Some(id) {
                    debug!("Ignoring stale fetch result {}", id);
                    return Vec::new();
                }
                self.in_flight = None;
                match result {
                    Ok(snapshot) => {
                        info!(
                            "Loaded timings for {}, {}",
                            snapshot.location.city, snapshot.location.country_name
                        );
                        self.snapshot = Some(snapshot);
                        self.generation += 1;
                        self.phase = Phase::Loaded;
                        self.error = None;
                        self.recompute_status(now);
                    }
                    Err(reason) => {
                        warn!("Fetch failed: {}", reason);
                        self.phase = Phase::Error;
                        self.error = Some(FETCH_ERROR.to_string());
                    }
                }
                Vec::new()
            }

            Msg::Refresh => {
                if self.phase != Phase::Loaded {
                    return Vec::new();
                }
                match self.last_request.clone() {
                    Some(req) => vec![self.begin_fetch(
                        now.date(),
                        req.coords,
                        req.method,
                        req.fallback_city,
                    )],
                    None => Vec::new(),
                }
            }

            Msg::ToggleNotifications => {
                self.notifications = !self.notifications;
                vec![Effect::SetNotifications(self.notifications)]
            }
        }
    }

    /// Re-derive current/next from the snapshot. Called on the minute timer
    /// and whenever the snapshot changes. A changed next prayer also resets
    /// the countdown.
    pub fn recompute_status(&mut self, now: NaiveDateTime) {
        let previous = self.status.map(|s| s.next);
        self.status = status_at(self.snapshot.as_ref().map(|s| &s.times), now.time());
        if self.status.map(|s| s.next) != previous || self.status.is_none() {
            self.recompute_countdown(now);
        }
    }

    pub fn recompute_countdown(&mut self, now: NaiveDateTime) {
        self.countdown = match (&self.snapshot, self.status) {
            (Some(snapshot), Some(status)) => {
                Some(countdown(snapshot.times.get(status.next), now))
            }
            _ => None,
        };
    }

    /// True when the displayed timings belong to an earlier day.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.phase == Phase::Loaded && self.snapshot.as_ref().is_some_and(|s| s.date < today)
    }

    pub fn rows(&self) -> Vec<PrayerRow> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        snapshot
            .times
            .entries()
            .iter()
            .map(|(name, time)| {
                let is_next = self.status.is_some_and(|s| s.next == *name);
                PrayerRow {
                    name: *name,
                    time: format_12h(*time),
                    is_current: self.status.is_some_and(|s| s.current == *name),
                    is_next,
                    countdown: if is_next { self.countdown.clone() } else { None },
                }
            })
            .collect()
    }

    fn preselect(&mut self, city: &'static City) {
        self.selected_country = Some(city.country.clone());
        self.available_cities = data::cities_in(&city.country);
        self.selected_city = Some(city.name.clone());
    }

    fn clear_snapshot(&mut self) {
        self.snapshot = None;
        self.status = None;
        self.countdown = None;
        self.generation += 1;
    }

    fn begin_fetch(
        &mut self,
        date: NaiveDate,
        coords: Coordinates,
        method: CalculationMethod,
        fallback_city: Option<String>,
    ) -> Effect {
        let id = self.next_id;
        self.next_id += 1;
        let req = FetchRequest {
            id,
            date,
            coords,
            method,
            fallback_city,
        };
        debug!("Fetch #{} for {} with method {}", id, coords, method.code());
        self.phase = Phase::Loading;
        self.error = None;
        self.in_flight = Some(id);
        self.last_request = Some(req.clone());
        Effect::Fetch(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn now(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn snapshot(city: &str) -> Snapshot {
        Snapshot {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            times: PrayerTimes {
                fajr: t(5, 0),
                sunrise: t(6, 15),
                dhuhr: t(12, 30),
                asr: t(15, 45),
                maghrib: t(18, 20),
                isha: t(19, 40),
            },
            location: LocationData {
                city: city.to_string(),
                country_name: "Pakistan".to_string(),
            },
            hijri: "25 Ramadan 1447 AH".to_string(),
            method_label: "Egyptian General Authority of Survey".to_string(),
        }
    }

    fn fetch_of(effects: &[Effect]) -> FetchRequest {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch(req) => Some(req.clone()),
                _ => None,
            })
            .expect("no fetch effect")
    }

    fn loaded_session() -> Session {
        let mut s = Session::new(false, false);
        s.update(Msg::SelectCountry("PK".into()), now(12, 0, 0));
        let effects = s.update(Msg::SelectCity("Karachi".into()), now(12, 0, 0));
        let req = fetch_of(&effects);
        s.update(
            Msg::Fetched {
                id: req.id,
                result: Ok(snapshot("Karachi")),
            },
            now(12, 29, 50),
        );
        s
    }

    #[test]
    fn selecting_karachi_fetches_with_method_five_and_saves() {
        let mut s = Session::new(false, false);
        s.update(Msg::SelectCountry("PK".into()), now(9, 0, 0));
        assert_eq!(s.available_cities.len(), 3);

        let effects = s.update(Msg::SelectCity("Karachi".into()), now(9, 0, 0));
        assert_eq!(s.phase, Phase::Loading);

        let saved = effects.iter().any(|e| matches!(e, Effect::SaveCity(c) if c.name == "Karachi"));
        assert!(saved);

        let req = fetch_of(&effects);
        assert_eq!(req.method, CalculationMethod(5));
        assert_eq!(req.coords.latitude, 24.8607);
        assert_eq!(req.coords.longitude, 67.0011);
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn successful_fetch_shows_city_and_twelve_hour_times() {
        let s = loaded_session();
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(s.snapshot.as_ref().unwrap().location.city, "Karachi");

        let rows = s.rows();
        let times: Vec<_> = rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(
            times,
            vec!["05:00 AM", "06:15 AM", "12:30 PM", "03:45 PM", "06:20 PM", "07:40 PM"]
        );
        let next = rows.iter().find(|r| r.is_next).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);
        assert_eq!(next.countdown.as_deref(), Some("00:00:10"));
        assert!(rows.iter().find(|r| r.is_current).unwrap().name == PrayerName::Sunrise);
    }

    #[test]
    fn status_recompute_flips_at_prayer_time() {
        let mut s = loaded_session();
        // The countdown tick alone does not move to the next prayer.
        s.recompute_countdown(now(12, 30, 0));
        assert_eq!(s.status.unwrap().next, PrayerName::Dhuhr);
        assert_eq!(s.countdown.as_deref(), Some("24:00:00"));

        s.recompute_status(now(12, 30, 0));
        assert_eq!(s.status.unwrap().current, PrayerName::Dhuhr);
        assert_eq!(s.status.unwrap().next, PrayerName::Asr);
        assert_eq!(s.countdown.as_deref(), Some("03:15:00"));
    }

    #[test]
    fn unknown_city_or_country_is_ignored() {
        let mut s = Session::new(false, false);
        s.update(Msg::SelectCountry("ZZ".into()), now(9, 0, 0));
        assert_eq!(s.selected_country, None);
        s.update(Msg::SelectCountry("PK".into()), now(9, 0, 0));
        let effects = s.update(Msg::SelectCity("Delhi".into()), now(9, 0, 0));
        assert!(effects.is_empty());
        assert_eq!(s.phase, Phase::Manual);
    }

    #[test]
    fn fetch_failure_goes_to_error_then_manual() {
        let mut s = Session::new(false, false);
        s.update(Msg::SelectCountry("EG".into()), now(9, 0, 0));
        let req = fetch_of(&s.update(Msg::SelectCity("Cairo".into()), now(9, 0, 0)));
        s.update(
            Msg::Fetched {
                id: req.id,
                result: Err("HTTP 500".into()),
            },
            now(9, 0, 1),
        );
        assert_eq!(s.phase, Phase::Error);
        assert_eq!(s.error.as_deref(), Some(FETCH_ERROR));

        s.update(Msg::ChangeLocation, now(9, 0, 2));
        assert_eq!(s.phase, Phase::Manual);
        assert_eq!(s.error, None);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut s = Session::new(false, false);
        s.update(Msg::SelectCountry("PK".into()), now(9, 0, 0));
        let first = fetch_of(&s.update(Msg::SelectCity("Karachi".into()), now(9, 0, 0)));
        s.phase = Phase::Manual;
        let second = fetch_of(&s.update(Msg::SelectCity("Lahore".into()), now(9, 0, 1)));
        assert_ne!(first.id, second.id);

        s.update(
            Msg::Fetched {
                id: first.id,
                result: Ok(snapshot("Karachi")),
            },
            now(9, 0, 2),
        );
        assert_eq!(s.phase, Phase::Loading);
        assert!(s.snapshot.is_none());
    }

    #[test]
    fn raw_coordinates_use_default_method_and_are_not_saved() {
        let mut s = Session::new(false, false);
        let effects = s.update(
            Msg::SubmitCoordinates {
                latitude: "51.5074".into(),
                longitude: "-0.1278".into(),
            },
            now(9, 0, 0),
        );
        assert_eq!(effects.len(), 1);
        let req = fetch_of(&effects);
        assert_eq!(req.method, CalculationMethod::DEFAULT);
        assert_eq!(req.fallback_city, None);
    }

    #[test]
    fn invalid_coordinates_stay_in_manual_with_message() {
        let mut s = Session::new(false, false);
        let effects = s.update(
            Msg::SubmitCoordinates {
                latitude: "abc".into(),
                longitude: "10".into(),
            },
            now(9, 0, 0),
        );
        assert!(effects.is_empty());
        assert_eq!(s.phase, Phase::Manual);
        assert!(s.coord_error.as_deref().unwrap().contains("Latitude"));
    }

    #[test]
    fn geolocation_success_and_failure() {
        let mut s = Session::new(false, false);
        assert_eq!(s.start(Startup::Detect, now(9, 0, 0)), vec![Effect::Geolocate]);
        assert_eq!(s.phase, Phase::Detecting);
        s.update(Msg::Located(Err("timed out".into())), now(9, 0, 5));
        assert_eq!(s.phase, Phase::Manual);
        assert_eq!(s.error, None);

        s.update(Msg::Detect, now(9, 1, 0));
        let effects = s.update(
            Msg::Located(Ok(Coordinates {
                latitude: 21.3891,
                longitude: 39.8579,
            })),
            now(9, 1, 1),
        );
        assert_eq!(s.phase, Phase::Loading);
        assert_eq!(fetch_of(&effects).method, CalculationMethod::DEFAULT);
    }

    #[test]
    fn start_with_city_preselects_and_fetches() {
        let mut s = Session::new(false, false);
        let karachi = data::find_city("Karachi", "PK").unwrap();
        let effects = s.start(Startup::City(karachi), now(9, 0, 0));
        assert_eq!(s.phase, Phase::Loading);
        assert_eq!(s.selected_city.as_deref(), Some("Karachi"));
        assert_eq!(fetch_of(&effects).method, CalculationMethod(5));
        // Startup does not rewrite the saved preference.
        assert!(!effects.iter().any(|e| matches!(e, Effect::SaveCity(_))));
    }

    #[test]
    fn change_location_keeps_displayed_data() {
        let mut s = loaded_session();
        s.update(Msg::ChangeLocation, now(13, 0, 0));
        assert_eq!(s.phase, Phase::Manual);
        s.update(Msg::SelectCountry("EG".into()), now(13, 0, 1));
        assert!(s.snapshot.is_some());
    }

    #[test]
    fn country_change_can_clear_results() {
        let mut s = Session::new(false, true);
        s.update(Msg::SelectCountry("PK".into()), now(12, 0, 0));
        let req = fetch_of(&s.update(Msg::SelectCity("Karachi".into()), now(12, 0, 0)));
        s.update(
            Msg::Fetched {
                id: req.id,
                result: Ok(snapshot("Karachi")),
            },
            now(12, 0, 1),
        );
        let generation = s.generation();
        s.update(Msg::ChangeLocation, now(12, 1, 0));
        s.update(Msg::SelectCountry("EG".into()), now(12, 1, 1));
        assert!(s.snapshot.is_none());
        assert!(s.status.is_none());
        assert!(s.generation() > generation);
    }

    #[test]
    fn refresh_refetches_last_location() {
        let mut s = loaded_session();
        let effects = s.update(Msg::Refresh, now(13, 0, 0));
        let req = fetch_of(&effects);
        assert_eq!(req.method, CalculationMethod(5));
        assert_eq!(req.fallback_city.as_deref(), Some("Karachi"));
        assert_eq!(s.phase, Phase::Loading);
    }

    #[test]
    fn notifications_toggle_persists() {
        let mut s = Session::new(false, false);
        assert_eq!(
            s.update(Msg::ToggleNotifications, now(9, 0, 0)),
            vec![Effect::SetNotifications(true)]
        );
        assert!(s.notifications);
    }

    #[test]
    fn staleness_follows_the_calendar() {
        let s = loaded_session();
        assert!(!s.is_stale(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()));
        assert!(s.is_stale(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
    }

    #[test]
    fn no_snapshot_means_no_rows_or_status() {
        let mut s = Session::new(false, false);
        s.recompute_status(now(9, 0, 0));
        assert_eq!(s.status, None);
        assert_eq!(s.countdown, None);
        assert!(s.rows().is_empty());
    }
}
