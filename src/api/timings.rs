use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveTime};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{ensure_success, http_client, ApiError};
use crate::models::{CalculationMethod, Coordinates, PrayerTimes};

const SERVICE: &str = "timings API";

/// What one day's timings request yields.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTimings {
    pub times: PrayerTimes,
    /// e.g. "14 Ramadan 1447 AH"
    pub hijri: Option<String>,
    /// Method name as reported by the API, if any.
    pub method_name: Option<String>,
}

pub trait TimingsApi {
    fn timings(
        &self,
        date: NaiveDate,
        coords: Coordinates,
        method: CalculationMethod,
    ) -> Result<DayTimings, ApiError>;
}

// ─── Aladhan wire format ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AladhanResponse {
    code: u16,
    data: AladhanData,
}

#[derive(Debug, Deserialize)]
struct AladhanData {
    timings: RawTimings,
    date: Option<AladhanDate>,
    meta: Option<AladhanMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTimings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

#[derive(Debug, Deserialize)]
struct AladhanDate {
    hijri: Option<HijriBlock>,
}

#[derive(Debug, Deserialize)]
struct HijriBlock {
    day: String,
    month: HijriMonth,
    year: String,
    designation: Option<Designation>,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    en: String,
}

#[derive(Debug, Deserialize)]
struct Designation {
    abbreviated: String,
}

#[derive(Debug, Deserialize)]
struct AladhanMeta {
    method: Option<MetaMethod>,
}

#[derive(Debug, Deserialize)]
struct MetaMethod {
    name: Option<String>,
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse "05:12" or "05:12 (PKT)".
pub fn parse_clock(raw: &str) -> Result<NaiveTime, ApiError> {
    let token = raw.split_whitespace().next().unwrap_or("");
    NaiveTime::parse_from_str(token, "%H:%M").map_err(|_| ApiError::InvalidTime(raw.to_string()))
}

impl RawTimings {
    fn parse(&self) -> Result<PrayerTimes, ApiError> {
        Ok(PrayerTimes {
            fajr: parse_clock(&self.fajr)?,
            sunrise: parse_clock(&self.sunrise)?,
            dhuhr: parse_clock(&self.dhuhr)?,
            asr: parse_clock(&self.asr)?,
            maghrib: parse_clock(&self.maghrib)?,
            isha: parse_clock(&self.isha)?,
        })
    }
}

impl HijriBlock {
    fn display(&self) -> String {
        let day = self
            .day
            .trim()
            .parse::<u32>()
            .map(|d| d.to_string())
            .unwrap_or_else(|_| self.day.trim().to_string());
        let mut out = format!("{} {} {}", day, self.month.en.trim(), self.year.trim());
        if let Some(era) = &self.designation {
            out.push(' ');
            out.push_str(era.abbreviated.trim());
        }
        out
    }
}

fn decode(body: AladhanResponse) -> Result<DayTimings, ApiError> {
    if body.code != 200 {
        return Err(ApiError::Status {
            service: SERVICE,
            status: body.code,
        });
    }
    let data = body.data;
    Ok(DayTimings {
        times: data.timings.parse()?,
        hijri: data
            .date
            .and_then(|d| d.hijri)
            .map(|h| h.display()),
        method_name: data.meta.and_then(|m| m.method).and_then(|m| m.name),
    })
}

/// Date path segment the timings API expects: `D-M-YYYY`, no padding.
pub fn date_path(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

// ─── Client ──────────────────────────────────────────────────────────────────

pub struct AladhanClient {
    http: Client,
    base_url: String,
}

impl AladhanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl TimingsApi for AladhanClient {
    fn timings(
        &self,
        date: NaiveDate,
        coords: Coordinates,
        method: CalculationMethod,
    ) -> Result<DayTimings, ApiError> {
        let url = format!("{}/v1/timings/{}", self.base_url, date_path(date));
        debug!("GET {} ({}, method {})", url, coords, method.code());

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("method", method.code().to_string()),
            ])
            .send()?;
        let body: AladhanResponse = ensure_success(SERVICE, response)?
            .json()
            .map_err(|e| ApiError::Decode {
                service: SERVICE,
                reason: e.to_string(),
            })?;
        decode(body)
    }
}
