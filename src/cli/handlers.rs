use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::data::{self, COUNTRIES};
use crate::db::repository::PreferenceRepo;
use crate::models::{CalculationMethod, Coordinates, METHOD_LABELS};
use crate::prayer_times::{countdown, status_at};
use crate::session::{resolve_startup, FetchRequest, Services, Startup};
use crate::utils::format::{format_12h, format_long_date};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const EMERALD: &str = "\x1b[38;2;16;185;129m";

// ─── Times ───────────────────────────────────────────────────────────────────

/// What `times` should fetch for, before any network call is made.
#[derive(Debug, PartialEq)]
pub enum TimesTarget {
    City {
        coords: Coordinates,
        method: CalculationMethod,
        name: String,
    },
    Coordinates(Coordinates),
    Detect,
}

pub fn times_target(
    conn: &Connection,
    config: &AppConfig,
    country: Option<&str>,
    city: Option<&str>,
    lat: Option<&str>,
    lng: Option<&str>,
) -> Result<TimesTarget> {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        let coords = Coordinates::parse(lat, lng).map_err(|e| anyhow!(e))?;
        return Ok(TimesTarget::Coordinates(coords));
    }
    if let (Some(country), Some(city)) = (country, city) {
        let found = lookup_city(country, city)?;
        return Ok(TimesTarget::City {
            coords: found.coordinates(),
            method: data::method_for_country(&found.country),
            name: found.name.clone(),
        });
    }

    let saved = PreferenceRepo::load_city(conn)?;
    match resolve_startup(saved, &config.location) {
        Startup::City(found) => Ok(TimesTarget::City {
            coords: found.coordinates(),
            method: data::method_for_country(&found.country),
            name: found.name.clone(),
        }),
        Startup::Detect => Ok(TimesTarget::Detect),
        Startup::Manual => bail!("No location configured. Use --country/--city, --lat/--lng or `waqt set-city`."),
    }
}

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    country: Option<&str>,
    city: Option<&str>,
    lat: Option<&str>,
    lng: Option<&str>,
) -> Result<()> {
    let services = Services::from_config(config)?;
    let (coords, method, fallback_city) = match times_target(conn, config, country, city, lat, lng)? {
        TimesTarget::City { coords, method, name } => (coords, method, Some(name)),
        TimesTarget::Coordinates(coords) => (coords, CalculationMethod::DEFAULT, None),
        TimesTarget::Detect => {
            let coords = services.locate().context("Detecting location")?;
            (coords, CalculationMethod::DEFAULT, None)
        }
    };

    let now = Local::now().naive_local();
    let request = FetchRequest {
        id: 0,
        date: now.date(),
        coords,
        method,
        fallback_city,
    };
    let snapshot = services.fetch(&request).context("Fetching prayer times")?;
    let status = status_at(Some(&snapshot.times), now.time());

    println!();
    println_colored!(
        EMERALD,
        "  {}, {}",
        snapshot.location.city,
        snapshot.location.country_name
    );
    println_colored!(DIM, "  {}", format_long_date(snapshot.date));
    if !snapshot.hijri.is_empty() {
        println_colored!(DIM, "  {}", snapshot.hijri);
    }
    println!();

    for (name, time) in snapshot.times.entries() {
        let line = format!("{:<10}  {}", name.display_name(), format_12h(time));
        match status {
            Some(s) if s.next == name => println_colored!(AMBER, "▸ {}", line),
            Some(s) if s.current == name => println_colored!(GREEN, "● {}", line),
            _ if time < now.time() => println_colored!(DIM, "  {}", line),
            _ => println_colored!(BOLD, "  {}", line),
        }
    }

    if let Some(status) = status {
        println!();
        println_colored!(
            AMBER,
            "  Next: {} in {}",
            status.next.display_name(),
            countdown(snapshot.times.get(status.next), now)
        );
    }
    println!();
    println_colored!(DIM, "  Method: {}", snapshot.method_label);
    println!();
    Ok(())
}

fn lookup_city(country: &str, city: &str) -> Result<&'static crate::models::City> {
    data::find_city(city, &country.to_ascii_uppercase())
        .ok_or_else(|| anyhow!("Unknown city '{}' in '{}'. Try: waqt cities {}", city, country, country))
}

// ─── Listings ────────────────────────────────────────────────────────────────

pub fn handle_countries() -> Result<()> {
    println!();
    for country in COUNTRIES {
        let method = data::method_for_country(country.code);
        println!(
            "  {}  {:<24} {}",
            country.code,
            country.name,
            method.label()
        );
    }
    println!();
    Ok(())
}

pub fn handle_cities(country: Option<&str>) -> Result<()> {
    println!();
    match country {
        Some(code) => {
            let country = data::find_country(code)
                .ok_or_else(|| anyhow!("Unknown country '{}'. Try: waqt countries", code))?;
            println_colored!(EMERALD, "  {}", country.name);
            for city in data::cities_in(country.code) {
                println!("  {:<20} {}", city.name, city.coordinates());
            }
        }
        None => {
            for country in COUNTRIES {
                println_colored!(EMERALD, "  {} ({})", country.name, country.code);
                let names: Vec<&str> = data::cities_in(country.code)
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect();
                println_colored!(DIM, "    {}", names.join(", "));
            }
        }
    }
    println!();
    Ok(())
}

pub fn handle_methods() -> Result<()> {
    println!();
    for (code, label) in METHOD_LABELS {
        println!("  {:>2}  {}", code, label);
    }
    println!();
    Ok(())
}

// ─── Preference ──────────────────────────────────────────────────────────────

pub fn handle_set_city(conn: &Connection, country: &str, city: &str) -> Result<()> {
    let found = lookup_city(country, city)?;
    PreferenceRepo::save_city(conn, found)?;
    println_colored!(
        GREEN,
        "  ✓ Location set to {}, {}",
        found.name,
        data::country_name(&found.country)
    );
    Ok(())
}

pub fn handle_forget(conn: &Connection) -> Result<()> {
    PreferenceRepo::clear_city(conn)?;
    println_colored!(GREEN, "  ✓ Saved location cleared");
    Ok(())
}

pub fn handle_locate(config: &AppConfig) -> Result<()> {
    let services = Services::from_config(config)?;
    let coords = services.locate().context("Detecting location")?;
    println_colored!(BOLD, "  {}", coords);
    match services.geocoder.reverse(coords) {
        Ok(place) => println_colored!(EMERALD, "  {}, {}", place.city, place.country_name),
        Err(e) => println_colored!(DIM, "  (could not name this place: {})", e),
    }
    Ok(())
}

pub fn handle_config(config: &AppConfig) -> Result<()> {
    println_colored!(DIM, "# config: {}", AppConfig::config_path()?.display());
    println_colored!(DIM, "# data:   {}", AppConfig::db_path()?.display());
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
