use anyhow::{Context, Result};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

use crate::data;
use crate::models::{City, SavedPreference};

// ─── Key/value store ─────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ─── Saved location ──────────────────────────────────────────────────────────

pub const LOCATION_KEY: &str = "prayer-times-location";
pub const NOTIFICATIONS_KEY: &str = "notifications_enabled";

pub struct PreferenceRepo;

impl PreferenceRepo {
    /// The saved city, if there is one and it still exists in the bundled
    /// table. Corrupt records are treated as absent.
    pub fn load_city(conn: &Connection) -> Result<Option<&'static City>> {
        let Some(raw) = MetaRepo::get(conn, LOCATION_KEY)? else {
            return Ok(None);
        };
        Ok(validate_saved(&raw))
    }

    pub fn save_city(conn: &Connection, city: &City) -> Result<()> {
        let record = SavedPreference { city: city.clone() };
        let json = serde_json::to_string(&record).context("Serializing saved location")?;
        MetaRepo::set(conn, LOCATION_KEY, &json)
    }

    pub fn clear_city(conn: &Connection) -> Result<()> {
        MetaRepo::delete(conn, LOCATION_KEY)
    }

    pub fn notifications_enabled(conn: &Connection) -> Result<bool> {
        Ok(MetaRepo::get(conn, NOTIFICATIONS_KEY)?.as_deref() == Some("1"))
    }

    pub fn set_notifications(conn: &Connection, enabled: bool) -> Result<()> {
        MetaRepo::set(conn, NOTIFICATIONS_KEY, if enabled { "1" } else { "0" })
    }
}

/// Parse a stored record and match it against the city table by name and
/// country code.
pub fn validate_saved(raw: &str) -> Option<&'static City> {
    let saved: SavedPreference = match serde_json::from_str(raw) {
        Ok(saved) => saved,
        Err(e) => {
            warn!("Discarding unreadable saved location: {}", e);
            return None;
        }
    };
    let found = data::find_city(&saved.city.name, &saved.city.country);
    if found.is_none() {
        warn!(
            "Saved city {} ({}) is no longer available",
            saved.city.name, saved.city.country
        );
    }
    found
}
