use log::debug;

use crate::config::settings::LocationConfig;
use crate::data;
use crate::models::City;

/// Where the session begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Startup {
    City(&'static City),
    Detect,
    Manual,
}

/// Saved preference, then the configured default city, then geolocation
/// (if enabled). The first lookup that yields something wins; with nothing
/// left the user picks by hand.
pub fn resolve_startup(saved: Option<&'static City>, config: &LocationConfig) -> Startup {
    let lookups: [(&str, &dyn Fn() -> Option<Startup>); 3] = [
        ("saved preference", &|| saved.map(Startup::City)),
        ("default city", &|| {
            data::find_city_by_name(&config.default_city).map(Startup::City)
        }),
        ("geolocation", &|| {
            config.detect_when_unresolved.then_some(Startup::Detect)
        }),
    ];

    lookups
        .iter()
        .find_map(|(source, lookup)| {
            let found = lookup();
            if found.is_some() {
                debug!("Startup location from {}", source);
            }
            found
        })
        .unwrap_or(Startup::Manual)
}
