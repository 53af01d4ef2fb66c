use serde::{Deserialize, Serialize};

/// An entry in the bundled city table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// ISO-like country code, e.g. "PK"
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse user-entered latitude/longitude. The error is meant to be shown
    /// inline next to the input.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, String> {
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| "Latitude must be a number (e.g. 24.8607)".to_string())?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| "Longitude must be a number (e.g. 67.0011)".to_string())?;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90".to_string());
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationData {
    pub city: String,
    pub country_name: String,
}

/// The record persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPreference {
    pub city: City,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_coordinates() {
        let c = Coordinates::parse(" 24.8607", "67.0011 ").unwrap();
        assert_eq!(c.latitude, 24.8607);
        assert_eq!(c.longitude, 67.0011);
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = Coordinates::parse("north", "67").unwrap_err();
        assert!(err.starts_with("Latitude must be a number"));
        let err = Coordinates::parse("24", "").unwrap_err();
        assert!(err.starts_with("Longitude must be a number"));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::parse("91", "0").is_err());
        assert!(Coordinates::parse("0", "-180.5").is_err());
        assert!(Coordinates::parse("NaN", "0").is_err());
    }

    #[test]
    fn saved_preference_uses_nested_city_record() {
        let pref = SavedPreference {
            city: City {
                name: "Karachi".into(),
                country: "PK".into(),
                latitude: 24.8607,
                longitude: 67.0011,
            },
        };
        let json = serde_json::to_value(&pref).unwrap();
        assert_eq!(json["city"]["name"], "Karachi");
        assert_eq!(json["city"]["country"], "PK");
    }
}
