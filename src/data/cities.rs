use std::sync::LazyLock;

use crate::models::{City, Country};

pub const COUNTRIES: &[Country] = &[
    Country { name: "India", code: "IN" },
    Country { name: "United States", code: "US" },
    Country { name: "United Kingdom", code: "GB" },
    Country { name: "Canada", code: "CA" },
    Country { name: "Australia", code: "AU" },
    Country { name: "Saudi Arabia", code: "SA" },
    Country { name: "United Arab Emirates", code: "AE" },
    Country { name: "Pakistan", code: "PK" },
    Country { name: "Indonesia", code: "ID" },
    Country { name: "Malaysia", code: "MY" },
    Country { name: "Turkey", code: "TR" },
    Country { name: "Egypt", code: "EG" },
    Country { name: "Nigeria", code: "NG" },
    Country { name: "Bangladesh", code: "BD" },
    Country { name: "Germany", code: "DE" },
    Country { name: "France", code: "FR" },
    Country { name: "South Africa", code: "ZA" },
];

/// (name, country code, latitude, longitude)
const CITY_TABLE: &[(&str, &str, f64, f64)] = &[
    ("Kozhikode", "IN", 11.2588, 75.7804),
    ("Kochi", "IN", 9.9312, 76.2673),
    ("Delhi", "IN", 28.7041, 77.1025),
    ("Mumbai", "IN", 19.0760, 72.8777),
    ("Bengaluru", "IN", 12.9716, 77.5946),
    ("Chennai", "IN", 13.0827, 80.2707),
    ("Hyderabad", "IN", 17.3850, 78.4867),
    ("Kolkata", "IN", 22.5726, 88.3639),
    ("Thiruvananthapuram", "IN", 8.5241, 76.9366),
    ("Kollam", "IN", 8.8932, 76.6141),
    ("Pathanamthitta", "IN", 9.2648, 76.7870),
    ("Alappuzha", "IN", 9.4981, 76.3388),
    ("Kottayam", "IN", 9.5914, 76.5222),
    ("Idukki", "IN", 9.8459, 76.9742),
    ("Ernakulam", "IN", 9.9816, 76.2996),
    ("Thrissur", "IN", 10.5276, 76.2144),
    ("Palakkad", "IN", 10.7867, 76.6548),
    ("Malappuram", "IN", 11.0736, 76.0741),
    ("Wayanad", "IN", 11.6854, 76.1320),
    ("Kannur", "IN", 11.8745, 75.3704),
    ("Kasaragod", "IN", 12.5089, 74.9877),
    ("New York", "US", 40.7128, -74.0060),
    ("Los Angeles", "US", 34.0522, -118.2437),
    ("Chicago", "US", 41.8781, -87.6298),
    ("Houston", "US", 29.7604, -95.3698),
    ("Dearborn", "US", 42.3223, -83.1763),
    ("London", "GB", 51.5074, -0.1278),
    ("Manchester", "GB", 53.4808, -2.2426),
    ("Birmingham", "GB", 52.4862, -1.8904),
    ("Bradford", "GB", 53.7997, -1.7533),
    ("Toronto", "CA", 43.6532, -79.3832),
    ("Montreal", "CA", 45.5017, -73.5673),
    ("Vancouver", "CA", 49.2827, -123.1207),
    ("Sydney", "AU", -33.8688, 151.2093),
    ("Melbourne", "AU", -37.8136, 144.9631),
    ("Riyadh", "SA", 24.7136, 46.6753),
    ("Jeddah", "SA", 21.4858, 39.1925),
    ("Mecca", "SA", 21.3891, 39.8579),
    ("Medina", "SA", 24.4686, 39.6142),
    ("Dubai", "AE", 25.276987, 55.296249),
    ("Abu Dhabi", "AE", 24.4539, 54.3773),
    ("Sharjah", "AE", 25.3463, 55.4209),
    ("Karachi", "PK", 24.8607, 67.0011),
    ("Lahore", "PK", 31.5204, 74.3587),
    ("Islamabad", "PK", 33.6844, 73.0479),
    ("Jakarta", "ID", -6.2088, 106.8456),
    ("Surabaya", "ID", -7.2575, 112.7521),
    ("Kuala Lumpur", "MY", 3.1390, 101.6869),
    ("Johor Bahru", "MY", 1.4927, 103.7414),
    ("Istanbul", "TR", 41.0082, 28.9784),
    ("Ankara", "TR", 39.9334, 32.8597),
    ("Cairo", "EG", 30.0444, 31.2357),
    ("Alexandria", "EG", 31.2001, 29.9187),
    ("Lagos", "NG", 6.5244, 3.3792),
    ("Kano", "NG", 12.0022, 8.5920),
    ("Dhaka", "BD", 23.8103, 90.4125),
    ("Chittagong", "BD", 22.3569, 91.7832),
    ("Berlin", "DE", 52.5200, 13.4050),
    ("Frankfurt", "DE", 50.1109, 8.6821),
    ("Paris", "FR", 48.8566, 2.3522),
    ("Marseille", "FR", 43.2965, 5.3698),
    ("Cape Town", "ZA", -33.9249, 18.4241),
    ("Johannesburg", "ZA", -26.2041, 28.0473),
];

static CITIES: LazyLock<Vec<City>> = LazyLock::new(|| {
    CITY_TABLE
        .iter()
        .map(|(name, country, latitude, longitude)| City {
            name: name.to_string(),
            country: country.to_string(),
            latitude: *latitude,
            longitude: *longitude,
        })
        .collect()
});

pub fn cities() -> &'static [City] {
    &CITIES
}

pub fn cities_in(country_code: &str) -> Vec<&'static City> {
    cities()
        .iter()
        .filter(|c| c.country.eq_ignore_ascii_case(country_code))
        .collect()
}

/// Exact lookup by name within a country.
pub fn find_city(name: &str, country_code: &str) -> Option<&'static City> {
    cities()
        .iter()
        .find(|c| c.name == name && c.country == country_code)
}

/// Case-insensitive lookup by name across all countries. First match wins.
pub fn find_city_by_name(name: &str) -> Option<&'static City> {
    cities().iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn country_name(code: &str) -> &'static str {
    find_country(code).map(|c| c.name).unwrap_or("Unknown Country")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_belongs_to_a_listed_country() {
        for city in cities() {
            assert!(
                find_country(&city.country).is_some(),
                "{} has unknown country {}",
                city.name,
                city.country
            );
        }
    }

    #[test]
    fn every_country_has_cities() {
        for country in COUNTRIES {
            assert!(!cities_in(country.code).is_empty(), "{} has no cities", country.name);
        }
    }

    #[test]
    fn filters_by_country_code() {
        let pk: Vec<_> = cities_in("PK").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(pk, vec!["Karachi", "Lahore", "Islamabad"]);
        assert_eq!(cities_in("pk").len(), 3);
        assert!(cities_in("ZZ").is_empty());
    }

    #[test]
    fn finds_city_within_country_only() {
        let karachi = find_city("Karachi", "PK").unwrap();
        assert_eq!(karachi.latitude, 24.8607);
        assert_eq!(karachi.longitude, 67.0011);
        assert!(find_city("Karachi", "IN").is_none());
        assert_eq!(find_city_by_name("dubai").unwrap().country, "AE");
    }

    #[test]
    fn coordinates_are_in_range() {
        for city in cities() {
            assert!((-90.0..=90.0).contains(&city.latitude));
            assert!((-180.0..=180.0).contains(&city.longitude));
        }
    }
}
