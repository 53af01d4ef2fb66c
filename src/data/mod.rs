//! Reference data bundled with the binary.

pub mod cities;
pub mod methods;

pub use cities::{cities, cities_in, country_name, find_city, find_city_by_name, find_country, COUNTRIES};
pub use methods::method_for_country;
