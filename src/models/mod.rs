pub mod location;
pub mod method;
pub mod prayer;

pub use location::{City, Coordinates, Country, LocationData, SavedPreference};
pub use method::{CalculationMethod, METHOD_LABELS};
pub use prayer::{PrayerName, PrayerTimes};
