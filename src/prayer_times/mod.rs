pub mod countdown;
pub mod status;

pub use countdown::{countdown, seconds_until};
pub use status::{current_and_next, status_at, PrayerStatus};
