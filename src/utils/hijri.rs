use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

/// Locally computed Hijri date for `date`, shifted by `offset_days`, in the
/// same shape the timings API uses ("14 Ramadan 1447 AH"). Used only when the
/// API response carries no Hijri block.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Option<String> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .ok()?;
    Some(format!(
        "{} {} {} AH",
        hd.day(),
        hijri_month_name(hd.month()),
        hd.year()
    ))
}
