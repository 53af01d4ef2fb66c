use chrono::{Days, NaiveDateTime, NaiveTime};

/// Seconds from `now` until the next occurrence of `target`.
///
/// If `target` today is not after `now`, it is tomorrow's occurrence.
pub fn seconds_until(target: NaiveTime, now: NaiveDateTime) -> i64 {
    let mut at = now.date().and_time(target);
    if at <= now {
        at = at.checked_add_days(Days::new(1)).unwrap_or(at);
    }
    (at - now).num_seconds().max(0)
}

/// `HH:MM:SS` until the next occurrence of `target`.
pub fn countdown(target: NaiveTime, now: NaiveDateTime) -> String {
    format_hms(seconds_until(target, now))
}

pub fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn ten_seconds_before_dhuhr() {
        assert_eq!(countdown(hm(12, 30), at(12, 29, 50)), "00:00:10");
    }

    #[test]
    fn target_equal_to_now_rolls_to_tomorrow() {
        assert_eq!(countdown(hm(12, 30), at(12, 30, 0)), "24:00:00");
    }

    #[test]
    fn after_isha_counts_to_tomorrows_fajr() {
        // 20:00 → 05:00 next day
        assert_eq!(seconds_until(hm(5, 0), at(20, 0, 0)), 9 * 3600);
        assert_eq!(countdown(hm(5, 0), at(20, 0, 0)), "09:00:00");
    }

    #[test]
    fn before_fajr_counts_to_today() {
        assert_eq!(countdown(hm(5, 0), at(4, 30, 0)), "00:30:00");
    }

    #[test]
    fn crosses_month_end() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(countdown(hm(0, 0), now), "00:00:01");
    }

    #[test]
    fn formats_padded_fields() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3_661), "01:01:01");
        assert_eq!(format_hms(-5), "00:00:00");
    }
}
