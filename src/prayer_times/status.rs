use chrono::{NaiveTime, Timelike};

use crate::models::{PrayerName, PrayerTimes};

/// Which prayer's window we are in and which one comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerStatus {
    pub current: PrayerName,
    pub next: PrayerName,
}

fn minutes_of(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Entries sorted by minutes since midnight. The sort is stable, so equal
/// times keep their canonical order.
pub fn chronological(times: &PrayerTimes) -> Vec<(PrayerName, u32)> {
    let mut entries: Vec<(PrayerName, u32)> = times
        .entries()
        .iter()
        .map(|(name, t)| (*name, minutes_of(*t)))
        .collect();
    entries.sort_by_key(|(_, mins)| *mins);
    entries
}

/// Current and next prayer at `hour:minute`.
///
/// A prayer whose time equals `now` is current. Before the first time of the
/// day, Isha from the previous evening is current. After the last, next wraps
/// to the first entry (tomorrow). Returns `None` when there are no times yet.
pub fn current_and_next(times: Option<&PrayerTimes>, hour: u32, minute: u32) -> Option<PrayerStatus> {
    let times = times?;
    let now = hour * 60 + minute;
    let sorted = chronological(times);

    let current = sorted
        .iter()
        .rev()
        .find(|(_, mins)| *mins <= now)
        .map(|(name, _)| *name)
        .unwrap_or(PrayerName::Isha);

    let next = sorted
        .iter()
        .find(|(_, mins)| *mins > now)
        .or_else(|| sorted.first())
        .map(|(name, _)| *name)?;

    Some(PrayerStatus { current, next })
}

/// Convenience wrapper taking a wall-clock time.
pub fn status_at(times: Option<&PrayerTimes>, now: NaiveTime) -> Option<PrayerStatus> {
    current_and_next(times, now.hour(), now.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule() -> PrayerTimes {
        PrayerTimes {
            fajr: t(5, 0),
            sunrise: t(6, 15),
            dhuhr: t(12, 30),
            asr: t(15, 45),
            maghrib: t(18, 20),
            isha: t(19, 40),
        }
    }

    fn status(h: u32, m: u32) -> PrayerStatus {
        current_and_next(Some(&schedule()), h, m).unwrap()
    }

    #[test]
    fn absent_times_yield_nothing() {
        assert_eq!(current_and_next(None, 12, 0), None);
    }

    #[test]
    fn after_isha_next_is_tomorrows_fajr() {
        let s = status(20, 0);
        assert_eq!(s.current, PrayerName::Isha);
        assert_eq!(s.next, PrayerName::Fajr);
    }

    #[test]
    fn before_fajr_current_is_yesterdays_isha() {
        let s = status(4, 30);
        assert_eq!(s.current, PrayerName::Isha);
        assert_eq!(s.next, PrayerName::Fajr);
    }

    #[test]
    fn lower_bound_is_inclusive() {
        let s = status(12, 30);
        assert_eq!(s.current, PrayerName::Dhuhr);
        assert_eq!(s.next, PrayerName::Asr);

        let s = status(12, 29);
        assert_eq!(s.current, PrayerName::Sunrise);
        assert_eq!(s.next, PrayerName::Dhuhr);
    }

    #[test]
    fn sunrise_takes_part_in_the_sequence() {
        let s = status(6, 30);
        assert_eq!(s.current, PrayerName::Sunrise);
        assert_eq!(s.next, PrayerName::Dhuhr);
    }

    #[test]
    fn midnight_and_last_minute() {
        assert_eq!(status(0, 0).current, PrayerName::Isha);
        assert_eq!(status(23, 59).next, PrayerName::Fajr);
    }

    #[test]
    fn chronological_order_is_total_and_sorted() {
        let sorted = chronological(&schedule());
        assert_eq!(sorted.len(), 6);
        assert!(sorted.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn equal_times_keep_canonical_order() {
        let mut times = schedule();
        times.maghrib = t(19, 40);
        let sorted = chronological(&times);
        let tail: Vec<_> = sorted[4..].iter().map(|(n, _)| *n).collect();
        assert_eq!(tail, vec![PrayerName::Maghrib, PrayerName::Isha]);

        let s = current_and_next(Some(&times), 19, 40).unwrap();
        assert_eq!(s.current, PrayerName::Isha);
        assert_eq!(s.next, PrayerName::Fajr);
    }

    #[test]
    fn all_equal_times_do_not_panic() {
        let same = t(12, 0);
        let times = PrayerTimes {
            fajr: same,
            sunrise: same,
            dhuhr: same,
            asr: same,
            maghrib: same,
            isha: same,
        };
        let s = current_and_next(Some(&times), 11, 0).unwrap();
        assert_eq!(s.current, PrayerName::Isha);
        assert_eq!(s.next, PrayerName::Fajr);
    }

    #[test]
    fn unusual_order_is_sorted_by_time() {
        // High-latitude summer: Isha after midnight.
        let mut times = schedule();
        times.isha = t(0, 45);
        let s = current_and_next(Some(&times), 0, 50).unwrap();
        assert_eq!(s.current, PrayerName::Isha);
        assert_eq!(s.next, PrayerName::Fajr);
        let s = current_and_next(Some(&times), 23, 0).unwrap();
        assert_eq!(s.current, PrayerName::Maghrib);
        assert_eq!(s.next, PrayerName::Isha);
    }

    #[test]
    fn status_at_ignores_seconds() {
        let now = NaiveTime::from_hms_opt(12, 29, 50).unwrap();
        let s = status_at(Some(&schedule()), now).unwrap();
        assert_eq!(s.next, PrayerName::Dhuhr);
    }
}
