use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 6] = [
        PrayerName::Fajr,
        PrayerName::Sunrise,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }

    /// Sunrise marks the end of Fajr; nobody prays it.
    pub fn is_informational(&self) -> bool {
        matches!(self, PrayerName::Sunrise)
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerName::Fajr),
            "sunrise" | "shuruq" => Ok(PrayerName::Sunrise),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer name: {}", s)),
        }
    }
}

/// One day's six clock times. There is no date component: callers deal
/// with rollover past Isha themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerTimes {
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimes {
    pub fn get(&self, name: PrayerName) -> NaiveTime {
        match name {
            PrayerName::Fajr => self.fajr,
            PrayerName::Sunrise => self.sunrise,
            PrayerName::Dhuhr => self.dhuhr,
            PrayerName::Asr => self.asr,
            PrayerName::Maghrib => self.maghrib,
            PrayerName::Isha => self.isha,
        }
    }

    /// Entries in canonical (not chronological) order.
    pub fn entries(&self) -> [(PrayerName, NaiveTime); 6] {
        PrayerName::ALL.map(|name| (name, self.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("zuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!("ISHA".parse::<PrayerName>().unwrap(), PrayerName::Isha);
        assert!("tahajjud".parse::<PrayerName>().is_err());
    }

    #[test]
    fn entries_follow_canonical_order() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let times = PrayerTimes {
            fajr: t(5, 0),
            sunrise: t(6, 15),
            dhuhr: t(12, 30),
            asr: t(15, 45),
            maghrib: t(18, 20),
            isha: t(19, 40),
        };
        let names: Vec<_> = times.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, PrayerName::ALL.to_vec());
        assert_eq!(times.get(PrayerName::Dhuhr), t(12, 30));
    }
}
