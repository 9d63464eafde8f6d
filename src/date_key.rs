//! Canonical calendar day identifiers

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day, written as `YYYY-MM-DD`.
///
/// This is the only key used to join grid cells, calendar events and study tasks.
/// Two keys are equal if and only if they designate the same day, whatever text they were parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    date: NaiveDate,
}

impl DateKey {
    /// Build a key from year, month (1-based) and day, if that day exists
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32  { self.date.year()  }
    pub fn month(&self) -> u32 { self.date.month() }
    pub fn day(&self) -> u32   { self.date.day()   }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    /// Only accepts the canonical form. Timestamps such as `2024-03-01T10:00:00` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)?;
        Ok(Self { date })
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:04}-{:02}-{:02}", self.date.year(), self.date.month(), self.date.day())
    }
}

/// Used to support serde
impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<DateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_zero_padded() {
        let key = DateKey::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(key.to_string(), "2024-03-01");
    }

    #[test]
    fn parsing_normalizes_to_the_same_key() {
        let padded: DateKey = "2024-03-01".parse().unwrap();
        let unpadded: DateKey = "2024-3-1".parse().unwrap();
        assert_eq!(padded, unpadded);
        assert_eq!(unpadded.to_string(), "2024-03-01");
    }

    #[test]
    fn rejects_non_dates() {
        assert!("2024-02-30".parse::<DateKey>().is_err());
        assert!("03/01/2024".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn serde_uses_the_canonical_string() {
        let key = DateKey::from_ymd(2026, 2, 21).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-02-21\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
