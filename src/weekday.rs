//! Weekday tokens used by calendar configuration: `m, t, w, th, f, s, su`.

use crate::error::CalendarError;
use chrono::Weekday;

/// Parse a single weekday token (case-insensitive, surrounding whitespace ignored).
pub fn parse_weekday(token: &str) -> Result<Weekday, CalendarError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "m" => Ok(Weekday::Mon),
        "t" => Ok(Weekday::Tue),
        "w" => Ok(Weekday::Wed),
        "th" => Ok(Weekday::Thu),
        "f" => Ok(Weekday::Fri),
        "s" => Ok(Weekday::Sat),
        "su" => Ok(Weekday::Sun),
        _ => Err(CalendarError::InvalidWeekday(token.to_string())),
    }
}

/// Parse a comma-separated token list such as `"m, t, w"`. Empty items are skipped.
pub fn parse_workdays(list: &str) -> Result<Vec<Weekday>, CalendarError> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(parse_weekday)
        .collect()
}

pub fn weekday_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "m",
        Weekday::Tue => "t",
        Weekday::Wed => "w",
        Weekday::Thu => "th",
        Weekday::Fri => "f",
        Weekday::Sat => "s",
        Weekday::Sun => "su",
    }
}

/// Serde adapter for `Vec<Weekday>` fields written as token lists.
pub mod tokens {
    use super::{parse_weekday, weekday_token};
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(days.iter().map(|d| weekday_token(*d)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<String> = Vec::deserialize(deserializer)?;
        raw.iter()
            .map(|token| parse_weekday(token).map_err(D::Error::custom))
            .collect()
    }
}

/// Same as [`tokens`], for optional overrides.
pub mod option_tokens {
    use super::{parse_weekday, weekday_token};
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(days: &Option<Vec<Weekday>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match days {
            Some(days) => serializer.collect_seq(days.iter().map(|d| weekday_token(*d))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Weekday>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
        raw.map(|tokens| {
            tokens
                .iter()
                .map(|token| parse_weekday(token).map_err(D::Error::custom))
                .collect()
        })
        .transpose()
    }
}
