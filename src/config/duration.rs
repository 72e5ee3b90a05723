//! Serde helper for timeouts written as "250ms", "5s", "2m", "1h" or a bare
//! number of seconds. Missing, null and empty values mean zero.

use std::time::Duration;

use serde::{Deserialize, Deserializer, de::Error as _};
use thiserror::Error;

/// Unit suffixes and their length in seconds. Longer suffixes first.
const UNITS: [(&str, f64); 5] = [("ms", 1e-3), ("s", 1.0), ("m", 60.0), ("h", 3600.0), ("", 1.0)];

#[derive(Debug, Error, PartialEq)]
pub enum DurationError {
    #[error("invalid duration number: {0:?}")]
    Number(String),

    #[error("unknown duration unit in {0:?}")]
    Unit(String),

    #[error("duration out of range: {0:?}")]
    OutOfRange(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDuration>::deserialize(deserializer)? {
        None => Ok(Duration::ZERO),
        Some(RawDuration::Seconds(secs)) => seconds(secs, &secs.to_string()).map_err(D::Error::custom),
        Some(RawDuration::Text(text)) => parse_duration(&text).map_err(D::Error::custom),
    }
}

/// Parses "<number><unit>"; a bare number is read as seconds.
pub(crate) fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Duration::ZERO);
    }

    let (number, scale) = UNITS
        .iter()
        .find_map(|(suffix, scale)| text.strip_suffix(suffix).map(|number| (number.trim_end(), *scale)))
        .ok_or_else(|| DurationError::Unit(text.to_string()))?;

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return match number.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => Err(DurationError::Unit(text.to_string())),
            _ => Err(DurationError::Number(text.to_string())),
        };
    }

    let value: f64 = number
        .parse()
        .map_err(|_| DurationError::Number(text.to_string()))?;
    seconds(value * scale, text)
}

fn seconds(secs: f64, text: &str) -> Result<Duration, DurationError> {
    Duration::try_from_secs_f64(secs).map_err(|_| DurationError::OutOfRange(text.to_string()))
}
