//! Time units and time-encoded column labels
//!
//! Impedance and LPR column headers carry the measurement duration, e.g.
//! `imp24h`, `LPR30min` or `imp2days`. The duration is decoded into hours.

use crate::constants::time_units;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `<digits><unit>` with an optional plural `s`, matched after the label prefix
static TIME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(second|month|hour|year|min|day|s|M|h)s?$")
        .expect("time suffix pattern is valid")
});

/// Recognized time units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Number of seconds in one unit (30-day month, 365.25-day year)
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Second => time_units::SECOND,
            TimeUnit::Minute => time_units::MINUTE,
            TimeUnit::Hour => time_units::HOUR,
            TimeUnit::Day => time_units::DAY,
            TimeUnit::Month => time_units::MONTH,
            TimeUnit::Year => time_units::YEAR,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" | "second" => Ok(TimeUnit::Second),
            "M" | "min" => Ok(TimeUnit::Minute),
            "h" | "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            _ => Err(Error::format(format!("Unknown time unit: '{}'", s))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        write!(f, "{}", name)
    }
}

/// Number of seconds a time unit token corresponds to
pub fn time_unit_to_seconds(unit: &str) -> Result<f64> {
    unit.parse::<TimeUnit>().map(|unit| unit.seconds())
}

/// Parse a `<prefix><N><unit>` label and return the number of hours it encodes
pub fn parse_time_label(label: &str, prefix: &str) -> Result<f64> {
    let malformed = || {
        Error::format(format!(
            "Unexpected time label: \"{}\". Should be \"{}\" followed by a number and a time unit",
            label, prefix
        ))
    };

    let suffix = label.strip_prefix(prefix).ok_or_else(malformed)?;
    let captures = TIME_SUFFIX.captures(suffix).ok_or_else(malformed)?;

    let value: f64 = captures[1].parse().map_err(|_| malformed())?;
    let seconds = time_unit_to_seconds(&captures[2])?;

    let hours = value * seconds / time_units::HOUR;
    if !hours.is_finite() {
        return Err(malformed());
    }
    Ok(hours)
}
