use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use thiserror::Error;

/// Placeholder shown wherever a station name is absent from the source row.
pub const MISSING: &str = "<missing>";

// ---------------------------------------------------------------------------
// Month / weekday vocabularies
// ---------------------------------------------------------------------------

/// The months covered by the bundled datasets (January to June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// 1-based month number, as produced by [`Trip::month`].
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_name(name: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn names() -> Vec<&'static str> {
        Month::ALL.iter().map(|m| m.name()).collect()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::registry::title_case(self.name()))
    }
}

/// Weekdays in the order the prompts list them (Sunday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Lowercase full weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS.into_iter().find(|d| weekday_name(*d) == name)
}

pub fn weekday_names() -> Vec<&'static str> {
    WEEKDAYS.iter().map(|d| weekday_name(*d)).collect()
}

/// Full English month name for any month number 1–12.
pub fn month_display_name(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| chrono::Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("month {number}"))
}

// ---------------------------------------------------------------------------
// Errors raised while turning raw rows into trips
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a valid timestamp")]
    BadTimestamp { row: usize, value: String },

    #[error("row {row}: trip duration is missing or not a number")]
    BadDuration { row: usize },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse the start/end time text used by the trip files.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// ---------------------------------------------------------------------------
// Trip – one row of a city dataset
// ---------------------------------------------------------------------------

/// A single bikeshare trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Trip length in seconds.
    pub duration_secs: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    /// Source files store this as a float (`1992.0`).
    pub birth_year: Option<f64>,
}

impl Trip {
    /// Month number (1–12) of the start time.
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    pub fn weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Start hour on the 24-hour clock.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn start_station_label(&self) -> &str {
        self.start_station.as_deref().unwrap_or(MISSING)
    }

    pub fn end_station_label(&self) -> &str {
        self.end_station.as_deref().unwrap_or(MISSING)
    }

    /// Synthetic "start TO end" key used for the most-popular-trip count.
    pub fn journey(&self) -> String {
        format!("{} TO {}", self.start_station_label(), self.end_station_label())
    }
}

// ---------------------------------------------------------------------------
// TripDataset – a loaded (and possibly filtered) city table
// ---------------------------------------------------------------------------

/// Trips plus the header columns of the file they came from.
#[derive(Debug, Clone, Default)]
pub struct TripDataset {
    pub trips: Vec<Trip>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl TripDataset {
    pub fn new(trips: Vec<Trip>, column_names: Vec<String>) -> Self {
        TripDataset {
            trips,
            column_names,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
