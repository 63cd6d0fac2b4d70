use chrono::Weekday;

use super::model::{Month, Trip, TripDataset};
use super::registry::City;

// ---------------------------------------------------------------------------
// Selection: which city, and which month/day (None = all)
// ---------------------------------------------------------------------------

/// The user's filter choice for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl Selection {
    /// Selection covering every trip of `city`.
    pub fn all(city: City) -> Self {
        Selection {
            city,
            month: None,
            day: None,
        }
    }

    /// Whether a trip passes both the month and the day constraint.
    ///
    /// * No month selected → any month passes
    /// * No day selected → any weekday passes
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(month) = self.month {
            if trip.month() != month.number() {
                return false;
            }
        }
        if let Some(day) = self.day {
            if trip.weekday() != day {
                return false;
            }
        }
        true
    }
}

/// Narrow a loaded dataset to the trips matching `selection`.
/// Column names are kept so optional-column checks still see the source header.
pub fn apply(mut dataset: TripDataset, selection: &Selection) -> TripDataset {
    dataset.trips.retain(|trip| selection.matches(trip));
    dataset
}
