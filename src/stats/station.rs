use std::io::Write;

use anyhow::Result;

use super::counts::mode;
use super::section;
use crate::data::model::{Trip, TripDataset};

/// Most popular start station, end station and start→end journey.
/// Missing names count as [`crate::data::model::MISSING`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub journey: String,
}

impl StationStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        let start_station = mode(trips.iter().map(Trip::start_station_label))?.to_string();
        let end_station = mode(trips.iter().map(Trip::end_station_label))?.to_string();
        let journey = mode(trips.iter().map(Trip::journey))?;
        Some(StationStats {
            start_station,
            end_station,
            journey,
        })
    }
}

pub fn report<W: Write>(out: &mut W, dataset: &TripDataset) -> Result<()> {
    section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        dataset,
        |out, ds| {
            if let Some(stats) = StationStats::compute(&ds.trips) {
                writeln!(out, "Start station --> {}", stats.start_station)?;
                writeln!(out, "End Station   --> {}", stats.end_station)?;
                writeln!(out, "Popular Trip  --> {}.", stats.journey)?;
            }
            Ok(())
        },
    )
}
