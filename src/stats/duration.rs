use std::io::Write;

use anyhow::Result;

use super::section;
use crate::data::model::{Trip, TripDataset};

/// A whole-second span split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn from_seconds(total: u64) -> Self {
        let (minutes, seconds) = (total / 60, total % 60);
        Hms {
            hours: minutes / 60,
            minutes: minutes % 60,
            seconds,
        }
    }
}

/// Total and mean trip length, rounded to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    pub total_secs: u64,
    pub mean_secs: u64,
}

impl DurationStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        if trips.is_empty() {
            return None;
        }
        let total: f64 = trips.iter().map(|t| t.duration_secs).sum();
        let mean = total / trips.len() as f64;
        Some(DurationStats {
            total_secs: whole_seconds(total),
            mean_secs: whole_seconds(mean),
        })
    }
}

/// Round half to even; negative spans clamp to zero.
fn whole_seconds(secs: f64) -> u64 {
    secs.round_ties_even().max(0.0) as u64
}

pub fn format_total(total_secs: u64) -> String {
    let hms = Hms::from_seconds(total_secs);
    format!(
        "{} hours, {} minutes and {} seconds",
        hms.hours, hms.minutes, hms.seconds
    )
}

/// Minutes and seconds, switching to hours once the mean passes an hour
/// by more than a minute (total minutes > 60).
pub fn format_mean(mean_secs: u64) -> String {
    let (minutes, seconds) = (mean_secs / 60, mean_secs % 60);
    if minutes > 60 {
        format!(
            "{} hours, {} minutes and {} seconds",
            minutes / 60,
            minutes % 60,
            seconds
        )
    } else {
        format!("{minutes} minutes and {seconds} seconds")
    }
}

pub fn report<W: Write>(out: &mut W, dataset: &TripDataset) -> Result<()> {
    section(out, "Calculating Trip Duration...", dataset, |out, ds| {
        if let Some(stats) = DurationStats::compute(&ds.trips) {
            writeln!(out, "Total trip duration --> {}.", format_total(stats.total_secs))?;
            writeln!(out, "Average trip duration --> {}.", format_mean(stats.mean_secs))?;
        }
        Ok(())
    })
}
