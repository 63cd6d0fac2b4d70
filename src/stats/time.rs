use std::fmt;
use std::io::Write;

use anyhow::Result;
use chrono::Weekday;

use super::counts::mode;
use super::section;
use crate::data::model::{Trip, TripDataset, WEEKDAYS, month_display_name, weekday_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "am"),
            Meridiem::Pm => write!(f, "pm"),
        }
    }
}

/// Convert a 24-hour clock hour to 12-hour form: 0 → 12am, 12 → 12pm.
pub fn time_format(hour: u32) -> (u32, Meridiem) {
    match hour {
        0 => (12, Meridiem::Am),
        1..=11 => (hour, Meridiem::Am),
        13..=23 => (hour - 12, Meridiem::Pm),
        _ => (hour, Meridiem::Pm),
    }
}

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number, 1–12.
    pub month: u32,
    pub weekday: Weekday,
    /// 24-hour clock.
    pub hour: u32,
}

impl TimeStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        let month = mode(trips.iter().map(Trip::month))?;
        // Sunday-first index so weekday ties resolve in prompt order.
        let day_index = mode(trips.iter().map(|t| t.weekday().num_days_from_sunday()))?;
        let hour = mode(trips.iter().map(Trip::hour))?;
        Some(TimeStats {
            month,
            weekday: WEEKDAYS[day_index as usize],
            hour,
        })
    }
}

pub fn report<W: Write>(out: &mut W, dataset: &TripDataset) -> Result<()> {
    section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        dataset,
        |out, ds| {
            let Some(stats) = TimeStats::compute(&ds.trips) else {
                return Ok(());
            };
            let (hour, meridiem) = time_format(stats.hour);
            writeln!(out, "Month --> {}", month_display_name(stats.month).to_uppercase())?;
            writeln!(out, "Day   --> {}", weekday_name(stats.weekday).to_uppercase())?;
            writeln!(out, "Hour  --> {hour}{meridiem}")?;
            Ok(())
        },
    )
}
