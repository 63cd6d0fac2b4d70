use std::io::Write;

use anyhow::Result;

use super::counts::{frequency_table, mode, value_counts};
use super::section;
use crate::data::loader::{BIRTH_YEAR, GENDER};
use crate::data::model::TripDataset;
use crate::data::registry::City;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// What the birth-year column yielded for the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthYearSummary {
    /// The city file has no birth-year column.
    Unavailable,
    /// Column present but every value is blank.
    NoValues,
    Summary(BirthYears),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the city file has no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: BirthYearSummary,
}

impl UserStats {
    /// Column availability comes from the dataset header, not from row values.
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let trips = &dataset.trips;

        let user_types = owned(value_counts(trips.iter().filter_map(|t| t.user_type.as_deref())));

        let genders = dataset
            .has_column(GENDER)
            .then(|| owned(value_counts(trips.iter().filter_map(|t| t.gender.as_deref()))));

        let birth_years = if dataset.has_column(BIRTH_YEAR) {
            let years: Vec<i64> = trips
                .iter()
                .filter_map(|t| t.birth_year)
                .map(|y| y as i64)
                .collect();
            match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
                (Some(&earliest), Some(&most_recent), Some(most_common)) => {
                    BirthYearSummary::Summary(BirthYears {
                        earliest,
                        most_recent,
                        most_common,
                    })
                }
                _ => BirthYearSummary::NoValues,
            }
        } else {
            BirthYearSummary::Unavailable
        };

        Some(UserStats {
            user_types,
            genders,
            birth_years,
        })
    }
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts.into_iter().map(|(k, n)| (k.to_string(), n)).collect()
}

/// `city` is only used to name the city in the "not available" notices.
pub fn report<W: Write>(out: &mut W, dataset: &TripDataset, city: City) -> Result<()> {
    section(out, "Calculating User Stats...", dataset, |out, ds| {
        let Some(stats) = UserStats::compute(ds) else {
            return Ok(());
        };

        writeln!(out, "{}", frequency_table("User Type", &stats.user_types)?)?;

        match &stats.genders {
            Some(genders) => writeln!(out, "{}", frequency_table("Gender", genders)?)?,
            None => writeln!(out, "Gender data not available for {city}.")?,
        }

        match stats.birth_years {
            BirthYearSummary::Summary(years) => {
                writeln!(out, "Earliest Birth Year: {}", years.earliest)?;
                writeln!(out, "Most Recent Birth Year: {}", years.most_recent)?;
                writeln!(out, "Most Common Birth Year: {}", years.most_common)?;
            }
            BirthYearSummary::NoValues => {
                writeln!(out, "No birth years recorded for this selection.")?;
            }
            BirthYearSummary::Unavailable => {
                writeln!(out, "Birth Year data not available for {city}.")?;
            }
        }
        Ok(())
    })
}
