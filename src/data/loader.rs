use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::filter::{self, Selection};
use super::model::{DataError, Trip, TripDataset, parse_timestamp};
use super::registry::DataFormat;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 2] = [START_TIME, TRIP_DURATION];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the `format` export for `selection.city` from `data_dir` and narrow
/// it to the selected month/day.
pub fn load(data_dir: &Path, format: DataFormat, selection: &Selection) -> Result<TripDataset> {
    let path = data_dir.join(selection.city.file_name(format));
    let dataset = load_file(&path).with_context(|| {
        format!(
            "failed to load {} data from {}",
            selection.city,
            path.display()
        )
    })?;
    log::info!(
        "Loaded {} trips ({} columns) from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );

    let filtered = filter::apply(dataset, selection);
    if filtered.is_empty() {
        log::warn!("No trips match {selection:?}");
    } else {
        log::info!("{} trips match {selection:?}", filtered.len());
    }
    Ok(filtered)
}

/// Load a trip file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one trip per line (the bundled city files)
/// * `.parquet` – the same columns exported to Parquet
pub fn load_file(path: &Path) -> Result<TripDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Raw row shared by both readers
// ---------------------------------------------------------------------------

/// A row as it appears in the file, before timestamps are parsed.
/// Every field is optional here; [`RawTrip::into_trip`] enforces the
/// required ones.
#[derive(Debug, Default, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(
        rename = "Trip Duration",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(
        rename = "Birth Year",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    birth_year: Option<f64>,
}

impl RawTrip {
    /// `row` is the 1-based data row, used in error messages.
    fn into_trip(self, row: usize) -> Result<Trip, DataError> {
        let start_text = self.start_time.unwrap_or_default();
        let start_time = parse_timestamp(&start_text).ok_or_else(|| DataError::BadTimestamp {
            row,
            value: start_text.clone(),
        })?;

        let end_time = match self.end_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_timestamp(text).ok_or_else(|| DataError::BadTimestamp {
                row,
                value: text.to_string(),
            })?),
        };

        let duration_secs = self
            .trip_duration
            .filter(|d| d.is_finite())
            .ok_or(DataError::BadDuration { row })?;

        Ok(Trip {
            start_time,
            end_time,
            start_station: non_blank(self.start_station),
            end_station: non_blank(self.end_station),
            duration_secs,
            user_type: non_blank(self.user_type),
            gender: non_blank(self.gender),
            birth_year: self.birth_year.filter(|y| y.is_finite()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn check_required(columns: &[String]) -> Result<(), DataError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(DataError::MissingColumn(required));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one trip per line.
/// Columns not listed in [`RawTrip`] (e.g. an unnamed index column) are ignored.
fn load_csv(path: &Path) -> Result<TripDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();
    check_required(&headers)?;

    let mut trips = Vec::new();
    for (row_no, result) in reader.deserialize::<RawTrip>().enumerate() {
        let row = row_no + 1;
        let raw = result.with_context(|| format!("CSV row {row}"))?;
        trips.push(raw.into_trip(row)?);
    }

    Ok(TripDataset::new(trips, headers))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of a city file.
///
/// Column names match the CSV header.  Timestamps may be stored either as
/// text or as Arrow timestamps; numeric columns may be any integer or float
/// type.  Everything is cast to `Utf8` / `Float64` before reading.
fn load_parquet(path: &Path) -> Result<TripDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required(&column_names)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut trips = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let start_time = cast_column(&batch, START_TIME, &DataType::Utf8)?;
        let end_time = cast_column(&batch, END_TIME, &DataType::Utf8)?;
        let duration = cast_column(&batch, TRIP_DURATION, &DataType::Float64)?;
        let start_station = cast_column(&batch, START_STATION, &DataType::Utf8)?;
        let end_station = cast_column(&batch, END_STATION, &DataType::Utf8)?;
        let user_type = cast_column(&batch, USER_TYPE, &DataType::Utf8)?;
        let gender = cast_column(&batch, GENDER, &DataType::Utf8)?;
        let birth_year = cast_column(&batch, BIRTH_YEAR, &DataType::Float64)?;

        for i in 0..batch.num_rows() {
            let raw = RawTrip {
                start_time: text_at(start_time.as_ref(), i),
                end_time: text_at(end_time.as_ref(), i),
                trip_duration: float_at(duration.as_ref(), i),
                start_station: text_at(start_station.as_ref(), i),
                end_station: text_at(end_station.as_ref(), i),
                user_type: text_at(user_type.as_ref(), i),
                gender: text_at(gender.as_ref(), i),
                birth_year: float_at(birth_year.as_ref(), i),
            };
            let row = trips.len() + 1;
            trips.push(raw.into_trip(row)?);
        }
    }

    Ok(TripDataset::new(trips, column_names))
}

// -- Arrow helpers --

/// Cast a named column to `to`, or `None` if the batch lacks it.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(name) else {
        return Ok(None);
    };
    let cast = arrow::compute::cast(batch.column(idx), to)
        .with_context(|| format!("converting column '{name}' to {to}"))?;
    Ok(Some(cast))
}

fn text_at(col: Option<&ArrayRef>, row: usize) -> Option<String> {
    let col = col?;
    if col.is_null(row) {
        return None;
    }
    Some(col.as_string::<i32>().value(row).to_string())
}

fn float_at(col: Option<&ArrayRef>, row: usize) -> Option<f64> {
    let col = col?;
    if col.is_null(row) {
        return None;
    }
    Some(col.as_primitive::<Float64Type>().value(row))
}
