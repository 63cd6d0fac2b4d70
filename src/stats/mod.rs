/// Descriptive statistics over a filtered trip table.
///
/// Every reporter follows the same shape: a pure `compute` that returns
/// `None` for an empty table, and a `report` that prints the result inside a
/// timed [`section`].
pub mod counts;
pub mod duration;
pub mod station;
pub mod time;
pub mod user;

use std::io::Write;
use std::time::Instant;

use anyhow::Result;

use crate::data::model::TripDataset;

/// Printed by every reporter when the selection matched no trips.
pub const NO_TRIPS: &str = "No trips match this selection.";

/// Print `heading`, run `body` (or the empty-table notice), then the elapsed
/// time and a separator rule.
pub fn section<W, F>(out: &mut W, heading: &str, dataset: &TripDataset, body: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &TripDataset) -> Result<()>,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();

    if dataset.is_empty() {
        writeln!(out, "{NO_TRIPS}")?;
    } else {
        body(out, dataset)?;
    }

    writeln!(out, "\nThis took {:.6} seconds.", started.elapsed().as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(60))?;
    Ok(())
}
