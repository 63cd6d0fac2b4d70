use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

/// Count occurrences of each value, most frequent first.
///
/// Equal counts are ordered by the value itself (ascending), which is also
/// what makes [`mode`] deterministic.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut sorted: Vec<(K, usize)> = counts.into_iter().collect();
    // stable: keys stay ascending within a count
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Most frequent value; ties go to the smallest value.  `None` when empty.
pub fn mode<K, I>(values: I) -> Option<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    value_counts(values).into_iter().next().map(|(k, _)| k)
}

/// Render `(value, count)` pairs as a two-column text table.
pub fn frequency_table(label: &str, counts: &[(String, usize)]) -> Result<String> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(label, DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
    ]));
    let values = StringArray::from_iter_values(counts.iter().map(|(v, _)| v.as_str()));
    let totals = UInt64Array::from_iter_values(counts.iter().map(|(_, n)| *n as u64));

    let batch = RecordBatch::try_new(schema, vec![Arc::new(values), Arc::new(totals)])
        .context("building frequency table")?;
    let table = pretty_format_batches(&[batch]).context("formatting frequency table")?;
    Ok(table.to_string())
}
