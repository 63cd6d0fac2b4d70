/// Data layer: city registry, trip types, loading, and filtering.
///
/// Architecture:
/// ```text
///  <data_dir>/chicago.csv  (or .parquet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ TripDataset  │  Vec<Trip>, source column names
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep trips matching the month/day Selection
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod registry;
