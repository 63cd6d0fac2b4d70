//! Explore US bikeshare trip data from the terminal.
//!
//! ```text
//!  collect_filters ──► loader::load ──► stats::{time, station, duration, user}
//!        ▲                                              │
//!        └──────────────── restart? ◄───────────────────┘
//! ```

pub mod config;
pub mod data;
pub mod session;
pub mod stats;
pub mod suggest;
pub mod ui;
pub mod validate;
