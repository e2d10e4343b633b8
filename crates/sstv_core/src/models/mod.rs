//! Data models for SSTV Curator.
//!
//! - Enums for observation status and image classification
//! - Observation records and their payload references
//! - The per-run observation query

mod enums;
mod observation;
mod query;

pub use enums::{Classification, ObservationStatus};
pub use observation::{DemodPayload, DownloadedImage, Observation};
pub use query::{parse_date, ObservationQuery, DATE_FORMAT};
