//! Observation fetching and payload download.
//!
//! `ObservationApi` is the seam between the curator and the network; the
//! production implementation is `SatnogsClient`.

mod client;
mod errors;

pub use client::{parse_observations, SatnogsClient};
pub use errors::{DownloadError, DownloadResult, NetworkError, NetworkResult};

use crate::models::{Observation, ObservationQuery};

/// Read access to the SatNOGS network.
pub trait ObservationApi {
    /// Fetch observations matching `query`, in API order.
    ///
    /// Any non-success status or transport failure is an error; there is
    /// no retry and no pagination beyond `query.limit`.
    fn fetch_observations(&self, query: &ObservationQuery) -> NetworkResult<Vec<Observation>>;

    /// Fetch the raw bytes of one payload.
    fn fetch_payload(&self, url: &str) -> DownloadResult<Vec<u8>>;
}
