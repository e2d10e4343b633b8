//! Observation records as returned by the SatNOGS API.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One SatNOGS observation.
///
/// Only `id` and `demoddata` drive the pipeline; the rest shows up in
/// progress output when the API provides it. Unknown fields are ignored,
/// and a timestamp that does not parse is dropped rather than failing the
/// whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: u64,

    /// Decoded payloads in API order. Missing or `null` means none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub demoddata: Vec<DemodPayload>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub ground_station: Option<u64>,

    #[serde(default)]
    pub norad_cat_id: Option<u64>,

    #[serde(default)]
    pub transmitter_mode: Option<String>,
}

impl Observation {
    /// Observation with only the fields the pipeline needs.
    pub fn new(id: u64, demoddata: Vec<DemodPayload>) -> Self {
        Self {
            id,
            demoddata,
            start: None,
            end: None,
            ground_station: None,
            norad_cat_id: None,
            transmitter_mode: None,
        }
    }

    /// Id plus whatever details the API supplied, for progress lines.
    ///
    /// `10123456 (SSTV, satellite 25544, station 2433, 2024-10-05 10:12 UTC)`
    pub fn describe(&self) -> String {
        let mut details = Vec::new();
        if let Some(ref mode) = self.transmitter_mode {
            details.push(mode.clone());
        }
        if let Some(id) = self.norad_cat_id {
            details.push(format!("satellite {}", id));
        }
        if let Some(id) = self.ground_station {
            details.push(format!("station {}", id));
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => details.push(format!(
                "{} to {} UTC",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%H:%M")
            )),
            (Some(start), None) => {
                details.push(format!("{} UTC", start.format("%Y-%m-%d %H:%M")))
            }
            _ => {}
        }

        if details.is_empty() {
            self.id.to_string()
        } else {
            format!("{} ({})", self.id, details.join(", "))
        }
    }

    /// Whether the observation has any decoded payloads.
    pub fn has_payloads(&self) -> bool {
        !self.demoddata.is_empty()
    }
}

/// Reference to one decoded payload (an image for SSTV).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemodPayload {
    /// URL of the decoded file.
    pub payload_demod: String,
}

impl DemodPayload {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            payload_demod: url.into(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// A payload saved to disk, waiting for classification.
///
/// Not `Clone`: curating an image consumes it, so each download is
/// classified exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct DownloadedImage {
    /// Observation the payload belongs to.
    pub observation_id: u64,
    /// Source URL.
    pub url: String,
    /// Where the bytes were written.
    pub path: PathBuf,
    /// Number of bytes written.
    pub size_bytes: usize,
}
