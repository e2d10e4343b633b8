//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Vetting status of a SatNOGS observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    /// Vetted with useful data.
    #[default]
    Good,
    /// Vetted without useful data.
    Bad,
    /// Not yet vetted.
    Unknown,
    /// Observation did not run.
    Failed,
    /// Scheduled, not yet observed.
    Future,
}

impl ObservationStatus {
    /// Value used by the API's `status` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationStatus::Good => "good",
            ObservationStatus::Bad => "bad",
            ObservationStatus::Unknown => "unknown",
            ObservationStatus::Failed => "failed",
            ObservationStatus::Future => "future",
        }
    }
}

impl std::fmt::Display for ObservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "good" => Ok(ObservationStatus::Good),
            "bad" => Ok(ObservationStatus::Bad),
            "unknown" => Ok(ObservationStatus::Unknown),
            "failed" => Ok(ObservationStatus::Failed),
            "future" => Ok(ObservationStatus::Future),
            other => Err(format!(
                "unknown status '{}' (expected good, bad, unknown, failed or future)",
                other
            )),
        }
    }
}

/// Verdict for a downloaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Noise or an undecodable file. Deleted.
    Static,
    /// Real picture content. Kept.
    Content,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Static => write!(f, "static"),
            Classification::Content => write!(f, "content"),
        }
    }
}
