//! Where downloaded payloads land on disk.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::network::{DownloadError, DownloadResult};

/// File name for a payload: the URL's final path segment.
///
/// Query strings and fragments are ignored. URLs without a usable final
/// segment (`https://host/`, `.../dir/`) are rejected.
pub fn payload_file_name(url: &str) -> DownloadResult<String> {
    let parsed = Url::parse(url).map_err(|e| DownloadError::invalid_url(url, e.to_string()))?;

    let name = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." {
        return Err(DownloadError::invalid_url(url, "URL has no final path segment"));
    }

    Ok(name.to_string())
}

/// Directory a payload of `observation_id` is saved into.
pub fn payload_dir(image_dir: &Path, observation_id: u64, group_by_observation: bool) -> PathBuf {
    if group_by_observation {
        image_dir.join(observation_id.to_string())
    } else {
        image_dir.to_path_buf()
    }
}
