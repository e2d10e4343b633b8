//! Download, classify and dispose of observation payloads.
//!
//! ```text
//! fetch observations
//!     └── for each observation
//!         └── for each payload (API order)
//!             ├── download_image       → DownloadedImage | DownloadError (skip)
//!             └── classify_and_curate  → STATIC (delete) | CONTENT (keep)
//! ```
//!
//! Everything runs sequentially on the calling thread. A failed download
//! is logged and skipped; only a failed observation fetch ends the run.

mod files;
mod summary;

pub use files::{payload_dir, payload_file_name};
pub use summary::{CuratedImage, Disposition, PayloadOutcome, PayloadRecord, RunSummary};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::classify::{self, ImageScore};
use crate::config::Settings;
use crate::logging::{MessagePrefix, RunLogger};
use crate::models::{Classification, DownloadedImage, Observation, ObservationQuery};
use crate::network::{DownloadError, DownloadResult, NetworkResult, ObservationApi};

/// Knobs for a curation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratorOptions {
    /// Working directory for downloads.
    pub image_dir: PathBuf,
    /// Laplacian variance at or below which an image is static.
    pub threshold: f64,
    /// Save payloads under `<image_dir>/<observation_id>/`.
    pub group_by_observation: bool,
}

impl CuratorOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            image_dir: PathBuf::from(&settings.paths.image_dir),
            threshold: settings.classifier.threshold,
            group_by_observation: settings.paths.group_by_observation,
        }
    }
}

impl Default for CuratorOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Drives the fetch → download → classify → dispose pipeline.
pub struct Curator<'a, A: ObservationApi + ?Sized> {
    api: &'a A,
    options: CuratorOptions,
    logger: Arc<RunLogger>,
}

impl<'a, A: ObservationApi + ?Sized> Curator<'a, A> {
    pub fn new(api: &'a A, options: CuratorOptions, logger: Arc<RunLogger>) -> Self {
        Self {
            api,
            options,
            logger,
        }
    }

    /// Fetch observations for `query` and process every payload.
    ///
    /// A fetch failure is logged and returned; nothing is downloaded.
    pub fn run(&self, query: &ObservationQuery) -> NetworkResult<RunSummary> {
        self.logger.phase("Fetch");
        let observations = match self.api.fetch_observations(query) {
            Ok(observations) => observations,
            Err(e) => {
                self.logger.error(&e.to_string());
                return Err(e);
            }
        };
        self.logger
            .info(&format!("Found {} observations", observations.len()));

        self.logger.phase("Curate");
        let summary = self.process_observations(&observations);
        self.logger.success(&summary.to_string());
        Ok(summary)
    }

    /// Download and curate every payload of every observation, in order.
    pub fn process_observations(&self, observations: &[Observation]) -> RunSummary {
        let mut summary = RunSummary {
            observations: observations.len(),
            ..RunSummary::default()
        };

        for observation in observations {
            self.logger
                .info(&format!("Processing observation {}...", observation.describe()));

            if !observation.has_payloads() {
                self.logger.debug(&format!(
                    "Observation {} has no decoded data",
                    observation.id
                ));
                continue;
            }

            for payload in &observation.demoddata {
                let url = &payload.payload_demod;
                let outcome = match self.download_image(observation.id, url) {
                    Ok(image) => PayloadOutcome::Curated(self.classify_and_curate(image)),
                    Err(e) => {
                        self.logger.error(&e.to_string());
                        PayloadOutcome::DownloadFailed(e.to_string())
                    }
                };

                summary.push(PayloadRecord {
                    observation_id: observation.id,
                    url: url.clone(),
                    outcome,
                });
            }
        }

        summary
    }

    /// Download `url` into the working directory.
    ///
    /// The file is named after the URL's final path segment. In the flat
    /// layout an existing file with that name is overwritten.
    pub fn download_image(&self, observation_id: u64, url: &str) -> DownloadResult<DownloadedImage> {
        let file_name = payload_file_name(url)?;
        let dir = payload_dir(
            &self.options.image_dir,
            observation_id,
            self.options.group_by_observation,
        );

        let bytes = self.api.fetch_payload(url)?;

        fs::create_dir_all(&dir).map_err(|e| DownloadError::io(&dir, e))?;
        let path = dir.join(file_name);
        if let Err(e) = fs::write(&path, &bytes) {
            // Never leave a truncated payload behind
            let _ = fs::remove_file(&path);
            return Err(DownloadError::io(&path, e));
        }

        self.logger
            .info(&format!("Downloaded image: {}", path.display()));

        Ok(DownloadedImage {
            observation_id,
            url: url.to_string(),
            path,
            size_bytes: bytes.len(),
        })
    }

    /// Classify a downloaded image and delete it if it is static.
    ///
    /// Consumes the image: once this returns, the file has either been
    /// removed or deliberately kept.
    pub fn classify_and_curate(&self, image: DownloadedImage) -> CuratedImage {
        let (score, classification) = classify::classify_file(&image.path, self.options.threshold);
        let path = image.path;

        match score {
            ImageScore::Variance(v) => self.logger.debug(&format!(
                "Variance of Laplacian for {}: {}",
                path.display(),
                v
            )),
            ImageScore::Undecodable => self
                .logger
                .warn(&format!("Error loading image {}", path.display())),
        }
        debug!(path = %path.display(), %score, %classification, "Classified image");

        let disposition = match classification {
            Classification::Content => {
                self.logger.tagged(
                    MessagePrefix::Content,
                    &format!("Image {} contains content (image).", path.display()),
                );
                Disposition::Retained
            }
            Classification::Static => {
                self.logger.tagged(
                    MessagePrefix::Static,
                    &format!("Image {} appears to be static (noise).", path.display()),
                );
                remove_static(&path, &self.logger)
            }
        };

        CuratedImage {
            path,
            score,
            classification,
            disposition,
        }
    }
}

fn remove_static(path: &Path, logger: &RunLogger) -> Disposition {
    match fs::remove_file(path) {
        Ok(()) => Disposition::Deleted,
        // Already gone counts as deleted
        Err(e) if e.kind() == io::ErrorKind::NotFound => Disposition::Deleted,
        Err(e) => {
            logger.error(&format!("Failed to delete {}: {}", path.display(), e));
            Disposition::DeleteFailed(e.to_string())
        }
    }
}
