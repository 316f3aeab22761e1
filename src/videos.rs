//! In-memory index over the static video list.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::countries::normalize_country_name;
use crate::data::VideoRecord;

/// Errors that can occur while loading the video list
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("failed to read video list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid video list: {0}")]
    Json(#[from] serde_json::Error),
}

/// The video records plus the set of normalized country names that have any.
#[derive(Debug, Default)]
pub struct VideoIndex {
    videos: Vec<VideoRecord>,
    countries: HashSet<String>,
}

impl VideoIndex {
    pub fn new(videos: Vec<VideoRecord>) -> Self {
        let countries = videos
            .iter()
            .flat_map(|video| video.countries.iter())
            .map(|country| normalize_country_name(country).to_string())
            .collect();
        Self { videos, countries }
    }

    pub fn from_json(json: &str) -> Result<Self, VideoError> {
        let videos: Vec<VideoRecord> = serde_json::from_str(json)?;
        Ok(Self::new(videos))
    }

    pub fn load(path: &Path) -> Result<Self, VideoError> {
        let json = std::fs::read_to_string(path)?;
        let index = Self::from_json(&json)?;
        debug!(
            "Loaded {} videos tagged with {} countries from {}",
            index.len(),
            index.countries.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn has_videos(&self, country: &str) -> bool {
        self.countries.contains(country)
    }

    /// Every video tagged with `selected`, in dataset order.
    ///
    /// Tags are normalized before comparison; `None` yields nothing.
    pub fn lookup(&self, selected: Option<&str>) -> Vec<&VideoRecord> {
        let Some(selected) = selected else {
            return Vec::new();
        };
        self.videos
            .iter()
            .filter(|video| {
                video
                    .countries
                    .iter()
                    .any(|country| normalize_country_name(country) == selected)
            })
            .collect()
    }
}
