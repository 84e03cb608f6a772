use std::path::{Path, PathBuf};

use crate::types::{EntityId, Release};

use super::state::{StateError, read_optional, write_atomic};

/// Known releases of one artist, persisted as `<artists_dir>/<artist_id>.json`.
pub struct ReleaseManager {
    path: PathBuf,
    artist_id: EntityId,
    releases: Vec<Release>,
}

impl ReleaseManager {
    pub fn new(artists_dir: &Path, artist_id: EntityId, releases: Option<Vec<Release>>) -> Self {
        Self {
            path: artists_dir.join(format!("{artist_id}.json")),
            artist_id,
            releases: releases.unwrap_or_default(),
        }
    }

    /// Loads the snapshot from disk. A missing file means nothing is known yet.
    pub async fn load_from_cache(&self) -> Result<Self, StateError> {
        let releases = match read_optional(&self.path).await? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };

        Ok(Self {
            path: self.path.clone(),
            artist_id: self.artist_id,
            releases,
        })
    }

    pub async fn save_to_cache(&self) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(&self.releases)?;
        write_atomic(&self.path, json.as_bytes()).await
    }

    /// Replaces the snapshot with the given releases.
    pub fn set_releases(&mut self, releases: Vec<Release>) -> &mut Self {
        self.releases = releases;
        self
    }

    pub fn get_releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn artist_id(&self) -> EntityId {
        self.artist_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
