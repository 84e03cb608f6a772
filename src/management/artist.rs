use std::path::{Path, PathBuf};

use crate::types::Artist;

use super::state::{StateError, read_optional, write_atomic};

pub const FOLLOWED_ARTISTS_FILE: &str = "followed_artists.json";

/// Local copy of the followed-artist list.
///
/// Only a cache for reporting; the remote list is fetched on every run and
/// is the one that drives the sync.
pub struct FollowedArtistsManager {
    path: PathBuf,
    artists: Vec<Artist>,
}

impl FollowedArtistsManager {
    pub fn new(state_dir: &Path, artists: Option<Vec<Artist>>) -> Self {
        Self {
            path: state_dir.join(FOLLOWED_ARTISTS_FILE),
            artists: artists.unwrap_or_default(),
        }
    }

    pub async fn load_from_cache(&self) -> Result<Self, StateError> {
        let artists = match read_optional(&self.path).await? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };

        Ok(Self {
            path: self.path.clone(),
            artists,
        })
    }

    pub async fn save_to_cache(&self) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(&self.artists)?;
        write_atomic(&self.path, json.as_bytes()).await
    }

    pub fn get_artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Artists in `current` that are not part of this cached list.
    pub fn count_new(&self, current: &[Artist]) -> usize {
        current
            .iter()
            .filter(|a| !self.artists.iter().any(|known| known.id == a.id))
            .count()
    }
}
