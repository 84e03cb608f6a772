mod artist;
mod playlist;
mod release;
mod state;

pub use artist::{FOLLOWED_ARTISTS_FILE, FollowedArtistsManager};
pub use playlist::{HASH_SUFFIX, PlaylistHashManager};
pub use release::ReleaseManager;
pub use state::{StateError, read_optional, write_atomic};

use std::path::{Path, PathBuf};

use crate::types::{EntityId, Release};

/// Entry point to everything persisted between runs.
///
/// ```text
/// <state_dir>/
///   followed_artists.json
///   artists/<artist_id>.json
///   <playlist stem>.hash
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn artists_dir(&self) -> PathBuf {
        self.state_dir.join("artists")
    }

    pub fn releases(&self, artist_id: EntityId) -> ReleaseManager {
        ReleaseManager::new(&self.artists_dir(), artist_id, None)
    }

    pub fn playlist_hash(&self, stem: &str) -> PlaylistHashManager {
        PlaylistHashManager::new(&self.state_dir, stem)
    }

    pub fn followed_artists(&self) -> FollowedArtistsManager {
        FollowedArtistsManager::new(&self.state_dir, None)
    }

    pub async fn load_known_releases(&self, artist_id: EntityId) -> Result<Vec<Release>, StateError> {
        let manager = self.releases(artist_id).load_from_cache().await?;
        Ok(manager.get_releases().to_vec())
    }

    pub async fn save_known_releases(
        &self,
        artist_id: EntityId,
        releases: &[Release],
    ) -> Result<(), StateError> {
        ReleaseManager::new(&self.artists_dir(), artist_id, Some(releases.to_vec()))
            .save_to_cache()
            .await
    }

    pub async fn load_hash(&self, stem: &str) -> Result<String, StateError> {
        self.playlist_hash(stem).load_hash().await
    }

    pub async fn save_hash(&self, stem: &str, hash: &str) -> Result<(), StateError> {
        self.playlist_hash(stem).save_hash(hash).await
    }
}
