use std::path::{Path, PathBuf};

use super::state::{StateError, read_optional, write_atomic};

pub const HASH_SUFFIX: &str = "hash";

/// Last fingerprint of one playlist, stored as `<state_dir>/<stem>.hash`.
pub struct PlaylistHashManager {
    path: PathBuf,
}

impl PlaylistHashManager {
    pub fn new(state_dir: &Path, stem: &str) -> Self {
        Self {
            path: state_dir.join(format!("{stem}.{HASH_SUFFIX}")),
        }
    }

    /// The stored fingerprint, or an empty string when there is none.
    pub async fn load_hash(&self) -> Result<String, StateError> {
        Ok(read_optional(&self.path)
            .await?
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }

    pub async fn save_hash(&self, hash: &str) -> Result<(), StateError> {
        write_atomic(&self.path, hash.as_bytes()).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
