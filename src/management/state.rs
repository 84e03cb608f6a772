use std::{
    io::{self, ErrorKind},
    path::Path,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state io failed: {0}")]
    IoError(#[from] io::Error),
    #[error("state file is not valid json: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Reads a state file, `None` when it does not exist yet.
pub async fn read_optional(path: &Path) -> Result<Option<String>, StateError> {
    match async_fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StateError::IoError(e)),
    }
}

/// Replaces `path` with `contents` through a sibling temporary file.
///
/// Readers see either the previous or the new content, never a partial
/// write. There is no locking between processes.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StateError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    async_fs::write(&tmp_path, contents).await?;
    if let Err(e) = async_fs::rename(&tmp_path, path).await {
        let _ = async_fs::remove_file(&tmp_path).await;
        return Err(StateError::IoError(e));
    }
    Ok(())
}
