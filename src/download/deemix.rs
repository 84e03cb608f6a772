use std::path::PathBuf;

use async_trait::async_trait;

use crate::types::EntityId;

use super::{DownloadError, DownloadExecutor, DownloadOutcome, EntityKind, process};

/// Downloads through deemix: `deemix --portable -b <bitrate> -p <music>/ <url>`.
pub struct Deemix {
    site_url: String,
    music_path: PathBuf,
    bitrate: String,
    log_file: PathBuf,
}

impl Deemix {
    pub const PROGRAM: &'static str = "deemix";
    pub const LOG_FILE: &'static str = "deemix_log.txt";

    pub fn new(site_url: &str, music_path: PathBuf, bitrate: &str, log_file: PathBuf) -> Self {
        Self {
            site_url: site_url.to_string(),
            music_path,
            bitrate: bitrate.to_string(),
            log_file,
        }
    }

    pub fn args(&self, kind: EntityKind, id: EntityId) -> Vec<String> {
        // deemix wants the output directory with a trailing separator
        let mut output = self.music_path.to_string_lossy().into_owned();
        if !output.ends_with('/') {
            output.push('/');
        }

        vec![
            "--portable".to_string(),
            "-b".to_string(),
            self.bitrate.clone(),
            "-p".to_string(),
            output,
            kind.url(&self.site_url, id),
        ]
    }
}

#[async_trait]
impl DownloadExecutor for Deemix {
    fn name(&self) -> &str {
        "deemix"
    }

    async fn download(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<DownloadOutcome, DownloadError> {
        process::run_logged(Self::PROGRAM, &self.args(kind, id), &self.log_file).await
    }
}
