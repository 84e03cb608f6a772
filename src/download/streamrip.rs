use std::path::PathBuf;

use async_trait::async_trait;

use crate::types::EntityId;

use super::{DownloadError, DownloadExecutor, DownloadOutcome, EntityKind, process};

/// Downloads through streamrip: `rip --config-path <config> url <url>`.
///
/// Output location and quality come from the streamrip config file.
pub struct Streamrip {
    site_url: String,
    config_path: PathBuf,
    log_file: PathBuf,
}

impl Streamrip {
    pub const PROGRAM: &'static str = "rip";
    pub const LOG_FILE: &'static str = "rip_log.txt";

    pub fn new(site_url: &str, config_path: PathBuf, log_file: PathBuf) -> Self {
        Self {
            site_url: site_url.to_string(),
            config_path,
            log_file,
        }
    }

    pub fn args(&self, kind: EntityKind, id: EntityId) -> Vec<String> {
        vec![
            "--config-path".to_string(),
            self.config_path.to_string_lossy().into_owned(),
            "url".to_string(),
            kind.url(&self.site_url, id),
        ]
    }
}

#[async_trait]
impl DownloadExecutor for Streamrip {
    fn name(&self) -> &str {
        "streamrip"
    }

    fn verifies_availability(&self) -> bool {
        true
    }

    async fn download(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<DownloadOutcome, DownloadError> {
        process::run_logged(Self::PROGRAM, &self.args(kind, id), &self.log_file).await
    }
}
