//! # Sync Engines
//!
//! Change detection for the two kinds of followed entities:
//!
//! - [`releases`] compares each followed artist's current discography with
//!   the releases known from the previous run and downloads what is new.
//! - [`playlists`] fingerprints each followed playlist's track list and, when
//!   the fingerprint moved, downloads its tracks and rewrites its M3U file.
//!
//! Entities are processed one after the other. A failure while processing
//! one of them is recorded in the [`SyncReport`] and never stops the loop.

mod notify;
pub mod playlists;
pub mod releases;
mod report;

pub use notify::{ConsoleNotifier, ReleaseNotifier};
pub use report::{EntityType, Outcome, ReportEntry, SyncReport};

use thiserror::Error;

use crate::{
    deezer::{ApiError, MusicService},
    download::{DownloadError, DownloadExecutor},
    m3u::Library,
    management::{StateError, StateStore},
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error("cannot fingerprint track list: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

/// Collaborators shared by both engines for one run.
pub struct SyncContext<'a> {
    pub service: &'a dyn MusicService,
    pub executor: &'a dyn DownloadExecutor,
    pub notifier: &'a dyn ReleaseNotifier,
    pub store: &'a StateStore,
    pub library: &'a Library,
    pub download_albums: bool,
}
