//! # Download Dispatcher
//!
//! Turns "download this album/playlist/track" into one invocation of an
//! external downloader. Two back-ends exist, [`Streamrip`] and [`Deemix`],
//! and exactly one of them is active per deployment. Both hand a Deezer
//! entity URL to their program and stream its output to a log file and the
//! console (see [`process::run_logged`]).
//!
//! The dispatcher never parses downloader output. The exit status is returned
//! in [`DownloadOutcome`] and the caller decides what a failed download means
//! for the entity it was processing.

mod deemix;
pub mod process;
mod streamrip;

pub use deemix::Deemix;
pub use streamrip::Streamrip;

use std::{collections::HashSet, fmt, io, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    config::{Config, Downloader},
    deezer::{ApiError, MusicService},
    info,
    types::{EntityId, Track},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Album,
    Playlist,
    Track,
}

impl EntityKind {
    /// The public Deezer page of an entity, which is what downloaders accept.
    pub fn url(&self, site_url: &str, id: EntityId) -> String {
        format!(
            "{site}/{kind}/{id}",
            site = site_url.trim_end_matches('/'),
            kind = self,
            id = id
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            EntityKind::Album => "album",
            EntityKind::Playlist => "playlist",
            EntityKind::Track => "track",
        };
        write!(f, "{}", kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOutcome {
    pub command: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl DownloadOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write download log {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("track lookup failed: {0}")]
    Lookup(#[from] ApiError),
}

/// A downloader back-end.
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    fn name(&self) -> &str;

    /// Whether tracks must be checked for availability before their album is
    /// requested.
    fn verifies_availability(&self) -> bool {
        false
    }

    async fn download(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<DownloadOutcome, DownloadError>;
}

/// Builds the back-end selected in the configuration.
pub fn executor_from_config(config: &Config) -> Box<dyn DownloadExecutor> {
    match config.downloader {
        Downloader::Streamrip => Box::new(Streamrip::new(
            &config.site_url,
            config.streamrip_config.clone(),
            config.log_dir.join(Streamrip::LOG_FILE),
        )),
        Downloader::Deemix => Box::new(Deemix::new(
            &config.site_url,
            config.music_path.clone(),
            &config.deemix_bitrate,
            config.log_dir.join(Deemix::LOG_FILE),
        )),
    }
}

/// Dispatches downloads for every track of a playlist.
///
/// With `albums_instead_of_tracks` each distinct parent album is requested
/// once. When the back-end verifies availability, every track is looked up
/// first and unreadable tracks are skipped. Otherwise every track is
/// requested on its own.
pub async fn download_tracks(
    service: &dyn MusicService,
    executor: &dyn DownloadExecutor,
    tracks: &[Track],
    albums_instead_of_tracks: bool,
) -> Result<Vec<DownloadOutcome>, DownloadError> {
    let mut outcomes = Vec::new();
    let mut requested_albums: HashSet<EntityId> = HashSet::new();

    for track in tracks {
        info!("{}", track.title);

        if !albums_instead_of_tracks {
            outcomes.push(executor.download(EntityKind::Track, track.id).await?);
            continue;
        }

        let album_id = if executor.verifies_availability() {
            let lookup = service.track(track.id).await?;
            if !lookup.readable {
                warning!(
                    "track unavailable - id: {}, title: {}",
                    lookup.id,
                    lookup.title
                );
                continue;
            }
            lookup.album.id
        } else {
            track.album.id
        };

        if !requested_albums.insert(album_id) {
            continue;
        }
        outcomes.push(executor.download(EntityKind::Album, album_id).await?);
    }

    Ok(outcomes)
}
