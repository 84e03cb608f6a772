#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    io,
    path::PathBuf,
    sync::Mutex,
};

use async_trait::async_trait;
use autoloader::{
    deezer::{ApiError, MusicService},
    download::{DownloadError, DownloadExecutor, DownloadOutcome, EntityKind},
    m3u::Library,
    management::StateStore,
    sync::{ReleaseNotifier, SyncContext},
    types::{
        Artist, EntityId, Playlist, PlaylistSummary, Release, Track, TrackAlbum, TrackArtist,
        TrackAvailability,
    },
};
use tempfile::TempDir;

pub fn artist(id: EntityId, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        link: format!("https://www.deezer.com/artist/{}", id),
    }
}

pub fn release(id: EntityId, title: &str) -> Release {
    Release {
        id,
        title: title.to_string(),
        link: format!("https://www.deezer.com/album/{}", id),
    }
}

pub fn track(id: EntityId, title: &str, artist: &str, album_id: EntityId) -> Track {
    Track {
        id,
        title: title.to_string(),
        duration: 200.0,
        link: format!("https://www.deezer.com/track/{}", id),
        artist: TrackArtist {
            name: artist.to_string(),
        },
        album: TrackAlbum { id: album_id },
    }
}

pub fn summary(id: EntityId, title: &str) -> PlaylistSummary {
    PlaylistSummary {
        id,
        title: title.to_string(),
        link: format!("https://www.deezer.com/playlist/{}", id),
    }
}

fn no_data() -> ApiError {
    ApiError::Remote {
        kind: "DataException".to_string(),
        message: "no data".to_string(),
        code: 800,
    }
}

/// In-memory stand-in for the Deezer API.
#[derive(Default)]
pub struct FakeService {
    pub artists: Mutex<Vec<Artist>>,
    pub releases: Mutex<HashMap<EntityId, Vec<Release>>>,
    pub playlists: Mutex<HashMap<EntityId, Playlist>>,
    pub followed_playlists: Mutex<Vec<PlaylistSummary>>,
    pub unreadable_tracks: Mutex<HashSet<EntityId>>,
    pub track_lookups: Mutex<Vec<EntityId>>,
}

impl FakeService {
    pub fn set_releases(&self, artist_id: EntityId, releases: Vec<Release>) {
        self.releases.lock().unwrap().insert(artist_id, releases);
    }

    pub fn set_playlist(&self, playlist_id: EntityId, title: &str, tracks: Vec<Track>) {
        self.playlists.lock().unwrap().insert(
            playlist_id,
            Playlist {
                title: title.to_string(),
                tracks,
            },
        );
    }

    pub fn mark_unreadable(&self, track_id: EntityId) {
        self.unreadable_tracks.lock().unwrap().insert(track_id);
    }

    pub fn lookups(&self) -> Vec<EntityId> {
        self.track_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MusicService for FakeService {
    async fn followed_artists(&self, _user_id: &str) -> Result<Vec<Artist>, ApiError> {
        Ok(self.artists.lock().unwrap().clone())
    }

    async fn artist_releases(&self, artist_id: EntityId) -> Result<Vec<Release>, ApiError> {
        self.releases
            .lock()
            .unwrap()
            .get(&artist_id)
            .cloned()
            .ok_or_else(no_data)
    }

    async fn followed_playlists(&self, _user_id: &str) -> Result<Vec<PlaylistSummary>, ApiError> {
        Ok(self.followed_playlists.lock().unwrap().clone())
    }

    async fn playlist(&self, playlist_id: EntityId) -> Result<Playlist, ApiError> {
        self.playlists
            .lock()
            .unwrap()
            .get(&playlist_id)
            .cloned()
            .ok_or_else(no_data)
    }

    async fn track(&self, track_id: EntityId) -> Result<TrackAvailability, ApiError> {
        self.track_lookups.lock().unwrap().push(track_id);

        let found = self
            .playlists
            .lock()
            .unwrap()
            .values()
            .flat_map(|p| p.tracks.iter())
            .find(|t| t.id == track_id)
            .cloned()
            .ok_or_else(no_data)?;

        Ok(TrackAvailability {
            id: found.id,
            title: found.title,
            readable: !self.unreadable_tracks.lock().unwrap().contains(&track_id),
            album: found.album,
        })
    }
}

/// Downloader that only records what it was asked to fetch.
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: Mutex<Vec<(EntityKind, EntityId)>>,
    pub verifies: bool,
    pub failing_ids: HashSet<EntityId>,
    pub unstartable: bool,
}

impl RecordingExecutor {
    pub fn verifying() -> Self {
        Self {
            verifies: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(EntityKind, EntityId)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadExecutor for RecordingExecutor {
    fn name(&self) -> &str {
        "recording"
    }

    fn verifies_availability(&self) -> bool {
        self.verifies
    }

    async fn download(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<DownloadOutcome, DownloadError> {
        if self.unstartable {
            return Err(DownloadError::Spawn {
                program: "recording".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            });
        }

        self.calls.lock().unwrap().push((kind, id));
        let exit_code = if self.failing_ids.contains(&id) { 1 } else { 0 };
        Ok(DownloadOutcome {
            command: format!("recording {} {}", kind, id),
            exit_code: Some(exit_code),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notified: Mutex<Vec<(EntityId, Vec<EntityId>)>>,
}

impl ReleaseNotifier for RecordingNotifier {
    fn notify(&self, artist: &Artist, releases: &[Release]) {
        self.notified
            .lock()
            .unwrap()
            .push((artist.id, releases.iter().map(|r| r.id).collect()));
    }
}

/// Temporary state directory and library plus all fakes.
pub struct Harness {
    pub dir: TempDir,
    pub service: FakeService,
    pub executor: RecordingExecutor,
    pub notifier: RecordingNotifier,
    pub store: StateStore,
    pub library: Library,
    pub download_albums: bool,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_executor(RecordingExecutor::default())
    }

    pub fn with_executor(executor: RecordingExecutor) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state"));
        let library = Library::new(dir.path().join("music"), dir.path().join("music/playlists"));
        std::fs::create_dir_all(dir.path().join("music/playlists")).unwrap();

        Self {
            dir,
            service: FakeService::default(),
            executor,
            notifier: RecordingNotifier::default(),
            store,
            library,
            download_albums: true,
        }
    }

    pub fn ctx(&self) -> SyncContext<'_> {
        SyncContext {
            service: &self.service,
            executor: &self.executor,
            notifier: &self.notifier,
            store: &self.store,
            library: &self.library,
            download_albums: self.download_albums,
        }
    }

    pub fn music_dir(&self) -> PathBuf {
        self.dir.path().join("music")
    }

    pub fn m3u(&self, stem: &str) -> PathBuf {
        self.library.m3u_path(stem)
    }

    /// Creates an empty file below the music directory.
    pub fn add_audio_file(&self, relative: &str) -> PathBuf {
        let path = self.music_dir().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"").unwrap();
        path
    }
}
