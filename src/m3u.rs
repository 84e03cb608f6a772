//! Local M3U playlists.
//!
//! Each followed playlist is rendered as an extended M3U file in the
//! playlists directory. Tracks are resolved against the downloaded library by
//! file name; tracks that are not on disk (yet) point to their Deezer page.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{
    management::{StateError, write_atomic},
    types::Track,
    utils,
};

pub const M3U_SUFFIX: &str = "m3u";

/// Supported audio extensions, in resolution priority.
pub const AUDIO_EXTENSIONS: [&str; 2] = ["flac", "mp3"];

/// The downloaded music tree and the directory playlists are written to.
#[derive(Debug, Clone)]
pub struct Library {
    music_path: PathBuf,
    playlists_path: PathBuf,
}

impl Library {
    pub fn new(music_path: impl Into<PathBuf>, playlists_path: impl Into<PathBuf>) -> Self {
        Self {
            music_path: music_path.into(),
            playlists_path: playlists_path.into(),
        }
    }

    pub fn playlists_path(&self) -> &Path {
        &self.playlists_path
    }

    pub fn m3u_path(&self, stem: &str) -> PathBuf {
        self.playlists_path.join(format!("{stem}.{M3U_SUFFIX}"))
    }

    /// Snapshot of the audio files currently in the library.
    pub fn scan(&self) -> LibraryIndex {
        LibraryIndex::scan(&self.music_path)
    }

    /// Renders the playlist against a fresh scan of the library.
    pub fn render(&self, playlist_name: &str, tracks: &[Track]) -> String {
        generate_m3u_content(playlist_name, tracks, &self.scan(), &self.playlists_path)
    }

    /// Renders and writes `<playlists>/<stem>.m3u`, replacing any earlier file.
    pub async fn write_playlist(
        &self,
        stem: &str,
        playlist_name: &str,
        tracks: &[Track],
    ) -> Result<PathBuf, StateError> {
        let path = self.m3u_path(stem);
        let content = self.render(playlist_name, tracks);
        write_atomic(&path, content.as_bytes()).await?;
        Ok(path)
    }
}

/// Audio files of the library, FLAC before MP3, each group in walk order.
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    files: Vec<PathBuf>,
}

impl LibraryIndex {
    pub fn scan(root: &Path) -> Self {
        let mut groups: Vec<Vec<PathBuf>> = vec![Vec::new(); AUDIO_EXTENSIONS.len()];

        let entries = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file());

        for entry in entries {
            let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if let Some(group) = AUDIO_EXTENSIONS
                .iter()
                .position(|known| known.eq_ignore_ascii_case(ext))
            {
                groups[group].push(entry.into_path());
            }
        }

        Self {
            files: groups.into_iter().flatten().collect(),
        }
    }

    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// First audio file whose name contains `title`.
    pub fn find(&self, title: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().contains(title))
                    .unwrap_or(false)
            })
            .map(PathBuf::as_path)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Renders an extended M3U document.
///
/// ```text
/// #EXTM3U
/// #PLAYLIST: <name>
/// #EXTINF:<seconds>,<artist> - <title>
/// <path relative to playlists_dir, or the track link>
/// ```
pub fn generate_m3u_content(
    playlist_name: &str,
    tracks: &[Track],
    index: &LibraryIndex,
    playlists_dir: &Path,
) -> String {
    let mut lines = vec!["#EXTM3U".to_string(), format!("#PLAYLIST: {}", playlist_name)];

    for track in tracks {
        let duration = track.duration.trunc() as i64;
        let location = match index.find(&track.title) {
            Some(path) => utils::relative_path(path, playlists_dir)
                .to_string_lossy()
                .into_owned(),
            None => track.link.clone(),
        };

        lines.push(format!(
            "#EXTINF:{},{} - {}",
            duration, track.artist.name, track.title
        ));
        lines.push(location);
    }

    lines.join("\n") + "\n"
}
