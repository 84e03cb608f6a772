use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Deezer identifiers are integers. Tracks uploaded by users carry negative ids.
pub type EntityId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: EntityId,
    pub name: String,
    pub link: String,
}

/// An album-level entity of an artist. Identity is `id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: EntityId,
    pub title: String,
    pub link: String,
}

/// A playlist as listed among the user's followed playlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: EntityId,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub title: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub duration: f64,
    pub link: String,
    pub artist: TrackArtist,
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: EntityId,
}

/// Result of a single track lookup, used to check whether a track can
/// still be streamed before asking a downloader for its album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAvailability {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub readable: bool,
    pub album: TrackAlbum,
}

/// One page of a Deezer list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistMeta {
    pub title: String,
}

/// The `{"error": {...}}` body Deezer answers with instead of data.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}

#[derive(Tabled)]
pub struct ReportTableRow {
    pub kind: String,
    pub name: String,
    pub outcome: String,
}
