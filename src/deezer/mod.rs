//! # Deezer Integration Module
//!
//! This module is the only place that talks to the Deezer REST API. It
//! exposes the [`MusicService`] trait, which is everything the sync engines
//! need from the remote side, and [`DeezerClient`], its HTTP implementation.
//!
//! ## Rate Limiting
//!
//! Deezer allows 50 requests per 5 seconds per client. Every request made by
//! [`DeezerClient`] first passes through a shared [`RateLimiter`], including
//! each page of a paginated listing. The limiter is created once per run and
//! handed to the client, there is no global instance.
//!
//! ## Error Payloads
//!
//! Deezer frequently answers with HTTP 200 and a body of the form
//! `{"error": {"type": "...", "message": "...", "code": 800}}` (unknown id,
//! private playlist, quota exceeded). Such bodies are turned into
//! [`ApiError::Remote`] so callers handle them like any other failed fetch.
//!
//! ## API Coverage
//!
//! - `GET /user/{id}/artists` - followed artists (paged)
//! - `GET /artist/{id}/albums` - releases of an artist (paged)
//! - `GET /user/{id}/playlists` - followed playlists (paged)
//! - `GET /playlist/{id}` and `GET /playlist/{id}/tracks` - title and tracks
//! - `GET /track/{id}` - availability of a single track
//!
//! There is no retry logic here. A failed request fails the entity that
//! needed it, the next scheduled run will try again.

mod artists;
mod playlists;
mod rate_limit;
mod tracks;

pub use rate_limit::RateLimiter;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::types::{
    Artist, EntityId, ErrorResponse, Page, Playlist, PlaylistSummary, Release, TrackAvailability,
};

/// Number of items requested per page on list endpoints.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("deezer returned {kind} ({code}): {message}")]
    Remote {
        kind: String,
        message: String,
        code: i64,
    },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The remote operations the sync engines depend on.
#[async_trait]
pub trait MusicService: Send + Sync {
    async fn followed_artists(&self, user_id: &str) -> Result<Vec<Artist>, ApiError>;

    async fn artist_releases(&self, artist_id: EntityId) -> Result<Vec<Release>, ApiError>;

    async fn followed_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, ApiError>;

    async fn playlist(&self, playlist_id: EntityId) -> Result<Playlist, ApiError>;

    async fn track(&self, track_id: EntityId) -> Result<TrackAvailability, ApiError>;
}

pub struct DeezerClient {
    http: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl DeezerClient {
    pub fn new(base_url: &str, limiter: Arc<RateLimiter>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url, path = path)
    }

    /// Performs one rate-limited GET and decodes the body.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.limiter.acquire().await;

        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        if body.get("error").is_some() {
            let ErrorResponse { error } = serde_json::from_value(body)?;
            return Err(ApiError::Remote {
                kind: error.kind,
                message: error.message,
                code: error.code,
            });
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Follows `next` links until the listing is exhausted.
    async fn get_all<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>, ApiError> {
        let mut items: Vec<T> = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            let page: Page<T> = self.get(&url).await?;
            if page.data.is_empty() {
                break;
            }

            items.extend(page.data);
            next = page.next;

            if let Some(total) = page.total {
                if items.len() as u64 >= total {
                    break;
                }
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl MusicService for DeezerClient {
    async fn followed_artists(&self, user_id: &str) -> Result<Vec<Artist>, ApiError> {
        self.get_followed_artists(user_id).await
    }

    async fn artist_releases(&self, artist_id: EntityId) -> Result<Vec<Release>, ApiError> {
        self.get_artist_releases(artist_id).await
    }

    async fn followed_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, ApiError> {
        self.get_followed_playlists(user_id).await
    }

    async fn playlist(&self, playlist_id: EntityId) -> Result<Playlist, ApiError> {
        self.get_playlist(playlist_id).await
    }

    async fn track(&self, track_id: EntityId) -> Result<TrackAvailability, ApiError> {
        self.get_track(track_id).await
    }
}
