//! Configuration management for the Deezer Auto Loader.
//!
//! Configuration is read from environment variables. Before that, an optional
//! `.env` file from the local data directory is loaded into the environment so
//! that scheduled runs (cron, systemd timers, containers) do not need to carry
//! the settings themselves.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the user id)

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.deezer.com";
pub const DEFAULT_SITE_URL: &str = "https://www.deezer.com";
pub const DEFAULT_MUSIC_PATH: &str = "/music";
pub const DEFAULT_DEEMIX_BITRATE: &str = "128";

// Deezer allows 50 requests per 5 seconds.
pub const DEFAULT_MAX_REQUESTS: usize = 50;
pub const DEFAULT_TIME_WINDOW_SECS: f64 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// The external program used to download Deezer entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downloader {
    Streamrip,
    Deemix,
}

impl FromStr for Downloader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streamrip" | "rip" => Ok(Downloader::Streamrip),
            "deemix" => Ok(Downloader::Deemix),
            other => Err(format!("unknown downloader '{}', use streamrip or deemix", other)),
        }
    }
}

/// Immutable runtime configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub user_id: String,
    pub api_url: String,
    pub site_url: String,
    pub music_path: PathBuf,
    pub playlists_path: PathBuf,
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,
    pub downloader: Downloader,
    pub streamrip_config: PathBuf,
    pub deemix_bitrate: String,
    pub download_albums: bool,
    pub max_requests: usize,
    pub time_window: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated like missing ones so that a blank line in a
    /// `.env` file falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let data_dir = data_dir();

        let user_id = get("DEEZER_USER_ID").ok_or(ConfigError::Missing("DEEZER_USER_ID"))?;

        let music_path = get("MUSIC_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MUSIC_PATH));
        let playlists_path = get("PLAYLISTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| music_path.join("playlists"));

        let downloader = match get("DOWNLOADER") {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                name: "DOWNLOADER",
                value,
                reason,
            })?,
            None => Downloader::Streamrip,
        };

        let download_albums = match get("DOWNLOAD_ALBUMS_INSTEAD_OF_TRACKS") {
            Some(value) => parse_bool("DOWNLOAD_ALBUMS_INSTEAD_OF_TRACKS", value)?,
            None => true,
        };

        let max_requests = match get("RATE_LIMIT_MAX_REQUESTS") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_MAX_REQUESTS",
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_MAX_REQUESTS",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_MAX_REQUESTS,
        };

        let time_window = match get("RATE_LIMIT_WINDOW_SECS") {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs > 0.0 => Duration::from_secs_f64(secs),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_WINDOW_SECS",
                        value,
                        reason: "must be a positive number of seconds".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: "RATE_LIMIT_WINDOW_SECS",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => Duration::from_secs_f64(DEFAULT_TIME_WINDOW_SECS),
        };

        Ok(Self {
            user_id,
            api_url: get("DEEZER_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            site_url: get("DEEZER_SITE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            music_path,
            playlists_path,
            state_dir: get("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("state")),
            log_dir: get("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("logs")),
            downloader,
            streamrip_config: get("STREAMRIP_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("streamrip/config.toml")),
            deemix_bitrate: get("DEEMIX_BITRATE")
                .unwrap_or_else(|| DEFAULT_DEEMIX_BITRATE.to_string()),
            download_albums,
            max_requests,
            time_window,
        })
    }

    /// Directory holding one known-release file per artist.
    pub fn artists_state_dir(&self) -> PathBuf {
        self.state_dir.join("artists")
    }

    /// Creates every directory a run writes into.
    ///
    /// Idempotent; only fails on errors that make the run impossible, such as
    /// missing permissions.
    pub async fn ensure_layout(&self) -> std::io::Result<()> {
        let artists_dir = self.artists_state_dir();
        let mut dirs: Vec<&Path> = vec![
            &self.state_dir,
            &artists_dir,
            &self.music_path,
            &self.playlists_path,
            &self.log_dir,
        ];
        if let Some(parent) = self.streamrip_config.parent() {
            dirs.push(parent);
        }

        for dir in dirs {
            if dir.as_os_str().is_empty() {
                continue;
            }
            async_fs::create_dir_all(dir).await?;
        }
        Ok(())
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in:
/// - Linux: `~/.local/share/autoloader/.env`
/// - macOS: `~/Library/Application Support/autoloader/.env`
/// - Windows: `%LOCALAPPDATA%/autoloader/.env`
///
/// A missing file is fine, the settings may come from the real environment.
/// A file that exists but cannot be parsed is an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("autoloader");
    path
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
