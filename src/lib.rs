//! Deezer Auto Loader Library
//!
//! This library watches a Deezer account for new releases of followed artists
//! and for changes to followed playlists. New releases and changed playlists
//! are handed to an external downloader (streamrip or deemix) and every
//! followed playlist is mirrored as a local M3U file pointing into the
//! downloaded library.
//!
//! # Modules
//!
//! - `cli` - Phase drivers with console feedback (releases, playlists)
//! - `config` - Configuration from environment variables and `.env` files
//! - `deezer` - Deezer REST client and the shared rate limiter
//! - `download` - Download dispatcher and downloader back-ends
//! - `m3u` - Local playlist rendering against the music library
//! - `management` - On-disk state (known releases, playlist hashes)
//! - `sync` - Change detection engines for releases and playlists
//! - `types` - Data structures and type definitions
//! - `utils` - Fingerprinting, diffing and path helpers
//!
//! # Example
//!
//! ```
//! use autoloader::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> autoloader::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod deezer;
pub mod download;
pub mod m3u;
pub mod management;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the application edges (CLI wiring, startup) where errors of
/// different layers meet and only need to be reported.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Checking {} followed artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Saved playlist: {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup failures. Anything that happens while
/// processing a single artist or playlist must use [`warning!`] instead so
/// the remaining entities still get processed.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to load releases for artist {}: {}", name, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
