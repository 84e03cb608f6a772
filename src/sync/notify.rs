use crate::{
    info,
    types::{Artist, Release},
};

/// Receives the releases that were found to be new for an artist.
pub trait ReleaseNotifier: Send + Sync {
    fn notify(&self, artist: &Artist, releases: &[Release]);
}

/// Prints new releases to the console.
pub struct ConsoleNotifier;

impl ReleaseNotifier for ConsoleNotifier {
    fn notify(&self, _artist: &Artist, releases: &[Release]) {
        for release in releases {
            info!("New Release: {} -> {}", release.title, release.link);
        }
    }
}
