//! New-release detection for followed artists.

use crate::{
    download::EntityKind,
    info,
    types::{Artist, Release},
    utils, warning,
};

use super::{EntityType, Outcome, SyncContext, SyncError, SyncReport};

/// Result of syncing one artist.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSync {
    pub new_releases: Vec<Release>,
    pub failed_downloads: usize,
}

/// Syncs every artist in order. Failures are recorded, never propagated.
pub async fn sync_artists(ctx: &SyncContext<'_>, artists: &[Artist]) -> SyncReport {
    let mut report = SyncReport::new();
    let total = artists.len();

    for (index, artist) in artists.iter().enumerate() {
        info!("{} ({}/{})", artist.name, index + 1, total);

        let outcome = match sync_artist(ctx, artist).await {
            Ok(result) => Outcome::Releases {
                new_releases: result.new_releases.len(),
                failed_downloads: result.failed_downloads,
            },
            Err(e) => {
                warning!("Failed to sync releases of {}: {}", artist.name, e);
                Outcome::Failed(e.to_string())
            }
        };
        report.push(EntityType::Artist, artist.id, &artist.name, outcome);
    }

    report
}

/// Diffs an artist's current releases against the known ones, dispatches an
/// album download for every new release and stores the current list.
///
/// The current list replaces the stored one even when nothing is new, so
/// releases removed upstream are forgotten and title edits are absorbed.
/// Nothing is stored when a fetch or a downloader start fails, which makes
/// the next run retry the artist.
pub async fn sync_artist(ctx: &SyncContext<'_>, artist: &Artist) -> Result<ArtistSync, SyncError> {
    let current = ctx.service.artist_releases(artist.id).await?;

    let mut known = ctx.store.releases(artist.id).load_from_cache().await?;
    let new_releases = utils::find_new_releases(&current, known.get_releases());

    let mut failed_downloads = 0;
    if !new_releases.is_empty() {
        ctx.notifier.notify(artist, &new_releases);

        for release in &new_releases {
            let outcome = ctx.executor.download(EntityKind::Album, release.id).await?;
            if !outcome.success() {
                warning!(
                    "{} exited with {:?} for release {}",
                    ctx.executor.name(),
                    outcome.exit_code,
                    release.title
                );
                failed_downloads += 1;
            }
        }
    }

    known.set_releases(current).save_to_cache().await?;

    Ok(ArtistSync {
        new_releases,
        failed_downloads,
    })
}
