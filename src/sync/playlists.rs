//! Change detection and local materialization for followed playlists.

use crate::{
    download, info, success,
    types::PlaylistSummary,
    utils, warning,
};

use super::{EntityType, Outcome, SyncContext, SyncError, SyncReport};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistSync {
    Unchanged,
    Changed {
        tracks: usize,
        failed_downloads: usize,
    },
}

/// Syncs every playlist in order. Failures are recorded, never propagated.
pub async fn sync_playlists(ctx: &SyncContext<'_>, playlists: &[PlaylistSummary]) -> SyncReport {
    let mut report = SyncReport::new();
    let total = playlists.len();

    for (index, playlist) in playlists.iter().enumerate() {
        info!("{} ({}/{})", playlist.title, index + 1, total);

        let outcome = match sync_playlist(ctx, playlist).await {
            Ok(PlaylistSync::Unchanged) => Outcome::Unchanged,
            Ok(PlaylistSync::Changed {
                tracks,
                failed_downloads,
            }) => Outcome::Changed {
                tracks,
                failed_downloads,
            },
            Err(e) => {
                warning!("Failed to sync playlist {}: {}", playlist.title, e);
                Outcome::Failed(e.to_string())
            }
        };
        report.push(EntityType::Playlist, playlist.id, &playlist.title, outcome);
    }

    report
}

/// Re-downloads and re-renders a playlist when its fingerprint moved.
///
/// An unchanged playlist touches neither its M3U file nor its stored
/// fingerprint. A changed one gets its downloads dispatched, its M3U file
/// rewritten from whatever is on disk afterwards, and only then its new
/// fingerprint stored.
pub async fn sync_playlist(
    ctx: &SyncContext<'_>,
    summary: &PlaylistSummary,
) -> Result<PlaylistSync, SyncError> {
    info!("Loading playlist metadata");
    let playlist = ctx.service.playlist(summary.id).await?;

    let stem = utils::playlist_file_stem(&playlist.title, summary.id);
    info!("Playlist name: {}", stem);

    let current_hash = utils::compute_track_hash(&playlist.tracks)?;
    let hash_store = ctx.store.playlist_hash(&stem);
    let last_hash = hash_store.load_hash().await?;

    if current_hash == last_hash {
        info!("Playlist unchanged - nothing to do");
        return Ok(PlaylistSync::Unchanged);
    }

    info!("Playlist changed - starting download");
    let outcomes = download::download_tracks(
        ctx.service,
        ctx.executor,
        &playlist.tracks,
        ctx.download_albums,
    )
    .await?;

    let failed_downloads = outcomes.iter().filter(|o| !o.success()).count();
    if failed_downloads > 0 {
        warning!(
            "{} of {} download(s) for {} exited with an error",
            failed_downloads,
            outcomes.len(),
            playlist.title
        );
    }

    let m3u_path = ctx
        .library
        .write_playlist(&stem, &playlist.title, &playlist.tracks)
        .await?;
    hash_store.save_hash(&current_hash).await?;
    success!("Saved playlist: {}", m3u_path.display());

    Ok(PlaylistSync::Changed {
        tracks: playlist.tracks.len(),
        failed_downloads,
    })
}
