use crate::{
    deezer::ApiError,
    info,
    sync::{self, SyncReport},
};

use super::{App, spinner};

/// Syncs every followed playlist into the local library.
pub async fn playlists(app: &App) -> Result<SyncReport, ApiError> {
    let pb = spinner("Fetching followed playlists...");
    let playlists = app.service().followed_playlists(&app.config.user_id).await;
    pb.finish_and_clear();
    let playlists = playlists?;

    info!("Following {} playlists", playlists.len());

    Ok(sync::playlists::sync_playlists(&app.context(), &playlists).await)
}
