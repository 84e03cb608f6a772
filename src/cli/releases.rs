use crate::{
    deezer::ApiError,
    info,
    management::FollowedArtistsManager,
    sync::{self, SyncReport},
    warning,
};

use super::{App, spinner};

/// Checks every followed artist for new releases.
pub async fn releases(app: &App) -> Result<SyncReport, ApiError> {
    let pb = spinner("Fetching followed artists...");
    let artists = app.service().followed_artists(&app.config.user_id).await;
    pb.finish_and_clear();
    let artists = artists?;

    let state_dir = app.store().state_dir();
    match app.store().followed_artists().load_from_cache().await {
        Ok(cached) if !cached.get_artists().is_empty() => info!(
            "Following {} artists ({} new since last run)",
            artists.len(),
            cached.count_new(&artists)
        ),
        Ok(_) => info!("Following {} artists", artists.len()),
        Err(e) => warning!("Cannot read followed artists cache. Err: {}", e),
    }

    if let Err(e) = FollowedArtistsManager::new(state_dir, Some(artists.clone()))
        .save_to_cache()
        .await
    {
        warning!("Cannot cache followed artists. Err: {}", e);
    }

    Ok(sync::releases::sync_artists(&app.context(), &artists).await)
}
