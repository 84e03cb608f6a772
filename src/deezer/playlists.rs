use crate::types::{EntityId, Playlist, PlaylistMeta, PlaylistSummary, Track};

use super::{ApiError, DeezerClient, PAGE_SIZE};

impl DeezerClient {
    /// Retrieves the playlists the user follows, including their own.
    pub async fn get_followed_playlists(
        &self,
        user_id: &str,
    ) -> Result<Vec<PlaylistSummary>, ApiError> {
        let url = self.url(&format!(
            "/user/{user_id}/playlists?limit={limit}",
            user_id = user_id,
            limit = PAGE_SIZE
        ));
        self.get_all(url).await
    }

    /// Retrieves the title and the complete track list of a playlist.
    ///
    /// The track list embedded in `/playlist/{id}` is truncated for large
    /// playlists, so tracks always come from the paged tracks endpoint.
    pub async fn get_playlist(&self, playlist_id: EntityId) -> Result<Playlist, ApiError> {
        let meta: PlaylistMeta = self
            .get(&self.url(&format!("/playlist/{id}", id = playlist_id)))
            .await?;

        let tracks: Vec<Track> = self
            .get_all(self.url(&format!(
                "/playlist/{id}/tracks?limit={limit}",
                id = playlist_id,
                limit = PAGE_SIZE
            )))
            .await?;

        Ok(Playlist {
            title: meta.title,
            tracks,
        })
    }
}
