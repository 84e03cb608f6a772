use crate::types::{Artist, EntityId, Release};

use super::{ApiError, DeezerClient, PAGE_SIZE};

impl DeezerClient {
    /// Retrieves every artist the user follows, in the order Deezer lists them.
    pub async fn get_followed_artists(&self, user_id: &str) -> Result<Vec<Artist>, ApiError> {
        let url = self.url(&format!(
            "/user/{user_id}/artists?limit={limit}",
            user_id = user_id,
            limit = PAGE_SIZE
        ));
        self.get_all(url).await
    }

    /// Retrieves the full discography of an artist.
    ///
    /// Deezer lists albums, singles and EPs together, each of them is a
    /// release in its own right.
    pub async fn get_artist_releases(&self, artist_id: EntityId) -> Result<Vec<Release>, ApiError> {
        let url = self.url(&format!(
            "/artist/{id}/albums?limit={limit}",
            id = artist_id,
            limit = PAGE_SIZE
        ));
        self.get_all(url).await
    }
}
