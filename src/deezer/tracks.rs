use crate::types::{EntityId, TrackAvailability};

use super::{ApiError, DeezerClient};

impl DeezerClient {
    pub async fn get_track(&self, track_id: EntityId) -> Result<TrackAvailability, ApiError> {
        self.get(&self.url(&format!("/track/{id}", id = track_id)))
            .await
    }
}
