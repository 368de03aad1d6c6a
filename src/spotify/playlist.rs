use reqwest::{Client, Response, StatusCode};
use tokio::sync::Mutex;

use crate::{
    config,
    management::TokenManager,
    sync::{PlaylistWriter, WriteError},
    types::{PlaylistItemsRequest, PlaylistSnapshotResponse},
};

/// Authenticated playlist write client backed by the Spotify Web API.
///
/// Wraps a [`TokenManager`] so every request carries a fresh bearer token.
/// The manager sits behind a mutex because refreshing mutates it while the
/// client is shared immutably with the synchronizer.
pub struct SpotifyClient {
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            token_mgr: Mutex::new(token_mgr),
        }
    }

    async fn bearer_token(&self) -> String {
        self.token_mgr.lock().await.get_valid_token().await
    }

    fn tracks_url(playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        )
    }
}

impl PlaylistWriter for SpotifyClient {
    /// Replaces the playlist's contents with an empty set.
    async fn clear(&self, playlist_id: &str) -> Result<(), WriteError> {
        let client = Client::new();
        let response = client
            .put(Self::tracks_url(playlist_id))
            .bearer_auth(self.bearer_token().await)
            .json(&PlaylistItemsRequest { uris: Vec::new() })
            .send()
            .await
            .map_err(WriteError::Remote)?;

        check_snapshot(response).await
    }

    /// Appends up to 100 track URIs to the playlist.
    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), WriteError> {
        let client = Client::new();
        let response = client
            .post(Self::tracks_url(playlist_id))
            .bearer_auth(self.bearer_token().await)
            .json(&PlaylistItemsRequest {
                uris: uris.to_vec(),
            })
            .send()
            .await
            .map_err(WriteError::Remote)?;

        check_snapshot(response).await
    }
}

/// Maps the write-endpoint response onto the synchronizer's error taxonomy.
///
/// 429 becomes the recoverable throttling signal carrying the `Retry-After`
/// hint; every other non-success status is fatal. A successful write returns
/// a snapshot id, which is parsed to make sure the body is well-formed but
/// otherwise unused.
async fn check_snapshot(response: Response) -> Result<(), WriteError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        return Err(WriteError::Throttled { retry_after });
    }
    if !status.is_success() {
        return Err(WriteError::Api(status));
    }

    let _snapshot = response
        .json::<PlaylistSnapshotResponse>()
        .await
        .map_err(WriteError::Remote)?;

    Ok(())
}
