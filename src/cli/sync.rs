use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error, info, management::TokenManager, spotify::playlist::SpotifyClient, success,
    sync::sync_playlist, warning,
};

pub async fn sync(
    data_dir: PathBuf,
    years: Vec<String>,
    exclude: Vec<String>,
    count: usize,
    playlist_id: String,
) {
    let ranked = super::gather_top_tracks(&data_dir, years, exclude, count).await;

    if ranked.is_empty() {
        warning!("No plays matched the requested years. Leaving playlist untouched.");
        return;
    }

    let uris: Vec<String> = ranked.iter().map(|track| track.uri.clone()).collect();

    let token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load API token. Provide a valid token file first.\n Error: {}",
                e
            );
        }
    };
    let client = SpotifyClient::new(token_mgr);

    info!("Replacing playlist {} with {} tracks", playlist_id, uris.len());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Synchronizing playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match sync_playlist(&client, &playlist_id, &uris).await {
        Ok(batches) => {
            pb.finish_and_clear();
            success!(
                "Playlist {} now holds {} tracks ({} batches written)",
                playlist_id,
                uris.len(),
                batches
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Playlist synchronization failed: {}", e);
        }
    }
}
