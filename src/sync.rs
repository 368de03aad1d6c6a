use std::time::Duration;

use tokio::time::sleep;

use crate::warning;

/// Maximum number of track URIs the playlist-tracks endpoint accepts per call.
pub const BATCH_SIZE: usize = 100;

/// Fixed cooldown before a throttled batch is resubmitted.
pub const THROTTLE_COOLDOWN_SECS: u64 = 60;

/// Cap on throttle retries per operation. The original behavior retried
/// forever; the cap turns a persistently rate-limited sync into a distinct
/// error instead of an endless loop.
pub const MAX_THROTTLE_RETRIES: u32 = 10;

/// Error returned by a playlist write client.
///
/// `Throttled` is the recoverable rate-limit signal and triggers the
/// cooldown retry loop; everything else is fatal to the sync.
#[derive(Debug)]
pub enum WriteError {
    Throttled { retry_after: Option<u64> },
    Api(reqwest::StatusCode),
    Remote(reqwest::Error),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Throttled { retry_after: Some(secs) } => {
                write!(f, "rate limited (retry after {} s)", secs)
            }
            WriteError::Throttled { retry_after: None } => write!(f, "rate limited"),
            WriteError::Api(status) => write!(f, "API error: {}", status),
            WriteError::Remote(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WriteError {}

#[derive(Debug)]
pub enum SyncError {
    /// Clearing the playlist failed with a non-throttling error.
    Clear(WriteError),
    /// A batch submission failed with a non-throttling error. Batches before
    /// `index` are already committed; the playlist is left partially updated.
    Batch { index: usize, source: WriteError },
    /// The throttle-retry cap was exceeded. `index` is `None` when it was the
    /// clear operation that kept being rejected.
    ThrottleExceeded { index: Option<usize>, attempts: u32 },
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Clear(source) => write!(f, "Failed to clear playlist: {}", source),
            SyncError::Batch { index, source } => {
                write!(f, "Failed to submit batch {}: {}", index + 1, source)
            }
            SyncError::ThrottleExceeded { index: None, attempts } => write!(
                f,
                "Gave up clearing the playlist after {} rate-limited attempts",
                attempts
            ),
            SyncError::ThrottleExceeded { index: Some(index), attempts } => write!(
                f,
                "Gave up on batch {} after {} rate-limited attempts",
                index + 1,
                attempts
            ),
        }
    }
}

impl std::error::Error for SyncError {}

/// The authenticated playlist write client the synchronizer drives.
///
/// Implemented by [`crate::spotify::playlist::SpotifyClient`] for the real
/// API and by in-memory fakes in tests.
pub trait PlaylistWriter {
    fn clear(
        &self,
        playlist_id: &str,
    ) -> impl std::future::Future<Output = Result<(), WriteError>>;

    fn add_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> impl std::future::Future<Output = Result<(), WriteError>>;
}

/// Replaces the remote playlist's contents with the ranked URI list.
///
/// The playlist is cleared first and is therefore always fully overwritten,
/// never appended to. The URI list is then pushed in batches of
/// [`BATCH_SIZE`], in rank order, so batch submission order determines final
/// playlist order. A throttled call sleeps for [`THROTTLE_COOLDOWN_SECS`]
/// and resubmits the identical batch, up to [`MAX_THROTTLE_RETRIES`] times;
/// any other error aborts immediately, leaving earlier batches committed.
///
/// Returns the number of batches written.
pub async fn sync_playlist<W: PlaylistWriter>(
    writer: &W,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize, SyncError> {
    let mut attempts: u32 = 0;
    loop {
        match writer.clear(playlist_id).await {
            Ok(()) => break,
            Err(WriteError::Throttled { retry_after }) => {
                attempts += 1;
                if attempts > MAX_THROTTLE_RETRIES {
                    return Err(SyncError::ThrottleExceeded { index: None, attempts });
                }
                log_cooldown(retry_after);
                sleep(Duration::from_secs(THROTTLE_COOLDOWN_SECS)).await;
            }
            Err(err) => return Err(SyncError::Clear(err)),
        }
    }

    let mut written = 0;
    for (index, batch) in uris.chunks(BATCH_SIZE).enumerate() {
        let mut attempts: u32 = 0;
        loop {
            match writer.add_items(playlist_id, batch).await {
                Ok(()) => break,
                Err(WriteError::Throttled { retry_after }) => {
                    attempts += 1;
                    if attempts > MAX_THROTTLE_RETRIES {
                        return Err(SyncError::ThrottleExceeded {
                            index: Some(index),
                            attempts,
                        });
                    }
                    log_cooldown(retry_after);
                    sleep(Duration::from_secs(THROTTLE_COOLDOWN_SECS)).await;
                }
                Err(err) => return Err(SyncError::Batch { index, source: err }),
            }
        }
        written += 1;
    }

    Ok(written)
}

fn log_cooldown(retry_after: Option<u64>) {
    match retry_after {
        Some(hint) => warning!(
            "Rate limited (service suggests {} s), cooling down for {} s",
            hint,
            THROTTLE_COOLDOWN_SECS
        ),
        None => warning!("Rate limited, cooling down for {} s", THROTTLE_COOLDOWN_SECS),
    }
}
