use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// One raw entry of a Spotify extended-streaming-history batch file,
/// exactly as exported. Metadata fields are null for the half of the
/// catalog the entry does not belong to (track vs. podcast episode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayRecord {
    pub ts: String,
    pub platform: String,
    pub ms_played: u64,
    pub conn_country: String,
    pub spotify_track_uri: Option<String>,
    pub spotify_episode_uri: Option<String>,
    #[serde(default)]
    pub reason_start: Option<String>,
    #[serde(default)]
    pub reason_end: Option<String>,
    // Optional rather than defaulted: older exports emit explicit nulls here
    #[serde(default)]
    pub shuffle: Option<bool>,
    #[serde(default)]
    pub skipped: Option<bool>,
    #[serde(default)]
    pub offline: Option<bool>,
    pub master_metadata_track_name: Option<String>,
    pub episode_name: Option<String>,
    pub master_metadata_album_artist_name: Option<String>,
}

/// A normalized playback occurrence. Built once per raw record during
/// loading, immutable afterwards. `uri` is never empty; records without
/// any resolvable identifier are rejected before this type is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub timestamp: String,
    pub platform: String,
    pub ms_played: u64,
    pub country: String,
    pub uri: String,
    pub reason_start: String,
    pub reason_end: String,
    pub shuffle: bool,
    pub skipped: bool,
    pub offline: bool,
    pub name: String,
    pub artist: String,
}

/// One user's play history, identified by the export subdirectory name.
/// A user with no qualifying records still gets an entry with an empty
/// event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserHistory {
    pub user: String,
    pub plays: Vec<PlayEvent>,
}

/// Per-track running totals across all users. Name and artist are those
/// of the first event seen for the URI; later events only bump counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAggregate {
    pub name: String,
    pub uri: String,
    pub artist: String,
    pub times_played: u64,
    pub ms_played: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub rank: usize,
    pub track: String,
    pub artist: String,
    pub plays: u64,
    pub listened: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnapshotResponse {
    pub snapshot_id: String,
}
