use std::{collections::HashSet, io::Error, path::Path};

use futures::StreamExt;

use crate::{
    types::{PlayEvent, RawPlayRecord, UserHistory},
    utils, warning,
};

#[derive(Debug)]
pub enum HistoryError {
    NotFound(String),
    NotADirectory(String),
    IoError(Error),
}

impl From<Error> for HistoryError {
    fn from(err: Error) -> Self {
        HistoryError::IoError(err)
    }
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::NotFound(path) => write!(f, "Directory not found: '{}'", path),
            HistoryError::NotADirectory(path) => {
                write!(f, "Path doesn't lead to a directory: '{}'", path)
            }
            HistoryError::IoError(err) => write!(f, "I/O error while reading history: {}", err),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Loads the play histories of every user below the export root directory.
///
/// Each non-excluded subdirectory of `root` is treated as one user. All files
/// ending in `.json` inside a user directory are parsed as arrays of raw play
/// records, filtered down to the allowed years, and normalized into
/// [`PlayEvent`]s. A user directory without any qualifying record still yields
/// a [`UserHistory`] with an empty play list.
///
/// Unreadable files and malformed records are skipped with a warning; only a
/// missing or non-directory root is fatal.
pub async fn load_user_histories(
    root: &Path,
    exclude: &HashSet<String>,
    years: &HashSet<String>,
) -> Result<Vec<UserHistory>, HistoryError> {
    let metadata = match async_fs::metadata(root).await {
        Ok(metadata) => metadata,
        Err(_) => return Err(HistoryError::NotFound(root.display().to_string())),
    };
    if !metadata.is_dir() {
        return Err(HistoryError::NotADirectory(root.display().to_string()));
    }

    let mut histories: Vec<UserHistory> = Vec::new();

    let mut entries = async_fs::read_dir(root).await?;
    while let Some(entry) = entries.next().await {
        let entry = entry?;
        let user = entry.file_name().to_string_lossy().to_string();

        if exclude.contains(&user) {
            continue;
        }

        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(_) => continue, // entry vanished mid-scan
        };
        if !file_type.is_dir() {
            continue;
        }

        let plays = load_user_plays(&entry.path(), &user, years).await;
        histories.push(UserHistory { user, plays });
    }

    histories.sort_by(|a, b| a.user.cmp(&b.user));

    Ok(histories)
}

async fn load_user_plays(user_dir: &Path, user: &str, years: &HashSet<String>) -> Vec<PlayEvent> {
    let mut plays: Vec<PlayEvent> = Vec::new();
    let mut malformed: usize = 0;
    let mut without_uri: usize = 0;

    let mut entries = match async_fs::read_dir(user_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warning!("Cannot list directory for user {}: {}", user, e);
            return plays;
        }
    };
    while let Some(entry) = entries.next().await {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warning!("Skipping unreadable entry for user {}: {}", user, e);
                continue;
            }
        };
        let file_name = entry.file_name().to_string_lossy().to_string();

        if !file_name.ends_with(".json") {
            continue;
        }

        let content = match async_fs::read_to_string(entry.path()).await {
            Ok(content) => content,
            Err(_) => continue, // file vanished mid-scan
        };

        let records: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warning!("Skipping unreadable batch file {}: {}", file_name, e);
                continue;
            }
        };

        for record in records {
            let record: RawPlayRecord = match serde_json::from_value(record) {
                Ok(record) => record,
                Err(_) => {
                    malformed += 1;
                    continue;
                }
            };

            if !utils::timestamp_year(&record.ts).is_some_and(|year| years.contains(year)) {
                continue;
            }

            match normalize_record(record) {
                Some(play) => plays.push(play),
                None => without_uri += 1,
            }
        }
    }

    if malformed > 0 {
        warning!("Skipped {} malformed records for user {}", malformed, user);
    }
    if without_uri > 0 {
        warning!(
            "Skipped {} records without a track or episode URI for user {}",
            without_uri,
            user
        );
    }

    plays
}

/// Normalizes one raw export record into a [`PlayEvent`].
///
/// The track URI falls back from `spotify_track_uri` to `spotify_episode_uri`;
/// a record where both are absent is rejected with `None`. The track name
/// falls back to the episode name, and name/artist degrade to the `"unknown"`
/// sentinel when the export carries neither.
pub fn normalize_record(record: RawPlayRecord) -> Option<PlayEvent> {
    let (uri, _) = utils::resolve_with_fallback(
        record.spotify_track_uri.as_deref(),
        record.spotify_episode_uri.as_deref(),
    )?;

    let name = utils::resolve_with_fallback(
        record.master_metadata_track_name.as_deref(),
        record.episode_name.as_deref(),
    )
    .map(|(name, _)| name)
    .unwrap_or_else(|| utils::UNKNOWN.to_string());

    let artist = record
        .master_metadata_album_artist_name
        .filter(|artist| !artist.is_empty())
        .unwrap_or_else(|| utils::UNKNOWN.to_string());

    Some(PlayEvent {
        timestamp: record.ts,
        platform: record.platform,
        ms_played: record.ms_played,
        country: record.conn_country,
        uri,
        reason_start: record.reason_start.unwrap_or_else(|| utils::UNKNOWN.to_string()),
        reason_end: record.reason_end.unwrap_or_else(|| utils::UNKNOWN.to_string()),
        shuffle: record.shuffle.unwrap_or(false),
        skipped: record.skipped.unwrap_or(false),
        offline: record.offline.unwrap_or(false),
        name,
        artist,
    })
}
