use std::{collections::HashSet, sync::Mutex};

use replaycli::sync::{
    BATCH_SIZE, MAX_THROTTLE_RETRIES, PlaylistWriter, SyncError, WriteError, sync_playlist,
};
use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Add(Vec<String>),
}

/// In-memory stand-in for the Spotify write client. Records every call and
/// can serve a configurable number of throttling responses per operation,
/// or fail a specific batch fatally.
struct FakeWriter {
    calls: Mutex<Vec<Call>>,
    clear_throttles: Mutex<u32>,
    add_throttles: Mutex<u32>,
    fail_add_index: Option<usize>,
}

impl FakeWriter {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            clear_throttles: Mutex::new(0),
            add_throttles: Mutex::new(0),
            fail_add_index: None,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn add_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Add(uris) => Some(uris),
                Call::Clear => None,
            })
            .collect()
    }

    fn take_throttle(counter: &Mutex<u32>) -> Result<(), WriteError> {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(WriteError::Throttled { retry_after: Some(3) });
        }
        Ok(())
    }
}

impl PlaylistWriter for FakeWriter {
    async fn clear(&self, _playlist_id: &str) -> Result<(), WriteError> {
        self.calls.lock().unwrap().push(Call::Clear);
        Self::take_throttle(&self.clear_throttles)
    }

    async fn add_items(&self, _playlist_id: &str, uris: &[String]) -> Result<(), WriteError> {
        let add_index = self.add_calls().len();
        self.calls.lock().unwrap().push(Call::Add(uris.to_vec()));

        if self.fail_add_index == Some(add_index) {
            return Err(WriteError::Api(StatusCode::FORBIDDEN));
        }

        Self::take_throttle(&self.add_throttles)
    }
}

fn track_uris(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("spotify:track:{:04}", i)).collect()
}

#[tokio::test]
async fn test_batches_are_partitioned_in_rank_order() {
    let writer = FakeWriter::new();
    let uris = track_uris(250);

    let written = sync_playlist(&writer, "pl1", &uris).await.unwrap();
    assert_eq!(written, 3); // ceil(250 / 100)

    let calls = writer.calls();
    assert_eq!(calls[0], Call::Clear);

    let batches = writer.add_calls();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].len(), BATCH_SIZE);
    assert_eq!(batches[1].len(), BATCH_SIZE);
    assert_eq!(batches[2].len(), 50);

    // Concatenated batches reproduce the ranked list exactly
    let replayed: Vec<String> = batches.iter().flatten().cloned().collect();
    assert_eq!(replayed, uris);

    // No duplicates across batches
    let unique: HashSet<&String> = replayed.iter().collect();
    assert_eq!(unique.len(), uris.len());
}

#[tokio::test]
async fn test_empty_list_still_clears_playlist() {
    let writer = FakeWriter::new();

    let written = sync_playlist(&writer, "pl1", &[]).await.unwrap();

    assert_eq!(written, 0);
    assert_eq!(writer.calls(), vec![Call::Clear]);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_batch_is_resubmitted_unchanged() {
    let mut writer = FakeWriter::new();
    writer.add_throttles = Mutex::new(1);
    let uris = track_uris(5);

    let written = sync_playlist(&writer, "pl1", &uris).await.unwrap();
    assert_eq!(written, 1);

    // Same batch content twice: the throttled attempt and the retry
    let batches = writer.add_calls();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0], batches[1]);
    assert_eq!(batches[1], uris);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_clear_is_retried() {
    let mut writer = FakeWriter::new();
    writer.clear_throttles = Mutex::new(2);
    let uris = track_uris(1);

    let written = sync_playlist(&writer, "pl1", &uris).await.unwrap();
    assert_eq!(written, 1);

    let clears = writer
        .calls()
        .iter()
        .filter(|call| **call == Call::Clear)
        .count();
    assert_eq!(clears, 3);
}

#[tokio::test]
async fn test_fatal_error_aborts_remaining_batches() {
    let mut writer = FakeWriter::new();
    writer.fail_add_index = Some(1);
    let uris = track_uris(250);

    let err = sync_playlist(&writer, "pl1", &uris).await.unwrap_err();
    match err {
        SyncError::Batch { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(source, WriteError::Api(StatusCode::FORBIDDEN)));
        }
        other => panic!("expected batch failure, got {:?}", other),
    }

    // First batch committed, second attempted, third never submitted
    assert_eq!(writer.add_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_retries_are_capped() {
    let mut writer = FakeWriter::new();
    writer.add_throttles = Mutex::new(MAX_THROTTLE_RETRIES + 5);
    let uris = track_uris(3);

    let err = sync_playlist(&writer, "pl1", &uris).await.unwrap_err();
    match err {
        SyncError::ThrottleExceeded { index, attempts } => {
            assert_eq!(index, Some(0));
            assert_eq!(attempts, MAX_THROTTLE_RETRIES + 1);
        }
        other => panic!("expected throttle cap, got {:?}", other),
    }
}
