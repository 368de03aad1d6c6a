//! # CLI Module
//!
//! This module provides the command-line interface layer of the streaming
//! history analyzer. It implements the user-facing commands and coordinates
//! between history ingestion, aggregation, and the Spotify playlist
//! synchronizer.
//!
//! ## Commands
//!
//! - [`top`] - Loads the export, aggregates plays across users, and prints a
//!   rank-ordered table of the tracks with the most listening time.
//! - [`sync`] - Runs the same pipeline and then replaces a Spotify playlist
//!   with the ranked track URIs, batched and throttle-aware.
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (argument handling, output)
//!     ↓
//! History Loader (JSON export parsing, year filter)
//!     ↓
//! Aggregator / Ranker (per-track totals, ordering)
//!     ↓
//! Synchronizer (batching, cooldown retry)  [sync only]
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling Philosophy
//!
//! Configuration problems (missing export directory, missing token) stop the
//! program with a descriptive message. Malformed records and unreadable batch
//! files degrade gracefully: they are skipped with a warning and the run
//! continues. A mid-sync fatal error reports the failing batch and leaves the
//! playlist partially updated; earlier batches stay committed.

use std::{collections::HashSet, path::Path};

use chrono::{Datelike, Utc};

use crate::{error, history, info, stats, types::TrackAggregate};

mod sync;
mod top;

pub use sync::sync;
pub use top::top;

/// Shared pipeline front: load histories, aggregate, rank, truncate.
///
/// When no year is requested the current calendar year is used, matching the
/// shape of a freshly requested export. Exits the program on ingestion
/// errors.
pub(crate) async fn gather_top_tracks(
    data_dir: &Path,
    years: Vec<String>,
    exclude: Vec<String>,
    count: usize,
) -> Vec<TrackAggregate> {
    let years: HashSet<String> = if years.is_empty() {
        HashSet::from([Utc::now().year().to_string()])
    } else {
        years.into_iter().collect()
    };
    let exclude: HashSet<String> = exclude.into_iter().collect();

    let histories = match history::load_user_histories(data_dir, &exclude, &years).await {
        Ok(histories) => histories,
        Err(e) => error!("Cannot load streaming history: {}", e),
    };

    let total_plays: usize = histories.iter().map(|h| h.plays.len()).sum();
    info!(
        "Loaded {} qualifying plays from {} users",
        total_plays,
        histories.len()
    );

    stats::top_tracks(stats::aggregate_plays(&histories), count)
}
