use std::collections::HashMap;

use crate::types::{TrackAggregate, UserHistory};

/// Folds all play events of all users into per-track totals keyed by URI.
///
/// The first event seen for a URI fixes the aggregate's name and artist;
/// every further event only increments the play counter and adds its
/// duration. Since only sums are involved, the result is identical no
/// matter in which order users or events are processed.
pub fn aggregate_plays(histories: &[UserHistory]) -> HashMap<String, TrackAggregate> {
    let mut tracks: HashMap<String, TrackAggregate> = HashMap::new();

    for history in histories {
        for play in &history.plays {
            tracks
                .entry(play.uri.clone())
                .and_modify(|aggregate| {
                    aggregate.times_played += 1;
                    aggregate.ms_played += play.ms_played;
                })
                .or_insert_with(|| TrackAggregate {
                    name: play.name.clone(),
                    uri: play.uri.clone(),
                    artist: play.artist.clone(),
                    times_played: 1,
                    ms_played: play.ms_played,
                });
        }
    }

    tracks
}

/// Ranks aggregates by total listening time, descending, truncated to `limit`.
///
/// Ties are broken by URI so the order is deterministic. A `limit` beyond the
/// number of distinct tracks returns the full set.
pub fn top_tracks(
    aggregates: HashMap<String, TrackAggregate>,
    limit: usize,
) -> Vec<TrackAggregate> {
    let mut ranked: Vec<TrackAggregate> = aggregates.into_values().collect();

    ranked.sort_by(|a, b| b.ms_played.cmp(&a.ms_played).then_with(|| a.uri.cmp(&b.uri)));
    ranked.truncate(limit);

    ranked
}
