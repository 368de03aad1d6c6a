use replaycli::stats::{aggregate_plays, top_tracks};
use replaycli::types::{PlayEvent, UserHistory};

// Helper function to create a test play event
fn create_test_play(uri: &str, name: &str, artist: &str, ms_played: u64) -> PlayEvent {
    PlayEvent {
        timestamp: "2024-06-01T12:00:00Z".to_string(),
        platform: "android".to_string(),
        ms_played,
        country: "DE".to_string(),
        uri: uri.to_string(),
        reason_start: "trackdone".to_string(),
        reason_end: "trackdone".to_string(),
        shuffle: false,
        skipped: false,
        offline: false,
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

fn create_test_history(user: &str, plays: Vec<PlayEvent>) -> UserHistory {
    UserHistory {
        user: user.to_string(),
        plays,
    }
}

#[test]
fn test_aggregate_two_users() {
    // User A plays "X" twice, user B plays "X" once and "Y" once
    let histories = vec![
        create_test_history(
            "user_a",
            vec![
                create_test_play("u1", "X", "Artist X", 1000),
                create_test_play("u1", "X", "Artist X", 2000),
            ],
        ),
        create_test_history(
            "user_b",
            vec![
                create_test_play("u1", "X", "Artist X", 500),
                create_test_play("u2", "Y", "Artist Y", 9000),
            ],
        ),
    ];

    let aggregates = aggregate_plays(&histories);

    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates["u1"].times_played, 3);
    assert_eq!(aggregates["u1"].ms_played, 3500);
    assert_eq!(aggregates["u2"].times_played, 1);
    assert_eq!(aggregates["u2"].ms_played, 9000);

    let top = top_tracks(aggregates, 2);
    let uris: Vec<&str> = top.iter().map(|t| t.uri.as_str()).collect();
    assert_eq!(uris, vec!["u2", "u1"]);
}

#[test]
fn test_aggregate_is_order_independent() {
    let histories = vec![
        create_test_history(
            "user_a",
            vec![
                create_test_play("u1", "X", "Artist X", 1000),
                create_test_play("u2", "Y", "Artist Y", 4000),
                create_test_play("u1", "X", "Artist X", 2000),
            ],
        ),
        create_test_history("user_b", vec![create_test_play("u1", "X", "Artist X", 500)]),
    ];

    // Reverse the users and the events within each user
    let mut permuted = histories.clone();
    permuted.reverse();
    for history in &mut permuted {
        history.plays.reverse();
    }

    let a = aggregate_plays(&histories);
    let b = aggregate_plays(&permuted);

    assert_eq!(a.len(), b.len());
    for (uri, aggregate) in &a {
        assert_eq!(aggregate.times_played, b[uri].times_played);
        assert_eq!(aggregate.ms_played, b[uri].ms_played);
    }
}

#[test]
fn test_aggregate_keeps_first_seen_metadata() {
    // Same URI shows up later with different name/artist metadata; only the
    // counters may change after the first sighting
    let histories = vec![create_test_history(
        "user_a",
        vec![
            create_test_play("u1", "Original Name", "Original Artist", 1000),
            create_test_play("u1", "Remaster Name", "Other Artist", 2000),
        ],
    )];

    let aggregates = aggregate_plays(&histories);

    assert_eq!(aggregates["u1"].name, "Original Name");
    assert_eq!(aggregates["u1"].artist, "Original Artist");
    assert_eq!(aggregates["u1"].times_played, 2);
    assert_eq!(aggregates["u1"].ms_played, 3000);
}

#[test]
fn test_top_tracks_is_sorted_descending() {
    let histories = vec![create_test_history(
        "user_a",
        vec![
            create_test_play("u1", "A", "A", 3000),
            create_test_play("u2", "B", "B", 9000),
            create_test_play("u3", "C", "C", 1000),
            create_test_play("u4", "D", "D", 5000),
        ],
    )];

    let top = top_tracks(aggregate_plays(&histories), 10);

    for pair in top.windows(2) {
        assert!(pair[0].ms_played >= pair[1].ms_played);
    }
    assert_eq!(top[0].uri, "u2");
}

#[test]
fn test_top_tracks_size_invariant() {
    let histories = vec![create_test_history(
        "user_a",
        vec![
            create_test_play("u1", "A", "A", 3000),
            create_test_play("u2", "B", "B", 9000),
            create_test_play("u3", "C", "C", 1000),
        ],
    )];

    // len(rank(aggregates, n)) == min(n, distinct_track_count)
    assert_eq!(top_tracks(aggregate_plays(&histories), 0).len(), 0);
    assert_eq!(top_tracks(aggregate_plays(&histories), 2).len(), 2);
    assert_eq!(top_tracks(aggregate_plays(&histories), 3).len(), 3);
    assert_eq!(top_tracks(aggregate_plays(&histories), 100).len(), 3);
}

#[test]
fn test_top_tracks_ties_are_deterministic() {
    let histories = vec![create_test_history(
        "user_a",
        vec![
            create_test_play("u3", "C", "C", 2000),
            create_test_play("u1", "A", "A", 2000),
            create_test_play("u2", "B", "B", 2000),
        ],
    )];

    // Equal listening time resolves by URI, so repeated runs agree
    let top = top_tracks(aggregate_plays(&histories), 3);
    let uris: Vec<&str> = top.iter().map(|t| t.uri.as_str()).collect();
    assert_eq!(uris, vec!["u1", "u2", "u3"]);
}
