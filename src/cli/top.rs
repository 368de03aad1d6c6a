use std::path::PathBuf;

use tabled::Table;

use crate::{types::TrackTableRow, utils, warning};

pub async fn top(data_dir: PathBuf, years: Vec<String>, exclude: Vec<String>, count: usize) {
    let ranked = super::gather_top_tracks(&data_dir, years, exclude, count).await;

    if ranked.is_empty() {
        warning!("No plays matched the requested years. Nothing to report.");
        return;
    }

    let rows: Vec<TrackTableRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            rank: i + 1,
            track: track.name.clone(),
            artist: track.artist.clone(),
            plays: track.times_played,
            listened: utils::format_listening_time(track.ms_played),
        })
        .collect();

    let table = Table::new(rows);
    println!("{table}");
}
