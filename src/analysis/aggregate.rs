//! Grouped summaries of a (filtered) track table

use super::stats::mean;
use super::Column;
use crate::catalog::Genre;
use crate::generator::TrackRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers for a table. Means are `None` when there are no tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub tracks: usize,
    pub mean_popularity: Option<f64>,
    pub total_volume: u64,
    pub mean_danceability: Option<f64>,
    pub mean_energy: Option<f64>,
}

impl Summary {
    pub fn from_tracks(tracks: &[TrackRecord]) -> Self {
        Self {
            tracks: tracks.len(),
            mean_popularity: column_mean(tracks, Column::Popularity),
            total_volume: total_volume(tracks),
            mean_danceability: column_mean(tracks, Column::Danceability),
            mean_energy: column_mean(tracks, Column::Energy),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRow {
    pub genre: Genre,
    pub tracks: usize,
    pub mean_popularity: f64,
    pub total_volume: u64,
    pub mean_danceability: f64,
    pub mean_energy: f64,
    pub mean_valence: f64,
    pub mean_acousticness: f64,
    pub mean_tempo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRow {
    pub artist: String,
    /// Most frequent genre; ties go to the genre seen first
    pub genre: Genre,
    pub tracks: usize,
    pub mean_popularity: f64,
    pub total_volume: u64,
    pub mean_danceability: f64,
    pub mean_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub window: NaiveDate,
    pub tracks: usize,
    pub mean_popularity: f64,
    pub total_volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShare {
    pub artist: String,
    pub tracks: usize,
}

/// Mean audio character of one artist (radar chart input)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioProfile {
    pub artist: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
}

fn column_mean(tracks: &[TrackRecord], column: Column) -> Option<f64> {
    let values: Vec<f64> = tracks.iter().map(|t| column.value(t)).collect();
    mean(&values)
}

fn total_volume(tracks: &[TrackRecord]) -> u64 {
    tracks.iter().map(|t| t.volume as u64).sum()
}

/// Groups are never empty, so their means always exist
fn group_mean(group: &[TrackRecord], column: Column) -> f64 {
    column_mean(group, column).unwrap_or(0.0)
}

/// Partition by key, groups in first-appearance order, rows in input order
fn group_by<K, F>(tracks: &[TrackRecord], key: F) -> Vec<(K, Vec<TrackRecord>)>
where
    K: PartialEq,
    F: Fn(&TrackRecord) -> K,
{
    let mut groups: Vec<(K, Vec<TrackRecord>)> = Vec::new();
    for t in tracks {
        let k = key(t);
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, rows)) => rows.push(t.clone()),
            None => groups.push((k, vec![t.clone()])),
        }
    }
    groups
}

/// Most frequent genre in `rows`, earliest-seen wins a tie
fn genre_mode(rows: &[TrackRecord]) -> Option<Genre> {
    let counts = group_by(rows, |t| t.genre);
    let mut best: Option<(Genre, usize)> = None;
    for (genre, group) in counts {
        if best.map_or(true, |(_, n)| group.len() > n) {
            best = Some((genre, group.len()));
        }
    }
    best.map(|(g, _)| g)
}

/// One row per genre present, in chart order
pub fn by_genre(tracks: &[TrackRecord]) -> Vec<GenreRow> {
    let mut groups = group_by(tracks, |t| t.genre);
    groups.sort_by_key(|(g, _)| *g);

    groups
        .into_iter()
        .map(|(genre, rows)| GenreRow {
            genre,
            tracks: rows.len(),
            mean_popularity: group_mean(&rows, Column::Popularity),
            total_volume: total_volume(&rows),
            mean_danceability: group_mean(&rows, Column::Danceability),
            mean_energy: group_mean(&rows, Column::Energy),
            mean_valence: group_mean(&rows, Column::Valence),
            mean_acousticness: group_mean(&rows, Column::Acousticness),
            mean_tempo: group_mean(&rows, Column::Tempo),
        })
        .collect()
}

/// Top `limit` artists by summed volume
pub fn by_artist(tracks: &[TrackRecord], limit: usize) -> Vec<ArtistRow> {
    let mut rows: Vec<ArtistRow> = group_by(tracks, |t| t.artist.clone())
        .into_iter()
        .filter_map(|(artist, rows)| {
            Some(ArtistRow {
                genre: genre_mode(&rows)?,
                tracks: rows.len(),
                mean_popularity: group_mean(&rows, Column::Popularity),
                total_volume: total_volume(&rows),
                mean_danceability: group_mean(&rows, Column::Danceability),
                mean_energy: group_mean(&rows, Column::Energy),
                artist,
            })
        })
        .collect();

    // stable: equal volumes keep first-appearance order
    rows.sort_by(|a, b| b.total_volume.cmp(&a.total_volume));
    rows.truncate(limit);
    rows
}

/// One row per time window, oldest first
pub fn by_window(tracks: &[TrackRecord]) -> Vec<TrendRow> {
    let mut windows: BTreeMap<NaiveDate, Vec<TrackRecord>> = BTreeMap::new();
    for t in tracks {
        windows.entry(t.window).or_default().push(t.clone());
    }

    windows
        .into_iter()
        .map(|(window, rows)| TrendRow {
            window,
            tracks: rows.len(),
            mean_popularity: group_mean(&rows, Column::Popularity),
            total_volume: total_volume(&rows),
        })
        .collect()
}

/// The `n` rows with the largest `column`, descending; ties keep input order
pub fn top_n(tracks: &[TrackRecord], n: usize, column: Column) -> Vec<TrackRecord> {
    let mut sorted: Vec<&TrackRecord> = tracks.iter().collect();
    sorted.sort_by(|a, b| column.value(b).total_cmp(&column.value(a)));
    sorted.into_iter().take(n).cloned().collect()
}

/// Track count per artist, largest first; ties keep first-appearance order
pub fn artist_share(tracks: &[TrackRecord]) -> Vec<ArtistShare> {
    let mut shares: Vec<ArtistShare> = group_by(tracks, |t| t.artist.clone())
        .into_iter()
        .map(|(artist, rows)| ArtistShare { artist, tracks: rows.len() })
        .collect();
    shares.sort_by(|a, b| b.tracks.cmp(&a.tracks));
    shares
}

/// Mean danceability/energy/valence/acousticness per artist, first-appearance order
pub fn audio_profiles(tracks: &[TrackRecord]) -> Vec<AudioProfile> {
    group_by(tracks, |t| t.artist.clone())
        .into_iter()
        .map(|(artist, rows)| AudioProfile {
            danceability: group_mean(&rows, Column::Danceability),
            energy: group_mean(&rows, Column::Energy),
            valence: group_mean(&rows, Column::Valence),
            acousticness: group_mean(&rows, Column::Acousticness),
            artist,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Filter, GenreFilter};
    use crate::generator::{AudioFeatures, Generator, Variant};

    fn track(id: u32, artist: &str, genre: Genre, popularity: u8, volume: u32, window: (i32, u32, u32)) -> TrackRecord {
        TrackRecord {
            track_id: id,
            track_name: format!("Song {}", id),
            artist: artist.to_string(),
            genre,
            popularity,
            volume,
            window: NaiveDate::from_ymd_opt(window.0, window.1, window.2).unwrap(),
            duration_ms: 200_000,
            features: AudioFeatures {
                danceability: 0.5,
                energy: 0.6,
                valence: 0.4,
                acousticness: 0.2,
                instrumentalness: 0.0,
                speechiness: 0.05,
                tempo: 120,
                loudness: -6.0,
            },
        }
    }

    fn charts() -> Vec<TrackRecord> {
        Generator::new().with_seed(Some(17)).generate(Variant::Charts).unwrap().tracks
    }

    // ==========================================================================
    // SUMMARY
    // ==========================================================================

    #[test]
    fn test_summary_empty_is_well_defined() {
        let s = Summary::from_tracks(&[]);
        assert_eq!(s.tracks, 0);
        assert_eq!(s.total_volume, 0);
        assert_eq!(s.mean_popularity, None);
        assert_eq!(s.mean_danceability, None);
        assert_eq!(s.mean_energy, None);
        assert_eq!(s, Summary::default());
    }

    #[test]
    fn test_summary_values() {
        let rows = vec![
            track(1, "A", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(2, "B", Genre::Rock, 90, 30, (2024, 1, 1)),
        ];
        let s = Summary::from_tracks(&rows);
        assert_eq!(s.tracks, 2);
        assert_eq!(s.mean_popularity, Some(85.0));
        assert_eq!(s.total_volume, 40);
        assert_eq!(s.mean_energy, Some(0.6));
    }

    // ==========================================================================
    // GENRE MODE
    // ==========================================================================

    #[test]
    fn test_genre_means_match_arithmetic_mean() {
        let rows = charts();
        let grouped = by_genre(&rows);
        assert_eq!(grouped.len(), 10);

        for row in &grouped {
            let pops: Vec<f64> = rows.iter().filter(|t| t.genre == row.genre).map(|t| t.popularity as f64).collect();
            let expected = pops.iter().sum::<f64>() / pops.len() as f64;
            assert!((row.mean_popularity - expected).abs() < 1e-9, "{}", row.genre);
            assert_eq!(row.tracks, pops.len());
            let streams: u64 = rows.iter().filter(|t| t.genre == row.genre).map(|t| t.volume as u64).sum();
            assert_eq!(row.total_volume, streams);
        }
    }

    #[test]
    fn test_genre_rows_in_chart_order() {
        let rows = vec![
            track(1, "A", Genre::KPop, 80, 10, (2024, 1, 1)),
            track(2, "B", Genre::Pop, 90, 30, (2024, 1, 1)),
        ];
        let grouped = by_genre(&rows);
        assert_eq!(grouped[0].genre, Genre::Pop);
        assert_eq!(grouped[1].genre, Genre::KPop);
    }

    // ==========================================================================
    // ARTIST MODE
    // ==========================================================================

    #[test]
    fn test_artist_rows_sorted_by_volume_and_truncated() {
        let rows = charts();
        let top = by_artist(&rows, 5);
        assert_eq!(top.len(), 5);
        for pair in top.windows(2) {
            assert!(pair[0].total_volume >= pair[1].total_volume);
        }
        let all = by_artist(&rows, usize::MAX);
        assert_eq!(all.len(), crate::catalog::chart_artist_count());
        assert_eq!(top[0], all[0]);
    }

    #[test]
    fn test_artist_genre_mode_tie_takes_first_seen() {
        let rows = vec![
            track(1, "A", Genre::Rock, 80, 10, (2024, 1, 1)),
            track(2, "A", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(3, "B", Genre::Jazz, 80, 10, (2024, 1, 1)),
            track(4, "B", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(5, "B", Genre::Pop, 80, 10, (2024, 1, 1)),
        ];
        let grouped = by_artist(&rows, 10);
        let a = grouped.iter().find(|r| r.artist == "A").unwrap();
        let b = grouped.iter().find(|r| r.artist == "B").unwrap();
        assert_eq!(a.genre, Genre::Rock);
        assert_eq!(b.genre, Genre::Pop);
    }

    #[test]
    fn test_artist_volume_ties_keep_input_order() {
        let rows = vec![
            track(1, "Z", Genre::Pop, 80, 50, (2024, 1, 1)),
            track(2, "Y", Genre::Pop, 80, 50, (2024, 1, 1)),
        ];
        let grouped = by_artist(&rows, 10);
        assert_eq!(grouped[0].artist, "Z");
        assert_eq!(grouped[1].artist, "Y");
    }

    // ==========================================================================
    // TREND MODE
    // ==========================================================================

    #[test]
    fn test_trend_rows_oldest_first() {
        let rows = charts();
        let trend = by_window(&rows);
        assert_eq!(trend.len(), 4);
        assert_eq!(trend[0].window, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(trend[3].window, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        let total: usize = trend.iter().map(|r| r.tracks).sum();
        assert_eq!(total, rows.len());
    }

    #[test]
    fn test_trend_sums_per_window() {
        let rows = vec![
            track(1, "A", Genre::Pop, 70, 10, (2024, 2, 1)),
            track(2, "B", Genre::Pop, 90, 20, (2024, 2, 1)),
            track(3, "C", Genre::Pop, 60, 5, (2024, 1, 1)),
        ];
        let trend = by_window(&rows);
        assert_eq!(trend[0].total_volume, 5);
        assert_eq!(trend[1].total_volume, 30);
        assert_eq!(trend[1].mean_popularity, 80.0);
    }

    // ==========================================================================
    // TOP-N
    // ==========================================================================

    #[test]
    fn test_top_ten_from_thirty_six_rows() {
        let rows: Vec<TrackRecord> = charts().into_iter().take(36).collect();
        let top = top_n(&rows, 10, Column::Popularity);
        assert_eq!(top.len(), 10);
        for pair in top.windows(2) {
            assert!(pair[0].popularity >= pair[1].popularity);
        }
        let max = rows.iter().map(|t| t.popularity).max().unwrap();
        assert_eq!(top[0].popularity, max);
    }

    #[test]
    fn test_top_n_ties_keep_input_order() {
        let rows = vec![
            track(1, "A", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(2, "B", Genre::Pop, 95, 10, (2024, 1, 1)),
            track(3, "C", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(4, "D", Genre::Pop, 80, 10, (2024, 1, 1)),
        ];
        let ids: Vec<u32> = top_n(&rows, 3, Column::Popularity).iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_top_n_more_than_available() {
        let rows = vec![track(1, "A", Genre::Pop, 80, 10, (2024, 1, 1))];
        assert_eq!(top_n(&rows, 10, Column::Volume).len(), 1);
        assert!(top_n(&[], 10, Column::Volume).is_empty());
    }

    // ==========================================================================
    // SHARE AND PROFILES
    // ==========================================================================

    #[test]
    fn test_artist_share_counts() {
        let rows = vec![
            track(1, "A", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(2, "B", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(3, "B", Genre::Pop, 80, 10, (2024, 1, 1)),
            track(4, "C", Genre::Pop, 80, 10, (2024, 1, 1)),
        ];
        let share = artist_share(&rows);
        assert_eq!(share[0], ArtistShare { artist: "B".into(), tracks: 2 });
        assert_eq!(share[1].artist, "A");
        assert_eq!(share[2].artist, "C");
    }

    #[test]
    fn test_audio_profiles_per_artist() {
        let rows = charts();
        let profiles = audio_profiles(&rows);
        assert_eq!(profiles.len(), crate::catalog::chart_artist_count());
        for p in &profiles {
            assert!(p.danceability >= 0.1 && p.danceability <= 0.95);
        }
    }

    #[test]
    fn test_filtered_empty_view_aggregates_cleanly() {
        let rows = charts();
        let empty = Filter::new()
            .with_artists(["Nobody"])
            .with_genre(GenreFilter::Only(Genre::Pop))
            .apply(&rows);
        assert!(by_genre(&empty).is_empty());
        assert!(by_artist(&empty, 10).is_empty());
        assert!(by_window(&empty).is_empty());
        assert!(artist_share(&empty).is_empty());
        assert!(audio_profiles(&empty).is_empty());
        assert!(top_n(&empty, 10, Column::Popularity).is_empty());
    }
}
