//! Flat listening-library dataset: independent rows, fixed ranges

use super::{round2, AudioFeatures, TrackRecord};
use crate::catalog::LIBRARY_ARTISTS;
use chrono::{Days, NaiveDate};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const DEFAULT_SIZE: usize = 100;

/// Release dates fall within this many days before the reference date
pub const RELEASE_WINDOW_DAYS: u64 = 365;

pub fn generate<R: Rng + ?Sized>(rng: &mut R, reference_date: NaiveDate, size: usize) -> Vec<TrackRecord> {
    (0..size)
        .map(|i| {
            let (artist, genre) = LIBRARY_ARTISTS.choose(rng).copied().unwrap_or(LIBRARY_ARTISTS[0]);

            let features = AudioFeatures {
                danceability: round2(rng.random_range(0.3..0.9)),
                energy: round2(rng.random_range(0.4..0.95)),
                valence: round2(rng.random_range(0.2..0.8)),
                acousticness: round2(rng.random_range(0.0..0.6)),
                instrumentalness: round2(rng.random_range(0.0..0.3)),
                speechiness: round2(rng.random_range(0.02..0.3)),
                tempo: rng.random_range(80..160),
                loudness: round2(rng.random_range(-12.0..-4.0)),
            };

            let days_back = rng.random_range(0..RELEASE_WINDOW_DAYS);
            let release = reference_date.checked_sub_days(Days::new(days_back)).unwrap_or(reference_date);

            TrackRecord {
                track_id: i as u32 + 1,
                track_name: format!("Track {}", i + 1),
                artist: artist.to_string(),
                genre,
                popularity: rng.random_range(70..100),
                volume: rng.random_range(10..100),
                window: release,
                duration_ms: rng.random_range(180_000..300_000),
                features,
            }
        })
        .collect()
}
