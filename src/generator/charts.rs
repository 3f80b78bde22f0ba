//! Structured chart dataset: genre x artist x week

use super::{round2, AudioFeatures, Jitter, TrackRecord};
use crate::catalog::{self, Genre};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rand::Rng;
use std::ops::RangeInclusive;

/// Number of chart windows per artist
pub const WEEKS: u32 = 4;

/// Popularity never drops below this after noise
pub const POPULARITY_FLOOR: i32 = 60;
pub const POPULARITY_CEILING: i32 = 100;

pub const DANCEABILITY: Jitter = Jitter::new(0.20, 0.10, 0.95);
pub const ENERGY: Jitter = Jitter::new(0.15, 0.10, 0.95);
pub const VALENCE: Jitter = Jitter::new(0.15, 0.10, 0.95);
pub const ACOUSTICNESS: Jitter = Jitter::new(0.10, 0.01, 0.95);
pub const INSTRUMENTALNESS: Jitter = Jitter::new(0.10, 0.00, 0.80);
pub const SPEECHINESS: Jitter = Jitter::new(0.05, 0.02, 0.30);

pub const TEMPO_MIN: i32 = 60;
pub const TEMPO_MAX: i32 = 180;

/// Years accepted for labelling chart windows
pub const CHART_YEARS: RangeInclusive<i32> = 1..=9999;

/// Expected row count: every chart artist appears once per week
pub fn expected_rows() -> usize {
    catalog::chart_artist_count() * WEEKS as usize
}

/// Label of chart window `week` (0 = most recent): first of month, counting back from December
pub fn week_label(chart_year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(chart_year, 12u32.checked_sub(week)?, 1)
}

/// All window labels of a chart year, most recent first
pub fn windows(chart_year: i32) -> Result<Vec<NaiveDate>> {
    if !CHART_YEARS.contains(&chart_year) {
        return Err(Error::ChartYearOutOfRange(chart_year));
    }
    (0..WEEKS)
        .map(|week| week_label(chart_year, week))
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::ChartYearOutOfRange(chart_year))
}

/// Rank and age decay before noise
fn base_popularity(rank: usize, week: u32) -> i32 {
    100 - 5 * rank as i32 - 2 * week as i32
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R, chart_year: i32) -> Result<Vec<TrackRecord>> {
    let windows = windows(chart_year)?;
    let mut tracks = Vec::with_capacity(expected_rows());
    let mut track_id = 0u32;

    for genre in Genre::ALL {
        let profile = genre.profile();

        for (rank, artist) in genre.chart_artists().iter().enumerate() {
            for (week, &window) in (0..WEEKS).zip(&windows) {
                track_id += 1;

                let popularity = (base_popularity(rank, week) + rng.random_range(-10..10))
                    .clamp(POPULARITY_FLOOR, POPULARITY_CEILING) as u8;

                let features = AudioFeatures {
                    danceability: DANCEABILITY.apply(rng, profile.danceability),
                    energy: ENERGY.apply(rng, profile.energy),
                    valence: VALENCE.apply(rng, profile.valence),
                    acousticness: ACOUSTICNESS.apply(rng, profile.acousticness),
                    instrumentalness: INSTRUMENTALNESS.apply(rng, profile.instrumentalness),
                    speechiness: SPEECHINESS.apply(rng, profile.speechiness),
                    tempo: (profile.tempo + rng.random_range(-10..10)).clamp(TEMPO_MIN, TEMPO_MAX),
                    loudness: rng.random_range(-12.0..-4.0),
                };

                let minutes = round2(rng.random_range(2.5..4.5));

                tracks.push(TrackRecord {
                    track_id,
                    track_name: catalog::track_name(rng, artist, genre),
                    artist: artist.to_string(),
                    genre,
                    popularity,
                    volume: rng.random_range(50..500),
                    window,
                    duration_ms: (minutes * 60_000.0).round() as u32,
                    features,
                });
            }
        }
    }

    Ok(tracks)
}
