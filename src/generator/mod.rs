//! Synthetic dataset generation
//!
//! Two strategies build the base table:
//!
//! - [`Variant::Charts`]: structured. Every genre, every chart artist of that
//!   genre, four chart windows. Popularity decays with artist rank and window
//!   age; audio features are the genre profile plus bounded noise.
//! - [`Variant::Library`]: flat. 100 rows sampled independently against a
//!   small artist directory, features drawn from fixed ranges.
//!
//! A [`Generator`] is a plain value handed to whoever needs data. Every
//! generation runs off a `StdRng` seeded from an explicit seed; when the
//! caller gives none, the library variant uses [`LIBRARY_DEFAULT_SEED`] and
//! the charts variant draws a fresh one. The seed actually used is recorded
//! on the [`Dataset`] so any run can be replayed.

pub mod charts;
pub mod library;

use crate::catalog::Genre;
use crate::error::{Error, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Seed used by the library variant when the caller supplies none
pub const LIBRARY_DEFAULT_SEED: u64 = 42;

/// Year whose last four months label the chart windows
pub const DEFAULT_CHART_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Charts,
    Library,
}

impl Variant {
    /// Column name of the per-track volume figure
    pub fn volume_label(self) -> &'static str {
        match self {
            Variant::Charts => "streams_millions",
            Variant::Library => "play_count",
        }
    }

    /// Column name of the time bucket
    pub fn window_label(self) -> &'static str {
        match self {
            Variant::Charts => "week",
            Variant::Library => "release_date",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Charts => write!(f, "charts"),
            Variant::Library => write!(f, "library"),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "charts" | "chart" | "structured" => Ok(Variant::Charts),
            "library" | "flat" => Ok(Variant::Library),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    /// Beats per minute
    pub tempo: i32,
    /// dBFS
    pub loudness: f64,
}

/// One row of the base table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub track_id: u32,
    pub track_name: String,
    pub artist: String,
    pub genre: Genre,
    pub popularity: u8,
    /// Streams in millions (charts) or play count (library)
    pub volume: u32,
    /// Chart week or release date
    pub window: NaiveDate,
    pub duration_ms: u32,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

/// A freshly generated base table plus what is needed to regenerate it
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub variant: Variant,
    pub seed: u64,
    pub tracks: Vec<TrackRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Distinct artists in first-appearance order
    pub fn artists(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for t in &self.tracks {
            if !seen.contains(&t.artist.as_str()) {
                seen.push(t.artist.as_str());
            }
        }
        seen
    }

    /// Distinct genres present, in chart order
    pub fn genres(&self) -> Vec<Genre> {
        Genre::ALL
            .into_iter()
            .filter(|g| self.tracks.iter().any(|t| t.genre == *g))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Generator {
    seed: Option<u64>,
    reference_date: NaiveDate,
    chart_year: i32,
    library_size: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            seed: None,
            reference_date: Local::now().date_naive(),
            chart_year: DEFAULT_CHART_YEAR,
            library_size: library::DEFAULT_SIZE,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// "Today" for library release dates
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Year labelling the chart windows; must lie in [`charts::CHART_YEARS`]
    pub fn with_chart_year(mut self, year: i32) -> Result<Self> {
        charts::windows(year)?;
        self.chart_year = year;
        Ok(self)
    }

    pub fn with_library_size(mut self, size: usize) -> Self {
        self.library_size = size;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn chart_year(&self) -> i32 {
        self.chart_year
    }

    fn resolve_seed(&self, variant: Variant) -> u64 {
        match (self.seed, variant) {
            (Some(seed), _) => seed,
            (None, Variant::Library) => LIBRARY_DEFAULT_SEED,
            (None, Variant::Charts) => rand::rng().random(),
        }
    }

    /// Build a new base table. Never reuses earlier output.
    pub fn generate(&self, variant: Variant) -> Result<Dataset> {
        let seed = self.resolve_seed(variant);
        let mut rng = StdRng::seed_from_u64(seed);

        let tracks = match variant {
            Variant::Charts => charts::generate(&mut rng, self.chart_year)?,
            Variant::Library => library::generate(&mut rng, self.reference_date, self.library_size),
        };

        info!(%variant, seed, rows = tracks.len(), "generated dataset");
        Ok(Dataset { variant, seed, tracks })
    }
}

/// Base value plus uniform noise in [-spread, spread), clamped to [min, max]
#[derive(Debug, Clone, Copy)]
pub struct Jitter {
    pub spread: f64,
    pub min: f64,
    pub max: f64,
}

impl Jitter {
    pub const fn new(spread: f64, min: f64, max: f64) -> Self {
        Self { spread, min, max }
    }

    pub fn apply<R: Rng + ?Sized>(&self, rng: &mut R, base: f64) -> f64 {
        let noise = if self.spread > 0.0 { rng.random_range(-self.spread..self.spread) } else { 0.0 };
        (base + noise).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    // ==========================================================================
    // SEEDING
    // ==========================================================================
    //
    // Explicit seeds replay exactly. Without one, the library variant still
    // replays (fixed default seed) while the charts variant does not.
    // ==========================================================================

    #[test]
    fn test_explicit_seed_replays_charts() {
        let gen = Generator::new().with_seed(Some(2024));
        let a = gen.generate(Variant::Charts).unwrap();
        let b = gen.generate(Variant::Charts).unwrap();
        assert_eq!(a.seed, 2024);
        assert_eq!(a.tracks, b.tracks);
    }

    #[test]
    fn test_library_defaults_to_fixed_seed() {
        let gen = Generator::new().with_reference_date(fixed_date());
        let a = gen.generate(Variant::Library).unwrap();
        let b = gen.generate(Variant::Library).unwrap();
        assert_eq!(a.seed, LIBRARY_DEFAULT_SEED);
        assert_eq!(a.tracks, b.tracks);
    }

    #[test]
    fn test_unseeded_charts_records_seed_used() {
        let gen = Generator::new();
        let first = gen.generate(Variant::Charts).unwrap();
        let replay = Generator::new().with_seed(Some(first.seed)).generate(Variant::Charts).unwrap();
        assert_eq!(first.tracks, replay.tracks);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = Generator::new().with_seed(Some(1)).generate(Variant::Charts).unwrap();
        let b = Generator::new().with_seed(Some(2)).generate(Variant::Charts).unwrap();
        assert_eq!(a.len(), b.len());
        assert_ne!(a.tracks, b.tracks);
    }

    // ==========================================================================
    // DATASET HELPERS
    // ==========================================================================

    #[test]
    fn test_dataset_artists_first_seen_order() {
        let ds = Generator::new().with_seed(Some(5)).generate(Variant::Charts).unwrap();
        let artists = ds.artists();
        assert_eq!(artists[0], "Taylor Swift");
        assert_eq!(artists.len(), crate::catalog::chart_artist_count());
    }

    #[test]
    fn test_dataset_genres_in_chart_order() {
        let ds = Generator::new().with_seed(Some(5)).generate(Variant::Charts).unwrap();
        assert_eq!(ds.genres(), Genre::ALL.to_vec());
    }

    #[test]
    fn test_variant_parse_and_labels() {
        assert_eq!("Charts".parse::<Variant>().unwrap(), Variant::Charts);
        assert_eq!("flat".parse::<Variant>().unwrap(), Variant::Library);
        assert!("weekly".parse::<Variant>().is_err());
        assert_eq!(Variant::Charts.volume_label(), "streams_millions");
        assert_eq!(Variant::Library.window_label(), "release_date");
    }

    #[test]
    fn test_jitter_clamps() {
        let j = Jitter::new(0.5, 0.1, 0.95);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert!(j.contains(j.apply(&mut rng, 0.9)));
            assert!(j.contains(j.apply(&mut rng, 0.1)));
        }
    }

    #[test]
    fn test_zero_spread_jitter_only_clamps() {
        let fixed = Jitter::new(0.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(fixed.apply(&mut rng, 0.4), 0.4);
        assert_eq!(fixed.apply(&mut rng, 1.7), 1.0);
    }

    // ==========================================================================
    // CHART YEAR
    // ==========================================================================

    #[test]
    fn test_chart_year_labels_windows() {
        let ds = Generator::new().with_seed(Some(1)).with_chart_year(1999).unwrap().generate(Variant::Charts).unwrap();
        let mut windows: Vec<NaiveDate> = ds.tracks.iter().map(|t| t.window).collect();
        windows.sort();
        windows.dedup();
        assert_eq!(windows.len(), 4);
        assert!(windows.iter().all(|w| w.year() == 1999));
    }

    #[test]
    fn test_unrepresentable_chart_year_rejected() {
        let err = Generator::new().with_chart_year(300_000).unwrap_err();
        assert!(matches!(err, Error::ChartYearOutOfRange(300_000)));
        assert!(Generator::new().with_chart_year(0).is_err());
        assert_eq!(Generator::new().chart_year(), DEFAULT_CHART_YEAR);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(3.14159), 3.14);
    }
}
