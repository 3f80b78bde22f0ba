//! Filtering and aggregation of the base table
//!
//! Every function here is a pure function of a track slice: nothing is
//! cached and nothing is mutated. Empty input is a normal case; means come
//! back as `None` and grouped views come back empty.
//!
//! - [`filter`]: artist / genre / popularity predicates
//! - [`aggregate`]: KPI summary, group-bys per [`AnalysisMode`], top-N,
//!   artist share and per-artist audio profiles
//! - [`stats`]: mean and Pearson correlation

pub mod aggregate;
pub mod filter;
pub mod stats;

pub use aggregate::{ArtistRow, ArtistShare, AudioProfile, GenreRow, Summary, TrendRow};
pub use filter::{Filter, GenreFilter};
pub use stats::CorrelationMatrix;

use crate::error::Error;
use crate::generator::TrackRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which grouping the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Genre,
    Artist,
    Trend,
}

impl FromStr for AnalysisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "genre" => Ok(AnalysisMode::Genre),
            "artist" => Ok(AnalysisMode::Artist),
            "trend" => Ok(AnalysisMode::Trend),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Genre => write!(f, "genre"),
            AnalysisMode::Artist => write!(f, "artist"),
            AnalysisMode::Trend => write!(f, "trend"),
        }
    }
}

/// Numeric column of a track row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Popularity,
    Volume,
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Instrumentalness,
    Speechiness,
    Tempo,
    Loudness,
    DurationMs,
}

/// Columns of the correlation heatmap
pub const CORRELATION_COLUMNS: [Column; 7] = [
    Column::Popularity,
    Column::Danceability,
    Column::Energy,
    Column::Valence,
    Column::Acousticness,
    Column::Tempo,
    Column::Volume,
];

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Popularity => "popularity",
            Column::Volume => "volume",
            Column::Danceability => "danceability",
            Column::Energy => "energy",
            Column::Valence => "valence",
            Column::Acousticness => "acousticness",
            Column::Instrumentalness => "instrumentalness",
            Column::Speechiness => "speechiness",
            Column::Tempo => "tempo",
            Column::Loudness => "loudness",
            Column::DurationMs => "duration_ms",
        }
    }

    pub fn value(self, t: &TrackRecord) -> f64 {
        let f = &t.features;
        match self {
            Column::Popularity => t.popularity as f64,
            Column::Volume => t.volume as f64,
            Column::Danceability => f.danceability,
            Column::Energy => f.energy,
            Column::Valence => f.valence,
            Column::Acousticness => f.acousticness,
            Column::Instrumentalness => f.instrumentalness,
            Column::Speechiness => f.speechiness,
            Column::Tempo => f.tempo as f64,
            Column::Loudness => f.loudness,
            Column::DurationMs => t.duration_ms as f64,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "volume" | "streams" | "streams_millions" | "play_count" | "plays" => Ok(Column::Volume),
            "duration" | "duration_ms" => Ok(Column::DurationMs),
            _ => [
                Column::Popularity,
                Column::Danceability,
                Column::Energy,
                Column::Valence,
                Column::Acousticness,
                Column::Instrumentalness,
                Column::Speechiness,
                Column::Tempo,
                Column::Loudness,
            ]
            .into_iter()
            .find(|c| c.name() == key)
            .ok_or_else(|| Error::UnknownColumn(s.to_string())),
        }
    }
}

/// Grouped view selected by [`AnalysisMode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "lowercase")]
pub enum AnalysisView {
    Genre(Vec<GenreRow>),
    Artist(Vec<ArtistRow>),
    Trend(Vec<TrendRow>),
}

impl AnalysisView {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisView::Genre(_) => AnalysisMode::Genre,
            AnalysisView::Artist(_) => AnalysisMode::Artist,
            AnalysisView::Trend(_) => AnalysisMode::Trend,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnalysisView::Genre(rows) => rows.is_empty(),
            AnalysisView::Artist(rows) => rows.is_empty(),
            AnalysisView::Trend(rows) => rows.is_empty(),
        }
    }
}

/// Run the grouping for `mode`; artist mode keeps the `top_artists` biggest by volume
pub fn analyze(tracks: &[TrackRecord], mode: AnalysisMode, top_artists: usize) -> AnalysisView {
    match mode {
        AnalysisMode::Genre => AnalysisView::Genre(aggregate::by_genre(tracks)),
        AnalysisMode::Artist => AnalysisView::Artist(aggregate::by_artist(tracks, top_artists)),
        AnalysisMode::Trend => AnalysisView::Trend(aggregate::by_window(tracks)),
    }
}

/// Correlation matrix over `columns`
pub fn correlation(tracks: &[TrackRecord], columns: &[Column]) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| tracks.iter().map(|t| c.value(t)).collect())
        .collect();
    CorrelationMatrix::compute(columns.iter().map(|c| c.name().to_string()).collect(), &series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Generator, Variant};

    #[test]
    fn test_mode_parse() {
        assert_eq!("genre".parse::<AnalysisMode>().unwrap(), AnalysisMode::Genre);
        assert_eq!("Artist".parse::<AnalysisMode>().unwrap(), AnalysisMode::Artist);
        assert_eq!(" trend ".parse::<AnalysisMode>().unwrap(), AnalysisMode::Trend);
        assert!(matches!("decade".parse::<AnalysisMode>(), Err(Error::UnknownMode(_))));
    }

    #[test]
    fn test_column_parse_aliases() {
        assert_eq!("play_count".parse::<Column>().unwrap(), Column::Volume);
        assert_eq!("streams_millions".parse::<Column>().unwrap(), Column::Volume);
        assert_eq!("Popularity".parse::<Column>().unwrap(), Column::Popularity);
        assert!("bpm".parse::<Column>().is_err());
    }

    #[test]
    fn test_analyze_dispatches_on_mode() {
        let ds = Generator::new().with_seed(Some(8)).generate(Variant::Charts).unwrap();
        assert_eq!(analyze(&ds.tracks, AnalysisMode::Genre, 10).mode(), AnalysisMode::Genre);
        match analyze(&ds.tracks, AnalysisMode::Artist, 10) {
            AnalysisView::Artist(rows) => assert_eq!(rows.len(), 10),
            other => panic!("unexpected view {:?}", other.mode()),
        }
        match analyze(&ds.tracks, AnalysisMode::Trend, 10) {
            AnalysisView::Trend(rows) => assert_eq!(rows.len(), 4),
            other => panic!("unexpected view {:?}", other.mode()),
        }
    }

    #[test]
    fn test_analyze_empty_input() {
        for mode in [AnalysisMode::Genre, AnalysisMode::Artist, AnalysisMode::Trend] {
            assert!(analyze(&[], mode, 10).is_empty());
        }
    }

    #[test]
    fn test_view_serializes_with_mode_tag() {
        let json = serde_json::to_value(analyze(&[], AnalysisMode::Trend, 5)).unwrap();
        assert_eq!(json["mode"], "trend");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_correlation_over_library() {
        let ds = Generator::new().generate(Variant::Library).unwrap();
        let m = correlation(&ds.tracks, &CORRELATION_COLUMNS);
        assert_eq!(m.columns.len(), 7);
        assert_eq!(m.columns[6], "volume");
        let diag = m.get("energy", "energy").unwrap();
        assert!((diag - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_on_empty_table_is_undefined() {
        let m = correlation(&[], &CORRELATION_COLUMNS);
        assert!(m.values.iter().flatten().all(|v| v.is_none()));
    }
}
