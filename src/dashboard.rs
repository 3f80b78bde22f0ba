//! Request/response boundary between the data core and whatever renders it
//!
//! A [`DashboardRequest`] carries the caller's filter criteria and analysis
//! mode. [`Dashboard::run`] regenerates the base table, filters it and
//! computes every derived table a dashboard page needs, returning a
//! self-contained, serializable [`DashboardReport`]. Nothing is retained
//! between calls.

use crate::analysis::aggregate::{self, ArtistShare, AudioProfile, Summary};
use crate::analysis::{self, AnalysisMode, AnalysisView, Column, CorrelationMatrix, Filter, GenreFilter, CORRELATION_COLUMNS};
use crate::error::{Error, Result};
use crate::generator::{Dataset, Generator, TrackRecord, Variant};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 10;

/// Raw, unvalidated request fields as they arrive from a query string or CLI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardParams {
    pub variant: Option<String>,
    pub artists: Vec<String>,
    pub genre: Option<String>,
    pub min_popularity: Option<i64>,
    pub mode: Option<String>,
    pub seed: Option<u64>,
    pub top: Option<usize>,
    /// Column ranking the top-N tracks
    pub by: Option<String>,
}

impl DashboardParams {
    /// Parse `key=value` pairs. `artists` may repeat or hold a comma-separated list.
    pub fn from_query(query: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).map_err(|e| Error::Query(e.to_string()))?;

        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "variant" => params.variant = Some(value),
                "artist" | "artists" => params
                    .artists
                    .extend(value.split(',').map(str::trim).filter(|a| !a.is_empty()).map(String::from)),
                "genre" => params.genre = Some(value),
                "min_popularity" => params.min_popularity = Some(parse_number(&key, &value)?),
                "mode" => params.mode = Some(value),
                "seed" => params.seed = Some(parse_number(&key, &value)?),
                "top" => params.top = Some(parse_number(&key, &value)?),
                "by" | "sort" => params.by = Some(value),
                _ => debug!(key = %key, "ignoring unknown query parameter"),
            }
        }
        Ok(params)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Query(format!("{} must be a number, got '{}'", key, value)))
}

/// Validated request
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRequest {
    pub variant: Variant,
    pub filter: Filter,
    pub mode: AnalysisMode,
    /// Overrides the generator's seed for this call
    pub seed: Option<u64>,
    pub top_n: usize,
    pub top_by: Column,
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self {
            variant: Variant::Charts,
            filter: Filter::default(),
            mode: AnalysisMode::default(),
            seed: None,
            top_n: DEFAULT_TOP_N,
            top_by: Column::Popularity,
        }
    }
}

impl TryFrom<DashboardParams> for DashboardRequest {
    type Error = Error;

    fn try_from(p: DashboardParams) -> Result<Self> {
        let variant = match p.variant {
            Some(v) => v.parse()?,
            None => Variant::Charts,
        };
        let genre: GenreFilter = match p.genre {
            Some(g) => g.parse()?,
            None => GenreFilter::All,
        };
        let mut filter = Filter::new().with_artists(p.artists).with_genre(genre);
        if let Some(raw) = p.min_popularity {
            filter = filter.with_min_popularity(Filter::popularity_floor(raw)?);
        }
        let mode = match p.mode {
            Some(m) => m.parse()?,
            None => AnalysisMode::default(),
        };
        let top_by = match p.by {
            Some(c) => c.parse()?,
            None => Column::Popularity,
        };

        Ok(Self {
            variant,
            filter,
            mode,
            seed: p.seed,
            top_n: p.top.unwrap_or(DEFAULT_TOP_N),
            top_by,
        })
    }
}

/// Echo of the criteria a report was built with
#[derive(Debug, Clone, Serialize)]
pub struct AppliedFilter {
    pub artists: Vec<String>,
    pub genre: String,
    pub min_popularity: Option<u8>,
    pub mode: AnalysisMode,
    pub top_n: usize,
    pub top_by: Column,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated: String,
    pub variant: Variant,
    pub seed: u64,
    pub volume_label: &'static str,
    pub window_label: &'static str,
    pub filter: AppliedFilter,
    /// Rows in the base table before filtering
    pub base_rows: usize,
    /// Artists of the base table, for the selector
    pub available_artists: Vec<String>,
    pub summary: Summary,
    pub view: AnalysisView,
    pub top_tracks: Vec<TrackRecord>,
    pub artist_share: Vec<ArtistShare>,
    pub audio_profiles: Vec<AudioProfile>,
    pub correlation: CorrelationMatrix,
    /// The filtered table
    pub tracks: Vec<TrackRecord>,
}

impl DashboardReport {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Owns the generator; every call regenerates from scratch
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    generator: Generator,
}

impl Dashboard {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn run(&self, request: &DashboardRequest) -> Result<DashboardReport> {
        let dataset = match request.seed {
            Some(seed) => self.generator.clone().with_seed(Some(seed)).generate(request.variant)?,
            None => self.generator.generate(request.variant)?,
        };
        Ok(build(&dataset, request))
    }
}

/// Derive every dashboard table from one base table
pub fn build(dataset: &Dataset, request: &DashboardRequest) -> DashboardReport {
    let tracks = request.filter.apply(&dataset.tracks);
    debug!(base = dataset.len(), filtered = tracks.len(), mode = %request.mode, "built derived view");

    DashboardReport {
        generated: chrono::Local::now().to_rfc3339(),
        variant: dataset.variant,
        seed: dataset.seed,
        volume_label: dataset.variant.volume_label(),
        window_label: dataset.variant.window_label(),
        filter: AppliedFilter {
            artists: request.filter.artists.clone(),
            genre: request.filter.genre.to_string(),
            min_popularity: request.filter.min_popularity,
            mode: request.mode,
            top_n: request.top_n,
            top_by: request.top_by,
        },
        base_rows: dataset.len(),
        available_artists: dataset.artists().into_iter().map(String::from).collect(),
        summary: Summary::from_tracks(&tracks),
        view: analysis::analyze(&tracks, request.mode, request.top_n),
        top_tracks: aggregate::top_n(&tracks, request.top_n, request.top_by),
        artist_share: aggregate::artist_share(&tracks),
        audio_profiles: aggregate::audio_profiles(&tracks),
        correlation: analysis::correlation(&tracks, &CORRELATION_COLUMNS),
        tracks,
    }
}
