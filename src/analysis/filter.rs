//! Composable row filters over the base table

use crate::catalog::Genre;
use crate::error::{Error, Result};
use crate::generator::TrackRecord;
use std::fmt;
use std::str::FromStr;

/// Genre selection; `All` disables the genre predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl FromStr for GenreFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todos") {
            return Ok(GenreFilter::All);
        }
        trimmed.parse().map(GenreFilter::Only)
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => write!(f, "all"),
            GenreFilter::Only(g) => write!(f, "{}", g),
        }
    }
}

/// Caller-supplied criteria. Each predicate is independent; unset ones pass everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Empty means every artist
    pub artists: Vec<String>,
    pub genre: GenreFilter,
    /// Inclusive lower bound
    pub min_popularity: Option<u8>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_min_popularity(mut self, floor: u8) -> Self {
        self.min_popularity = Some(floor);
        self
    }

    /// Validate a raw popularity floor from user input
    pub fn popularity_floor(raw: i64) -> Result<u8> {
        if (0..=100).contains(&raw) {
            Ok(raw as u8)
        } else {
            Err(Error::PopularityOutOfRange(raw))
        }
    }

    pub fn matches(&self, track: &TrackRecord) -> bool {
        if !self.artists.is_empty() && !self.artists.iter().any(|a| *a == track.artist) {
            return false;
        }
        if let GenreFilter::Only(genre) = self.genre {
            if track.genre != genre {
                return false;
            }
        }
        match self.min_popularity {
            Some(floor) => track.popularity >= floor,
            None => true,
        }
    }

    /// New derived view; input order is preserved
    pub fn apply(&self, tracks: &[TrackRecord]) -> Vec<TrackRecord> {
        tracks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
