//! Fixed reference data behind the synthetic datasets
//!
//! Everything here is static: the closed set of chart genres, the baseline
//! audio-feature profile of each genre, the title pools used to name tracks
//! and the two artist directories (one per dataset variant).
//!
//! Genres are a closed enum, so lookups keyed by [`Genre`] cannot miss.
//! Free-form genre names coming from callers go through [`Genre::from_str`]
//! (strict) or the `*_for_name` helpers (lenient, falling back to Pop).

pub mod profile;
pub mod titles;

pub use profile::{profile_for_name, FeatureProfile};
pub use titles::{titles_for_name, track_name};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Rock,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Electronic,
    #[serde(rename = "R&B")]
    RnB,
    Country,
    Jazz,
    Classical,
    Reggaeton,
    #[serde(rename = "K-Pop")]
    KPop,
}

impl Genre {
    /// Every genre, in chart order
    pub const ALL: [Genre; 10] = [
        Genre::Pop,
        Genre::Rock,
        Genre::HipHop,
        Genre::Electronic,
        Genre::RnB,
        Genre::Country,
        Genre::Jazz,
        Genre::Classical,
        Genre::Reggaeton,
        Genre::KPop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::HipHop => "Hip-Hop",
            Genre::Electronic => "Electronic",
            Genre::RnB => "R&B",
            Genre::Country => "Country",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::Reggaeton => "Reggaeton",
            Genre::KPop => "K-Pop",
        }
    }

    pub fn profile(self) -> &'static FeatureProfile {
        profile::lookup(self)
    }

    /// Chart artists for this genre, ordered by rank (index 0 charts highest)
    pub fn chart_artists(self) -> &'static [&'static str] {
        match self {
            Genre::Pop => &["Taylor Swift", "Dua Lipa", "Ed Sheeran", "Ariana Grande", "Harry Styles"],
            Genre::Rock => &["Arctic Monkeys", "Imagine Dragons", "The Rolling Stones", "Foo Fighters", "Muse"],
            Genre::HipHop => &["Drake", "Kendrick Lamar", "Travis Scott", "Cardi B", "Post Malone"],
            Genre::Electronic => &["Calvin Harris", "David Guetta", "The Chainsmokers", "Marshmello", "Swedish House Mafia"],
            Genre::RnB => &["The Weeknd", "SZA", "Bruno Mars", "H.E.R.", "Summer Walker"],
            Genre::Country => &["Morgan Wallen", "Luke Combs", "Zach Bryan", "Chris Stapleton"],
            Genre::Jazz => &["Norah Jones", "Kamasi Washington", "Gregory Porter"],
            Genre::Classical => &["Yo-Yo Ma", "Lang Lang", "Hilary Hahn"],
            Genre::Reggaeton => &["Bad Bunny", "J Balvin", "Karol G", "Rauw Alejandro", "Anuel AA"],
            Genre::KPop => &["BTS", "BLACKPINK", "TWICE", "Stray Kids", "NewJeans"],
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase and drop punctuation so "hip-hop", "HipHop" and "hip hop" agree
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl FromStr for Genre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        if key == "rnb" {
            return Ok(Genre::RnB);
        }
        Genre::ALL
            .iter()
            .copied()
            .find(|g| normalize(g.name()) == key)
            .ok_or_else(|| Error::UnknownGenre(s.to_string()))
    }
}

/// Artist directory of the flat "library" dataset: each artist maps to one genre
pub const LIBRARY_ARTISTS: [(&str, Genre); 10] = [
    ("The Weeknd", Genre::RnB),
    ("Dua Lipa", Genre::Pop),
    ("Bad Bunny", Genre::Reggaeton),
    ("Taylor Swift", Genre::Pop),
    ("Ed Sheeran", Genre::Pop),
    ("Billie Eilish", Genre::Electronic),
    ("The Beatles", Genre::Rock),
    ("Rosalía", Genre::Reggaeton),
    ("J Balvin", Genre::Reggaeton),
    ("Olivia Rodrigo", Genre::Rock),
];

/// Total artist count across every genre of the chart directory
pub fn chart_artist_count() -> usize {
    Genre::ALL.iter().map(|g| g.chart_artists().len()).sum()
}
