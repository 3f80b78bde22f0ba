//! Track title pools
//!
//! Titles are drawn uniformly from a five-entry pool per genre. Nothing
//! keeps them unique, so the same title shows up on many rows.

use super::Genre;
use rand::seq::IndexedRandom;
use rand::Rng;

pub type TitlePool = [&'static str; 5];

const POP: TitlePool = ["Dancing in the Moonlight", "Electric Dreams", "Midnight City", "Golden Hour", "Summer Vibes"];
const ROCK: TitlePool = ["Thunder Road", "Mountain High", "Electric Storm", "Rebel Heart", "Free Fallin"];
const HIP_HOP: TitlePool = ["King's Gambit", "Street Dreams", "All Eyes On Me", "Top of the Game", "Legacy"];
const ELECTRONIC: TitlePool = ["Neon Pulse", "Digital Dreams", "Echo Chamber", "Synthetic Love", "Future Bass"];
const RNB: TitlePool = ["Midnight Drive", "Smooth Operator", "Velvet Touch", "City Lights", "Quiet Storm"];
const COUNTRY: TitlePool = ["Dusty Road", "Whiskey River", "Small Town", "Blue Skies", "Backroads"];
const JAZZ: TitlePool = ["Midnight Blues", "Smooth Jazz", "City Nights", "Quiet Moments", "Cool Breeze"];
const CLASSICAL: TitlePool = ["Moonlight Sonata", "Winter Prelude", "Spring Symphony", "Nocturne", "Adagio"];
const REGGAETON: TitlePool = ["Baila Conmigo", "Fiesta", "Calor", "Ritmo", "Dale"];
const K_POP: TitlePool = ["Fire", "Dreams", "Star", "Love Shot", "Butterfly"];

pub fn titles(genre: Genre) -> &'static TitlePool {
    match genre {
        Genre::Pop => &POP,
        Genre::Rock => &ROCK,
        Genre::HipHop => &HIP_HOP,
        Genre::Electronic => &ELECTRONIC,
        Genre::RnB => &RNB,
        Genre::Country => &COUNTRY,
        Genre::Jazz => &JAZZ,
        Genre::Classical => &CLASSICAL,
        Genre::Reggaeton => &REGGAETON,
        Genre::KPop => &K_POP,
    }
}

/// Title pool for a free-form genre name, Pop pool when unrecognised
pub fn titles_for_name(name: &str) -> &'static TitlePool {
    name.parse::<Genre>().map(titles).unwrap_or(&POP)
}

/// Pick a display title for a track by `artist` in `genre`. Only the genre
/// narrows the pool; every artist of a genre draws from the same titles.
pub fn track_name<R: Rng + ?Sized>(rng: &mut R, _artist: &str, genre: Genre) -> String {
    let pool = titles(genre);
    pool.choose(rng).copied().unwrap_or(pool[0]).to_string()
}
