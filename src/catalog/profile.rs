//! Baseline audio-feature profile per genre
//!
//! The generator centres its random perturbation on these values. They are
//! rough, hand-picked averages: Classical is acoustic and instrumental,
//! Hip-Hop is speech-heavy, Reggaeton is the most danceable, and so on.

use super::Genre;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureProfile {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    /// Beats per minute
    pub tempo: i32,
    pub speechiness: f64,
}

const fn p(
    danceability: f64,
    energy: f64,
    valence: f64,
    acousticness: f64,
    instrumentalness: f64,
    tempo: i32,
    speechiness: f64,
) -> FeatureProfile {
    FeatureProfile { danceability, energy, valence, acousticness, instrumentalness, tempo, speechiness }
}

const POP: FeatureProfile = p(0.75, 0.70, 0.65, 0.15, 0.02, 120, 0.05);
const ROCK: FeatureProfile = p(0.55, 0.85, 0.50, 0.25, 0.10, 130, 0.04);
const HIP_HOP: FeatureProfile = p(0.80, 0.65, 0.45, 0.08, 0.01, 95, 0.25);
const ELECTRONIC: FeatureProfile = p(0.85, 0.80, 0.60, 0.05, 0.15, 128, 0.03);
const RNB: FeatureProfile = p(0.70, 0.60, 0.55, 0.20, 0.03, 90, 0.08);
const COUNTRY: FeatureProfile = p(0.60, 0.65, 0.70, 0.45, 0.05, 110, 0.06);
const JAZZ: FeatureProfile = p(0.45, 0.40, 0.50, 0.85, 0.25, 115, 0.03);
const CLASSICAL: FeatureProfile = p(0.25, 0.30, 0.40, 0.95, 0.80, 100, 0.01);
const REGGAETON: FeatureProfile = p(0.90, 0.75, 0.70, 0.10, 0.02, 95, 0.15);
const K_POP: FeatureProfile = p(0.80, 0.85, 0.75, 0.12, 0.04, 125, 0.07);

pub(crate) fn lookup(genre: Genre) -> &'static FeatureProfile {
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

/// Profile for a free-form genre name; unrecognised names get the Pop profile
pub fn profile_for_name(name: &str) -> &'static FeatureProfile {
    match name.parse::<Genre>() {
        Ok(genre) => lookup(genre),
        Err(_) => {
            debug!(genre = name, "unknown genre, using Pop profile");
            &POP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_values() {
        let classical = Genre::Classical.profile();
        assert_eq!(classical.acousticness, 0.95);
        assert_eq!(classical.instrumentalness, 0.80);
        assert_eq!(classical.tempo, 100);

        let hip_hop = Genre::HipHop.profile();
        assert_eq!(hip_hop.speechiness, 0.25);
        assert_eq!(hip_hop.tempo, 95);
    }

    #[test]
    fn test_all_profiles_are_normalized() {
        for genre in Genre::ALL {
            let pr = genre.profile();
            for v in [pr.danceability, pr.energy, pr.valence, pr.acousticness, pr.instrumentalness, pr.speechiness] {
                assert!((0.0..=1.0).contains(&v), "{}: {}", genre, v);
            }
            assert!((60..=180).contains(&pr.tempo));
        }
    }

    #[test]
    fn test_name_lookup_falls_back_to_pop() {
        assert_eq!(profile_for_name("Polka"), Genre::Pop.profile());
        assert_eq!(profile_for_name(""), Genre::Pop.profile());
        assert_eq!(profile_for_name("jazz"), Genre::Jazz.profile());
    }
}
