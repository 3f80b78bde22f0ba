//! Tunescope - synthetic music-chart dashboards
//!
//! Tunescope builds synthetic music-industry datasets in memory, filters and
//! aggregates them, and renders the result as a dashboard.
//!
//! # Overview
//!
//! Two dataset variants exist:
//!
//! 1. **Charts** (structured): every genre, every chart artist of that genre,
//!    four chart windows. Popularity decays with artist rank and window age,
//!    and audio features are drawn around a per-genre profile.
//!
//! 2. **Library** (flat): 100 independent rows against a small artist
//!    directory, with features drawn from fixed ranges.
//!
//! Nothing is cached. Every dashboard request regenerates its base table
//! from a seed, filters it, and derives the grouped tables from the result.
//!
//! # Quick Start
//!
//! ```no_run
//! use tunescope::{AnalysisMode, Dashboard, DashboardRequest, Filter, Generator, Genre, GenreFilter};
//!
//! let dashboard = Dashboard::new(Generator::new().with_seed(Some(7)));
//! let request = DashboardRequest {
//!     filter: Filter::new()
//!         .with_genre(GenreFilter::Only(Genre::Reggaeton))
//!         .with_min_popularity(70),
//!     mode: AnalysisMode::Artist,
//!     ..Default::default()
//! };
//!
//! let report = dashboard.run(&request)?;
//! println!("{} of {} tracks", report.tracks.len(), report.base_rows);
//! println!("Mean popularity: {:?}", report.summary.mean_popularity);
//! # Ok::<(), tunescope::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: genres, feature profiles, title pools, artist directories
//! - [`generator`]: the two dataset strategies
//! - [`analysis`]: filters, group-bys, top-N, correlation
//! - [`dashboard`]: request in, report out
//! - [`report`]: output formatters (HTML, JSON, CSV)
//! - [`serve`]: local interactive mode

pub mod analysis;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod report;
pub mod serve;

pub use analysis::{AnalysisMode, AnalysisView, Column, Filter, GenreFilter, Summary};
pub use catalog::{FeatureProfile, Genre};
pub use dashboard::{Dashboard, DashboardParams, DashboardReport, DashboardRequest};
pub use error::{Error, Result};
pub use generator::{Dataset, Generator, TrackRecord, Variant};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is re-exported from the
    // crate root.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        let _: Genre = Genre::Pop;
        let _: AnalysisMode = AnalysisMode::Trend;
        let _: Variant = Variant::Library;
        let _: GenreFilter = GenreFilter::All;
        let _dashboard = Dashboard::default();
    }

    #[test]
    fn test_end_to_end_charts() {
        let dashboard = Dashboard::new(Generator::new().with_seed(Some(99)));
        let report = dashboard.run(&DashboardRequest::default()).unwrap();
        assert_eq!(report.base_rows, generator::charts::expected_rows());
        assert!(report.summary.mean_popularity.unwrap() >= 60.0);
    }

    #[test]
    fn test_feature_profile_accessible() {
        let profile: &FeatureProfile = Genre::Jazz.profile();
        assert_eq!(profile.tempo, 115);
    }
}
