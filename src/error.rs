//! Error types for request parsing, export and the HTTP mode

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Genre name outside the closed genre set
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    /// Analysis mode other than genre, artist or trend
    #[error("Unknown analysis mode: {0}")]
    UnknownMode(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown dataset variant: {0}")]
    UnknownVariant(String),

    /// Popularity floor must lie in 0..=100
    #[error("Popularity threshold out of range: {0} (expected 0-100)")]
    PopularityOutOfRange(i64),

    /// Chart year whose window labels fall outside the calendar
    #[error("Chart year out of range: {0} (expected 1-9999)")]
    ChartYearOutOfRange(i32),

    #[error("Malformed query: {0}")]
    Query(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by caller input rather than the host
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownGenre(_)
                | Error::UnknownMode(_)
                | Error::UnknownColumn(_)
                | Error::UnknownVariant(_)
                | Error::PopularityOutOfRange(_)
                | Error::ChartYearOutOfRange(_)
                | Error::Query(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::UnknownGenre("Polka".into()).to_string(), "Unknown genre: Polka");
        assert_eq!(
            Error::PopularityOutOfRange(-5).to_string(),
            "Popularity threshold out of range: -5 (expected 0-100)"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::UnknownMode("decade".into()).is_client_error());
        assert!(Error::PopularityOutOfRange(101).is_client_error());
        assert!(Error::ChartYearOutOfRange(300_000).is_client_error());
        assert!(!Error::Server("bind failed".into()).is_client_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!Error::from(io).is_client_error());
    }
}
