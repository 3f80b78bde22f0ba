//! Report generation for dashboard results
//!
//! Output formatters for a [`DashboardReport`]:
//!
//! - **HTML**: the dashboard page with D3.js charts and a track table
//! - **JSON**: the full report, machine-readable
//! - **CSV**: the filtered track table, spreadsheet-compatible
//!
//! # Usage
//!
//! ```ignore
//! use tunescope::report;
//!
//! // Automatically picks format based on extension
//! report::generate("dashboard.html", &report)?;  // HTML
//! report::generate("dashboard.json", &report)?;  // JSON
//! report::generate("tracks.csv", &report)?;      // CSV
//! ```

pub mod csv;
pub mod html;
pub mod json;

use crate::dashboard::DashboardReport;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
    Csv,
}

impl Format {
    /// Pick a format from the file extension; anything unrecognised is CSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => Format::Html,
            "json" => Format::Json,
            _ => Format::Csv,
        }
    }
}

/// Write `report` to `path` in the format implied by its extension
pub fn generate<P: AsRef<Path>>(path: P, report: &DashboardReport) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    write(&mut file, Format::from_path(path), report)
}

pub fn write<W: io::Write>(writer: &mut W, format: Format, report: &DashboardReport) -> io::Result<()> {
    match format {
        Format::Html => html::write(writer, report),
        Format::Json => json::write(writer, report),
        Format::Csv => csv::write(writer, &report.tracks, report.variant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardRequest};
    use crate::generator::Generator;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path("out/report.html"), Format::Html);
        assert_eq!(Format::from_path("REPORT.HTM"), Format::Html);
        assert_eq!(Format::from_path("data.json"), Format::Json);
        assert_eq!(Format::from_path("tracks.csv"), Format::Csv);
        assert_eq!(Format::from_path("no_extension"), Format::Csv);
    }

    #[test]
    fn test_generate_writes_each_format() {
        let report = Dashboard::new(Generator::new().with_seed(Some(4))).run(&DashboardRequest::default()).unwrap();
        let dir = std::env::temp_dir().join(format!("tunescope-report-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for name in ["r.html", "r.json", "r.csv"] {
            let path = dir.join(name);
            generate(&path, &report).unwrap();
            let written = std::fs::read_to_string(&path).unwrap();
            assert!(!written.is_empty(), "{} empty", name);
        }

        let csv = std::fs::read_to_string(dir.join("r.csv")).unwrap();
        assert_eq!(csv.lines().count(), report.tracks.len() + 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
