//! JSON report output

use crate::dashboard::DashboardReport;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, report: &DashboardReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}
