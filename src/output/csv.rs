//! CSV export.
//!
//! Rows end with CRLF and fields are quoted only when needed.

use std::io::Write;
use std::path::Path;

use super::Report;
use crate::Result;

/// Header row of the CSV export.
pub const HEADERS: [&str; 4] = ["ASN", "Organization", "Prefix", "IP Version"];

/// Write the report as CSV, one row per (ASN, prefix).
pub fn write_csv<W: Write>(writer: W, report: &Report<'_>) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADERS)?;
    for row in report.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report to a CSV file.
pub fn save_csv(path: impl AsRef<Path>, report: &Report<'_>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(file, report)?;
    log::debug!("Wrote CSV report to {:?}", path.as_ref());
    Ok(())
}
