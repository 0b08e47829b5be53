//! IPtoASN dataset records.
//!
//! The dataset is tab-separated text, one range per line:
//!
//! ```text
//! range_start  range_end  asn  country_code  organization
//! 1.0.0.0      1.0.0.255  13335  US          CLOUDFLARENET
//! ```

use std::io::BufRead;

use crate::{Asn, Result};

/// Minimum number of tab-separated fields in a usable line.
pub const MIN_FIELDS: usize = 5;

/// A single line of the dataset.
///
/// Addresses are kept as written so that a record with a malformed range
/// still takes part in organization matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub range_start: String,
    pub range_end: String,
    pub asn: Asn,
    /// Registry country code. Carried through, not used for lookups.
    pub country_code: String,
    pub organization: String,
}

impl Record {
    /// Build a record from its fields.
    pub fn new(
        range_start: impl Into<String>,
        range_end: impl Into<String>,
        asn: impl Into<Asn>,
        country_code: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            range_start: range_start.into(),
            range_end: range_end.into(),
            asn: asn.into(),
            country_code: country_code.into(),
            organization: organization.into(),
        }
    }

    /// Parse one dataset line.
    ///
    /// Returns `None` for lines with fewer than [`MIN_FIELDS`] fields.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            range_start: fields[0].to_string(),
            range_end: fields[1].to_string(),
            asn: Asn::new(fields[2]),
            country_code: fields[3].to_string(),
            organization: fields[4].to_string(),
        })
    }
}

/// All records of one dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    skipped: usize,
}

impl Dataset {
    /// Read every line of `reader`.
    ///
    /// Byte sequences that are not valid UTF-8 are dropped, and short lines
    /// are counted in [`skipped`](Self::skipped).
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut dataset = Self::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line: String = buf.utf8_chunks().map(|chunk| chunk.valid()).collect();
            if line.trim().is_empty() {
                continue;
            }

            match Record::parse_line(&line) {
                Some(record) => dataset.records.push(record),
                None => dataset.skipped += 1,
            }
        }

        log::debug!(
            "Parsed {} records ({} short lines skipped)",
            dataset.records.len(),
            dataset.skipped
        );

        Ok(dataset)
    }

    /// Get the parsed records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of non-empty lines that had too few fields.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
