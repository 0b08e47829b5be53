//! bgpeepr - find the ASNs and IP prefixes of an organization.
//!
//! This crate searches the public IPtoASN dataset for Autonomous Systems
//! whose registered organization name matches a pattern, and turns the
//! dataset's address ranges for those ASNs into minimal CIDR block sets.
//!
//! # Features
//!
//! - **Organization matching**: case-insensitive regular expression search
//! - **Range collapsing**: adjacent and overlapping ranges become the fewest
//!   aligned CIDR blocks, for IPv4 and IPv6
//! - **Remote or local data**: download the dataset or read a local copy,
//!   gzip compressed or not
//! - **Exports**: JSON, CSV and colored console output
//!
//! # Quick Start
//!
//! ```
//! use bgpeepr::{collapse, Dataset, Matcher};
//!
//! let tsv = "1.0.0.0\t1.0.0.1\t100\tUS\tACME Inc\n\
//!            1.0.0.2\t1.0.0.3\t100\tUS\tACME Inc\n\
//!            8.8.8.0\t8.8.8.255\t15169\tUS\tGOOGLE\n";
//! let dataset = Dataset::from_reader(tsv.as_bytes())?;
//!
//! let matches = Matcher::new("acme")?.find(&dataset);
//! assert_eq!(matches.get("100"), Some("ACME Inc"));
//!
//! let prefixes = collapse(&dataset, matches.asns());
//! assert_eq!(prefixes.sorted_strings("100"), vec!["1.0.0.0/30"]);
//! # Ok::<(), bgpeepr::Error>(())
//! ```
//!
//! # Downloading the dataset
//!
//! ```ignore
//! use bgpeepr::{IpVersion, LookupConfig};
//!
//! let config = LookupConfig::default();
//! let dataset = config.source(IpVersion::V4, None).load()?;
//! ```
//!
//! Downloads are spooled into an anonymous temporary file that disappears
//! once the dataset has been read.

mod asn;
mod error;
mod matcher;
mod record;

pub mod config;
pub mod output;
pub mod prefix;
pub mod source;

// Re-export core types
pub use asn::Asn;
pub use error::{Error, Result};
pub use matcher::{AsnMatches, Matcher};
pub use record::{Dataset, Record};

// Re-export prefix collapsing
pub use prefix::{collapse, PrefixSet};

// Re-export configuration and sources
pub use config::{IpVersion, LookupConfig};
pub use source::DataSource;

// Re-export output sinks
pub use output::{AsnEntry, Console, CsvRow, Report};
