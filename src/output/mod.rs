//! Rendering and export of lookup results.
//!
//! A [`Report`] joins the matched ASNs with the prefix sets that were
//! collapsed for them, and is consumed by the JSON, CSV and console sinks.

pub mod console;
pub mod csv;
pub mod json;

pub use console::Console;

use serde::Serialize;

use crate::config::IpVersion;
use crate::{AsnMatches, PrefixSet};

/// One matched ASN as written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsnEntry {
    pub asn: String,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_prefixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_prefixes: Option<Vec<String>>,
}

/// One flat row as written to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "ASN")]
    pub asn: String,
    #[serde(rename = "Organization")]
    pub organization: String,
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "IP Version")]
    pub ip_version: String,
}

/// Results of one lookup.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    matches: &'a AsnMatches,
    v4: Option<&'a PrefixSet>,
    v6: Option<&'a PrefixSet>,
}

impl<'a> Report<'a> {
    /// Create a report with matches only.
    pub fn new(matches: &'a AsnMatches) -> Self {
        Self {
            matches,
            v4: None,
            v6: None,
        }
    }

    /// Attach the IPv4 prefixes.
    pub fn with_v4(mut self, prefixes: &'a PrefixSet) -> Self {
        self.v4 = Some(prefixes);
        self
    }

    /// Attach the IPv6 prefixes.
    pub fn with_v6(mut self, prefixes: &'a PrefixSet) -> Self {
        self.v6 = Some(prefixes);
        self
    }

    /// Get the prefixes of one version, if they were collapsed.
    pub fn prefixes(&self, version: IpVersion) -> Option<&'a PrefixSet> {
        match version {
            IpVersion::V4 => self.v4,
            IpVersion::V6 => self.v6,
        }
    }

    /// Structured entries, one per ASN in match order.
    pub fn entries(&self) -> Vec<AsnEntry> {
        self.matches
            .iter()
            .map(|(asn, org)| AsnEntry {
                asn: asn.to_string(),
                organization: org.to_string(),
                ipv4_prefixes: self.v4.map(|set| set.sorted_strings(asn.as_str())),
                ipv6_prefixes: self.v6.map(|set| set.sorted_strings(asn.as_str())),
            })
            .collect()
    }

    /// Flat rows: one per (ASN, prefix), or one empty row for an ASN
    /// without any prefix.
    pub fn rows(&self) -> Vec<CsvRow> {
        let mut rows = Vec::new();

        for (asn, org) in self.matches.iter() {
            let row = |prefix: String, version: &str| CsvRow {
                asn: asn.to_string(),
                organization: org.to_string(),
                prefix,
                ip_version: version.to_string(),
            };

            let before = rows.len();
            for version in [IpVersion::V4, IpVersion::V6] {
                if let Some(set) = self.prefixes(version) {
                    rows.extend(
                        set.sorted_strings(asn.as_str())
                            .into_iter()
                            .map(|prefix| row(prefix, version.label())),
                    );
                }
            }

            if rows.len() == before {
                rows.push(row(String::new(), ""));
            }
        }

        rows
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{collapse, Matcher, Record};

    pub(crate) fn sample_records() -> Vec<Record> {
        vec![
            Record::new("1.0.0.0", "1.0.0.3", "100", "US", "ACME Inc"),
            Record::new("2.0.0.0", "2.0.0.255", "200", "US", "Acme Widgets"),
            Record::new("bad", "2.0.1.255", "300", "US", "ACME Labs"),
            Record::new("2001:db8::", "2001:db8::ffff", "100", "US", "ACME Inc"),
        ]
    }

    #[test]
    fn test_entries_without_prefixes() {
        let matches = Matcher::new("acme").unwrap().find(&sample_records());
        let entries = Report::new(&matches).entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].asn, "100");
        assert_eq!(entries[0].organization, "ACME Inc");
        assert!(entries[0].ipv4_prefixes.is_none());
        assert!(entries[0].ipv6_prefixes.is_none());
    }

    #[test]
    fn test_entries_with_prefixes() {
        let records = sample_records();
        let matches = Matcher::new("acme").unwrap().find(&records);
        let v4 = collapse(&records[..3], matches.asns());
        let v6 = collapse(&records[3..], matches.asns());
        let entries = Report::new(&matches).with_v4(&v4).with_v6(&v6).entries();

        assert_eq!(entries[0].ipv4_prefixes, Some(vec!["1.0.0.0/30".to_string()]));
        assert_eq!(entries[0].ipv6_prefixes, Some(vec!["2001:db8::/112".to_string()]));
        assert_eq!(entries[2].ipv4_prefixes, Some(vec![]));
    }

    #[test]
    fn test_rows() {
        let records = sample_records();
        let matches = Matcher::new("acme").unwrap().find(&records);
        let v4 = collapse(&records[..3], matches.asns());
        let v6 = collapse(&records[3..], matches.asns());
        let rows = Report::new(&matches).with_v4(&v4).with_v6(&v6).rows();

        let flat: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.asn.as_str(), r.prefix.as_str(), r.ip_version.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("100", "1.0.0.0/30", "IPv4"),
                ("100", "2001:db8::/112", "IPv6"),
                ("200", "2.0.0.0/24", "IPv4"),
                ("300", "", ""),
            ]
        );
    }

    #[test]
    fn test_rows_without_prefixes() {
        let matches = Matcher::new("widgets").unwrap().find(&sample_records());
        let rows = Report::new(&matches).rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].organization, "Acme Widgets");
        assert!(rows[0].prefix.is_empty());
        assert!(rows[0].ip_version.is_empty());
    }
}
