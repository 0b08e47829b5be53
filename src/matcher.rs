//! Organization name matching.

use ahash::HashMap;
use regex::{Regex, RegexBuilder};

use crate::{Asn, Record, Result};

/// Matches dataset records by organization name.
///
/// The pattern is a case-insensitive regular expression searched anywhere in
/// the organization field, so a plain company name works as a substring
/// search.
///
/// # Examples
/// ```
/// use bgpeepr::{Matcher, Record};
///
/// let records = vec![Record::new("1.0.0.0", "1.0.0.3", "100", "US", "ACME Inc")];
/// let matches = Matcher::new("acme").unwrap().find(&records);
/// assert_eq!(matches.get("100"), Some("ACME Inc"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile a matcher for `pattern`.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Get the source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Check an organization string against the pattern.
    pub fn is_match(&self, organization: &str) -> bool {
        self.regex.is_match(organization)
    }

    /// Collect the ASNs whose organization matches.
    ///
    /// When an ASN matches on several records the organization text of the
    /// last one is kept.
    pub fn find<'a, I>(&self, records: I) -> AsnMatches
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut matches = AsnMatches::new();
        for record in records {
            if self.is_match(&record.organization) {
                matches.insert(record.asn.clone(), record.organization.clone());
            }
        }

        log::debug!(
            "Pattern {:?} matched {} ASNs",
            self.pattern(),
            matches.len()
        );
        matches
    }
}

/// ASN to organization map in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AsnMatches {
    entries: Vec<(Asn, String)>,
    index: HashMap<Asn, usize>,
}

impl PartialEq for AsnMatches {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AsnMatches {}

impl AsnMatches {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `organization` with `asn`.
    ///
    /// An existing ASN keeps its position and gets the new text.
    pub fn insert(&mut self, asn: Asn, organization: String) {
        match self.index.get(&asn) {
            Some(&pos) => self.entries[pos].1 = organization,
            None => {
                self.index.insert(asn.clone(), self.entries.len());
                self.entries.push((asn, organization));
            }
        }
    }

    /// Get the organization for an ASN.
    pub fn get(&self, asn: &str) -> Option<&str> {
        self.index
            .get(asn)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Check if an ASN matched.
    pub fn contains(&self, asn: &str) -> bool {
        self.index.contains_key(asn)
    }

    /// Iterate `(asn, organization)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Asn, &str)> {
        self.entries.iter().map(|(asn, org)| (asn, org.as_str()))
    }

    /// Iterate the matched ASNs in first-seen order.
    pub fn asns(&self) -> impl Iterator<Item = &Asn> {
        self.entries.iter().map(|(asn, _)| asn)
    }

    /// Get the number of matched ASNs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
