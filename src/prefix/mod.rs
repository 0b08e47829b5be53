//! Collapsing dataset ranges into CIDR prefixes.
//!
//! The dataset lists an ASN's address space as many `start..=end` rows,
//! which are often adjacent fragments of one allocation. [`collapse`]
//! merges the rows of each requested ASN and re-expresses the result as the
//! smallest set of CIDR blocks covering exactly the same addresses.

mod cidr;
mod range;

pub use cidr::decompose;
pub use range::{merge, AddressRange, Family, RangeError};

use std::collections::BTreeSet;

use ahash::HashMap;
use ipnet::IpNet;

use crate::{Asn, Record};

/// CIDR blocks announced per ASN.
///
/// Every requested ASN has an entry, even when none of its rows produced a
/// block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSet {
    prefixes: HashMap<Asn, BTreeSet<IpNet>>,
}

impl PrefixSet {
    /// Get the blocks for an ASN.
    ///
    /// `None` means the ASN was not requested; an ASN without blocks gets
    /// an empty set.
    pub fn get(&self, asn: &str) -> Option<&BTreeSet<IpNet>> {
        self.prefixes.get(asn)
    }

    /// Get the blocks for an ASN as sorted strings.
    pub fn sorted_strings(&self, asn: &str) -> Vec<String> {
        self.get(asn)
            .map(|set| set.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Check if the ASN was requested.
    pub fn contains(&self, asn: &str) -> bool {
        self.prefixes.contains_key(asn)
    }

    /// Iterate `(asn, blocks)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Asn, &BTreeSet<IpNet>)> {
        self.prefixes.iter()
    }

    /// Number of ASNs in the set.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if no ASN is present.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Total number of blocks across all ASNs.
    pub fn block_count(&self) -> usize {
        self.prefixes.values().map(BTreeSet::len).sum()
    }
}

/// Ranges collected for one ASN, split by family.
#[derive(Debug, Default)]
struct RangeAccumulator {
    v4: Vec<(u128, u128)>,
    v6: Vec<(u128, u128)>,
}

impl RangeAccumulator {
    fn push(&mut self, range: AddressRange) {
        match range.family {
            Family::V4 => self.v4.push((range.start, range.end)),
            Family::V6 => self.v6.push((range.start, range.end)),
        }
    }

    fn into_blocks(self) -> BTreeSet<IpNet> {
        let mut blocks = BTreeSet::new();
        for (family, ranges) in [(Family::V4, self.v4), (Family::V6, self.v6)] {
            for (start, end) in merge(ranges) {
                blocks.extend(
                    decompose(start, end, family)
                        .into_iter()
                        .filter_map(|(network, len)| cidr::to_net(network, len, family)),
                );
            }
        }
        blocks
    }
}

/// Collapse the ranges of the requested ASNs into CIDR blocks.
///
/// Rows of other ASNs are ignored, and rows whose addresses do not form a
/// valid range are skipped.
///
/// # Examples
/// ```
/// use bgpeepr::{collapse, Asn, Record};
///
/// let records = vec![
///     Record::new("10.0.0.0", "10.0.0.1", "100", "US", "ACME Inc"),
///     Record::new("10.0.0.2", "10.0.0.3", "100", "US", "ACME Inc"),
/// ];
/// let prefixes = collapse(&records, [&Asn::new("100")]);
/// assert_eq!(prefixes.sorted_strings("100"), vec!["10.0.0.0/30"]);
/// ```
pub fn collapse<'a, 'b, R, A>(records: R, asns: A) -> PrefixSet
where
    R: IntoIterator<Item = &'a Record>,
    A: IntoIterator<Item = &'b Asn>,
{
    let mut pending: HashMap<Asn, RangeAccumulator> = asns
        .into_iter()
        .map(|asn| (asn.clone(), RangeAccumulator::default()))
        .collect();

    let mut skipped = 0usize;
    for record in records {
        let Some(acc) = pending.get_mut(&record.asn) else {
            continue;
        };

        match AddressRange::parse(&record.range_start, &record.range_end) {
            Ok(range) => acc.push(range),
            Err(e) => {
                skipped += 1;
                log::debug!(
                    "Skipping range {} - {} for AS{}: {}",
                    record.range_start,
                    record.range_end,
                    record.asn,
                    e
                );
            }
        }
    }

    let prefixes: HashMap<Asn, BTreeSet<IpNet>> = pending
        .into_iter()
        .map(|(asn, acc)| (asn, acc.into_blocks()))
        .collect();

    let set = PrefixSet { prefixes };
    log::debug!(
        "Collapsed {} ASNs into {} blocks ({} invalid ranges skipped)",
        set.len(),
        set.block_count(),
        skipped
    );
    set
}
