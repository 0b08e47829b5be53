//! Inclusive address ranges and their merging.

use std::net::IpAddr;

use thiserror::Error;

/// Address family of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Width of an address in bits.
    pub fn bits(self) -> u32 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

/// Why a textual range was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// An address did not parse
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Start and end are from different families
    #[error("start and end use different address families")]
    MixedFamilies,

    /// Start is after end
    #[error("range start is after range end")]
    Reversed,
}

/// Inclusive range `[start, end]` of one family.
///
/// IPv4 addresses are widened into the low 32 bits of a `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AddressRange {
    pub family: Family,
    pub start: u128,
    pub end: u128,
}

impl AddressRange {
    /// Build a range from two addresses.
    pub fn new(start: IpAddr, end: IpAddr) -> Result<Self, RangeError> {
        let (family, start, end) = match (start, end) {
            (IpAddr::V4(s), IpAddr::V4(e)) => (Family::V4, u32::from(s) as u128, u32::from(e) as u128),
            (IpAddr::V6(s), IpAddr::V6(e)) => (Family::V6, u128::from(s), u128::from(e)),
            _ => return Err(RangeError::MixedFamilies),
        };

        if start > end {
            return Err(RangeError::Reversed);
        }

        Ok(Self { family, start, end })
    }

    /// Parse a range from the textual start and end addresses.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<IpAddr>()
                .map_err(|_| RangeError::InvalidAddress(s.to_string()))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

/// Merge overlapping and adjacent ranges of one family.
///
/// The output is sorted by start address and no two output ranges touch.
pub fn merge(mut ranges: Vec<(u128, u128)>) -> Vec<(u128, u128)> {
    ranges.sort_unstable();

    let mut merged: Vec<(u128, u128)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => {
                if end > last.1 {
                    last.1 = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v4_range() {
        let range = AddressRange::parse("10.0.0.0", "10.0.0.255").unwrap();
        assert_eq!(range.family, Family::V4);
        assert_eq!(range.start, 0x0a00_0000);
        assert_eq!(range.end, 0x0a00_00ff);
    }

    #[test]
    fn test_parse_v6_range() {
        let range = AddressRange::parse("2001:db8::", "2001:db8::ffff").unwrap();
        assert_eq!(range.family, Family::V6);
        assert_eq!(range.end - range.start, 0xffff);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            AddressRange::parse("10.0.0.300", "10.0.1.0"),
            Err(RangeError::InvalidAddress("10.0.0.300".to_string()))
        );
        assert_eq!(
            AddressRange::parse("10.0.0.0", "::1"),
            Err(RangeError::MixedFamilies)
        );
        assert_eq!(
            AddressRange::parse("10.0.0.9", "10.0.0.1"),
            Err(RangeError::Reversed)
        );
    }

    #[test]
    fn test_merge_adjacent() {
        assert_eq!(merge(vec![(2, 3), (0, 1)]), vec![(0, 3)]);
    }

    #[test]
    fn test_merge_overlapping_and_contained() {
        assert_eq!(
            merge(vec![(10, 20), (15, 30), (12, 13), (40, 50)]),
            vec![(10, 30), (40, 50)]
        );
    }

    #[test]
    fn test_merge_keeps_gaps() {
        assert_eq!(merge(vec![(0, 1), (3, 4)]), vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn test_merge_at_top_of_space() {
        assert_eq!(
            merge(vec![(u128::MAX - 1, u128::MAX), (0, u128::MAX)]),
            vec![(0, u128::MAX)]
        );
    }
}
