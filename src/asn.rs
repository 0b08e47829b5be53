//! Autonomous System Number identifiers.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// An Autonomous System Number as it appears in the dataset.
///
/// The identifier is kept as text so that values such as `0` (not routed)
/// round-trip exactly into the exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Asn(String);

impl Asn {
    /// Create an ASN from the dataset field, kept exactly as written.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Asn {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Asn {
    fn from(code: &str) -> Self {
        Asn::new(code)
    }
}

impl From<u32> for Asn {
    fn from(number: u32) -> Self {
        Asn(number.to_string())
    }
}
