//! Lookup configuration types.

use std::path::Path;
use std::time::Duration;

use crate::source::DataSource;

/// Default IPv4 dataset location.
pub const DEFAULT_V4_URL: &str =
    "https://github.com/pl-strflt/iptoasn/raw/main/data/ip2asn-v4.tsv.gz";

/// Default IPv6 dataset location.
pub const DEFAULT_V6_URL: &str =
    "https://github.com/pl-strflt/iptoasn/raw/main/data/ip2asn-v6.tsv.gz";

/// Default download timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// IP version of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Get the display label of this version.
    pub fn label(&self) -> &'static str {
        match self {
            IpVersion::V4 => "IPv4",
            IpVersion::V6 => "IPv6",
        }
    }

    /// Get the default dataset URL for this version.
    pub fn default_url(&self) -> &'static str {
        match self {
            IpVersion::V4 => DEFAULT_V4_URL,
            IpVersion::V6 => DEFAULT_V6_URL,
        }
    }
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for a lookup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// IPv4 dataset URL
    pub v4_url: String,
    /// IPv6 dataset URL
    pub v6_url: String,
    /// Download timeout
    pub timeout: Duration,
    /// Whether console output may use ANSI colors
    pub color: bool,
}

impl LookupConfig {
    /// Create a configuration with the default dataset URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the IPv4 dataset URL.
    pub fn with_v4_url(mut self, url: impl Into<String>) -> Self {
        self.v4_url = url.into();
        self
    }

    /// Override the IPv6 dataset URL.
    pub fn with_v6_url(mut self, url: impl Into<String>) -> Self {
        self.v6_url = url.into();
        self
    }

    /// Set the download timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable colored console output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Get the configured URL for a version.
    pub fn url(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.v4_url,
            IpVersion::V6 => &self.v6_url,
        }
    }

    /// Pick the data source for a version.
    ///
    /// A local file takes precedence over the configured URL.
    pub fn source(&self, version: IpVersion, local: Option<&Path>) -> DataSource {
        match local {
            Some(path) => DataSource::local(path),
            None => DataSource::remote(self.url(version), self.timeout),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            v4_url: DEFAULT_V4_URL.to_string(),
            v6_url: DEFAULT_V6_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ip_version() {
        assert_eq!(IpVersion::V4.label(), "IPv4");
        assert_eq!(IpVersion::V6.to_string(), "IPv6");
        assert!(IpVersion::V6.default_url().ends_with("ip2asn-v6.tsv.gz"));
    }

    #[test]
    fn test_default_config() {
        let config = LookupConfig::default();
        assert_eq!(config.url(IpVersion::V4), DEFAULT_V4_URL);
        assert_eq!(config.url(IpVersion::V6), DEFAULT_V6_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.color);
    }

    #[test]
    fn test_builder() {
        let config = LookupConfig::new()
            .with_v4_url("http://mirror/v4.tsv.gz")
            .with_timeout(Duration::from_secs(5))
            .with_color(false);

        assert_eq!(config.url(IpVersion::V4), "http://mirror/v4.tsv.gz");
        assert_eq!(config.url(IpVersion::V6), DEFAULT_V6_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.color);
    }

    #[test]
    fn test_source_selection() {
        let config = LookupConfig::new().with_timeout(Duration::from_secs(9));

        assert_eq!(
            config.source(IpVersion::V4, Some(Path::new("/tmp/v4.tsv"))),
            DataSource::Local(PathBuf::from("/tmp/v4.tsv"))
        );
        assert_eq!(
            config.source(IpVersion::V6, None),
            DataSource::Remote {
                url: DEFAULT_V6_URL.to_string(),
                timeout: Duration::from_secs(9),
            }
        );
    }
}
