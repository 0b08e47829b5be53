//! Dataset sources.
//!
//! A dataset comes either from a URL or from a local file, and may be gzip
//! compressed in both cases. Compression is detected from the content, not
//! the file name.
//!
//! Downloads are spooled into an anonymous temporary file which the OS
//! removes as soon as the returned reader is dropped.

use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::Dataset;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Download over HTTP(S)
    Remote { url: String, timeout: Duration },
    /// Read from disk
    Local(PathBuf),
}

impl DataSource {
    /// Create a remote source.
    pub fn remote(url: &str, timeout: Duration) -> Self {
        DataSource::Remote {
            url: url.to_string(),
            timeout,
        }
    }

    /// Create a local file source.
    pub fn local(path: impl AsRef<Path>) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Check if this source needs a download.
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Remote { .. })
    }

    /// Human readable location.
    pub fn location(&self) -> String {
        match self {
            DataSource::Remote { url, .. } => url.clone(),
            DataSource::Local(path) => path.display().to_string(),
        }
    }

    /// Open the source as a line reader, decompressing if needed.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            DataSource::Remote { url, timeout } => {
                let spool = download(url, *timeout)?;
                decode(BufReader::new(spool))
            }
            DataSource::Local(path) => {
                if !path.is_file() {
                    return Err(Error::LocalFileMissing(path.clone()));
                }
                decode(BufReader::new(File::open(path)?))
            }
        }
    }

    /// Read and parse the whole dataset.
    pub fn load(&self) -> Result<Dataset> {
        log::info!("Loading dataset from {}", self.location());
        let dataset = Dataset::from_reader(self.open()?)?;
        log::info!(
            "Loaded {} records from {}",
            dataset.len(),
            self.location()
        );
        Ok(dataset)
    }
}

/// Download `url` into an anonymous temporary file, rewound to the start.
fn download(url: &str, timeout: Duration) -> Result<File> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();

    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => Error::Download(format!("HTTP error {} for {}", code, url)),
        ureq::Error::Transport(t) => Error::Download(format!("transport error for {}: {}", url, t)),
    })?;

    let mut spool = tempfile::tempfile()?;
    let bytes = io::copy(&mut response.into_reader(), &mut spool)
        .map_err(|e| Error::Download(format!("failed to read response from {}: {}", url, e)))?;
    spool.seek(SeekFrom::Start(0))?;

    log::info!("Downloaded {} bytes from {}", bytes, url);
    Ok(spool)
}

/// Wrap `reader` in a gzip decoder when the content starts with the gzip
/// magic bytes.
fn decode<R: BufRead + 'static>(mut reader: R) -> Result<Box<dyn BufRead>> {
    if is_gzip(reader.fill_buf()?) {
        log::debug!("Dataset is gzip compressed");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Check if data starts like a gzip stream.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= GZIP_MAGIC.len() && data[..GZIP_MAGIC.len()] == GZIP_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};

    fn read_to_string(source: &DataSource) -> String {
        let mut text = String::new();
        source.open().unwrap().read_to_string(&mut text).unwrap();
        text
    }

    const SAMPLE: &str = "1.0.0.0\t1.0.0.255\t13335\tUS\tCLOUDFLARENET\n\
                          1.0.4.0\t1.0.7.255\t38803\tAU\tGTELECOM-AUSTRALIA\n";

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(&gzip(SAMPLE.as_bytes())));
        assert!(!is_gzip(SAMPLE.as_bytes()));
        assert!(!is_gzip(&[0x1f]));
    }

    #[test]
    fn test_local_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip2asn-v4.tsv");
        std::fs::write(&path, SAMPLE).unwrap();

        let source = DataSource::local(&path);
        assert!(!source.is_remote());
        assert_eq!(read_to_string(&source), SAMPLE);
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_local_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip2asn-v4.tsv.gz");
        std::fs::write(&path, gzip(SAMPLE.as_bytes())).unwrap();

        let source = DataSource::local(&path);
        assert_eq!(read_to_string(&source), SAMPLE);
    }

    #[test]
    fn test_gzip_detected_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset");
        std::fs::write(&path, gzip(SAMPLE.as_bytes())).unwrap();

        let dataset = DataSource::local(&path).load().unwrap();
        assert_eq!(dataset.records()[0].organization, "CLOUDFLARENET");
    }

    #[test]
    fn test_local_missing() {
        let source = DataSource::local("/nonexistent/ip2asn-v4.tsv");
        assert!(matches!(source.open(), Err(Error::LocalFileMissing(_))));
    }

    #[test]
    fn test_local_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        std::fs::write(&path, "").unwrap();

        assert!(DataSource::local(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_remote_unreachable() {
        let source = DataSource::remote("http://127.0.0.1:9/ip2asn-v4.tsv.gz", Duration::from_secs(2));
        assert!(source.is_remote());
        assert!(matches!(source.load(), Err(Error::Download(_))));
    }

    #[test]
    fn test_location() {
        assert_eq!(
            DataSource::remote("https://example.com/v4.gz", Duration::from_secs(1)).location(),
            "https://example.com/v4.gz"
        );
        assert_eq!(DataSource::local("/data/v4.tsv").location(), "/data/v4.tsv");
    }
}
