use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use thiserror::Error;
use tracing::{info, warn};

use crate::table::{clean_cell, ListingTable};

/// Tokens normalized to the missing marker, in addition to the empty string.
const NA_TOKENS: &[&str] = &["NA", "na", "N/A"];

/// Where the listings CSV lives and how to decode it.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub encoding: String,
}

impl SourceConfig {
    pub fn new<P: Into<PathBuf>, E: Into<String>>(path: P, encoding: E) -> Self {
        Self {
            path: path.into(),
            encoding: encoding.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("reading `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload is not validly delimited text.
    #[error("parsing `{}`: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    /// The configured character set label is not recognized.
    #[error("unknown encoding label `{0}`")]
    Encoding(String),
}

/// Read `config.path`, decode it with the configured character set, and parse
/// the result into a [`ListingTable`].
///
/// Decoding is lossy: undecodable bytes become replacement characters with a
/// warning. Structural problems (ragged records, empty or duplicate headers)
/// are fatal `Parse` errors.
#[tracing::instrument(level = "info", skip(config), fields(path = %config.path.display()))]
pub fn load_listings(config: &SourceConfig) -> Result<ListingTable, LoadError> {
    let encoding = Encoding::for_label(config.encoding.as_bytes())
        .ok_or_else(|| LoadError::Encoding(config.encoding.clone()))?;

    let bytes = fs::read(&config.path).map_err(|source| LoadError::Io {
        path: config.path.clone(),
        source,
    })?;

    let (text, actual, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "some bytes did not decode as {}; replaced with U+FFFD",
            actual.name()
        );
    }

    parse_delimited(&config.path, &text)
}

fn parse_delimited(path: &Path, text: &str) -> Result<ListingTable, LoadError> {
    let parse_err = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| parse_err(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(parse_err("no header row".to_string()));
    }
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(parse_err(format!(
                "header at index {} is empty after trimming",
                idx
            )));
        }
    }
    let mut seen: HashSet<&String> = HashSet::new();
    for name in &headers {
        if !seen.insert(name) {
            return Err(parse_err(format!("duplicate header `{}`", name)));
        }
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| parse_err(format!("record {}: {}", idx, e)))?;
        rows.push(record.iter().map(normalize_cell).collect());
    }

    info!(rows = rows.len(), columns = headers.len(), "loaded listings");
    Ok(ListingTable::new(headers, rows))
}

/// Clean the raw cell and collapse the `NA` family to the missing marker.
fn normalize_cell(raw: &str) -> String {
    let v = clean_cell(raw);
    if NA_TOKENS.contains(&v) {
        String::new()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_csv(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn test_load_normalizes_missing_tokens() -> Result<()> {
        init_test_logging();
        let tmp = write_csv(
            "id,price,last_review\n\
             1,120,2019-05-21\n\
             2,NA,\n\
             3,85,N/A\n",
        )?;

        let table = load_listings(&SourceConfig::new(tmp.path(), "utf-8"))?;
        assert_eq!(table.height(), 3);
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows[1][1], "");
        assert_eq!(table.rows[1][2], "");
        assert_eq!(table.rows[2][2], "");
        assert_eq!(table.rows[0][2], "2019-05-21");
        Ok(())
    }

    #[test]
    fn test_load_trims_headers() -> Result<()> {
        init_test_logging();
        let tmp = write_csv(" id , price \n1,100\n")?;
        let table = load_listings(&SourceConfig::new(tmp.path(), "utf-8"))?;
        assert_eq!(table.headers, vec!["id", "price"]);
        Ok(())
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        init_test_logging();
        let err = load_listings(&SourceConfig::new("/no/such/listings.csv", "utf-8")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "got {:?}", err);
    }

    #[test]
    fn test_ragged_records_are_parse_errors() -> Result<()> {
        init_test_logging();
        let tmp = write_csv("id,price\n1,100\n2,100,extra\n")?;
        let err = load_listings(&SourceConfig::new(tmp.path(), "utf-8")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {:?}", err);
        Ok(())
    }

    #[test]
    fn test_duplicate_headers_are_parse_errors() -> Result<()> {
        init_test_logging();
        let tmp = write_csv("id,id\n1,2\n")?;
        let err = load_listings(&SourceConfig::new(tmp.path(), "utf-8")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {:?}", err);
        Ok(())
    }

    #[test]
    fn test_unknown_encoding_label() {
        init_test_logging();
        let err = load_listings(&SourceConfig::new("listings.csv", "not-a-charset")).unwrap_err();
        assert!(matches!(err, LoadError::Encoding(_)), "got {:?}", err);
    }

    #[test]
    fn test_latin1_decoding() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        // "café,100" in latin-1: 0xE9 is not valid UTF-8
        tmp.write_all(b"name,price\ncaf\xe9,100\n")?;
        let table = load_listings(&SourceConfig::new(tmp.path(), "latin1"))?;
        assert_eq!(table.rows[0][0], "caf\u{e9}");
        Ok(())
    }
}
