//! Line-oriented readers for local files and HTTP(S) URIs
//!
//! Playlist parsing works on ordered text lines regardless of where the
//! bytes came from. Both readers decode leniently (invalid UTF-8 is
//! replaced, not rejected) because legacy playlist files are frequently
//! Latin-1 encoded.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

/// Default timeout for a URI fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Cap on fetched playlist bodies. A playlist measured in megabytes is not
/// a playlist.
const MAX_FETCH_BYTES: u64 = 8 * 1024 * 1024;

/// Errors from the line readers.
#[derive(Debug, thiserror::Error)]
pub enum LineReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Invalid proxy URI: {0}")]
    InvalidProxy(String),
}

/// Result alias for the line readers.
pub type Result<T> = std::result::Result<T, LineReadError>;

/// Reads a local file as ordered text lines.
///
/// Line terminators (`\n`, `\r\n`) are stripped; the final line does not
/// need a terminator. Invalid UTF-8 sequences are replaced.
pub fn read_file_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    Ok(split_lines(&bytes))
}

/// Fetches a URI and returns the body as ordered text lines.
///
/// Blocking call with a global timeout and an optional HTTP proxy
/// (`http://host:port` style). Only the first 8 MiB of the body are read.
pub fn read_uri_lines(
    uri: &str,
    proxy: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<Vec<String>> {
    let agent = build_agent(proxy, timeout_secs)?;

    debug!("Fetching playlist from {}", uri);
    let response = agent.get(uri).call()?;
    let (_parts, body) = response.into_parts();

    let mut bytes = Vec::new();
    body.into_reader()
        .take(MAX_FETCH_BYTES)
        .read_to_end(&mut bytes)?;

    Ok(split_lines(&bytes))
}

/// Builds a blocking HTTP agent with timeout and optional proxy.
fn build_agent(proxy: Option<&str>, timeout_secs: Option<u64>) -> Result<Agent> {
    let timeout = timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

    let mut builder =
        Agent::config_builder().timeout_global(Some(Duration::from_secs(timeout)));

    if let Some(proxy_uri) = proxy {
        let proxy = ureq::Proxy::new(proxy_uri)
            .map_err(|e| LineReadError::InvalidProxy(format!("{}: {}", proxy_uri, e)))?;
        builder = builder.proxy(Some(proxy));
    }

    Ok(builder.build().into())
}

/// Splits raw bytes into terminator-stripped, lossily decoded lines.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    // A trailing newline yields a phantom empty last element.
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_strips_terminators() {
        let lines = split_lines(b"one\r\ntwo\nthree");
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        let lines = split_lines(b"a\nb\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_split_lines_keeps_interior_blanks() {
        let lines = split_lines(b"a\n\nb\n");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_read_file_lines_missing_file() {
        let err = read_file_lines(Path::new("/no/such/file.pls"));
        assert!(matches!(err, Err(LineReadError::Io(_))));
    }

    #[test]
    fn test_read_file_lines_lossy_decode() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // "café" in Latin-1: the 0xE9 byte is not valid UTF-8.
        std::fs::write(file.path(), b"caf\xe9\ntune.mp3\n").unwrap();
        let lines = read_file_lines(file.path()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "tune.mp3");
        assert!(lines[0].starts_with("caf"));
    }
}
