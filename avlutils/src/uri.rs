//! `file://` URI reduction
//!
//! Arguments arriving from drag-and-drop or the command line are often
//! `file://` URIs. The playlist classifier wants plain local paths so that
//! existence checks and directory scans work; everything else (http, rtsp,
//! mailto, malformed strings) must pass through untouched.

use percent_encoding::percent_decode_str;
use url::Url;

/// Reduces a `file://` URI to a plain filesystem path.
///
/// Returns the input unchanged when it is not a reducible local-file URI:
/// - any scheme other than `file`
/// - a parse failure
/// - a non-empty host other than `localhost` / `127.0.0.1` (remote-share
///   semantics are not guessed on Unix platforms)
///
/// The path component is percent-decoded.
pub fn reduce_file_uri(input: &str) -> String {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => return input.to_string(),
    };

    if url.scheme() != "file" {
        return input.to_string();
    }

    let host = url.host_str().unwrap_or("");
    let host_is_local = host.is_empty() || host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1";

    let decoded = percent_decode_str(url.path())
        .decode_utf8_lossy()
        .to_string();

    adapt_path(&decoded, host, host_is_local, input)
}

#[cfg(not(windows))]
fn adapt_path(decoded: &str, _host: &str, host_is_local: bool, input: &str) -> String {
    if !host_is_local {
        // Remote host: not reducible, hand the URI back as-is.
        return input.to_string();
    }
    decoded.to_string()
}

/// Windows adaptation. The UNC branch has never been exercised against a
/// real share; treat it as low-confidence.
#[cfg(windows)]
fn adapt_path(decoded: &str, host: &str, host_is_local: bool, _input: &str) -> String {
    let backslashed = decoded.replace('/', "\\");

    if !host_is_local {
        return format!("\\\\{}{}", host, backslashed);
    }

    // "/C:/dir/file" -> "C:/dir/file" before slash conversion.
    let bytes = decoded.as_bytes();
    if bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':'
    {
        return decoded[1..].replace('/', "\\");
    }

    backslashed
}
