//! Argument classifier
//!
//! The player accepts a heterogeneous argument list: files, directories,
//! playlist files, playlist URLs, bare stream URLs. Each argument is
//! classified independently and becomes exactly one group; nothing here
//! raises, an unusable argument simply yields an empty group.

use std::path::Path;

use avlutils::{reduce_file_uri, IdAllocator};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::group::{Group, SourceKind};
use crate::scan::ExtensionFilter;

/// Well-known streaming/download schemes (strict mode).
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?|ftp|mms|rtsp)://\S+$").unwrap());

/// Any scheme at all (permissive mode).
static SCHEME_PERMISSIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+://\S+$").unwrap());

static PLAYLIST_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?|ftp|mms|rtsp)://\S+\.(?i:m3u8?|pls)$").unwrap());

static PLAYLIST_URI_PERMISSIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+://\S+\.(?i:m3u8?|pls)$").unwrap());

/// Playlist file suffix, local names and URIs alike.
pub(crate) static PLAYLIST_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(?:m3u8?|pls)$").unwrap());

/// Options steering classification and the downstream constructors.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Scan directory arguments recursively.
    pub dir_recurse: bool,
    /// Reduce `file://` URIs to plain paths before classification.
    pub file_uri_filter: bool,
    /// Accept any `<scheme>://` URI instead of the well-known schemes only.
    pub uri_filter_permissive: bool,
    /// Extension allow-list for directory scans.
    pub extension_filter: ExtensionFilter,
    /// HTTP proxy for remote playlist fetches.
    pub proxy: Option<String>,
    /// Timeout for remote playlist fetches, in seconds.
    pub fetch_timeout_secs: Option<u64>,
    /// Maximum depth when playlists reference other playlists.
    pub nested_depth_limit: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            dir_recurse: false,
            file_uri_filter: true,
            uri_filter_permissive: false,
            extension_filter: ExtensionFilter::AcceptAll,
            proxy: None,
            fetch_timeout_secs: None,
            nested_depth_limit: 16,
        }
    }
}

impl ClassifyOptions {
    fn playlist_uri_re(&self) -> &'static Regex {
        if self.uri_filter_permissive {
            &PLAYLIST_URI_PERMISSIVE_RE
        } else {
            &PLAYLIST_URI_RE
        }
    }

    fn scheme_re(&self) -> &'static Regex {
        if self.uri_filter_permissive {
            &SCHEME_PERMISSIVE_RE
        } else {
            &SCHEME_RE
        }
    }
}

/// Classifies one argument into one group.
///
/// Dispatch order: existing directory, playlist URI, bare URI, local
/// playlist file, other local file, then the empty-group fallback for
/// anything unusable.
pub fn classify_one(arg: &str, opts: &ClassifyOptions, ids: &IdAllocator) -> Group {
    let reduced;
    let arg = if opts.file_uri_filter {
        reduced = reduce_file_uri(arg);
        reduced.as_str()
    } else {
        arg
    };

    let path = Path::new(arg);
    let is_file = path.is_file();

    if path.is_dir() {
        debug!("Classified as directory: {}", arg);
        return Group::from_directory(path, opts.dir_recurse, &opts.extension_filter, ids);
    }

    if !is_file && opts.playlist_uri_re().is_match(arg) {
        debug!("Classified as playlist URI: {}", arg);
        return Group::from_uri(arg, opts.proxy.as_deref(), opts.fetch_timeout_secs, ids);
    }

    if !is_file && opts.scheme_re().is_match(arg) {
        debug!("Classified as literal URI: {}", arg);
        return Group::from_literals(&[arg], ids);
    }

    if is_file && PLAYLIST_SUFFIX_RE.is_match(arg) {
        debug!("Classified as playlist file: {}", arg);
        return Group::from_playlist_file(path, ids);
    }

    if is_file {
        debug!("Classified as literal file: {}", arg);
        return Group::from_literals(&[arg], ids);
    }

    // Nothing usable: an explicit empty group, never an error.
    debug!("Nothing usable in argument: {}", arg);
    Group::new(SourceKind::Literal, ids)
}

/// Classifies every argument independently, one group per argument.
pub fn classify_args<S: AsRef<str>>(
    args: &[S],
    opts: &ClassifyOptions,
    ids: &IdAllocator,
) -> Vec<Group> {
    args.iter()
        .map(|a| classify_one(a.as_ref(), opts, ids))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_patterns() {
        assert!(SCHEME_RE.is_match("http://x/y.mp3"));
        assert!(SCHEME_RE.is_match("rtsp://host/stream"));
        assert!(!SCHEME_RE.is_match("gopher://x/y"));
        assert!(SCHEME_PERMISSIVE_RE.is_match("gopher://x/y"));
        assert!(!SCHEME_PERMISSIVE_RE.is_match("not a uri"));
    }

    #[test]
    fn test_playlist_uri_patterns() {
        assert!(PLAYLIST_URI_RE.is_match("http://x/y.m3u"));
        assert!(PLAYLIST_URI_RE.is_match("http://x/y.M3U8"));
        assert!(PLAYLIST_URI_RE.is_match("https://x/y.pls"));
        assert!(!PLAYLIST_URI_RE.is_match("http://x/y.mp3"));
        assert!(!PLAYLIST_URI_RE.is_match("gopher://x/y.pls"));
        assert!(PLAYLIST_URI_PERMISSIVE_RE.is_match("gopher://x/y.pls"));
    }

    #[test]
    fn test_suffix_pattern() {
        assert!(PLAYLIST_SUFFIX_RE.is_match("/home/u/list.PLS"));
        assert!(PLAYLIST_SUFFIX_RE.is_match("side.m3u8"));
        assert!(!PLAYLIST_SUFFIX_RE.is_match("song.mp3"));
    }
}
