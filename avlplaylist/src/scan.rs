//! Directory scanning for playable files
//!
//! Scans are deterministic: entries of every directory are sorted by name
//! before files are emitted and subdirectories are descended. Filtering is
//! a case-insensitive extension allow-list with an accept-all sentinel.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Extension filter for directory scans.
///
/// Extensions are stored lowercase without the leading dot. The `"*"`
/// sentinel anywhere in a source list selects [`ExtensionFilter::AcceptAll`].
#[derive(Debug, Clone)]
pub enum ExtensionFilter {
    /// Every file matches.
    AcceptAll,
    /// Only files with one of these suffixes match.
    Allow(Vec<String>),
}

impl ExtensionFilter {
    /// Builds a filter from a list of extensions; `"*"` selects accept-all.
    pub fn from_list<S: AsRef<str>>(extensions: &[S]) -> Self {
        let mut allowed = Vec::with_capacity(extensions.len());
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if ext == "*" {
                return Self::AcceptAll;
            }
            if !ext.is_empty() {
                allowed.push(ext);
            }
        }
        Self::Allow(allowed)
    }

    /// Case-insensitive suffix match against a file name.
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::AcceptAll => true,
            Self::Allow(allowed) => {
                let lower = file_name.to_lowercase();
                allowed
                    .iter()
                    .any(|ext| lower.ends_with(&format!(".{}", ext)))
            }
        }
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::AcceptAll
    }
}

/// Collects matching files under `dir`, sorted per directory.
///
/// Non-recursive scans list immediate files only. Recursive scans emit the
/// current directory's files first, then descend into each subdirectory in
/// name order. An unreadable subdirectory is reported and skipped; only the
/// top-level directory being unreadable is an error.
pub(crate) fn collect_files(
    dir: &Path,
    recurse: bool,
    filter: &ExtensionFilter,
) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk(dir, recurse, filter, true, &mut out)?;
    Ok(out)
}

fn walk(
    dir: &Path,
    recurse: bool,
    filter: &ExtensionFilter,
    top_level: bool,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if top_level => return Err(e),
        Err(e) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.is_file() {
            let name = entry.file_name().to_string_lossy().to_string();
            if filter.matches(&name) {
                files.push(path);
            }
        }
    }

    files.sort();
    out.extend(files);

    if recurse {
        subdirs.sort();
        for sub in subdirs {
            walk(&sub, recurse, filter, false, out)?;
        }
    }

    Ok(())
}
