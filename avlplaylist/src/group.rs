//! Group : an ordered collection of resources with a navigation cursor
//!
//! Groups are what the player's queue and window title work from: a
//! description, the ordered resources, and a "currently playing" cursor.
//! The origin of a group (literal arguments, playlist file, directory scan,
//! remote playlist) is a tagged variant, not a subclass; the only thing it
//! changes is the default description and how the group reports itself.

use std::path::{Path, PathBuf};

use avlutils::{read_file_lines, read_uri_lines, IdAllocator};
use serde::Serialize;
use tracing::{debug, warn};

use crate::detect::parse_lines;
use crate::item::Resource;
use crate::scan::{collect_files, ExtensionFilter};
use crate::{pls, Result};

/// Where a group came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SourceKind {
    /// Built from literal command-line / drag-and-drop arguments.
    Literal,
    /// Parsed from a local playlist file.
    File { path: PathBuf },
    /// Produced by scanning a directory.
    Directory { path: PathBuf },
    /// Fetched from a URI and parsed.
    Uri { uri: String },
}

impl SourceKind {
    /// Default description for groups of this origin.
    pub fn default_description(&self) -> String {
        match self {
            Self::Literal => "A/V list".to_string(),
            Self::File { path } => match path.file_name() {
                Some(name) => format!("A/V playlist: {}", name.to_string_lossy()),
                None => "A/V playlist file".to_string(),
            },
            Self::Directory { path } => format!("A/V directory: {}", path.display()),
            Self::Uri { uri } => format!("A/V remote playlist: {}", uri),
        }
    }
}

/// An ordered sequence of resources plus description and cursor.
///
/// Invariant: the cursor is `None` or a valid index. Navigation never wraps
/// and is a silent no-op at the boundaries and on empty groups.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    resources: Vec<Resource>,
    description: String,
    user_set_description: bool,
    current: Option<usize>,
    unique_id: String,
    kind: SourceKind,
}

impl Group {
    /// Creates an empty group with the kind's default description.
    pub fn new(kind: SourceKind, ids: &IdAllocator) -> Self {
        Self {
            resources: Vec::new(),
            description: kind.default_description(),
            user_set_description: false,
            current: None,
            unique_id: ids.allocate(),
            kind,
        }
    }

    /// Creates a group from already-built resources; the cursor starts on
    /// the first entry when there is one.
    pub fn from_resources(kind: SourceKind, resources: Vec<Resource>, ids: &IdAllocator) -> Self {
        let current = if resources.is_empty() { None } else { Some(0) };
        Self {
            description: kind.default_description(),
            user_set_description: false,
            resources,
            current,
            unique_id: ids.allocate(),
            kind,
        }
    }

    // ===== Constructors by origin =====

    /// One group holding the given literal arguments as bare resources.
    pub fn from_literals<S: AsRef<str>>(args: &[S], ids: &IdAllocator) -> Self {
        let resources = args
            .iter()
            .map(|a| Resource::playable(a.as_ref(), ids))
            .collect();
        Self::from_resources(SourceKind::Literal, resources, ids)
    }

    /// Parses a local playlist file (PLS, extended M3U, or plain list).
    ///
    /// An unreadable file yields a single-placeholder group, never an error.
    pub fn from_playlist_file(path: &Path, ids: &IdAllocator) -> Self {
        let kind = SourceKind::File {
            path: path.to_path_buf(),
        };
        match read_file_lines(path) {
            Ok(lines) => {
                let parsed = parse_lines(&lines, ids);
                let mut group = Self::from_resources(kind, parsed.resources, ids);
                if let Some(desc) = parsed.description {
                    group.set_description(desc);
                }
                group
            }
            Err(e) => {
                warn!("Cannot read playlist {}: {}", path.display(), e);
                Self::placeholder(kind, path.display().to_string(), e.to_string(), ids)
            }
        }
    }

    /// Scans a directory for playable files.
    ///
    /// "No suitable files" and "unreadable directory" both yield a
    /// single-placeholder group describing the condition.
    pub fn from_directory(
        path: &Path,
        recurse: bool,
        filter: &ExtensionFilter,
        ids: &IdAllocator,
    ) -> Self {
        let kind = SourceKind::Directory {
            path: path.to_path_buf(),
        };
        match collect_files(path, recurse, filter) {
            Ok(files) if files.is_empty() => {
                debug!("No suitable files under {}", path.display());
                Self::placeholder(
                    kind,
                    path.display().to_string(),
                    "no suitable A/V files found".to_string(),
                    ids,
                )
            }
            Ok(files) => {
                let resources = files
                    .into_iter()
                    .map(|f| {
                        let name = f
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| f.display().to_string());
                        Resource::with_details(
                            Some(name),
                            f.display().to_string(),
                            crate::item::UNKNOWN_LENGTH_MS,
                            "",
                            ids,
                        )
                    })
                    .collect();
                Self::from_resources(kind, resources, ids)
            }
            Err(e) => {
                warn!("Cannot scan directory {}: {}", path.display(), e);
                Self::placeholder(kind, path.display().to_string(), e.to_string(), ids)
            }
        }
    }

    /// Fetches a URI and parses the body as playlist text.
    ///
    /// Network and IO errors yield a single-placeholder group.
    pub fn from_uri(
        uri: &str,
        proxy: Option<&str>,
        timeout_secs: Option<u64>,
        ids: &IdAllocator,
    ) -> Self {
        let kind = SourceKind::Uri {
            uri: uri.to_string(),
        };
        match read_uri_lines(uri, proxy, timeout_secs) {
            Ok(lines) => {
                let parsed = parse_lines(&lines, ids);
                let mut group = Self::from_resources(kind, parsed.resources, ids);
                if let Some(desc) = parsed.description {
                    group.set_description(desc);
                }
                group
            }
            Err(e) => {
                warn!("Cannot fetch playlist {}: {}", uri, e);
                Self::placeholder(kind, uri.to_string(), e.to_string(), ids)
            }
        }
    }

    fn placeholder(
        kind: SourceKind,
        description: String,
        error: String,
        ids: &IdAllocator,
    ) -> Self {
        let placeholder = Resource::unresolved(description, error, ids);
        Self::from_resources(kind, vec![placeholder], ids)
    }

    // ===== Accessors =====

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True when the description was set by a user or a `ListDesc:` comment
    /// rather than defaulted from the origin.
    pub fn has_user_description(&self) -> bool {
        self.user_set_description
    }

    /// Sets a meaningful description (marks it user-set for round-tripping).
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
        self.user_set_description = true;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut [Resource] {
        &mut self.resources
    }

    /// Replaces the whole sequence, resetting the cursor to keep it valid.
    pub(crate) fn set_resources(&mut self, resources: Vec<Resource>) {
        self.current = if resources.is_empty() { None } else { Some(0) };
        self.resources = resources;
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Appends a resource; the cursor moves to it when the group was empty.
    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
        if self.current.is_none() {
            self.current = Some(self.resources.len() - 1);
        }
    }

    // ===== Cursor navigation =====

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_resource(&self) -> Option<&Resource> {
        self.current.and_then(|i| self.resources.get(i))
    }

    /// Moves the cursor to `index`; rejected (returns false) when out of
    /// bounds, keeping the cursor invariant.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.resources.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn can_next(&self) -> bool {
        match self.current {
            Some(i) => i + 1 < self.resources.len(),
            None => false,
        }
    }

    pub fn can_prev(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    /// Advances the cursor; no-op at the end (no wraparound).
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.current = self.current.map(|i| i + 1);
            true
        } else {
            false
        }
    }

    /// Backs the cursor up; no-op at the start (no wraparound).
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.current = self.current.map(|i| i - 1);
            true
        } else {
            false
        }
    }

    // ===== Persistence =====

    /// Writes the group as PLS text to `path`.
    ///
    /// Fails without a usable file when the group has no named resources;
    /// the caller must treat the group as not saved in that case.
    pub fn save_to_path(&self, path: &Path, include_description: bool) -> Result<usize> {
        pls::save_pls(self, path, include_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(n: usize) -> Group {
        let ids = IdAllocator::new();
        let names: Vec<String> = (0..n).map(|i| format!("track{}.mp3", i)).collect();
        Group::from_literals(&names, &ids)
    }

    #[test]
    fn test_cursor_starts_at_zero() {
        let g = group_of(3);
        assert_eq!(g.current_index(), Some(0));
        assert_eq!(g.current_resource().unwrap().description(), "track0.mp3");
    }

    #[test]
    fn test_navigation_no_wraparound() {
        let mut g = group_of(2);
        assert!(!g.prev(), "prev at start must be a no-op");
        assert!(g.next());
        assert_eq!(g.current_index(), Some(1));
        assert!(!g.next(), "next at end must be a no-op");
        assert_eq!(g.current_index(), Some(1));
        assert!(g.prev());
        assert_eq!(g.current_index(), Some(0));
    }

    #[test]
    fn test_empty_group_navigation_is_noop() {
        let ids = IdAllocator::new();
        let mut g = Group::new(SourceKind::Literal, &ids);
        assert_eq!(g.current_index(), None);
        assert!(!g.can_next());
        assert!(!g.can_prev());
        assert!(!g.next());
        assert!(!g.prev());
        assert!(!g.set_current(0));
    }

    #[test]
    fn test_set_current_validates() {
        let mut g = group_of(3);
        assert!(g.set_current(2));
        assert!(!g.set_current(3));
        assert_eq!(g.current_index(), Some(2));
    }

    #[test]
    fn test_push_moves_cursor_when_empty() {
        let ids = IdAllocator::new();
        let mut g = Group::new(SourceKind::Literal, &ids);
        g.push(Resource::playable("a.mp3", &ids));
        assert_eq!(g.current_index(), Some(0));
        g.push(Resource::playable("b.mp3", &ids));
        assert_eq!(g.current_index(), Some(0));
    }

    #[test]
    fn test_description_flag() {
        let mut g = group_of(1);
        assert!(!g.has_user_description());
        assert_eq!(g.description(), "A/V list");
        g.set_description("Morning mix");
        assert!(g.has_user_description());
        assert_eq!(g.description(), "Morning mix");
    }

    #[test]
    fn test_missing_file_yields_placeholder() {
        let ids = IdAllocator::new();
        let g = Group::from_playlist_file(Path::new("/no/such/list.pls"), &ids);
        assert_eq!(g.len(), 1);
        assert!(g.resources()[0].error().is_some());
    }
}
