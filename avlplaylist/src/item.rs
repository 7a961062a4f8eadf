//! Resource : one playable entity, or an unresolved placeholder
//!
//! A resource is either something the player can hand to the media backend
//! (a file path, a directory entry, a URL) or a placeholder recording why a
//! source could not be resolved. The two cases are separate variants so
//! downstream code cannot accidentally queue an error placeholder for
//! playback.

use avlutils::IdAllocator;
use serde::Serialize;

/// Sentinel for an unknown or unbounded duration.
pub const UNKNOWN_LENGTH_MS: i64 = -1;

/// One entry in a resource group.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    /// A playable item.
    Playable {
        /// Display text; defaults to the resource name when no title is known.
        description: String,
        /// Path or URL, opaque at this level.
        resource_name: String,
        /// Free-text annotation; parsers use it to transport source metadata
        /// (e.g. the raw `Length` field of a PLS record).
        comment: String,
        /// Duration in milliseconds, [`UNKNOWN_LENGTH_MS`] when unknown.
        length_ms: i64,
        /// Process-lifetime-unique handle.
        unique_id: String,
    },
    /// A source that failed to resolve; carries the error, never played.
    Unresolved {
        description: String,
        error: String,
        unique_id: String,
    },
}

impl Resource {
    /// Creates a playable resource whose description is the name itself.
    pub fn playable(resource_name: impl Into<String>, ids: &IdAllocator) -> Self {
        let resource_name = resource_name.into();
        Self::Playable {
            description: resource_name.clone(),
            resource_name,
            comment: String::new(),
            length_ms: UNKNOWN_LENGTH_MS,
            unique_id: ids.allocate(),
        }
    }

    /// Creates a playable resource with an optional title and duration.
    ///
    /// An absent or blank title falls back to the resource name.
    pub fn with_details(
        description: Option<String>,
        resource_name: impl Into<String>,
        length_ms: i64,
        comment: impl Into<String>,
        ids: &IdAllocator,
    ) -> Self {
        let resource_name = resource_name.into();
        let description = match description {
            Some(d) if !d.trim().is_empty() => d,
            _ => resource_name.clone(),
        };
        Self::Playable {
            description,
            resource_name,
            comment: comment.into(),
            length_ms,
            unique_id: ids.allocate(),
        }
    }

    /// Creates an unresolved placeholder carrying an error message.
    pub fn unresolved(
        description: impl Into<String>,
        error: impl Into<String>,
        ids: &IdAllocator,
    ) -> Self {
        Self::Unresolved {
            description: description.into(),
            error: error.into(),
            unique_id: ids.allocate(),
        }
    }

    /// Display text of the resource.
    pub fn description(&self) -> &str {
        match self {
            Self::Playable { description, .. } => description,
            Self::Unresolved { description, .. } => description,
        }
    }

    /// Path or URL for playable resources, `None` for placeholders.
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            Self::Playable { resource_name, .. } => Some(resource_name),
            Self::Unresolved { .. } => None,
        }
    }

    /// Error message for unresolved placeholders.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Playable { .. } => None,
            Self::Unresolved { error, .. } => Some(error),
        }
    }

    /// Duration in milliseconds; placeholders report unknown.
    pub fn length_ms(&self) -> i64 {
        match self {
            Self::Playable { length_ms, .. } => *length_ms,
            Self::Unresolved { .. } => UNKNOWN_LENGTH_MS,
        }
    }

    /// Process-lifetime-unique handle.
    pub fn unique_id(&self) -> &str {
        match self {
            Self::Playable { unique_id, .. } => unique_id,
            Self::Unresolved { unique_id, .. } => unique_id,
        }
    }

    /// True for playable resources.
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Playable { .. })
    }

    /// Updates the display text (interactive edits); no-op on placeholders.
    pub fn set_description(&mut self, text: impl Into<String>) {
        if let Self::Playable { description, .. } = self {
            *description = text.into();
        }
    }

    /// Updates the resource name (interactive edits); no-op on placeholders.
    pub fn set_resource_name(&mut self, name: impl Into<String>) {
        if let Self::Playable { resource_name, .. } = self {
            *resource_name = name.into();
        }
    }
}
