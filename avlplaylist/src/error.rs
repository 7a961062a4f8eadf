//! Error types for avlplaylist

/// Errors surfaced by the playlist engine.
///
/// Parsing and constructor failures are deliberately absent: malformed
/// playlist text resolves to partial success and unreadable sources become
/// placeholder groups. Only serialization and programmer-facing operations
/// return `Err`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while writing a playlist
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A playlist with zero named resources cannot be written
    #[error("Playlist has no named resources, nothing to write")]
    EmptyPlaylist,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Specialized Result type for avlplaylist
pub type Result<T> = std::result::Result<T, Error>;
