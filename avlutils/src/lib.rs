//! # avlutils - shared utilities for the AVList playlist engine
//!
//! This crate hosts the small collaborators the playlist core depends on:
//! - **IdAllocator**: process-lifetime-unique hex identifiers
//! - **Line readers**: local files and HTTP(S) URIs as ordered text lines
//! - **file:// reduction**: turning `file://` URIs into plain local paths

pub mod id;
pub mod lines;
pub mod uri;

pub use id::IdAllocator;
pub use lines::{LineReadError, read_file_lines, read_uri_lines};
pub use uri::reduce_file_uri;
