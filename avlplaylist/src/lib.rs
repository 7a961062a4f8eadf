//! # avlplaylist - resource groups and playlist formats for AVList
//!
//! This crate is the playlist core of the AVList player:
//! - **Resource / Group**: the in-memory model (ordered resources, group
//!   description, navigation cursor)
//! - **Parsers**: PLS, extended M3U and plain-list text formats, with
//!   partial success on malformed input
//! - **Serializer**: groups back to PLS text
//! - **Classifier**: heterogeneous arguments (files, directories, URIs)
//!   dispatched to the right constructor
//! - **Flattening**: literal coalescing, error extraction, guarded
//!   nested-playlist expansion
//!
//! # Example
//!
//! ```no_run
//! use avlplaylist::{resolve_args, ClassifyOptions};
//! use avlutils::IdAllocator;
//!
//! let ids = IdAllocator::new();
//! let opts = ClassifyOptions::default();
//! let outcome = resolve_args(&["album.pls", "/music", "http://x/y.mp3"], &opts, &ids);
//!
//! for group in &outcome.groups {
//!     println!("{} ({} entries)", group.description(), group.len());
//! }
//! for (what, why) in &outcome.errors {
//!     eprintln!("unusable: {}: {}", what, why);
//! }
//! ```

mod classify;
mod detect;
mod error;
mod flatten;
mod group;
mod item;
mod m3u;
mod pls;
mod scan;

#[cfg(feature = "avlconfig")]
mod config_ext;

pub use classify::{classify_args, classify_one, ClassifyOptions};
pub use detect::{parse_lines, ParsedList};
pub use error::{Error, Result};
pub use flatten::{flatten_groups, resolve_args, FlattenOutcome};
pub use group::{Group, SourceKind};
pub use item::{Resource, UNKNOWN_LENGTH_MS};
pub use pls::{save_pls, write_pls};
pub use scan::ExtensionFilter;

#[cfg(feature = "avlconfig")]
pub use config_ext::ClassifyOptionsConfigExt;
