//! Post-classification flattening and nested-playlist expansion
//!
//! Classification yields one group per argument. This pass turns that into
//! the list the player actually loads:
//! - literal one-item groups coalesce into a single combined group,
//!   preserving encounter order;
//! - resources that failed to resolve are pulled out into an error list and
//!   never reach any output group;
//! - playlist references found inside parsed playlists are expanded
//!   recursively, their groups spliced in after the parent.
//!
//! Expansion is guarded by a visited set of canonicalized sources and a
//! depth limit: a cycle or depth overflow is reported in the error list
//! and the offending reference is skipped.

use std::collections::HashSet;
use std::path::Path;

use avlutils::IdAllocator;
use tracing::{debug, warn};

use crate::classify::{classify_args, classify_one, ClassifyOptions, PLAYLIST_SUFFIX_RE};
use crate::group::{Group, SourceKind};
use crate::item::Resource;

/// Result of the flattening pass: the final groups plus one
/// `(description, error)` pair per resource that failed to resolve.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub groups: Vec<Group>,
    pub errors: Vec<(String, String)>,
}

/// Classifies `args` and flattens the result in one step.
///
/// This is the main entry point the player front end calls.
pub fn resolve_args<S: AsRef<str>>(
    args: &[S],
    opts: &ClassifyOptions,
    ids: &IdAllocator,
) -> FlattenOutcome {
    let groups = classify_args(args, opts, ids);
    flatten_groups(groups, opts, ids)
}

/// Flattens already-classified groups.
pub fn flatten_groups(
    groups: Vec<Group>,
    opts: &ClassifyOptions,
    ids: &IdAllocator,
) -> FlattenOutcome {
    let mut visited = HashSet::new();
    flatten_inner(groups, opts, ids, &mut visited, 0)
}

fn flatten_inner(
    groups: Vec<Group>,
    opts: &ClassifyOptions,
    ids: &IdAllocator,
    visited: &mut HashSet<String>,
    depth: usize,
) -> FlattenOutcome {
    let mut out: Vec<Group> = Vec::new();
    let mut errors: Vec<(String, String)> = Vec::new();
    let mut combined: Vec<Resource> = Vec::new();
    let mut combined_pos: Option<usize> = None;

    for mut group in groups {
        let own_source = match group.kind() {
            SourceKind::Literal => None,
            SourceKind::File { path } | SourceKind::Directory { path } => {
                Some(path.display().to_string())
            }
            SourceKind::Uri { uri } => Some(uri.clone()),
        };

        match own_source {
            None => {
                // Literal-origin resources coalesce into one combined group
                // at the position of the first literal argument.
                if combined_pos.is_none() && !group.is_empty() {
                    combined_pos = Some(out.len());
                }
                for resource in group.resources().iter().cloned() {
                    match resource {
                        Resource::Unresolved {
                            description, error, ..
                        } => errors.push((description, error)),
                        playable => combined.push(playable),
                    }
                }
            }
            Some(own) => {
                expand_group(
                    &mut group, &own, opts, ids, visited, depth, &mut out, &mut errors,
                );
            }
        }
    }

    if !combined.is_empty() {
        let combined_group = Group::from_resources(SourceKind::Literal, combined, ids);
        let pos = combined_pos.unwrap_or(out.len()).min(out.len());
        out.insert(pos, combined_group);
    }

    FlattenOutcome { groups: out, errors }
}

/// Expands one parsed-source group: unresolved entries feed the error list,
/// nested playlist references are replaced by their own flattened groups,
/// everything else stays. The group's own source is marked visited first so
/// a playlist referencing itself is caught on the first pass.
#[allow(clippy::too_many_arguments)]
fn expand_group(
    group: &mut Group,
    own_source: &str,
    opts: &ClassifyOptions,
    ids: &IdAllocator,
    visited: &mut HashSet<String>,
    depth: usize,
    out: &mut Vec<Group>,
    errors: &mut Vec<(String, String)>,
) {
    visited.insert(visit_key(own_source));

    let mut kept: Vec<Resource> = Vec::new();
    let mut children: Vec<Group> = Vec::new();

    for resource in group.resources().iter().cloned() {
        let Some(name) = resource.resource_name().map(str::to_string) else {
            errors.push((
                resource.description().to_string(),
                resource.error().unwrap_or("unresolved").to_string(),
            ));
            continue;
        };

        if !PLAYLIST_SUFFIX_RE.is_match(&name) {
            kept.push(resource);
            continue;
        }

        // Nested playlist reference: expand in place of the entry.
        if depth + 1 > opts.nested_depth_limit {
            warn!("Nested playlist depth limit reached at {}", name);
            errors.push((
                resource.description().to_string(),
                format!(
                    "nested playlist depth limit ({}) exceeded",
                    opts.nested_depth_limit
                ),
            ));
            continue;
        }
        if !visited.insert(visit_key(&name)) {
            warn!("Circular playlist reference skipped: {}", name);
            errors.push((
                resource.description().to_string(),
                "circular playlist reference skipped".to_string(),
            ));
            continue;
        }

        debug!("Expanding nested playlist {}", name);
        let child = classify_one(&name, opts, ids);
        let child_outcome = flatten_inner(vec![child], opts, ids, visited, depth + 1);
        children.extend(child_outcome.groups);
        errors.extend(child_outcome.errors);
    }

    group.set_resources(kept);
    if !group.is_empty() {
        out.push(group.clone());
    }
    out.extend(children);
}

/// Stable identity for the visited set: canonical path for local files,
/// the raw string for everything else.
fn visit_key(name: &str) -> String {
    let path = Path::new(name);
    if path.is_file() {
        if let Ok(canonical) = std::fs::canonicalize(path) {
            return canonical.to_string_lossy().to_string();
        }
    }
    name.to_string()
}
