//! PLS playlist format: parser and serializer
//!
//! The PLS grammar is INI-like: a `[playlist]` header (consumed by the
//! format detector), `File<n>=` / `Title<n>=` / `Length<n>=` records, and
//! `Version` / `NumberOfEntries` control fields. The parser is tolerant in
//! one specific way: any malformed record (index out of sequence, repeated
//! tag, record without `File`) stops parsing and returns every record
//! completed so far. Nothing here ever fails an entire parse.
//!
//! Durations: `Length` is whole seconds in the file and milliseconds in
//! memory. Negative lengths are normalized to -1 (unknown) on read; the M3U
//! parser deliberately does not do this (see `m3u.rs`).

use std::io::Write;
use std::path::Path;

use avlutils::IdAllocator;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::detect::ParsedList;
use crate::group::Group;
use crate::item::{Resource, UNKNOWN_LENGTH_MS};
use crate::{Error, Result};

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*version\s*=\s*(-?\d+)\s*$").unwrap());
static ENTRIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*numberofentries\s*=\s*(-?\d+)\s*$").unwrap());
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(file|title|length)(\d+)\s*=\s*(.*?)\s*$").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[;#](.*)$").unwrap());

/// `ListDesc:` comment convention, shared with the M3U parser.
pub(crate) static LISTDESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*ListDesc:(.*)$").unwrap());

/// One record under assembly.
#[derive(Debug, Default)]
struct PendingRecord {
    file: Option<String>,
    title: Option<String>,
    length_secs: Option<i64>,
}

impl PendingRecord {
    fn is_blank(&self) -> bool {
        self.file.is_none() && self.title.is_none() && self.length_secs.is_none()
    }

    /// Completes the record; `File` is mandatory.
    fn finish(self, ids: &IdAllocator) -> Option<Resource> {
        let file = self.file?;
        let length_ms = match self.length_secs {
            Some(secs) if secs >= 0 => secs * 1000,
            Some(_) => UNKNOWN_LENGTH_MS,
            None => UNKNOWN_LENGTH_MS,
        };
        let comment = self
            .length_secs
            .map(|secs| format!("Length {}", secs))
            .unwrap_or_default();
        Some(Resource::with_details(
            self.title, file, length_ms, comment, ids,
        ))
    }
}

/// Parses PLS body lines (everything after the `[playlist]` header).
///
/// Always succeeds, possibly with fewer records than the file announced
/// (partial success on malformed input).
pub(crate) fn parse_pls(lines: &[String], ids: &IdAllocator) -> ParsedList {
    let mut description: Option<String> = None;

    // Control fields may appear anywhere; pull them out first so an
    // out-of-place control line does not disturb record assembly.
    let mut expected_total: Option<usize> = None;
    let mut working: Vec<&String> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(caps) = ENTRIES_RE.captures(line) {
            if expected_total.is_none() {
                expected_total = caps[1].parse::<i64>().ok().map(|n| n.max(0) as usize);
            }
        } else if VERSION_RE.is_match(line) {
            // Value unused; presence only.
        } else {
            working.push(line);
        }
    }

    let mut resources = Vec::new();
    let mut pending = PendingRecord::default();
    let mut expected_index: usize = 1;
    // Set when the pending record itself is malformed (repeated tag); a
    // stop caused by a later, foreign line leaves a completable pending
    // record salvageable.
    let mut discard_pending = false;
    let total = expected_total.unwrap_or(usize::MAX);

    'lines: for line in working {
        if resources.len() >= total {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = COMMENT_RE.captures(line) {
            // Comments interrupt nothing; a ListDesc comment sets the group
            // description, last occurrence winning.
            if let Some(desc) = LISTDESC_RE.captures(&caps[1]) {
                description = Some(desc[1].trim().to_string());
            }
            continue;
        }

        let Some(caps) = FIELD_RE.captures(line) else {
            debug!("Unrecognized PLS line, stopping at record {}", expected_index);
            break;
        };
        let tag = caps[1].to_lowercase();
        let Ok(index) = caps[2].parse::<usize>() else {
            break;
        };
        let value = caps[3].to_string();

        if index == expected_index + 1 {
            // Index advance closes the current record.
            match std::mem::take(&mut pending).finish(ids) {
                Some(resource) => resources.push(resource),
                None => {
                    debug!("PLS record {} has no File field, stopping", expected_index);
                    break 'lines;
                }
            }
            expected_index += 1;
            if resources.len() >= total {
                break;
            }
        } else if index != expected_index {
            debug!(
                "PLS index {} does not match expected {}, stopping",
                index, expected_index
            );
            break;
        }

        let slot = match tag.as_str() {
            "file" => &mut pending.file,
            "title" => &mut pending.title,
            _ => {
                if pending.length_secs.is_some() {
                    debug!("Repeated Length{} tag, stopping", index);
                    discard_pending = true;
                    break;
                }
                pending.length_secs = value.parse::<i64>().ok();
                continue;
            }
        };
        if slot.is_some() {
            debug!("Repeated {}{} tag, stopping", tag, index);
            discard_pending = true;
            break;
        }
        *slot = Some(value);
    }

    // Whatever ended the loop, a pending record that got its mandatory File
    // field is a complete record and is kept; anything less is dropped.
    if !discard_pending && resources.len() < total && !pending.is_blank() {
        if let Some(resource) = pending.finish(ids) {
            resources.push(resource);
        }
    }

    ParsedList {
        resources,
        description,
    }
}

/// Serializes a group as PLS text.
///
/// Resources without a name are skipped with a warning; numbering stays
/// gap-free. Returns the number of entries written, or
/// [`Error::EmptyPlaylist`] when nothing was writable; the caller must then
/// treat the group as unsaved.
pub fn write_pls<W: Write>(
    group: &Group,
    writer: &mut W,
    include_description: bool,
) -> Result<usize> {
    writeln!(writer, "[playlist]")?;

    if include_description && group.has_user_description() {
        let desc = group
            .description()
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string();
        writeln!(writer, ";ListDesc: {}", desc)?;
    }

    let mut written = 0usize;
    for resource in group.resources() {
        let Some(name) = resource.resource_name() else {
            warn!(
                "Skipping unnamed entry \"{}\" while writing playlist",
                resource.description()
            );
            continue;
        };
        written += 1;
        writeln!(writer, "File{}={}", written, name)?;
        writeln!(writer, "Title{}={}", written, resource.description())?;
        let secs = match resource.length_ms() {
            ms if ms < 0 => -1,
            ms => (ms + 500) / 1000,
        };
        writeln!(writer, "Length{}={}", written, secs)?;
    }

    if written < 1 {
        return Err(Error::EmptyPlaylist);
    }

    writeln!(writer, "NumberOfEntries={}", written)?;
    writeln!(writer, "Version=2")?;
    Ok(written)
}

/// Writes a group as a PLS file at `path`.
pub fn save_pls(group: &Group, path: &Path, include_description: bool) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let written = write_pls(group, &mut writer, include_description)?;
    writer.flush()?;
    debug!("Wrote {} entries to {}", written, path.display());
    Ok(written)
}
