//! Extended M3U playlist format: parser (read-only)
//!
//! The grammar is line-pair oriented: an optional `#EXTINF:<seconds>,<title>`
//! directive followed by a resource-name line. Comment lines are consumed
//! alone and may carry the `ListDesc:` group-description convention.
//!
//! Duration handling differs from the PLS parser on purpose: `#EXTINF`
//! seconds are converted to milliseconds only when positive, and
//! non-positive values are kept exactly as given rather than being forced
//! to -1.

use avlutils::IdAllocator;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::detect::ParsedList;
use crate::item::Resource;
use crate::pls::LISTDESC_RE;

static EXTINF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#EXTINF:\s*(-?\d+)\s*,(.*)$").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#(.*)$").unwrap());

/// Parses extended M3U body lines (everything after the `#EXTM3U` header).
///
/// Iterates two-line units and terminates as soon as fewer than two lines
/// remain; a trailing unpaired line is never consumed.
pub(crate) fn parse_m3u(lines: &[String], ids: &IdAllocator) -> ParsedList {
    let mut resources = Vec::new();
    let mut description: Option<String> = None;
    let mut i = 0usize;

    while lines.len() - i >= 2 {
        let line = &lines[i];

        if let Some(caps) = EXTINF_RE.captures(line) {
            let secs: i64 = caps[1].parse().unwrap_or(-1);
            let title = caps[2].trim();
            let title = if title.is_empty() {
                None
            } else {
                Some(title.to_string())
            };
            // Positive durations become milliseconds; zero and negative are
            // carried through as-is (see module docs).
            let length_ms = if secs > 0 { secs * 1000 } else { secs };
            let name = lines[i + 1].trim().to_string();
            resources.push(Resource::with_details(
                title,
                name,
                length_ms,
                format!("Length {}", secs),
                ids,
            ));
            i += 2;
        } else if let Some(caps) = COMMENT_RE.captures(line) {
            // Bare comment: consumed alone, no resource line follows it.
            if let Some(desc) = LISTDESC_RE.captures(&caps[1]) {
                description = Some(desc[1].trim().to_string());
            }
            i += 1;
        } else {
            // Bare two-line unit without a directive: no title, unknown
            // length, the next line is the resource name.
            let name = lines[i + 1].trim().to_string();
            resources.push(Resource::with_details(None, name, -1, "", ids));
            i += 2;
        }
    }

    ParsedList {
        resources,
        description,
    }
}
