//! Format detection and dispatch
//!
//! Three grammars are recognized, checked in order against the first line:
//! 1. `[playlist]` (case-insensitive) : PLS
//! 2. `#EXTM3U` (case-sensitive) : extended M3U
//! 3. anything else : plain list, one resource name per non-blank line

use avlutils::IdAllocator;

use crate::item::Resource;
use crate::m3u::parse_m3u;
use crate::pls::parse_pls;

/// Output of a text-format parse: the resources in source order plus an
/// optional group description carried by a `ListDesc:` comment.
#[derive(Debug, Default)]
pub struct ParsedList {
    pub resources: Vec<Resource>,
    pub description: Option<String>,
}

/// Detects the grammar of `lines` and parses accordingly.
///
/// Pure over its input: identical lines always produce a structurally
/// identical result (ids aside).
pub fn parse_lines(lines: &[String], ids: &IdAllocator) -> ParsedList {
    match lines.first() {
        Some(first) if first.trim().eq_ignore_ascii_case("[playlist]") => {
            parse_pls(&lines[1..], ids)
        }
        Some(first) if first.trim() == "#EXTM3U" => parse_m3u(&lines[1..], ids),
        _ => parse_plain(lines, ids),
    }
}

/// Plain list: every non-blank line is a literal resource name, with the
/// description equal to the name.
fn parse_plain(lines: &[String], ids: &IdAllocator) -> ParsedList {
    let resources = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| Resource::playable(l, ids))
        .collect();
    ParsedList {
        resources,
        description: None,
    }
}
