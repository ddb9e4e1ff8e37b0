/*
 * include.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Include marker expansion.
 */

//! Include marker expansion.
//!
//! A template may contain `<!--@include relative/path.html -->` markers.
//! Expansion is a single pass: each marker is replaced with the referenced
//! file's contents (trailing whitespace trimmed, leading content untouched),
//! and the spliced content is never re-scanned for further markers. A marker
//! naming a file that does not exist fails the whole expansion.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BuildError, Result};

static INCLUDE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--@include\s+(.+?)\s*-->").expect("include marker regex"));

/// Expand every include marker in `template` against `src_root`.
///
/// Returns the expanded text and the number of markers expanded.
pub fn expand_includes(template: &str, src_root: &Path) -> Result<(String, usize)> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut count = 0;

    for caps in INCLUDE_MARKER.captures_iter(template) {
        let marker = caps.get(0).expect("whole-marker group");
        let rel = caps.get(1).expect("path group").as_str().trim();
        let full = src_root.join(rel);
        if !full.exists() {
            return Err(BuildError::IncludeNotFound(rel.to_string()));
        }
        let body = fs::read_to_string(&full)?;
        out.push_str(&template[last..marker.start()]);
        out.push_str(body.trim_end());
        last = marker.end();
        count += 1;
    }
    out.push_str(&template[last..]);
    Ok((out, count))
}
