//! Content injection.
//!
//! If a content document exists at the site root, its raw text is wrapped in
//! an inline JSON script block and written to the fixed partial path before
//! include expansion runs. The template includes the partial like any other
//! file, so the built page carries the content inline and the hydrator never
//! needs to fetch it. A missing content document is skipped silently; the
//! template's include of the partial then fails loudly, which is the
//! intended signal that content is missing.

use std::fs;

use tracing::debug;

use crate::content::CONTENT_DATA_ID;
use crate::error::Result;
use crate::site::SiteContext;

/// Wrap raw content JSON in the inline script block the hydrator reads back.
pub fn content_partial(json: &str) -> String {
    format!("<script type=\"application/json\" id=\"{CONTENT_DATA_ID}\">\n{json}\n</script>")
}

/// Write the content partial if the content document exists.
///
/// Returns whether a partial was written. Injection is purely textual;
/// malformed JSON is not detected here (the hydrator warns about it later).
pub fn inject_content(ctx: &SiteContext) -> Result<bool> {
    let content_path = ctx.content_path();
    if !content_path.exists() {
        return Ok(false);
    }

    let json = fs::read_to_string(&content_path)?;
    let partial_path = ctx.content_partial_path();
    if let Some(dir) = partial_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&partial_path, content_partial(&json))?;
    debug!(path = %partial_path.display(), "Wrote content partial");
    Ok(true)
}
