/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The Plinth build pipeline.
 */

//! The build pipeline.
//!
//! Stages run in a fixed order: content injection, include expansion,
//! hydration, output write. The write happens last, so a failing build
//! leaves the previously built page in place.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{BuildError, Result};
use crate::hydrate;
use crate::include::expand_includes;
use crate::inject::inject_content;
use crate::site::SiteContext;

/// What a successful build produced.
#[derive(Debug)]
pub struct BuildOutput {
    /// Absolute path of the built page.
    pub output: PathBuf,
    /// Number of include markers expanded.
    pub includes: usize,
    /// Whether a content partial was written this build.
    pub content_injected: bool,
}

/// Run one full build for the site.
pub fn build(ctx: &SiteContext) -> Result<BuildOutput> {
    let content_injected = inject_content(ctx)?;

    let template_path = ctx.template_path();
    if !template_path.exists() {
        return Err(BuildError::TemplateNotFound(template_path));
    }
    let template = fs::read_to_string(&template_path)?;

    let (expanded, includes) = expand_includes(&template, &ctx.src_dir())?;

    let content = hydrate::load_content(&expanded, ctx);
    let page = hydrate::hydrate(&expanded, content.as_ref());

    let output = ctx.output_path();
    fs::write(&output, page)?;
    debug!(includes, content_injected, output = %output.display(), "Build complete");

    Ok(BuildOutput {
        output,
        includes,
        content_injected,
    })
}
