/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Build command implementation
 */

//! Build command implementation.
//!
//! Runs the build pipeline once. Any build error is fatal and exits the
//! process non-zero via the anyhow boundary in `main`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use plinth_core::SiteContext;

/// Arguments for the build command
#[derive(Debug)]
pub struct BuildArgs {
    /// Site root directory
    pub root: Option<PathBuf>,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let root = resolve_root(args.root)?;
    let ctx = SiteContext::discover(&root).context("Failed to discover site root")?;

    let out = plinth_core::build(&ctx).context("Build failed")?;
    info!(
        includes = out.includes,
        content_injected = out.content_injected,
        "Built {}",
        out.output.display()
    );
    Ok(())
}

/// The site root: the given directory, or the current one.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}
