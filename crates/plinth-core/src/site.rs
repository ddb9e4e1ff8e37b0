/*
 * site.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Site context for Plinth builds.
 */

//! Site context management.
//!
//! A site is a directory with a fixed layout:
//!
//! - `src/index.template.html` - the page template
//! - `src/partials/` - include targets; the generated content partial
//!   (`content-data.html`) lands here
//! - `content.json` - optional content document
//! - `index.html` - the built page, overwritten on every build
//!
//! [`SiteContext`] resolves these paths once from a root directory. Pipeline
//! stages and the dev server borrow it; there is no other shared state.

use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Template path, relative to the site root.
pub const TEMPLATE_REL: &str = "src/index.template.html";

/// Built page path, relative to the site root.
pub const OUTPUT_REL: &str = "index.html";

/// Content document path, relative to the site root.
pub const CONTENT_REL: &str = "content.json";

/// Generated content partial, relative to the site root.
pub const CONTENT_PARTIAL_REL: &str = "src/partials/content-data.html";

/// Resolved path layout for one site.
#[derive(Debug, Clone)]
pub struct SiteContext {
    root: PathBuf,
}

impl SiteContext {
    /// Create a context for an existing site root directory.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(BuildError::RootNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    /// The site root directory (absolute).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The page template.
    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_REL)
    }

    /// The directory include paths are resolved against (the template's
    /// directory).
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// The built page.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(OUTPUT_REL)
    }

    /// The authored content document (may not exist).
    pub fn content_path(&self) -> PathBuf {
        self.root.join(CONTENT_REL)
    }

    /// The generated inline-content partial.
    pub fn content_partial_path(&self) -> PathBuf {
        self.root.join(CONTENT_PARTIAL_REL)
    }
}
