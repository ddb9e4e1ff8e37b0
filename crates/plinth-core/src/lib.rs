/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Core build pipeline for Plinth.
//!
//! Plinth builds a static landing page from three authored inputs: an HTML
//! template with include markers, a directory of partials, and an optional
//! JSON content document. A build runs these stages in order:
//!
//! 1. **Inject** ([`inject`]) - wrap the raw content JSON in an inline
//!    script partial so the template can include it as ordinary content.
//! 2. **Expand** ([`include`]) - replace every `<!--@include path -->`
//!    marker with the referenced file's contents. Single pass, no recursion.
//! 3. **Hydrate** ([`hydrate`]) - parse the content document back out of the
//!    expanded page (or fall back to `content.json` on disk) and render each
//!    known container's data slice into markup.
//! 4. **Write** - overwrite `index.html` at the site root.
//!
//! [`SiteContext`] carries the fixed path layout; all stages borrow it.

pub mod build;
pub mod content;
pub mod error;
pub mod hydrate;
pub mod include;
pub mod inject;
pub mod scan;
pub mod site;
pub mod stepper;

// Re-export commonly used types
pub use build::{BuildOutput, build};
pub use content::{CONTENT_DATA_ID, Card, CardGroups, Content, NavLink, ShowcaseStep};
pub use error::{BuildError, Result};
pub use site::SiteContext;
pub use stepper::{ShowcaseStepper, StepDetail};
