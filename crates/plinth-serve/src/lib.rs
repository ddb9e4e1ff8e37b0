//! Dev server for Plinth sites.
//!
//! Two pieces: an axum static-file server over the site root, and a
//! debounced filesystem watcher that re-runs the build pipeline when the
//! template, a partial, or the content document changes. A failing rebuild
//! is logged and the previously built page keeps being served.

pub mod error;
pub mod server;
pub mod watch;

pub use error::{Error, Result};
pub use server::{DEFAULT_PORT, ServeConfig, run_server};
pub use watch::{SiteWatcher, WatchConfig, WatchEvent};
