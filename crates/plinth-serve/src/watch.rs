//! Filesystem watching for rebuild-on-change
//!
//! Watches the site's `src/` directory and `content.json` for modifications
//! so the dev server can rebuild the page. Events are debounced to batch
//! rapid saves, and changes to the generated content partial are ignored -
//! every rebuild writes it, and reacting to it would rebuild forever.

use std::path::PathBuf;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use plinth_core::SiteContext;

use crate::error::{Error, Result};

/// Default debounce duration for filesystem events (in milliseconds).
/// Matches the rebuild delay the page was originally tuned with.
const DEFAULT_DEBOUNCE_MS: u64 = 120;

/// File name of the generated content partial, filtered out of watch events.
const CONTENT_PARTIAL_FILE: &str = "content-data.html";

/// Events emitted by the filesystem watcher.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A watched file changed (created, written, or metadata changed)
    Changed(PathBuf),
}

/// Configuration for the filesystem watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Debounce duration in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Debounced watcher over a site's rebuild inputs.
pub struct SiteWatcher {
    /// The debouncer wrapping the underlying watcher
    _debouncer: Debouncer<notify::RecommendedWatcher>,

    /// Receiver for watch events
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
}

impl SiteWatcher {
    /// Create a watcher for the given site.
    ///
    /// Watches `src/` recursively and `content.json` when it exists; a site
    /// without a content document simply never produces events for it.
    pub fn new(ctx: &SiteContext, config: WatchConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(config.debounce_ms),
            move |res: std::result::Result<Vec<DebouncedEvent>, notify::Error>| match res {
                Ok(events) => {
                    for event in events {
                        if is_generated_partial(&event.path) {
                            continue;
                        }
                        debug!(path = %event.path.display(), "File change detected");
                        if event_tx.send(WatchEvent::Changed(event.path)).is_err() {
                            // Receiver dropped, watcher should stop
                            debug!("Event receiver dropped, stopping watcher");
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Filesystem watch error");
                }
            },
        )
        .map_err(|e| Error::Watch(format!("failed to create filesystem watcher: {}", e)))?;

        let src_dir = ctx.src_dir();
        if src_dir.is_dir() {
            debouncer
                .watcher()
                .watch(&src_dir, RecursiveMode::Recursive)
                .map_err(|e| Error::Watch(format!("failed to watch src directory: {}", e)))?;
        }
        let content_path = ctx.content_path();
        if content_path.exists() {
            debouncer
                .watcher()
                .watch(&content_path, RecursiveMode::NonRecursive)
                .map_err(|e| Error::Watch(format!("failed to watch content document: {}", e)))?;
        }

        info!(
            root = %ctx.root().display(),
            debounce_ms = config.debounce_ms,
            "Started filesystem watcher"
        );

        Ok(Self {
            _debouncer: debouncer,
            event_rx,
        })
    }

    /// Receive the next watch event.
    ///
    /// Returns `None` if the watcher has been stopped.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.event_rx.recv().await
    }
}

/// The generated partial is rewritten by every build and must not retrigger.
fn is_generated_partial(path: &std::path::Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == CONTENT_PARTIAL_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_is_generated_partial() {
        assert!(is_generated_partial(Path::new(
            "/site/src/partials/content-data.html"
        )));
        assert!(!is_generated_partial(Path::new("/site/src/partials/footer.html")));
        assert!(!is_generated_partial(Path::new("/site/content.json")));
    }

    #[tokio::test]
    async fn test_watcher_creation() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        let ctx = SiteContext::discover(temp.path()).unwrap();
        let watcher = SiteWatcher::new(&ctx, WatchConfig::default());
        assert!(watcher.is_ok());
    }

    #[tokio::test]
    async fn test_watcher_detects_template_change() {
        let temp = TempDir::new().unwrap();
        // Canonicalize to handle macOS /var -> /private/var symlinks
        let temp_path = temp.path().canonicalize().unwrap();
        let template = temp_path.join("src/index.template.html");
        std::fs::create_dir_all(template.parent().unwrap()).unwrap();
        std::fs::write(&template, "initial").unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let ctx = SiteContext::discover(&temp_path).unwrap();
        let mut watcher = SiteWatcher::new(&ctx, WatchConfig { debounce_ms: 100 }).unwrap();

        std::fs::write(&template, "modified").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), watcher.recv()).await;
        match event {
            Ok(Some(WatchEvent::Changed(path))) => {
                assert_eq!(path, template);
            }
            Ok(None) => panic!("Watcher stopped unexpectedly"),
            Err(_) => panic!("Timeout waiting for file change event"),
        }
    }

    #[tokio::test]
    async fn test_watcher_ignores_generated_partial() {
        let temp = TempDir::new().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        let partial = temp_path.join("src/partials/content-data.html");
        let footer = temp_path.join("src/partials/footer.html");
        std::fs::create_dir_all(partial.parent().unwrap()).unwrap();
        std::fs::write(&partial, "initial").unwrap();
        std::fs::write(&footer, "initial").unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let ctx = SiteContext::discover(&temp_path).unwrap();
        let mut watcher = SiteWatcher::new(&ctx, WatchConfig { debounce_ms: 100 }).unwrap();

        // The generated partial should be ignored, the footer should not.
        std::fs::write(&partial, "modified").unwrap();
        std::fs::write(&footer, "modified").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), watcher.recv()).await;
        match event {
            Ok(Some(WatchEvent::Changed(path))) => {
                assert_eq!(path, footer);
            }
            Ok(None) => panic!("Watcher stopped unexpectedly"),
            Err(_) => panic!("Timeout waiting for file change event"),
        }
    }
}
