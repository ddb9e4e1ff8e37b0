//! HTTP server for the dev loop
//!
//! Serves files from the site root over plain HTTP. The router is a single
//! fallback handler: the request path is percent-decoded, `/` maps to
//! `index.html`, and the normalized path must stay inside the root
//! (directory traversal is a 400, a missing file a 404). Content types come
//! from the file extension.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use plinth_core::SiteContext;

use crate::error::Result;
use crate::watch::{SiteWatcher, WatchConfig, WatchEvent};

/// Default port, overridable via `PORT` or `--port`.
pub const DEFAULT_PORT: u16 = 5173;

/// Configuration for the dev server.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Rebuild the page when watched files change.
    /// Default: true.
    pub watch_enabled: bool,

    /// Debounce duration for filesystem events in milliseconds.
    /// Default: 120ms.
    pub watch_debounce_ms: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "127.0.0.1".to_string(),
            watch_enabled: true,
            watch_debounce_ms: WatchConfig::default().debounce_ms,
        }
    }
}

/// Shared state for request handlers.
struct ServeContext {
    root: PathBuf,
}

type SharedContext = Arc<ServeContext>;

/// Content type for a file path, by extension.
fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Percent-decode a request path. Returns `None` for malformed sequences or
/// bytes that do not form UTF-8. No crate in this stack covers this, so it
/// is done by hand.
fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Map a request path to a file under `root`.
///
/// Returns `None` when the path is malformed or escapes the root.
fn resolve_request_path(root: &Path, raw: &str) -> Option<PathBuf> {
    let raw = raw.split('?').next().unwrap_or(raw);
    let decoded = percent_decode(raw)?;
    let rel = if decoded == "/" { "/index.html" } else { &decoded };

    let mut resolved = PathBuf::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                if !resolved.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::CurDir => {}
            Component::Prefix(_) => return None,
        }
    }
    Some(root.join(resolved))
}

/// Fallback handler: serve the file the request path resolves to.
async fn serve_path(State(ctx): State<SharedContext>, uri: Uri) -> Response {
    let Some(path) = resolve_request_path(&ctx.root, uri.path()) else {
        return (StatusCode::BAD_REQUEST, "Bad request").into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Build the axum router
fn build_router(ctx: SharedContext) -> Router {
    Router::new()
        .fallback(serve_path)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Run the dev server.
///
/// Performs an initial build (a failure is logged, not fatal - the previous
/// page keeps being served), starts the rebuild-on-change task when watching
/// is enabled, and blocks serving HTTP until shut down.
pub async fn run_server(site: SiteContext, config: ServeConfig) -> Result<()> {
    match plinth_core::build(&site) {
        Ok(out) => info!(includes = out.includes, "Built {}", out.output.display()),
        Err(err) => error!(%err, "Initial build failed"),
    }

    if config.watch_enabled {
        let watcher = SiteWatcher::new(
            &site,
            WatchConfig {
                debounce_ms: config.watch_debounce_ms,
            },
        )?;
        tokio::spawn(rebuild_on_change(watcher, site.clone()));
    }

    let ctx = Arc::new(ServeContext {
        root: site.root().to_path_buf(),
    });
    let router = build_router(ctx);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Dev server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| crate::error::Error::Server(e.to_string()))?;

    Ok(())
}

/// Rebuild loop. One task consumes all watch events, so rebuilds are
/// serialized and an in-flight rebuild is never interrupted.
async fn rebuild_on_change(mut watcher: SiteWatcher, site: SiteContext) {
    while let Some(WatchEvent::Changed(path)) = watcher.recv().await {
        info!(changed = %path.display(), "Rebuilding");
        match plinth_core::build(&site) {
            Ok(out) => info!(includes = out.includes, "Rebuilt {}", out.output.display()),
            Err(err) => error!(%err, "Rebuild failed, previous output left in place"),
        }
    }
}
