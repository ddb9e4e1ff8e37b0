//! Serve command implementation.
//!
//! Resolves the listen address, then hands off to plinth-serve. The port
//! comes from `--port`, falling back to the `PORT` environment variable and
//! then the built-in default.

use std::path::PathBuf;

use anyhow::{Context, Result};

use plinth_core::SiteContext;
use plinth_serve::{DEFAULT_PORT, ServeConfig};

use super::build::resolve_root;

/// Arguments for the serve command
#[derive(Debug)]
pub struct ServeArgs {
    /// Site root directory
    pub root: Option<PathBuf>,
    /// Port to listen on
    pub port: Option<u16>,
    /// Host to bind to
    pub host: String,
    /// Disable rebuild-on-change
    pub no_watch: bool,
}

/// Execute the serve command
pub fn execute(args: ServeArgs) -> Result<()> {
    let root = resolve_root(args.root)?;
    let site = SiteContext::discover(&root).context("Failed to discover site root")?;

    let config = ServeConfig {
        port: resolve_port(args.port, std::env::var("PORT").ok()),
        host: args.host,
        watch_enabled: !args.no_watch,
        ..ServeConfig::default()
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(plinth_serve::run_server(site, config))?;
    Ok(())
}

/// Pick the listen port: flag, then `PORT` env var, then the default.
fn resolve_port(flag: Option<u16>, env: Option<String>) -> u16 {
    flag.or_else(|| env.and_then(|v| v.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env() {
        assert_eq!(resolve_port(Some(3000), Some("4000".to_string())), 3000);
    }

    #[test]
    fn test_env_fallback() {
        assert_eq!(resolve_port(None, Some("4000".to_string())), 4000);
    }

    #[test]
    fn test_invalid_env_falls_through() {
        assert_eq!(resolve_port(None, Some("not-a-port".to_string())), DEFAULT_PORT);
        assert_eq!(resolve_port(None, None), DEFAULT_PORT);
    }
}
