//! # Watch Module
//!
//! Rebuilds the site whenever its configuration file changes.
//!
//! Each change reloads the configuration (with the same command-line
//! overrides) and runs [`crate::site::build_site`]. A failing rebuild is
//! logged and handed to the callback; since validation runs before any file
//! is written, the previous output normally stays intact.
//!
//! Editors often save a file several times in quick succession. Changes are
//! collected until the file has been quiet for [`DEBOUNCE`], then one rebuild
//! runs on a worker thread, so the last save is always the one built.

use crate::config::{load_config, ConfigOverrides};
use crate::site::{build_site, BuildSummary};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Quiet period after the last change before a rebuild starts.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Load `config_path` and build the site once.
pub fn rebuild(config_path: &Path, overrides: &ConfigOverrides) -> anyhow::Result<BuildSummary> {
    let config = load_config(config_path, overrides)?;
    build_site(&config)
}

/// Watch `config_path` and rebuild on every change.
///
/// The watcher stops when the returned handle is dropped, and the rebuild
/// worker stops with it.
pub fn watch_config<P, F>(config_path: P, overrides: ConfigOverrides, on_rebuild: F) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&anyhow::Result<BuildSummary>) + Send + 'static,
{
    let path: PathBuf = config_path.as_ref().to_path_buf();
    let (tx, rx) = mpsc::channel::<()>();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                if tx.send(()).is_err() {
                    debug!("watch: rebuild worker has stopped");
                }
            }
            Err(e) => warn!(error = ?e, "watch error"),
        },
        Config::default(),
    )?;
    watcher.watch(&path, RecursiveMode::NonRecursive)?;

    let worker_path = path.clone();
    std::thread::Builder::new()
        .name("docsite-watch".to_string())
        .spawn(move || rebuild_loop(&worker_path, &overrides, &rx, on_rebuild))
        .map_err(notify::Error::io)?;

    info!(config = ?path, "Watching configuration for changes");
    Ok(watcher)
}

/// Rebuild once per burst of changes, after the burst has gone quiet.
fn rebuild_loop<F>(path: &Path, overrides: &ConfigOverrides, changes: &Receiver<()>, mut on_rebuild: F)
where
    F: FnMut(&anyhow::Result<BuildSummary>),
{
    while changes.recv().is_ok() {
        loop {
            match changes.recv_timeout(DEBOUNCE) {
                Ok(()) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        let result = rebuild(path, overrides);
        match &result {
            Ok(summary) => info!(
                config = ?path,
                routes_count = summary.routes.total(),
                "watch: site rebuilt"
            ),
            Err(e) => warn!(
                config = ?path,
                error = %format!("{e:#}"),
                "watch: rebuild failed, keeping previous output"
            ),
        }
        on_rebuild(&result);
    }
    debug!(config = ?path, "watch: worker stopped");
}
