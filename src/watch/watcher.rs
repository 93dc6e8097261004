// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::watch::filter::ChangeFilter;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `PollWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: PollWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a polling filesystem watcher over `root` and send
/// `RuntimeEvent::SourceChanged` for every path that passes the filter.
///
/// A polling watcher (rather than the platform-native backend) keeps the
/// check cadence equal to the configured interval on every platform.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    filter: ChangeFilter,
    poll_interval: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone()); // best-effort

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = PollWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("watchci: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("watchci: file watch error: {err}");
            }
        },
        Config::default().with_poll_interval(poll_interval),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?} (poll {:?})", root, poll_interval);

    // Async task that consumes notify events and forwards qualifying
    // changes to the runtime.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if event.kind.is_access() {
                continue;
            }
            debug!("received notify event: {:?}", event);

            for path in &event.paths {
                let Some(rel_str) = relative_str(&root, path) else {
                    warn!("could not relativize path {:?} against root {:?}", path, root);
                    continue;
                };

                if !filter.accepts(&rel_str) {
                    continue;
                }

                debug!(path = %rel_str, "change accepted -> triggering pipeline");
                if let Err(err) = runtime_tx
                    .send(RuntimeEvent::SourceChanged { path: path.clone() })
                    .await
                {
                    warn!("failed to send RuntimeEvent::SourceChanged: {err}");
                    // If the runtime channel is closed, there's no point
                    // keeping the watcher loop alive.
                    return;
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Convert a path into a string relative to `root`, with forward slashes.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}
