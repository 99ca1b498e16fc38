use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches a deck file and reports when it has been saved.
///
/// The parent directory is watched rather than the file itself, because
/// editors that save by renaming a temp file would otherwise drop the watch.
pub struct DeckWatcher {
    path: PathBuf,
    events: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DeckWatcher {
    /// `on_event` runs on the watcher thread; use it to wake the UI.
    pub fn new(
        path: &Path,
        on_event: impl Fn() + Send + 'static,
    ) -> notify_debouncer_mini::notify::Result<Self> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, events) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            if tx.send(result).is_ok() {
                on_event();
            }
        })?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %path.display(), "watching deck file");

        Ok(Self {
            path,
            events,
            _debouncer: debouncer,
        })
    }

    /// Drain pending events; true if any touched the deck file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.events.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events.iter().any(|e| self.is_deck(&e.path));
                }
                Err(e) => tracing::warn!("file watcher error: {e}"),
            }
        }
        changed
    }

    fn is_deck(&self, path: &Path) -> bool {
        path == self.path
            || path
                .canonicalize()
                .is_ok_and(|p| p == self.path)
    }
}
