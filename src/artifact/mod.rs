//! The single live artifact and the view state derived from it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One generated HTML string is live at a time; a newer one replaces the old
/// entirely. No history, no versioning.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    html: Option<String>,
    epoch: u64,
}

/// Proof that a generation started against a particular store state. Commits
/// from a superseded generation are rejected, so a slow, stale reply can
/// never overwrite a newer artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a generation cycle, invalidating earlier tickets.
    pub fn begin(&mut self) -> Ticket {
        self.epoch += 1;
        Ticket(self.epoch)
    }

    /// Store the artifact if `ticket` is still the newest one issued.
    pub fn commit(&mut self, ticket: Ticket, html: String) -> bool {
        if ticket.0 != self.epoch {
            return false;
        }
        self.html = Some(html);
        true
    }

    /// Unconditional replace, for callers outside a generation cycle.
    pub fn set(&mut self, html: String) {
        let t = self.begin();
        self.commit(t, html);
    }

    pub fn get(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn clear(&mut self) {
        self.html = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Code,
    Preview,
}

/// Presentation state for the current session. Derived, never persisted.
#[derive(Debug)]
pub struct UiState {
    pub active_tab: Tab,
    pub output_visible: bool,
    pub fullscreen_preview: bool,
    loading: Arc<AtomicBool>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Code,
            output_visible: false,
            fullscreen_preview: false,
            loading: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Engage the loading flag for the duration of the returned guard.
    pub fn begin_loading(&self) -> LoadingGuard {
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard { flag: Arc::clone(&self.loading) }
    }
}

/// Holds the loading flag high until dropped, so every exit path of a
/// generation (success, provider error, malformed reply) releases it.
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_single_slot_last_write_wins() {
        let mut store = ArtifactStore::new();
        assert_eq!(store.get(), None);

        store.set("<p>one</p>".into());
        store.set("<p>two</p>".into());
        assert_eq!(store.get(), Some("<p>two</p>"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn stale_ticket_cannot_overwrite_newer_artifact() {
        let mut store = ArtifactStore::new();
        let slow = store.begin();
        let fast = store.begin();

        assert!(store.commit(fast, "<p>new</p>".into()));
        assert!(!store.commit(slow, "<p>old</p>".into()));
        assert_eq!(store.get(), Some("<p>new</p>"));
    }

    #[test]
    fn failed_commit_leaves_store_unchanged() {
        let mut store = ArtifactStore::new();
        store.set("<p>kept</p>".into());
        let stale = store.begin();
        store.begin();
        assert!(!store.commit(stale, "<p>dropped</p>".into()));
        assert_eq!(store.get(), Some("<p>kept</p>"));
    }

    #[test]
    fn loading_guard_releases_on_every_path() {
        let ui = UiState::default();
        assert!(!ui.is_loading());
        {
            let _guard = ui.begin_loading();
            assert!(ui.is_loading());
        }
        assert!(!ui.is_loading());

        // Early-return path: guard dropped by unwinding out of a closure.
        let attempt = || -> Result<(), ()> {
            let _guard = ui.begin_loading();
            Err(())
        };
        assert!(attempt().is_err());
        assert!(!ui.is_loading());
    }
}
