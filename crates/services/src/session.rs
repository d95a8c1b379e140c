use std::sync::Arc;

use explainer_core::PageError;
use explainer_core::model::{Effect, PageManifest, SessionState, SurfaceEvent};
use tokio::sync::Mutex;

/// Shared handle to a page's session record.
///
/// The lock is only ever held for a synchronous mutation, never across an
/// animation wait or a narrator line.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    /// # Errors
    ///
    /// Returns `PageError` when the manifest is unusable.
    pub fn from_manifest(manifest: &PageManifest) -> Result<Self, PageError> {
        Ok(Self {
            inner: Arc::new(Mutex::new(SessionState::from_manifest(manifest)?)),
        })
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    /// Runs `f` with exclusive access to the session.
    pub async fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }

    /// # Errors
    ///
    /// Propagates `PageError` from `SessionState::apply`.
    pub async fn apply(&self, effect: Effect) -> Result<Vec<SurfaceEvent>, PageError> {
        self.with(|session| session.apply(effect)).await
    }
}
