//! Moves a page between its views, one fade at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use explainer_core::PageError;
use explainer_core::model::{SurfaceEvent, ViewId, ViewTiming};
use tokio::time::sleep;

use crate::session::SharedSession;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Entered(ViewId),
    /// Target was already the active view.
    AlreadyActive,
    /// Another switch was mid-fade.
    Busy,
}

struct SwitchingGuard<'a>(&'a AtomicBool);

impl Drop for SwitchingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ViewSwitcher {
    timing: ViewTiming,
    session: SharedSession,
    surface: Arc<dyn Surface>,
    switching: AtomicBool,
}

impl ViewSwitcher {
    #[must_use]
    pub fn new(timing: ViewTiming, session: SharedSession, surface: Arc<dyn Surface>) -> Self {
        Self {
            timing,
            session,
            surface,
            switching: AtomicBool::new(false),
        }
    }

    /// Fades out the active view and fades `target` in.
    ///
    /// The session's active view changes at the midpoint, between the hide
    /// and the show, so exactly one view is active at every instant.
    ///
    /// # Errors
    ///
    /// Returns `PageError::MissingView` when `target` is not one of the
    /// page's views; nothing is hidden in that case.
    pub async fn switch_to(&self, target: &ViewId) -> Result<SwitchOutcome, PageError> {
        let Some(transition) = self
            .session
            .with(|session| session.views().plan(target))
            .await?
        else {
            return Ok(SwitchOutcome::AlreadyActive);
        };

        if self
            .switching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(view = %target, "view switch in progress; request ignored");
            return Ok(SwitchOutcome::Busy);
        }
        let _switching = SwitchingGuard(&self.switching);

        tracing::info!(from = %transition.from, to = %transition.to, "switching view");
        sleep(self.timing.fade_out).await;
        self.surface.emit(SurfaceEvent::ViewHidden(transition.from.clone()));
        self.session
            .with(|session| session.views_mut().commit(&transition))
            .await?;
        self.surface.emit(SurfaceEvent::ViewShown(transition.to.clone()));
        sleep(self.timing.fade_in).await;
        Ok(SwitchOutcome::Entered(transition.to))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use explainer_core::model::{PageId, PageManifest, PageTiming};
    use tokio::time::Instant;

    use super::*;
    use crate::surface::RecordingSurface;

    fn switcher() -> (Arc<ViewSwitcher>, SharedSession, RecordingSurface) {
        let manifest = PageManifest::new(PageId::TokenExplainer, &["token", "context", "summary"]);
        let session = SharedSession::from_manifest(&manifest).unwrap();
        let surface = RecordingSurface::new();
        let switcher = ViewSwitcher::new(
            PageTiming::for_page(PageId::TokenExplainer).view,
            session.clone(),
            Arc::new(surface.clone()),
        );
        (Arc::new(switcher), session, surface)
    }

    #[tokio::test(start_paused = true)]
    async fn switch_hides_then_shows_after_fades() {
        let (switcher, session, surface) = switcher();
        let start = Instant::now();
        let outcome = switcher.switch_to(&"context".into()).await.unwrap();

        assert_eq!(outcome, SwitchOutcome::Entered("context".into()));
        assert_eq!(start.elapsed(), Duration::from_millis(1600));
        assert_eq!(
            surface.events(),
            vec![
                SurfaceEvent::ViewHidden("token".into()),
                SurfaceEvent::ViewShown("context".into()),
            ]
        );
        let views = session.snapshot().await.views().clone();
        assert_eq!(views.active().as_str(), "context");
        assert_eq!(views.active_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn same_view_and_unknown_view_change_nothing() {
        let (switcher, session, surface) = switcher();
        assert_eq!(
            switcher.switch_to(&"token".into()).await.unwrap(),
            SwitchOutcome::AlreadyActive
        );
        assert_eq!(
            switcher.switch_to(&"nowhere".into()).await.unwrap_err(),
            PageError::MissingView("nowhere".into())
        );
        assert!(surface.is_empty());
        assert_eq!(session.snapshot().await.views().active().as_str(), "token");
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_switch_is_rejected() {
        let (switcher, session, _surface) = switcher();
        let first = {
            let switcher = Arc::clone(&switcher);
            tokio::spawn(async move { switcher.switch_to(&"context".into()).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            switcher.switch_to(&"summary".into()).await.unwrap(),
            SwitchOutcome::Busy
        );
        first.await.unwrap().unwrap();
        assert_eq!(session.snapshot().await.views().active().as_str(), "context");
    }
}
