//! The on-screen guide: one speech bubble, one line at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use explainer_core::Clock;
use explainer_core::model::{NarratorTiming, SurfaceEvent, Utterance};
use tokio::time::{Instant, sleep, sleep_until};

use crate::session::SharedSession;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// The line was shown, held and appended to the log.
    Spoken,
    /// Another line was already on screen; nothing happened.
    Ignored,
}

/// Clears the active flag even if the speaking future is dropped midway.
struct ActiveGuard<'a>(&'a AtomicBool);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Narrator {
    timing: NarratorTiming,
    clock: Clock,
    session: SharedSession,
    surface: Arc<dyn Surface>,
    active: AtomicBool,
}

impl Narrator {
    #[must_use]
    pub fn new(
        timing: NarratorTiming,
        clock: Clock,
        session: SharedSession,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            timing,
            clock,
            session,
            surface,
            active: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Shows `utterance`, types it out, holds it, hides the bubble and
    /// appends the text to the log. Resolves only after the log append.
    pub async fn speak(&self, utterance: Utterance) -> SpeakOutcome {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(text = utterance.text(), "narrator busy; line ignored");
            return SpeakOutcome::Ignored;
        }
        let _active = ActiveGuard(&self.active);

        let chars = utterance.char_count();
        self.surface.emit(SurfaceEvent::NarratorShown);
        self.surface.emit(SurfaceEvent::OverlayShown);
        self.surface.emit(SurfaceEvent::NarratorStarted {
            text: utterance.text().to_string(),
        });
        sleep(self.timing.enter).await;

        if chars > 0 {
            // Absolute deadlines: the last frame lands exactly at `typing`.
            let typing = self.timing.typing_for(chars);
            let total = u32::try_from(chars).unwrap_or(u32::MAX);
            let start = Instant::now();
            for (shown, step) in (1..=chars).zip(1..=total) {
                let offset = typing.checked_mul(step).map_or(typing, |d| d / total);
                sleep_until(start + offset).await;
                self.surface.emit(SurfaceEvent::NarratorTyped { shown });
            }
        }

        let pause = utterance
            .pause()
            .unwrap_or_else(|| self.timing.pause.for_chars(chars));
        sleep(pause).await;

        sleep(self.timing.exit).await;
        self.surface.emit(SurfaceEvent::NarratorHidden);
        self.surface.emit(SurfaceEvent::OverlayHidden);

        let now = self.clock.now();
        let entry = self
            .session
            .with(|session| session.log_mut().append(utterance, now).clone())
            .await;
        self.surface.emit(SurfaceEvent::LogAppended(entry));
        SpeakOutcome::Spoken
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use explainer_core::model::{PageId, PageManifest, PageTiming};
    use explainer_core::time::fixed_clock;

    use super::*;
    use crate::surface::RecordingSurface;

    fn narrator(page: PageId) -> (Arc<Narrator>, SharedSession, RecordingSurface) {
        let manifest = PageManifest::new(page, &["only"]);
        let session = SharedSession::from_manifest(&manifest).unwrap();
        let surface = RecordingSurface::new();
        let narrator = Narrator::new(
            PageTiming::for_page(page).narrator,
            fixed_clock(),
            session.clone(),
            Arc::new(surface.clone()),
        );
        (Arc::new(narrator), session, surface)
    }

    #[tokio::test(start_paused = true)]
    async fn speak_runs_phases_in_order_and_appends_once() {
        let (narrator, session, surface) = narrator(PageId::TokenExplainer);

        let before = session.snapshot().await.log().len();
        let outcome = narrator.speak(Utterance::new("Hi.")).await;
        assert_eq!(outcome, SpeakOutcome::Spoken);

        let log = session.snapshot().await.log().clone();
        assert_eq!(log.len(), before + 1);
        assert_eq!(log.last().unwrap().text, "Hi.");

        let events = surface.events();
        assert_eq!(events[0], SurfaceEvent::NarratorShown);
        assert_eq!(events[1], SurfaceEvent::OverlayShown);
        assert_eq!(
            events[2],
            SurfaceEvent::NarratorStarted {
                text: "Hi.".to_string()
            }
        );
        let typed: Vec<usize> = events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::NarratorTyped { shown } => Some(*shown),
                _ => None,
            })
            .collect();
        assert_eq!(typed, vec![1, 2, 3]);
        let tail = &events[events.len() - 3..];
        assert_eq!(tail[0], SurfaceEvent::NarratorHidden);
        assert_eq!(tail[1], SurfaceEvent::OverlayHidden);
        assert!(matches!(&tail[2], SurfaceEvent::LogAppended(entry) if entry.text == "Hi."));
        assert!(!narrator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn speak_takes_enter_typing_pause_and_exit() {
        let (narrator, _session, _surface) = narrator(PageId::TokenExplainer);
        let start = Instant::now();
        // 10 chars * 50ms = 500ms typing, 2.5s pause, 0.5s in, 0.4s out.
        narrator.speak(Utterance::new("0123456789")).await;
        assert_eq!(start.elapsed(), Duration::from_millis(3900));
    }

    #[tokio::test(start_paused = true)]
    async fn long_lines_never_type_past_the_cap() {
        let (narrator, _session, surface) = narrator(PageId::TokenExplainer);
        for chars in [151, 1499] {
            let start = Instant::now();
            narrator.speak(Utterance::new("x".repeat(chars))).await;
            // 0.5s in, typing capped at 4s, 2.5s pause, 0.4s out.
            assert_eq!(start.elapsed(), Duration::from_millis(7400), "{chars} chars");
        }
        let frames = surface
            .events()
            .iter()
            .filter(|event| event.is_typing_frame())
            .count();
        assert_eq!(frames, 151 + 1499);
    }

    #[tokio::test(start_paused = true)]
    async fn utterance_pause_overrides_policy() {
        let (narrator, _session, _surface) = narrator(PageId::MlExplainer);
        let start = Instant::now();
        // 0.4s in, 0.2s typing, 0.5s pause override, 0.3s out.
        narrator
            .speak(Utterance::new("hello").with_pause(Duration::from_millis(500)))
            .await;
        assert_eq!(start.elapsed(), Duration::from_millis(1400));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_speak_is_ignored() {
        let (narrator, session, surface) = narrator(PageId::MlExplainer);

        let first = {
            let narrator = Arc::clone(&narrator);
            tokio::spawn(async move { narrator.speak(Utterance::new("first")).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(narrator.is_active());

        let events_before = surface.len();
        let second = narrator.speak(Utterance::new("second")).await;
        assert_eq!(second, SpeakOutcome::Ignored);
        assert_eq!(surface.len(), events_before);

        assert_eq!(first.await.unwrap(), SpeakOutcome::Spoken);
        let log = session.snapshot().await.log().clone();
        assert_eq!(log.texts().collect::<Vec<_>>(), vec!["first"]);
    }
}
