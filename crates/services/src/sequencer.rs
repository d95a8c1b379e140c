//! Runs scene scripts, one step at a time.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use explainer_core::PageError;
use explainer_core::model::{Effect, PageTiming, Scene, SceneId, SceneStep, SurfaceEvent, ViewId};
use tokio::time::sleep;

use crate::narrator::{Narrator, SpeakOutcome};
use crate::session::SharedSession;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneOutcome {
    Completed { then: Option<ViewId> },
    /// The same scene was already running; nothing happened.
    AlreadyRunning,
}

/// Removes a scene from the running set when its run ends, however it ends.
struct RunningGuard<'a> {
    running: &'a Mutex<HashSet<SceneId>>,
    scene: SceneId,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.scene);
    }
}

pub struct Sequencer {
    narrator: Arc<Narrator>,
    session: SharedSession,
    surface: Arc<dyn Surface>,
    timing: PageTiming,
    running: Mutex<HashSet<SceneId>>,
}

impl Sequencer {
    #[must_use]
    pub fn new(
        narrator: Arc<Narrator>,
        session: SharedSession,
        surface: Arc<dyn Surface>,
        timing: PageTiming,
    ) -> Self {
        Self {
            narrator,
            session,
            surface,
            timing,
            running: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn is_running(&self, scene: &SceneId) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(scene)
    }

    /// Applies one effect outside any scene and forwards the result.
    ///
    /// # Errors
    ///
    /// Returns `PageError::MissingElement` when the effect targets an
    /// undeclared element.
    pub async fn apply(&self, effect: Effect) -> Result<(), PageError> {
        let events = self.session.apply(effect).await?;
        for event in events {
            self.surface.emit(event);
        }
        Ok(())
    }

    /// Runs `scene` to completion.
    ///
    /// Every element the scene touches is checked up front, so a scene with
    /// a dangling reference fails before anything is shown.
    ///
    /// # Errors
    ///
    /// Returns `PageError::MissingElement` for an element the page does not
    /// declare.
    pub async fn run(&self, scene: Scene) -> Result<SceneOutcome, PageError> {
        {
            let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
            if !running.insert(scene.id.clone()) {
                tracing::debug!(scene = %scene.id, "scene already running; trigger ignored");
                return Ok(SceneOutcome::AlreadyRunning);
            }
        }
        let _running = RunningGuard {
            running: &self.running,
            scene: scene.id.clone(),
        };

        self.session
            .with(|session| session.check_targets(scene.targets()))
            .await?;

        tracing::info!(scene = %scene.id, steps = scene.steps.len(), "scene started");
        if let Some(trigger) = &scene.trigger {
            self.apply(Effect::disable(trigger.clone())).await?;
        }
        self.surface.emit(SurfaceEvent::SceneStarted {
            scene: scene.id.clone(),
        });

        for (index, step) in scene.steps.into_iter().enumerate() {
            match step {
                SceneStep::Animate { effects, duration } => {
                    self.surface.emit(SurfaceEvent::AnimationStarted {
                        scene: scene.id.clone(),
                        step: index,
                    });
                    for effect in effects {
                        self.apply(effect).await?;
                    }
                    let hold = self.timing.scale_hold(duration);
                    if !hold.is_zero() {
                        sleep(hold).await;
                    }
                    self.surface.emit(SurfaceEvent::AnimationFinished {
                        scene: scene.id.clone(),
                        step: index,
                    });
                }
                SceneStep::Speak(utterance) => {
                    if self.narrator.speak(utterance).await == SpeakOutcome::Ignored {
                        tracing::debug!(scene = %scene.id, step = index, "line skipped; narrator busy");
                    }
                }
            }
        }

        for effect in scene.on_complete {
            self.apply(effect).await?;
        }
        self.surface.emit(SurfaceEvent::SceneFinished {
            scene: scene.id.clone(),
        });
        tracing::info!(scene = %scene.id, "scene finished");
        Ok(SceneOutcome::Completed { then: scene.then })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use explainer_core::model::{Motion, PageId, PageManifest};
    use explainer_core::time::fixed_clock;
    use tokio::time::Instant;

    use super::*;
    use crate::surface::RecordingSurface;

    struct Fixture {
        sequencer: Arc<Sequencer>,
        session: SharedSession,
        surface: RecordingSurface,
    }

    fn fixture() -> Fixture {
        fixture_with(PageTiming::for_page(PageId::MlExplainer))
    }

    fn fixture_with(timing: PageTiming) -> Fixture {
        let manifest = PageManifest::new(PageId::MlExplainer, &["hero"])
            .visible(&["btn-run", "status", "node"])
            .hidden(&["btn-next"]);
        let session = SharedSession::from_manifest(&manifest).unwrap();
        let surface = RecordingSurface::new();
        let shared: Arc<dyn Surface> = Arc::new(surface.clone());
        let narrator = Arc::new(Narrator::new(
            timing.narrator,
            fixed_clock(),
            session.clone(),
            Arc::clone(&shared),
        ));
        let sequencer = Arc::new(Sequencer::new(narrator, session.clone(), shared, timing));
        Fixture {
            sequencer,
            session,
            surface,
        }
    }

    fn demo_scene() -> Scene {
        Scene::new("demo")
            .triggered_by("btn-run")
            .speak("One.")
            .animate(
                vec![
                    Effect::set_text("status", "Working"),
                    Effect::play("node", Motion::Glow),
                ],
                Duration::from_secs(2),
            )
            .speak("Two.")
            .on_complete(vec![Effect::reveal("btn-next")])
    }

    #[tokio::test(start_paused = true)]
    async fn steps_run_in_declared_order() {
        let fx = fixture();
        let outcome = fx.sequencer.run(demo_scene()).await.unwrap();
        assert_eq!(outcome, SceneOutcome::Completed { then: None });

        let order: Vec<String> = fx
            .surface
            .milestones()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::NarratorStarted { text } => Some(format!("say {text}")),
                SurfaceEvent::LogAppended(entry) => Some(format!("logged {}", entry.text)),
                SurfaceEvent::AnimationStarted { step, .. } => Some(format!("anim {step}")),
                SurfaceEvent::AnimationFinished { step, .. } => Some(format!("done {step}")),
                SurfaceEvent::Applied(Effect::Reveal { target }) => Some(format!("reveal {target}")),
                SurfaceEvent::Applied(Effect::Disable { target }) => Some(format!("disable {target}")),
                SurfaceEvent::SceneFinished { .. } => Some("finished".to_string()),
                _ => None,
            })
            .collect();

        assert_eq!(
            order,
            vec![
                "disable btn-run",
                "say One.",
                "logged One.",
                "anim 1",
                "done 1",
                "say Two.",
                "logged Two.",
                "reveal btn-next",
                "finished",
            ]
        );
        let log = fx.session.snapshot().await.log().clone();
        assert_eq!(log.texts().collect::<Vec<_>>(), vec!["One.", "Two."]);
    }

    #[tokio::test(start_paused = true)]
    async fn animation_holds_for_its_duration() {
        let fx = fixture();
        let scene = Scene::new("wait").animate(Vec::new(), Duration::from_millis(1200));
        let start = Instant::now();
        fx.sequencer.run(scene).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn animation_scale_stretches_and_saturates_holds() {
        let mut timing = PageTiming::for_page(PageId::MlExplainer);
        timing.animation_scale = 0.25;
        let fx = fixture_with(timing);
        let start = Instant::now();
        fx.sequencer
            .run(Scene::new("quick").animate(Vec::new(), Duration::from_secs(2)))
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(500));

        timing.animation_scale = 1e300;
        let fx = fixture_with(timing);
        let slow = {
            let sequencer = Arc::clone(&fx.sequencer);
            tokio::spawn(async move {
                sequencer
                    .run(Scene::new("slow").animate(Vec::new(), Duration::from_secs(2)))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(fx.sequencer.is_running(&"slow".into()));
        assert!(!slow.is_finished());
        slow.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn rerunning_a_running_scene_has_no_effect() {
        let fx = fixture();
        let first = {
            let sequencer = Arc::clone(&fx.sequencer);
            tokio::spawn(async move { sequencer.run(demo_scene()).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fx.sequencer.is_running(&"demo".into()));

        let before = fx.surface.len();
        let second = fx.sequencer.run(demo_scene()).await.unwrap();
        assert_eq!(second, SceneOutcome::AlreadyRunning);
        assert_eq!(fx.surface.len(), before);

        first.await.unwrap().unwrap();
        assert!(!fx.sequencer.is_running(&"demo".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn dangling_reference_aborts_before_any_effect() {
        let fx = fixture();
        let scene = Scene::new("broken")
            .triggered_by("btn-run")
            .speak("never said")
            .on_complete(vec![Effect::reveal("btn-ghost")]);

        let err = fx.sequencer.run(scene).await.unwrap_err();
        assert_eq!(err, PageError::MissingElement("btn-ghost".into()));
        assert!(fx.surface.is_empty());
        assert!(!fx.sequencer.is_running(&"broken".into()));
    }
}
