//! Glues a page script to the narrator, sequencer and view switcher.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use explainer_core::model::{
    Effect, PageId, PageManifest, PageTiming, Scene, SessionState, SurfaceEvent, ViewId,
};
use explainer_core::{Clock, PageError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::sleep;

use crate::error::ControllerError;
use crate::narrator::Narrator;
use crate::sequencer::{SceneOutcome, Sequencer};
use crate::session::SharedSession;
use crate::surface::Surface;
use crate::views::{SwitchOutcome, ViewSwitcher};

/// A user action on a page: one button, one trigger.
pub trait Trigger: fmt::Debug + Send + 'static {
    /// The name the page's markup binds this action to.
    fn name(&self) -> &'static str;
}

/// What a page does in response to a trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Run(Scene),
    /// Immediate state changes with no script around them.
    Apply(Vec<Effect>),
    Switch(ViewId),
    Ignore(&'static str),
}

/// Per-page behaviour: which elements exist and which scene each trigger
/// starts. Scripts are pure; the controller performs everything they return.
pub trait PageScript: Send + Sync + 'static {
    type Trigger: Trigger;

    fn page(&self) -> PageId;

    fn manifest(&self) -> PageManifest;

    /// Scene played once when the page opens.
    fn on_load(&self) -> Option<Scene> {
        None
    }

    /// Intro scene for a view that was just entered.
    fn on_enter(&self, view: &ViewId, session: &SessionState) -> Option<Scene>;

    fn handle(
        &self,
        trigger: Self::Trigger,
        session: &SessionState,
        rng: &mut StdRng,
    ) -> Action;
}

/// Result of one dispatched trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Completed,
    /// Nothing happened: reentry, a disabled control or a missing selection.
    Ignored(&'static str),
    /// The action referenced something the page does not have.
    Aborted(PageError),
}

#[derive(Clone, Debug, Default)]
pub struct ControllerOptions {
    /// Defaults to `PageTiming::for_page`.
    pub timing: Option<PageTiming>,
    /// Multiplies every duration after `timing` is resolved.
    pub speed: Option<f64>,
    pub clock: Clock,
    /// Fixes the random draws (vision confidence, token colours).
    pub seed: Option<u64>,
}

enum Next {
    Scene(Scene),
    View(ViewId),
}

pub struct PageController<P: PageScript> {
    script: P,
    session: SharedSession,
    sequencer: Sequencer,
    views: ViewSwitcher,
    timing: PageTiming,
    surface: Arc<dyn Surface>,
    rng: Mutex<StdRng>,
}

impl<P: PageScript> PageController<P> {
    /// # Errors
    ///
    /// Returns `ControllerError` when the script's manifest has no usable
    /// views or `options.speed` is not a positive factor.
    pub fn new(
        script: P,
        surface: Arc<dyn Surface>,
        options: ControllerOptions,
    ) -> Result<Self, ControllerError> {
        let mut timing = options
            .timing
            .unwrap_or_else(|| PageTiming::for_page(script.page()));
        if let Some(speed) = options.speed {
            timing = timing.scaled(speed)?;
        }

        let session = SharedSession::from_manifest(&script.manifest())?;
        let narrator = Arc::new(Narrator::new(
            timing.narrator,
            options.clock,
            session.clone(),
            Arc::clone(&surface),
        ));
        let sequencer = Sequencer::new(
            narrator,
            session.clone(),
            Arc::clone(&surface),
            timing,
        );
        let views = ViewSwitcher::new(timing.view, session.clone(), Arc::clone(&surface));
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            script,
            session,
            sequencer,
            views,
            timing,
            surface,
            rng: Mutex::new(rng),
        })
    }

    #[must_use]
    pub fn page(&self) -> PageId {
        self.script.page()
    }

    #[must_use]
    pub fn timing(&self) -> &PageTiming {
        &self.timing
    }

    pub async fn snapshot(&self) -> SessionState {
        self.session.snapshot().await
    }

    /// Announces the initial view and plays the page's welcome scene.
    pub async fn load(&self) -> Dispatch {
        let initial = self
            .session
            .with(|session| session.views().active().clone())
            .await;
        tracing::info!(page = %self.page(), view = %initial, "page loaded");
        self.surface.emit(SurfaceEvent::ViewShown(initial));

        match self.script.on_load() {
            Some(scene) => self.finish("load", self.drive(Next::Scene(scene)).await),
            None => Dispatch::Completed,
        }
    }

    /// Handles one user action and resolves when everything it started,
    /// including chained view switches and intro scenes, has finished.
    pub async fn dispatch(&self, trigger: P::Trigger) -> Dispatch {
        let name = trigger.name();
        tracing::debug!(trigger = name, detail = ?trigger, "dispatch");
        let action = self
            .session
            .with(|session| {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                self.script.handle(trigger, session, &mut rng)
            })
            .await;

        let result = match action {
            Action::Ignore(reason) => Ok(Some(reason)),
            Action::Apply(effects) => self.apply_all(effects).await.map(|()| None),
            Action::Switch(view) => self.drive(Next::View(view)).await,
            Action::Run(scene) => {
                let usable = match &scene.trigger {
                    Some(control) => {
                        self.session
                            .with(|session| session.elements().is_usable(control))
                            .await
                    }
                    None => true,
                };
                if usable {
                    self.drive(Next::Scene(scene)).await
                } else {
                    Ok(Some("control is disabled"))
                }
            }
        };
        self.finish(name, result)
    }

    /// Same as dispatching the page's `switchView` trigger.
    pub async fn switch_view(&self, view: ViewId) -> Dispatch {
        self.finish("switchView", self.drive(Next::View(view)).await)
    }

    fn finish(&self, name: &'static str, result: Result<Option<&'static str>, PageError>) -> Dispatch {
        match result {
            Ok(None) => Dispatch::Completed,
            Ok(Some(reason)) => {
                tracing::debug!(trigger = name, reason, "trigger ignored");
                Dispatch::Ignored(reason)
            }
            Err(err) => {
                tracing::warn!(trigger = name, error = %err, "action aborted");
                Dispatch::Aborted(err)
            }
        }
    }

    async fn apply_all(&self, effects: Vec<Effect>) -> Result<(), PageError> {
        self.session
            .with(|session| session.check_targets(effects.iter().filter_map(Effect::target)))
            .await?;
        for effect in effects {
            self.sequencer.apply(effect).await?;
        }
        Ok(())
    }

    /// Runs a scene or a view switch, then whatever it chains into: a scene
    /// may end by switching view, and entering a view may start its intro
    /// scene. Returns the ignore reason if the very first step was a no-op.
    async fn drive(&self, first: Next) -> Result<Option<&'static str>, PageError> {
        let mut next = first;
        let mut progressed = false;
        loop {
            let then = match next {
                Next::Scene(scene) => match self.sequencer.run(scene).await? {
                    SceneOutcome::Completed { then } => then,
                    SceneOutcome::AlreadyRunning if progressed => None,
                    SceneOutcome::AlreadyRunning => return Ok(Some("scene already running")),
                },
                Next::View(view) => match self.views.switch_to(&view).await? {
                    SwitchOutcome::Entered(view) => {
                        progressed = true;
                        let intro = self
                            .session
                            .with(|session| self.script.on_enter(&view, session))
                            .await;
                        match intro {
                            Some(scene) => {
                                let delay = self.timing.view.intro_delay;
                                if !delay.is_zero() {
                                    sleep(delay).await;
                                }
                                next = Next::Scene(scene);
                                continue;
                            }
                            None => None,
                        }
                    }
                    SwitchOutcome::AlreadyActive | SwitchOutcome::Busy if progressed => None,
                    SwitchOutcome::AlreadyActive => return Ok(Some("view already active")),
                    SwitchOutcome::Busy => return Ok(Some("view switch in progress")),
                },
            };
            progressed = true;
            match then {
                Some(view) => next = Next::View(view),
                None => return Ok(None),
            }
        }
    }
}
