use std::time::Duration;

use crate::model::{Effect, ElementId, SceneId, Utterance, ViewId};

/// One entry of a scene script.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneStep {
    /// Apply `effects` together, then hold for `duration` while they play.
    Animate {
        effects: Vec<Effect>,
        duration: Duration,
    },
    Speak(Utterance),
}

impl SceneStep {
    #[must_use]
    pub fn animate(effects: Vec<Effect>, duration: Duration) -> Self {
        Self::Animate { effects, duration }
    }

    /// Apply effects with no hold.
    #[must_use]
    pub fn instant(effects: Vec<Effect>) -> Self {
        Self::Animate {
            effects,
            duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn wait(duration: Duration) -> Self {
        Self::Animate {
            effects: Vec::new(),
            duration,
        }
    }

    #[must_use]
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speak(Utterance::new(text))
    }
}

/// A named, ordered script for one user-triggered feature.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub id: SceneId,
    /// Control that launched the scene; disabled while it runs.
    pub trigger: Option<ElementId>,
    pub steps: Vec<SceneStep>,
    pub on_complete: Vec<Effect>,
    /// View to switch to once the scene has finished.
    pub then: Option<ViewId>,
}

impl Scene {
    #[must_use]
    pub fn new(id: impl Into<SceneId>) -> Self {
        Self {
            id: id.into(),
            trigger: None,
            steps: Vec::new(),
            on_complete: Vec::new(),
            then: None,
        }
    }

    #[must_use]
    pub fn triggered_by(mut self, control: impl Into<ElementId>) -> Self {
        self.trigger = Some(control.into());
        self
    }

    #[must_use]
    pub fn step(mut self, step: SceneStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = SceneStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    #[must_use]
    pub fn speak(self, text: impl Into<String>) -> Self {
        self.step(SceneStep::speak(text))
    }

    #[must_use]
    pub fn animate(self, effects: Vec<Effect>, duration: Duration) -> Self {
        self.step(SceneStep::animate(effects, duration))
    }

    #[must_use]
    pub fn on_complete(mut self, effects: Vec<Effect>) -> Self {
        self.on_complete.extend(effects);
        self
    }

    #[must_use]
    pub fn then_switch_to(mut self, view: impl Into<ViewId>) -> Self {
        self.then = Some(view.into());
        self
    }

    /// Every element the scene will touch, including its trigger.
    pub fn targets(&self) -> impl Iterator<Item = &ElementId> {
        let step_targets = self.steps.iter().flat_map(|step| match step {
            SceneStep::Animate { effects, .. } => effects.as_slice(),
            SceneStep::Speak(_) => &[] as &[Effect],
        });
        self.trigger
            .iter()
            .chain(step_targets.chain(self.on_complete.iter()).filter_map(Effect::target))
    }

    /// Lines the narrator will speak, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            SceneStep::Speak(utterance) => Some(utterance.text()),
            SceneStep::Animate { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Motion;

    #[test]
    fn targets_cover_trigger_steps_and_completion() {
        let scene = Scene::new("demo")
            .triggered_by("btn-run")
            .speak("hello")
            .animate(
                vec![Effect::play("node", Motion::Glow), Effect::RenderLabReport],
                Duration::from_millis(300),
            )
            .on_complete(vec![Effect::reveal("btn-next")]);

        let targets: Vec<&str> = scene.targets().map(ElementId::as_str).collect();
        assert_eq!(targets, vec!["btn-run", "node", "btn-next"]);
        assert_eq!(scene.lines().collect::<Vec<_>>(), vec!["hello"]);
    }
}
