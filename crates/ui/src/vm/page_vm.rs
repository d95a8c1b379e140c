use std::collections::{BTreeMap, VecDeque};

use explainer_core::model::{
    CHECKLIST_LEN, ContextWindow, Effect, ElementId, LogEntry, Motion, PageManifest,
    SMALL_WINDOW_LIMIT, SceneId, SurfaceEvent, TokenColor, Tone, ViewId,
};
use explainer_core::summary::{LabReport, PromptReport};

use crate::vm::{format_clock, markdown_to_html};

/// Render state of one page element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementVm {
    pub visible: bool,
    pub enabled: bool,
    pub text: Option<String>,
    /// Sanitised HTML rendered from markdown content.
    pub html: Option<String>,
    pub tone: Tone,
    /// Last animation played; the stylesheet keys off it.
    pub motion: Option<Motion>,
    pub progress: Option<f32>,
    pub ring: Option<(f32, Tone)>,
    pub items: Vec<String>,
}

impl ElementVm {
    fn new(visible: bool, enabled: bool) -> Self {
        Self {
            visible,
            enabled,
            text: None,
            html: None,
            tone: Tone::Neutral,
            motion: None,
            progress: None,
            ring: None,
            items: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarratorVm {
    pub bubble: bool,
    pub overlay: bool,
    pub text: String,
    /// Characters typed so far.
    pub shown: usize,
}

impl NarratorVm {
    #[must_use]
    pub fn typed(&self) -> String {
        self.text.chars().take(self.shown).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLineVm {
    pub text: String,
    pub time: String,
}

impl From<&LogEntry> for LogLineVm {
    fn from(entry: &LogEntry) -> Self {
        Self {
            text: entry.text.clone(),
            time: format_clock(entry.spoken_at),
        }
    }
}

/// Everything a page view needs to draw itself, rebuilt by folding the
/// controller's surface events in order.
#[derive(Clone, Debug, PartialEq)]
pub struct PageVm {
    pub active_view: ViewId,
    pub narrator: NarratorVm,
    pub log: Vec<LogLineVm>,
    pub scene: Option<SceneId>,
    pub checks: [bool; CHECKLIST_LEN],
    pub small_window: VecDeque<TokenColor>,
    pub large_window: Vec<TokenColor>,
    /// Bumped on every eviction so the overflow zone can flash.
    pub evictions: u32,
    pub lab_report: Option<LabReport>,
    pub lab_narrative_html: Option<String>,
    pub prompt_report: Option<PromptReport>,
    pub prompt_summary_html: Option<String>,
    /// Set when the page could not be started.
    pub unavailable: Option<String>,
    elements: BTreeMap<ElementId, ElementVm>,
}

impl PageVm {
    #[must_use]
    pub fn new(manifest: &PageManifest) -> Self {
        let elements = manifest
            .elements
            .iter()
            .map(|(id, visible)| {
                let enabled = !manifest.disabled.contains(id);
                (id.clone(), ElementVm::new(*visible, enabled))
            })
            .collect();
        Self {
            active_view: manifest.initial_view.clone(),
            narrator: NarratorVm::default(),
            log: Vec::new(),
            scene: None,
            checks: [false; CHECKLIST_LEN],
            small_window: VecDeque::new(),
            large_window: Vec::new(),
            evictions: 0,
            lab_report: None,
            lab_narrative_html: None,
            prompt_report: None,
            prompt_summary_html: None,
            unavailable: None,
            elements,
        }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ElementVm> {
        self.elements.get(&ElementId::new(id))
    }

    #[must_use]
    pub fn is_active(&self, view: &str) -> bool {
        self.active_view.as_str() == view
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).is_some_and(|el| el.visible)
    }

    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|el| el.enabled)
    }

    /// Text set by a script, or `fallback` while nothing has been set.
    #[must_use]
    pub fn text(&self, id: &str, fallback: &str) -> String {
        self.element(id)
            .and_then(|el| el.text.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    #[must_use]
    pub fn html(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|el| el.html.clone())
    }

    #[must_use]
    pub fn items(&self, id: &str) -> Vec<String> {
        self.element(id).map(|el| el.items.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn progress(&self, id: &str) -> f32 {
        self.element(id).and_then(|el| el.progress).unwrap_or(0.0)
    }

    #[must_use]
    pub fn ring(&self, id: &str) -> Option<(f32, Tone)> {
        self.element(id).and_then(|el| el.ring)
    }

    /// `base` plus tone, motion and visibility modifier classes.
    #[must_use]
    pub fn class(&self, id: &str, base: &str) -> String {
        let mut class = base.to_string();
        let Some(el) = self.element(id) else {
            return class;
        };
        if el.tone != Tone::Neutral {
            class.push_str(" tone-");
            class.push_str(tone_name(el.tone));
        }
        if let Some(motion) = el.motion {
            class.push_str(" anim-");
            class.push_str(motion_name(motion));
        }
        if !el.visible {
            class.push_str(" hidden");
        }
        class
    }

    pub fn apply(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::NarratorShown => self.narrator.bubble = true,
            SurfaceEvent::OverlayShown => self.narrator.overlay = true,
            SurfaceEvent::NarratorStarted { text } => {
                self.narrator.text.clone_from(text);
                self.narrator.shown = 0;
            }
            SurfaceEvent::NarratorTyped { shown } => self.narrator.shown = *shown,
            SurfaceEvent::NarratorHidden => self.narrator.bubble = false,
            SurfaceEvent::OverlayHidden => self.narrator.overlay = false,
            SurfaceEvent::LogAppended(entry) => self.log.push(LogLineVm::from(entry)),
            SurfaceEvent::SceneStarted { scene } => self.scene = Some(scene.clone()),
            SurfaceEvent::SceneFinished { .. } => self.scene = None,
            SurfaceEvent::AnimationStarted { .. } | SurfaceEvent::AnimationFinished { .. } => {}
            SurfaceEvent::Applied(effect) => self.apply_effect(effect),
            SurfaceEvent::ContextTokenPushed { window, color } => match window {
                ContextWindow::Small => {
                    self.small_window.push_back(*color);
                    while self.small_window.len() > SMALL_WINDOW_LIMIT {
                        self.small_window.pop_front();
                    }
                }
                ContextWindow::Large => self.large_window.push(*color),
            },
            SurfaceEvent::ContextTokenEvicted { .. } => {
                self.evictions = self.evictions.saturating_add(1);
            }
            SurfaceEvent::LabReportRendered(report) => {
                self.lab_narrative_html = Some(markdown_to_html(&report.narrative));
                self.lab_report = Some(report.clone());
            }
            SurfaceEvent::PromptReportRendered(report) => {
                self.prompt_summary_html = Some(markdown_to_html(report.summary));
                self.prompt_report = Some(report.clone());
            }
            SurfaceEvent::ViewHidden(_) => {}
            SurfaceEvent::ViewShown(view) => self.active_view = view.clone(),
        }
    }

    fn apply_effect(&mut self, effect: &Effect) {
        match effect {
            Effect::SetCheck { index, checked } => {
                if let Some(slot) = self.checks.get_mut(*index) {
                    *slot = *checked;
                }
                return;
            }
            Effect::SelectVisionSource { .. }
            | Effect::SelectSpamPreset { .. }
            | Effect::PushContextToken { .. }
            | Effect::RecordVision { .. }
            | Effect::RecordSpam { .. }
            | Effect::RenderLabReport
            | Effect::RenderPromptReport => return,
            _ => {}
        }

        let Some(el) = effect.target().and_then(|id| self.elements.get_mut(id)) else {
            return;
        };
        match effect {
            Effect::SetText { text, .. } => el.text = Some(text.clone()),
            Effect::SetTone { tone, .. } => el.tone = *tone,
            Effect::Reveal { .. } => el.visible = true,
            Effect::Hide { .. } => el.visible = false,
            Effect::Enable { .. } => el.enabled = true,
            Effect::Disable { .. } => el.enabled = false,
            Effect::Play { motion, .. } => el.motion = Some(*motion),
            Effect::SetProgress { percent, .. } => el.progress = Some(*percent),
            Effect::SetRing { offset, tone, .. } => el.ring = Some((*offset, *tone)),
            Effect::ClearItems { .. } => el.items.clear(),
            Effect::AppendItem { text, .. } => el.items.push(text.clone()),
            Effect::ShowMarkdown { markdown, .. } => el.html = Some(markdown_to_html(markdown)),
            _ => {}
        }
    }
}

#[must_use]
pub fn tone_name(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "neutral",
        Tone::Accent => "accent",
        Tone::Success => "success",
        Tone::Danger => "danger",
    }
}

#[must_use]
pub fn motion_name(motion: Motion) -> &'static str {
    match motion {
        Motion::FadeIn => "fade-in",
        Motion::FadeOut => "fade-out",
        Motion::Pulse => "pulse",
        Motion::Glow => "glow",
        Motion::Gather => "gather",
        Motion::DrawPath => "draw-path",
        Motion::Spin => "spin",
        Motion::Flip => "flip",
        Motion::Reset => "reset",
        Motion::Scan => "scan",
        Motion::Swap => "swap",
        Motion::Highlight => "highlight",
        Motion::Arrive => "arrive",
        Motion::Pop => "pop",
        Motion::Shake => "shake",
        Motion::SlideIn => "slide-in",
        Motion::Flash => "flash",
    }
}

#[must_use]
pub fn token_color_class(color: TokenColor) -> &'static str {
    match color {
        TokenColor::Cyan => "mini-token cyan",
        TokenColor::Amber => "mini-token amber",
    }
}
