use std::collections::{BTreeMap, VecDeque};

use crate::error::PageError;
use crate::model::{
    ContextWindow, Effect, ElementId, MessageKind, NarratorLog, PageId, PageManifest,
    SurfaceEvent, TokenColor, VisionLabel,
};
use crate::summary::{LabReport, PromptReport};
use crate::view::ViewState;

pub const CHECKLIST_LEN: usize = 5;

/// Capacity of the small context window before the oldest token falls out.
pub const SMALL_WINDOW_LIMIT: usize = 15;

/// Counters gathered in the ML labs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabTally {
    pub cat: u32,
    pub dog: u32,
    pub spam: u32,
    pub ham: u32,
    pub total: u32,
}

impl LabTally {
    pub fn record_vision(&mut self, label: VisionLabel) {
        match label {
            VisionLabel::Cat => self.cat = self.cat.saturating_add(1),
            VisionLabel::Dog => self.dog = self.dog.saturating_add(1),
        }
        self.total = self.total.saturating_add(1);
    }

    pub fn record_spam(&mut self, kind: MessageKind) {
        match kind {
            MessageKind::Spam => self.spam = self.spam.saturating_add(1),
            MessageKind::Ham => self.ham = self.ham.saturating_add(1),
        }
        self.total = self.total.saturating_add(1);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Checklist([bool; CHECKLIST_LEN]);

impl Checklist {
    /// Returns `false` when `index` is out of range.
    pub fn set(&mut self, index: usize, checked: bool) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = checked;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|checked| **checked).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count() == CHECKLIST_LEN
    }
}

/// The two conveyor belts of the context-window demo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextWindows {
    small: VecDeque<TokenColor>,
    large: Vec<TokenColor>,
}

impl ContextWindows {
    /// Pushes onto both belts; returns `true` if the small one dropped its
    /// oldest token to make room.
    pub fn push(&mut self, color: TokenColor) -> bool {
        self.large.push(color);
        self.small.push_back(color);
        if self.small.len() > SMALL_WINDOW_LIMIT {
            self.small.pop_front();
            return true;
        }
        false
    }

    #[must_use]
    pub fn small(&self) -> &VecDeque<TokenColor> {
        &self.small
    }

    #[must_use]
    pub fn large(&self) -> &[TokenColor] {
        &self.large
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementState {
    pub visible: bool,
    pub enabled: bool,
}

/// Visibility and enabled flags of every element a page declares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementBoard {
    elements: BTreeMap<ElementId, ElementState>,
}

impl ElementBoard {
    #[must_use]
    pub fn from_manifest(manifest: &PageManifest) -> Self {
        let mut elements: BTreeMap<ElementId, ElementState> = manifest
            .elements
            .iter()
            .map(|(id, visible)| {
                (
                    id.clone(),
                    ElementState {
                        visible: *visible,
                        enabled: true,
                    },
                )
            })
            .collect();
        for id in &manifest.disabled {
            if let Some(state) = elements.get_mut(id) {
                state.enabled = false;
            }
        }
        Self { elements }
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<ElementState> {
        self.elements.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Visible and enabled; unknown elements are never usable.
    #[must_use]
    pub fn is_usable(&self, id: &ElementId) -> bool {
        self.get(id).is_some_and(|state| state.visible && state.enabled)
    }

    fn slot(&mut self, id: &ElementId) -> Result<&mut ElementState, PageError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.clone()))
    }
}

/// Everything a page remembers between page load and unload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    page: PageId,
    views: ViewState,
    elements: ElementBoard,
    tally: LabTally,
    history: Vec<String>,
    checklist: Checklist,
    vision_source: Option<VisionLabel>,
    spam_preset: Option<usize>,
    context: ContextWindows,
    log: NarratorLog,
}

impl SessionState {
    /// # Errors
    ///
    /// Returns `PageError` when the manifest's view list is unusable.
    pub fn from_manifest(manifest: &PageManifest) -> Result<Self, PageError> {
        Ok(Self {
            page: manifest.page,
            views: ViewState::new(manifest.views.clone(), manifest.initial_view.clone())?,
            elements: ElementBoard::from_manifest(manifest),
            tally: LabTally::default(),
            history: Vec::new(),
            checklist: Checklist::default(),
            vision_source: None,
            spam_preset: None,
            context: ContextWindows::default(),
            log: NarratorLog::new(),
        })
    }

    #[must_use]
    pub fn page(&self) -> PageId {
        self.page
    }

    #[must_use]
    pub fn views(&self) -> &ViewState {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut ViewState {
        &mut self.views
    }

    #[must_use]
    pub fn elements(&self) -> &ElementBoard {
        &self.elements
    }

    #[must_use]
    pub fn tally(&self) -> LabTally {
        self.tally
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn checklist(&self) -> Checklist {
        self.checklist
    }

    #[must_use]
    pub fn vision_source(&self) -> Option<VisionLabel> {
        self.vision_source
    }

    #[must_use]
    pub fn spam_preset(&self) -> Option<usize> {
        self.spam_preset
    }

    #[must_use]
    pub fn context(&self) -> &ContextWindows {
        &self.context
    }

    #[must_use]
    pub fn log(&self) -> &NarratorLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut NarratorLog {
        &mut self.log
    }

    /// # Errors
    ///
    /// Returns `PageError::MissingElement` for the first unknown element.
    pub fn check_targets<'a>(
        &self,
        targets: impl IntoIterator<Item = &'a ElementId>,
    ) -> Result<(), PageError> {
        for target in targets {
            if !self.elements.contains(target) {
                return Err(PageError::MissingElement(target.clone()));
            }
        }
        Ok(())
    }

    /// Applies one effect and returns what the surface should show, in order.
    ///
    /// # Errors
    ///
    /// Returns `PageError::MissingElement` when the effect targets an element
    /// the page does not declare; the session is left untouched.
    pub fn apply(&mut self, effect: Effect) -> Result<Vec<SurfaceEvent>, PageError> {
        if let Some(target) = effect.target() {
            if !self.elements.contains(target) {
                return Err(PageError::MissingElement(target.clone()));
            }
        }

        let mut derived = Vec::new();
        match &effect {
            Effect::Reveal { target } => self.elements.slot(target)?.visible = true,
            Effect::Hide { target } => self.elements.slot(target)?.visible = false,
            Effect::Enable { target } => self.elements.slot(target)?.enabled = true,
            Effect::Disable { target } => self.elements.slot(target)?.enabled = false,
            Effect::SelectVisionSource { label } => self.vision_source = Some(*label),
            Effect::SelectSpamPreset { index } => self.spam_preset = Some(*index),
            Effect::SetCheck { index, checked } => {
                if !self.checklist.set(*index, *checked) {
                    return Ok(Vec::new());
                }
            }
            Effect::PushContextToken { color } => {
                let evicted = self.context.push(*color);
                derived.push(SurfaceEvent::ContextTokenPushed {
                    window: ContextWindow::Small,
                    color: *color,
                });
                if evicted {
                    derived.push(SurfaceEvent::ContextTokenEvicted {
                        window: ContextWindow::Small,
                    });
                }
                derived.push(SurfaceEvent::ContextTokenPushed {
                    window: ContextWindow::Large,
                    color: *color,
                });
            }
            Effect::RecordVision { label, confidence } => {
                self.tally.record_vision(*label);
                self.history
                    .push(format!("Vision analysis: {label} ({confidence}%)"));
            }
            Effect::RecordSpam { kind } => {
                self.tally.record_spam(*kind);
                self.history.push(format!("Spam check: {}", kind.as_str()));
            }
            Effect::RenderLabReport => {
                derived.push(SurfaceEvent::LabReportRendered(LabReport::from_tally(
                    &self.tally,
                )));
            }
            Effect::RenderPromptReport => {
                derived.push(SurfaceEvent::PromptReportRendered(PromptReport::standard()));
            }
            Effect::SetText { .. }
            | Effect::SetTone { .. }
            | Effect::Play { .. }
            | Effect::SetProgress { .. }
            | Effect::SetRing { .. }
            | Effect::ClearItems { .. }
            | Effect::AppendItem { .. }
            | Effect::ShowMarkdown { .. } => {}
        }

        let mut events = Vec::with_capacity(derived.len() + 1);
        events.push(SurfaceEvent::Applied(effect));
        events.extend(derived);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> PageManifest {
        PageManifest::new(PageId::MlExplainer, &["hero", "summary"])
            .visible(&["btn-run", "status"])
            .hidden(&["btn-next"])
            .disabled(&["btn-run"])
    }

    #[test]
    fn board_starts_from_manifest_flags() {
        let session = SessionState::from_manifest(&manifest()).unwrap();
        let board = session.elements();
        assert!(!board.is_usable(&"btn-run".into()));
        assert!(board.is_usable(&"status".into()));
        assert_eq!(
            board.get(&"btn-next".into()),
            Some(ElementState {
                visible: false,
                enabled: true
            })
        );
        assert_eq!(session.views().active().as_str(), "hero");
    }

    #[test]
    fn unknown_target_is_rejected_without_mutation() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        let before = session.clone();
        let err = session.apply(Effect::reveal("btn-missing")).unwrap_err();
        assert_eq!(err, PageError::MissingElement("btn-missing".into()));
        assert_eq!(session, before);
    }

    #[test]
    fn reveal_and_enable_update_the_board() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        session.apply(Effect::reveal("btn-next")).unwrap();
        session.apply(Effect::enable("btn-run")).unwrap();
        assert!(session.elements().is_usable(&"btn-next".into()));
        assert!(session.elements().is_usable(&"btn-run".into()));
    }

    #[test]
    fn lab_records_update_tally_and_history() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        session
            .apply(Effect::RecordVision {
                label: VisionLabel::Cat,
                confidence: 91,
            })
            .unwrap();
        session
            .apply(Effect::RecordSpam {
                kind: MessageKind::Ham,
            })
            .unwrap();

        let tally = session.tally();
        assert_eq!((tally.cat, tally.dog, tally.spam, tally.ham), (1, 0, 0, 1));
        assert_eq!(tally.total, 2);
        assert_eq!(
            session.history(),
            ["Vision analysis: Cat (91%)", "Spam check: HAM"]
        );
    }

    #[test]
    fn small_window_evicts_after_limit() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        let mut evictions = 0;
        for _ in 0..20 {
            let events = session
                .apply(Effect::PushContextToken {
                    color: TokenColor::Cyan,
                })
                .unwrap();
            evictions += events
                .iter()
                .filter(|event| matches!(event, SurfaceEvent::ContextTokenEvicted { .. }))
                .count();
        }
        assert_eq!(evictions, 5);
        assert_eq!(session.context().small().len(), SMALL_WINDOW_LIMIT);
        assert_eq!(session.context().large().len(), 20);
    }

    #[test]
    fn out_of_range_check_is_ignored() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        let events = session
            .apply(Effect::SetCheck {
                index: CHECKLIST_LEN,
                checked: true,
            })
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(session.checklist().count(), 0);
    }

    #[test]
    fn report_effect_renders_current_tally() {
        let mut session = SessionState::from_manifest(&manifest()).unwrap();
        session
            .apply(Effect::RecordVision {
                label: VisionLabel::Dog,
                confidence: 88,
            })
            .unwrap();
        let events = session.apply(Effect::RenderLabReport).unwrap();
        assert_eq!(events[0], SurfaceEvent::Applied(Effect::RenderLabReport));
        match &events[1] {
            SurfaceEvent::LabReportRendered(report) => assert_eq!(report.total, 1),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
