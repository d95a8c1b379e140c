use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ElementId;

/// Colour accent a label, badge or ring can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Accent,
    Success,
    Danger,
}

/// Cosmetic motion played on an element. Purely presentational: the
/// renderer decides how each one looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    FadeIn,
    FadeOut,
    Pulse,
    Glow,
    Gather,
    DrawPath,
    Spin,
    Flip,
    Reset,
    Scan,
    Swap,
    Highlight,
    Arrive,
    Pop,
    Shake,
    SlideIn,
    Flash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisionLabel {
    Cat,
    Dog,
}

impl VisionLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VisionLabel::Cat => "Cat",
            VisionLabel::Dog => "Dog",
        }
    }
}

impl fmt::Display for VisionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Spam,
    Ham,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Spam => "SPAM",
            MessageKind::Ham => "HAM",
        }
    }
}

/// Colour of a mini token in the context-window belts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenColor {
    Cyan,
    Amber,
}

/// One declarative change to a page.
///
/// Scene scripts are lists of these; the sequencer hands each one to the
/// session (which owns all mutable state) and forwards the result to the
/// surface. Nothing else mutates a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    SetText { target: ElementId, text: String },
    SetTone { target: ElementId, tone: Tone },
    Reveal { target: ElementId },
    Hide { target: ElementId },
    Disable { target: ElementId },
    Enable { target: ElementId },
    Play { target: ElementId, motion: Motion },
    SetProgress { target: ElementId, percent: f32 },
    SetRing { target: ElementId, offset: f32, tone: Tone },
    ClearItems { target: ElementId },
    AppendItem { target: ElementId, text: String },
    ShowMarkdown { target: ElementId, markdown: String },
    SelectVisionSource { label: VisionLabel },
    SelectSpamPreset { index: usize },
    SetCheck { index: usize, checked: bool },
    PushContextToken { color: TokenColor },
    RecordVision { label: VisionLabel, confidence: u8 },
    RecordSpam { kind: MessageKind },
    RenderLabReport,
    RenderPromptReport,
}

impl Effect {
    #[must_use]
    pub fn set_text(target: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::SetText {
            target: target.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn reveal(target: impl Into<ElementId>) -> Self {
        Self::Reveal {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn hide(target: impl Into<ElementId>) -> Self {
        Self::Hide {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn enable(target: impl Into<ElementId>) -> Self {
        Self::Enable {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn disable(target: impl Into<ElementId>) -> Self {
        Self::Disable {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn play(target: impl Into<ElementId>, motion: Motion) -> Self {
        Self::Play {
            target: target.into(),
            motion,
        }
    }

    #[must_use]
    pub fn tone(target: impl Into<ElementId>, tone: Tone) -> Self {
        Self::SetTone {
            target: target.into(),
            tone,
        }
    }

    #[must_use]
    pub fn progress(target: impl Into<ElementId>, percent: f32) -> Self {
        Self::SetProgress {
            target: target.into(),
            percent,
        }
    }

    #[must_use]
    pub fn markdown(target: impl Into<ElementId>, markdown: impl Into<String>) -> Self {
        Self::ShowMarkdown {
            target: target.into(),
            markdown: markdown.into(),
        }
    }

    /// The page element this effect touches, if any.
    #[must_use]
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Effect::SetText { target, .. }
            | Effect::SetTone { target, .. }
            | Effect::Reveal { target }
            | Effect::Hide { target }
            | Effect::Disable { target }
            | Effect::Enable { target }
            | Effect::Play { target, .. }
            | Effect::SetProgress { target, .. }
            | Effect::SetRing { target, .. }
            | Effect::ClearItems { target }
            | Effect::AppendItem { target, .. }
            | Effect::ShowMarkdown { target, .. } => Some(target),
            Effect::SelectVisionSource { .. }
            | Effect::SelectSpamPreset { .. }
            | Effect::SetCheck { .. }
            | Effect::PushContextToken { .. }
            | Effect::RecordVision { .. }
            | Effect::RecordSpam { .. }
            | Effect::RenderLabReport
            | Effect::RenderPromptReport => None,
        }
    }
}
