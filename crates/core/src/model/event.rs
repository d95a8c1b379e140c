use crate::model::{Effect, LogEntry, SceneId, TokenColor, ViewId};
use crate::summary::{LabReport, PromptReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextWindow {
    Small,
    Large,
}

/// Everything a page shows, as an ordered stream.
///
/// Renderers fold these into their own state; tests record them and assert
/// on the order.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    NarratorShown,
    OverlayShown,
    NarratorStarted { text: String },
    /// `shown` characters of the current line are visible.
    NarratorTyped { shown: usize },
    NarratorHidden,
    OverlayHidden,
    LogAppended(LogEntry),

    SceneStarted { scene: SceneId },
    AnimationStarted { scene: SceneId, step: usize },
    AnimationFinished { scene: SceneId, step: usize },
    SceneFinished { scene: SceneId },

    Applied(Effect),
    ContextTokenPushed { window: ContextWindow, color: TokenColor },
    ContextTokenEvicted { window: ContextWindow },
    LabReportRendered(LabReport),
    PromptReportRendered(PromptReport),

    ViewHidden(ViewId),
    ViewShown(ViewId),
}

impl SurfaceEvent {
    /// Typing frames are high-volume; most consumers only care whether a
    /// line started and finished.
    #[must_use]
    pub fn is_typing_frame(&self) -> bool {
        matches!(self, SurfaceEvent::NarratorTyped { .. })
    }
}
