mod effect;
mod event;
mod ids;
mod manifest;
mod session;
mod step;
mod timing;
mod utterance;

pub use effect::{Effect, MessageKind, Motion, Tone, TokenColor, VisionLabel};
pub use event::{ContextWindow, SurfaceEvent};
pub use ids::{ElementId, PageId, SceneId, ViewId};
pub use manifest::PageManifest;
pub use session::{
    CHECKLIST_LEN, Checklist, ContextWindows, ElementBoard, ElementState, LabTally,
    SMALL_WINDOW_LIMIT, SessionState,
};
pub use step::{Scene, SceneStep};
pub use timing::{
    NarratorTiming, NarratorTimingOverrides, PageTiming, PausePolicy, TimingError, TimingOverrides,
    ViewTiming, ViewTimingOverrides,
};
pub use utterance::{LogEntry, NarratorLog, Utterance};
