#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod narrator;
pub mod pages;
pub mod sequencer;
pub mod session;
pub mod surface;
pub mod views;

pub use explainer_core::Clock;

pub use controller::{Action, ControllerOptions, Dispatch, PageController, PageScript, Trigger};
pub use error::ControllerError;
pub use narrator::{Narrator, SpeakOutcome};
pub use pages::{
    MlExplainer, MlTrigger, PromptFramework, PromptTrigger, TokenExplainer, TokenTrigger,
};
pub use sequencer::{SceneOutcome, Sequencer};
pub use session::SharedSession;
pub use surface::{ChannelSurface, FanoutSurface, RecordingSurface, Surface, TracingSurface};
pub use views::{SwitchOutcome, ViewSwitcher};
