//! The three explainer pages.

pub mod ml;
pub mod prompt;
pub mod token;

pub use ml::{MlExplainer, MlTrigger};
pub use prompt::{PromptFramework, PromptTrigger};
pub use token::{TokenExplainer, TokenTrigger};
