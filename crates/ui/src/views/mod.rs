mod home;
mod ml;
mod narrator;
mod page;
mod prompt;
mod token;

pub use home::HomeView;
pub use ml::MlView;
pub use narrator::{LogPanel, NarratorBubble};
pub use page::use_page;
pub use prompt::PromptView;
pub use token::TokenView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
