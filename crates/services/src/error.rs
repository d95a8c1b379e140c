//! Shared error types for the services crate.

use thiserror::Error;

use explainer_core::PageError;
use explainer_core::model::TimingError;

/// Errors emitted while assembling a `PageController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Timing(#[from] TimingError),
}
