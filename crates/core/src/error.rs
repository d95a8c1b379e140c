use thiserror::Error;

use crate::model::{ElementId, ViewId};

/// Conditions that abort a single page action.
///
/// None of these are fatal: the page controller logs them and carries on
/// with the next user action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("view `{0}` is not part of this page")]
    MissingView(ViewId),

    #[error("element `{0}` is not part of this page")]
    MissingElement(ElementId),

    #[error("a page needs at least one view")]
    NoViews,

    #[error("unknown page `{0}`")]
    UnknownPage(String),
}
