//! Which top-level view of a page is showing.
//!
//! Exactly one view is active at any time. There is no history stack:
//! moving "back" only happens when a control names an earlier view.

use crate::error::PageError;
use crate::model::ViewId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ViewId,
    pub to: ViewId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    views: Vec<ViewId>,
    active: ViewId,
}

impl ViewState {
    /// # Errors
    ///
    /// Returns `PageError::NoViews` for an empty view list and
    /// `PageError::MissingView` when `initial` is not one of `views`.
    pub fn new(views: Vec<ViewId>, initial: ViewId) -> Result<Self, PageError> {
        if views.is_empty() {
            return Err(PageError::NoViews);
        }
        if !views.contains(&initial) {
            return Err(PageError::MissingView(initial));
        }
        Ok(Self {
            views,
            active: initial,
        })
    }

    #[must_use]
    pub fn active(&self) -> &ViewId {
        &self.active
    }

    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    #[must_use]
    pub fn contains(&self, view: &ViewId) -> bool {
        self.views.contains(view)
    }

    #[must_use]
    pub fn is_active(&self, view: &ViewId) -> bool {
        &self.active == view
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.views.iter().filter(|view| self.is_active(view)).count()
    }

    /// Works out the move to `target` without applying it. `Ok(None)` means
    /// the target is already showing.
    ///
    /// # Errors
    ///
    /// Returns `PageError::MissingView` for a view the page does not have.
    pub fn plan(&self, target: &ViewId) -> Result<Option<Transition>, PageError> {
        if !self.contains(target) {
            return Err(PageError::MissingView(target.clone()));
        }
        if self.is_active(target) {
            return Ok(None);
        }
        Ok(Some(Transition {
            from: self.active.clone(),
            to: target.clone(),
        }))
    }

    /// # Errors
    ///
    /// Returns `PageError::MissingView` if the transition's target is unknown.
    pub fn commit(&mut self, transition: &Transition) -> Result<(), PageError> {
        if !self.contains(&transition.to) {
            return Err(PageError::MissingView(transition.to.clone()));
        }
        self.active = transition.to.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views() -> ViewState {
        ViewState::new(
            vec!["hero".into(), "pipeline".into(), "summary".into()],
            "hero".into(),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_and_unknown_initial() {
        assert_eq!(ViewState::new(Vec::new(), "hero".into()), Err(PageError::NoViews));
        assert_eq!(
            ViewState::new(vec!["hero".into()], "summary".into()),
            Err(PageError::MissingView("summary".into()))
        );
    }

    #[test]
    fn transitions_keep_exactly_one_view_active() {
        let mut state = views();
        for target in ["pipeline", "summary", "hero"] {
            let transition = state.plan(&target.into()).unwrap().unwrap();
            state.commit(&transition).unwrap();
            assert_eq!(state.active().as_str(), target);
            assert_eq!(state.active_count(), 1);
        }
    }

    #[test]
    fn plan_to_active_view_is_a_no_op() {
        let state = views();
        assert_eq!(state.plan(&"hero".into()), Ok(None));
    }

    #[test]
    fn plan_to_unknown_view_fails() {
        let state = views();
        assert_eq!(
            state.plan(&"dashboard".into()),
            Err(PageError::MissingView("dashboard".into()))
        );
    }
}
