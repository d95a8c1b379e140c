use crate::model::{ElementId, PageId, ViewId};

/// Static shape of a page: its views and every element a script may touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageManifest {
    pub page: PageId,
    pub views: Vec<ViewId>,
    pub initial_view: ViewId,
    /// `(element, starts_visible)`.
    pub elements: Vec<(ElementId, bool)>,
    /// Elements that start out disabled.
    pub disabled: Vec<ElementId>,
}

impl PageManifest {
    #[must_use]
    pub fn new(page: PageId, views: &[&'static str]) -> Self {
        let views: Vec<ViewId> = views.iter().map(|&name| ViewId::from_static(name)).collect();
        let initial_view = views
            .first()
            .cloned()
            .unwrap_or_else(|| ViewId::from_static(""));
        Self {
            page,
            views,
            initial_view,
            elements: Vec::new(),
            disabled: Vec::new(),
        }
    }

    #[must_use]
    pub fn visible(mut self, names: &[&'static str]) -> Self {
        self.elements
            .extend(names.iter().map(|&name| (ElementId::from_static(name), true)));
        self
    }

    #[must_use]
    pub fn hidden(mut self, names: &[&'static str]) -> Self {
        self.elements
            .extend(names.iter().map(|&name| (ElementId::from_static(name), false)));
        self
    }

    #[must_use]
    pub fn disabled(mut self, names: &[&'static str]) -> Self {
        self.disabled
            .extend(names.iter().map(|&name| ElementId::from_static(name)));
        self
    }
}
