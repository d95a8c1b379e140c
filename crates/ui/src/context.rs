use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use explainer_core::Clock;
use explainer_core::model::{PageId, PageTiming, TimingError, TimingOverrides};
use explainer_services::ControllerOptions;

/// Launch settings shared by every page view.
#[derive(Clone)]
pub struct AppContext {
    start_page: Option<PageId>,
    open_start_page_once: Arc<AtomicBool>,
    timings: HashMap<PageId, PageTiming>,
    clock: Clock,
    seed: Option<u64>,
}

impl AppContext {
    /// Resolves per-page timing once so page views never see a bad value.
    ///
    /// # Errors
    ///
    /// Returns `TimingError` if `overrides` or `speed` hold an invalid value.
    pub fn new(
        start_page: Option<PageId>,
        overrides: &TimingOverrides,
        speed: Option<f64>,
    ) -> Result<Self, TimingError> {
        let mut timings = HashMap::new();
        for page in PageId::ALL {
            let mut timing = PageTiming::for_page(page).with_overrides(overrides)?;
            if let Some(speed) = speed {
                timing = timing.scaled(speed)?;
            }
            timings.insert(page, timing);
        }
        Ok(Self {
            start_page,
            open_start_page_once: Arc::new(AtomicBool::new(start_page.is_some())),
            timings,
            clock: Clock::System,
            seed: None,
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn start_page(&self) -> Option<PageId> {
        self.start_page
    }

    /// The page requested on the command line, handed out once.
    #[must_use]
    pub fn take_start_page(&self) -> Option<PageId> {
        if self.open_start_page_once.swap(false, Ordering::AcqRel) {
            self.start_page
        } else {
            None
        }
    }

    #[must_use]
    pub fn timing(&self, page: PageId) -> PageTiming {
        self.timings
            .get(&page)
            .copied()
            .unwrap_or_else(|| PageTiming::for_page(page))
    }

    #[must_use]
    pub fn controller_options(&self, page: PageId) -> ControllerOptions {
        ControllerOptions {
            timing: Some(self.timing(page)),
            speed: None,
            clock: self.clock,
            seed: self.seed,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        let timings = PageId::ALL
            .into_iter()
            .map(|page| (page, PageTiming::for_page(page)))
            .collect();
        Self {
            start_page: None,
            open_start_page_once: Arc::new(AtomicBool::new(false)),
            timings,
            clock: Clock::System,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_page_is_handed_out_once() {
        let ctx = AppContext::new(Some(PageId::TokenExplainer), &TimingOverrides::default(), None)
            .unwrap();
        assert_eq!(ctx.take_start_page(), Some(PageId::TokenExplainer));
        assert_eq!(ctx.take_start_page(), None);
        assert_eq!(ctx.start_page(), Some(PageId::TokenExplainer));
    }

    #[test]
    fn speed_scales_every_page() {
        let ctx = AppContext::new(None, &TimingOverrides::default(), Some(0.5)).unwrap();
        let token = ctx.timing(PageId::TokenExplainer);
        assert_eq!(token.view.fade_in, std::time::Duration::from_millis(400));
        assert!(AppContext::new(None, &TimingOverrides::default(), Some(0.0)).is_err());
    }
}
