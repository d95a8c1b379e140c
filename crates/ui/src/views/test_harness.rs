use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use explainer_core::time::fixed_clock;

use crate::context::AppContext;
use crate::views::{HomeView, MlView, PromptView, TokenView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Ml,
    Prompt,
    Token,
}

#[derive(Props, Clone, PartialEq)]
struct ViewHarnessProps {
    view: ViewKind,
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| {
        AppContext::default()
            .with_clock(fixed_clock())
            .with_seed(Some(7))
    });
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Ml => rsx! { MlView {} },
        ViewKind::Prompt => rsx! { PromptView {} },
        ViewKind::Token => rsx! { TokenView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { view });
    let mut harness = ViewHarness { dom };
    harness.rebuild();
    harness
}
