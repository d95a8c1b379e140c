use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use explainer_core::model::PageId;

use crate::views::{HomeView, MlView, PromptView, TokenView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/ml", MlView)] Ml {},
        #[route("/prompt", PromptView)] Prompt {},
        #[route("/token", TokenView)] Token {},
}

impl Route {
    #[must_use]
    pub fn for_page(page: PageId) -> Self {
        match page {
            PageId::MlExplainer => Route::Ml {},
            PageId::PromptFramework => Route::Prompt {},
            PageId::TokenExplainer => Route::Token {},
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Explainers" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                for page in PageId::ALL {
                    li { key: "{page}", Link { to: Route::for_page(page), "{page.title()}" } }
                }
            }
        }
    }
}
