use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use explainer_core::model::PageId;

use crate::context::AppContext;
use crate::routes::Route;

const BLURBS: [(PageId, &str); 3] = [
    (
        PageId::MlExplainer,
        "Watch raw data become a model, then test it on images and messages.",
    ),
    (
        PageId::PromptFramework,
        "Build prompts from five parts and compare raw against framed output.",
    ),
    (
        PageId::TokenExplainer,
        "Tokens, context windows and hallucinations in three short scenes.",
    ),
];

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    use_effect(move || {
        if let Some(page) = ctx.take_start_page() {
            let _ = navigator.replace(Route::for_page(page));
        }
    });

    rsx! {
        div { class: "page home",
            h2 { "Guided Explainers" }
            p { "Pick a lesson. Your guide narrates each step and keeps notes as you go." }
            ul { class: "page-list",
                for (page, blurb) in BLURBS {
                    li { key: "{page}", class: "page-card",
                        Link { to: Route::for_page(page), h3 { "{page.title()}" } }
                        p { "{blurb}" }
                    }
                }
            }
        }
    }
}
