use dioxus::prelude::*;
use explainer_core::model::SMALL_WINDOW_LIMIT;
use explainer_services::pages::token::{
    AI_RESPONSE, BTN_CONTEXT_RUN, BTN_FINISH, BTN_HALLUCINATE_RUN, BTN_NEXT_HALLUCINATE,
    BTN_TOKEN_NEXT, BTN_TOKENIZE, GLITCH_TEXT, OVERFLOW_ZONE, RAW_TEXT, TOKENS_OUTPUT,
    WARNING_BADGE,
};
use explainer_services::{TokenExplainer, TokenTrigger};

use super::narrator::{LogPanel, NarratorBubble};
use super::page::use_page;
use crate::vm::{PageVm, token_color_class};

#[component]
pub fn TokenView() -> Element {
    let (vm, fire) = use_page(TokenExplainer);
    let vm = vm();

    rsx! {
        div { class: "page explainer token-page",
            LogPanel { lines: vm.log.clone() }
            main { class: "stage",
                if let Some(message) = vm.unavailable.clone() {
                    div { class: "fatal", "{message}" }
                }
                if vm.is_active("token") {
                    TokenizeSection { vm: vm.clone(), fire }
                }
                if vm.is_active("context") {
                    ContextSection { vm: vm.clone(), fire }
                }
                if vm.is_active("hallucinate") {
                    HallucinateSection { vm: vm.clone(), fire }
                }
                if vm.is_active("summary") {
                    section { class: "view active-view", id: "view-summary",
                        h2 { "Session Complete" }
                        ul { class: "recap",
                            li { "Tokens: models read text as reusable chunks, not words." }
                            li { "Context windows: memory is finite and old tokens fall off." }
                            li { "Hallucinations: fluent answers are predictions, not facts." }
                        }
                    }
                }
            }
            NarratorBubble { narrator: vm.narrator.clone() }
        }
    }
}

#[component]
fn TokenizeSection(vm: PageVm, fire: Callback<TokenTrigger>) -> Element {
    let tokens = vm.items(TOKENS_OUTPUT);

    rsx! {
        section { class: "view active-view", id: "view-token",
            h2 { "1. Tokenization" }
            p { class: vm.class(RAW_TEXT, "raw-text"), id: RAW_TEXT, "Machine learning makes computers smart." }
            div { class: "tokens-output", id: TOKENS_OUTPUT,
                for (index, token) in tokens.iter().enumerate() {
                    span { key: "{index}", class: "token-block", "{token}" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_TOKENIZE, "btn btn-primary"),
                    id: BTN_TOKENIZE,
                    disabled: !vm.is_enabled(BTN_TOKENIZE),
                    onclick: move |_| fire.call(TokenTrigger::RunTokenization),
                    "Tokenize"
                }
                button {
                    class: vm.class(BTN_TOKEN_NEXT, "btn btn-secondary"),
                    id: BTN_TOKEN_NEXT,
                    onclick: move |_| fire.call(TokenTrigger::SwitchView("context".into())),
                    "Next: Context Window →"
                }
            }
        }
    }
}

#[component]
fn ContextSection(vm: PageVm, fire: Callback<TokenTrigger>) -> Element {
    let small: Vec<&'static str> = vm.small_window.iter().copied().map(token_color_class).collect();
    let large: Vec<&'static str> = vm.large_window.iter().copied().map(token_color_class).collect();
    let evicted = vm.evictions;

    rsx! {
        section { class: "view active-view", id: "view-context",
            h2 { "2. The Context Window" }
            div { class: "windows",
                div { class: "window small",
                    h4 { "Small window ({SMALL_WINDOW_LIMIT} tokens)" }
                    div { class: vm.class(OVERFLOW_ZONE, "overflow-zone"), id: OVERFLOW_ZONE,
                        "Forgotten: {evicted}"
                    }
                    div { class: "window-track", id: "window-small",
                        for (index, class) in small.into_iter().enumerate() {
                            span { key: "{index}", class: "{class}" }
                        }
                    }
                }
                div { class: "window large",
                    h4 { "Large window" }
                    div { class: "window-track", id: "window-large",
                        for (index, class) in large.into_iter().enumerate() {
                            span { key: "{index}", class: "{class}" }
                        }
                    }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_CONTEXT_RUN, "btn btn-primary"),
                    id: BTN_CONTEXT_RUN,
                    disabled: !vm.is_enabled(BTN_CONTEXT_RUN),
                    onclick: move |_| fire.call(TokenTrigger::RunContextSim),
                    "Stream Tokens"
                }
                button {
                    class: vm.class(BTN_NEXT_HALLUCINATE, "btn btn-secondary"),
                    id: BTN_NEXT_HALLUCINATE,
                    onclick: move |_| fire.call(TokenTrigger::SwitchView("hallucinate".into())),
                    "Next: Hallucinations →"
                }
            }
        }
    }
}

#[component]
fn HallucinateSection(vm: PageVm, fire: Callback<TokenTrigger>) -> Element {
    rsx! {
        section { class: "view active-view", id: "view-hallucinate",
            h2 { "3. Hallucinations" }
            div { class: "chat",
                p { class: "question", "Who was the first person to walk on Mars?" }
                div { class: vm.class(AI_RESPONSE, "ai-response"), id: AI_RESPONSE,
                    p {
                        "The first person to walk on Mars was "
                        span { class: vm.class(GLITCH_TEXT, "glitch-text"), id: GLITCH_TEXT, "Commander Elena Voronova" }
                        ", who landed in 2031."
                    }
                    span { class: vm.class(WARNING_BADGE, "warning-badge"), id: WARNING_BADGE, "Hallucination detected" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_HALLUCINATE_RUN, "btn btn-primary"),
                    id: BTN_HALLUCINATE_RUN,
                    disabled: !vm.is_enabled(BTN_HALLUCINATE_RUN),
                    onclick: move |_| fire.call(TokenTrigger::RunHallucinationSim),
                    "Ask the Model"
                }
                button {
                    class: vm.class(BTN_FINISH, "btn btn-secondary"),
                    id: BTN_FINISH,
                    onclick: move |_| fire.call(TokenTrigger::SwitchView("summary".into())),
                    "Finish →"
                }
            }
        }
    }
}
