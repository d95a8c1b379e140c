use dioxus::prelude::*;

use crate::vm::{LogLineVm, NarratorVm};

#[component]
pub fn NarratorBubble(narrator: NarratorVm) -> Element {
    let typed = narrator.typed();
    let overlay_class = if narrator.overlay {
        "bot-overlay active"
    } else {
        "bot-overlay"
    };

    rsx! {
        div { class: "{overlay_class}", id: "bot-overlay" }
        div { class: "ai-bot", id: "ai-bot",
            if narrator.bubble {
                div { class: "bot-bubble", role: "status", aria_live: "polite",
                    p { class: "bot-text", id: "bot-text", "{typed}" }
                }
            }
            div { class: "bot-avatar", "AI" }
        }
    }
}

#[component]
pub fn LogPanel(lines: Vec<LogLineVm>) -> Element {
    rsx! {
        aside { class: "log-panel",
            h3 { class: "log-title", "Session Notes" }
            div { class: "log-content", id: "log-content",
                if lines.is_empty() {
                    p { class: "log-placeholder", "Your guide's notes will appear here." }
                }
                for (index, line) in lines.iter().enumerate() {
                    div { key: "{index}", class: "log-entry",
                        span { class: "log-time", "{line.time}" }
                        span { class: "log-text", "{line.text}" }
                    }
                }
            }
        }
    }
}
