use dioxus::prelude::*;
use explainer_services::pages::prompt::{
    BTN_COMP_SUMMARY, BTN_EMAIL_NEXT, BTN_GENERATE_EMAIL, BTN_GENERATE_JOB, BTN_HERO_NEXT,
    BTN_HERO_PLAY, BTN_JOB_NEXT, BTN_PUBLISH, BTN_RUN_ALL, BUILDER_PREVIEWS, CARD_BAD, CARD_GOOD,
    CHECK_BAR, CHECK_ITEMS, CHECK_TEXT, CHECKLIST_LABELS, EMAIL_BODY, EMAIL_CARD,
    FRAMEWORK_NODES, HERO_STATUS, JD_BODY, JD_METER, OUT_BAD, OUT_GOOD, SUCCESS_MODAL,
    TRAVEL_TOKEN,
};
use explainer_services::{PromptFramework, PromptTrigger};

use super::narrator::{LogPanel, NarratorBubble};
use super::page::use_page;
use crate::vm::PageVm;

const NODE_LABELS: [&str; 5] = ["Role", "Task", "Context", "Constraints", "Format"];
const BUILDER_LABELS: [&str; 4] = ["Role", "Task", "Context", "Constraints"];

#[component]
pub fn PromptView() -> Element {
    let (vm, fire) = use_page(PromptFramework);
    let vm = vm();

    rsx! {
        div { class: "page explainer prompt-page",
            LogPanel { lines: vm.log.clone() }
            main { class: "stage",
                if let Some(message) = vm.unavailable.clone() {
                    div { class: "fatal", "{message}" }
                }
                if vm.is_active("hero") {
                    FrameworkSection { vm: vm.clone(), fire }
                }
                if vm.is_active("email") {
                    EmailSection { vm: vm.clone(), fire }
                }
                if vm.is_active("job") {
                    JobSection { vm: vm.clone(), fire }
                }
                if vm.is_active("checklist") {
                    ChecklistSection { vm: vm.clone(), fire }
                }
                if vm.is_active("comparison") {
                    ComparisonSection { vm: vm.clone(), fire }
                }
                if vm.is_active("dashboard") {
                    PromptDashboard { vm: vm.clone() }
                }
            }
            NarratorBubble { narrator: vm.narrator.clone() }
        }
    }
}

#[component]
fn FrameworkSection(vm: PageVm, fire: Callback<PromptTrigger>) -> Element {
    let status = vm.text(HERO_STATUS, "Press play to follow a prompt through the framework.");

    rsx! {
        section { class: "view active-view", id: "view-hero",
            h1 { "The Prompt Framework" }
            div { class: "framework-visual",
                div { class: vm.class(TRAVEL_TOKEN, "travel-token"), id: TRAVEL_TOKEN }
                for (node, label) in FRAMEWORK_NODES.iter().zip(NODE_LABELS) {
                    div { key: "{node}", class: vm.class(node, "node-item"), id: *node,
                        div { class: "node-circle" }
                        span { "{label}" }
                    }
                }
            }
            p { class: vm.class(HERO_STATUS, "hero-status"), id: HERO_STATUS, "{status}" }
            div { class: "actions",
                button {
                    class: vm.class(BTN_HERO_PLAY, "btn btn-primary-lg"),
                    id: BTN_HERO_PLAY,
                    disabled: !vm.is_enabled(BTN_HERO_PLAY),
                    onclick: move |_| fire.call(PromptTrigger::RunFrameworkAnim),
                    "Play the Framework"
                }
                button {
                    class: vm.class(BTN_HERO_NEXT, "btn btn-secondary"),
                    id: BTN_HERO_NEXT,
                    onclick: move |_| fire.call(PromptTrigger::SwitchView("email".into())),
                    "Apply it: Email →"
                }
            }
        }
    }
}

#[component]
fn EmailSection(vm: PageVm, fire: Callback<PromptTrigger>) -> Element {
    let body = vm.html(EMAIL_BODY);
    let label = vm.text(BTN_GENERATE_EMAIL, "Generate Email");
    let fields: Vec<(usize, &'static str, &'static str, String)> = BUILDER_PREVIEWS
        .iter()
        .zip(BUILDER_LABELS)
        .enumerate()
        .map(|(field, (preview, name))| (field, *preview, name, vm.text(preview, "...")))
        .collect();

    rsx! {
        section { class: "view active-view", id: "view-email",
            h2 { "Email Builder" }
            div { class: "builder",
                for (field, preview, name, shown) in fields {
                    label { key: "{preview}", class: "build-field",
                        span { "{name}" }
                        input {
                            class: "build-in",
                            r#type: "text",
                            oninput: move |event: FormEvent| {
                                fire.call(PromptTrigger::BuilderInput { field, value: event.value() });
                            },
                        }
                        em { class: "build-preview", id: preview, "{shown}" }
                    }
                }
            }
            div { class: vm.class(EMAIL_CARD, "email-card"), id: EMAIL_CARD,
                match body {
                    Some(html) => rsx! {
                        div { class: "email-body", id: EMAIL_BODY, dangerous_inner_html: "{html}" }
                    },
                    None => rsx! {
                        div { class: "email-body placeholder", id: EMAIL_BODY, "Your framed email will appear here." }
                    },
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_GENERATE_EMAIL, "btn btn-primary"),
                    id: BTN_GENERATE_EMAIL,
                    disabled: !vm.is_enabled(BTN_GENERATE_EMAIL),
                    onclick: move |_| fire.call(PromptTrigger::GenerateEmail),
                    "{label}"
                }
                button {
                    class: vm.class(BTN_EMAIL_NEXT, "btn btn-secondary"),
                    id: BTN_EMAIL_NEXT,
                    onclick: move |_| fire.call(PromptTrigger::SwitchView("job".into())),
                    "Next: Job Description →"
                }
            }
        }
    }
}

#[component]
fn JobSection(vm: PageVm, fire: Callback<PromptTrigger>) -> Element {
    let body = vm.html(JD_BODY).unwrap_or_default();
    let label = vm.text(BTN_GENERATE_JOB, "Draft Job Description");

    rsx! {
        section { class: "view active-view", id: "view-job",
            h2 { "Job Description Builder" }
            div { class: "jd-card",
                div { class: "jd-body", id: JD_BODY, dangerous_inner_html: "{body}" }
                div { class: vm.class(JD_METER, "jd-meter"), id: JD_METER,
                    span { "Specificity" }
                    div { class: "meter-fill" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_GENERATE_JOB, "btn btn-primary"),
                    id: BTN_GENERATE_JOB,
                    disabled: !vm.is_enabled(BTN_GENERATE_JOB),
                    onclick: move |_| fire.call(PromptTrigger::GenerateJob),
                    "{label}"
                }
                button {
                    class: vm.class(BTN_JOB_NEXT, "btn btn-secondary"),
                    id: BTN_JOB_NEXT,
                    onclick: move |_| fire.call(PromptTrigger::SwitchView("checklist".into())),
                    "Next: Pre-flight Checklist →"
                }
            }
        }
    }
}

#[component]
fn ChecklistSection(vm: PageVm, fire: Callback<PromptTrigger>) -> Element {
    let progress = vm.progress(CHECK_BAR);
    let verified = vm.text(CHECK_TEXT, "0/5 Verified");
    let publish_class = if vm.is_enabled(BTN_PUBLISH) {
        vm.class(BTN_PUBLISH, "btn btn-primary")
    } else {
        vm.class(BTN_PUBLISH, "btn btn-primary disabled")
    };
    let items: Vec<(usize, &'static str, &'static str, String)> = CHECK_ITEMS
        .iter()
        .zip(CHECKLIST_LABELS)
        .enumerate()
        .map(|(index, (item, text))| {
            let base = if vm.checks[index] { "cl-item checked" } else { "cl-item" };
            (index, *item, text, vm.class(item, base))
        })
        .collect();

    rsx! {
        section { class: "view active-view", id: "view-checklist",
            h2 { "Pre-flight Checklist" }
            ul { class: "checklist",
                for (index, item, text, class) in items {
                    li {
                        key: "{item}",
                        class: "{class}",
                        id: item,
                        onclick: move |_| fire.call(PromptTrigger::ToggleCheck(index)),
                        span { class: "checkbox" }
                        span { "{text}" }
                    }
                }
            }
            div { class: "cl-progress",
                div { class: "cl-bar", id: CHECK_BAR, style: "width: {progress}%" }
            }
            p { id: CHECK_TEXT, "{verified}" }
            button {
                class: "{publish_class}",
                id: BTN_PUBLISH,
                onclick: move |_| fire.call(PromptTrigger::PublishPrompt),
                "Publish Prompt"
            }
            div { class: vm.class(SUCCESS_MODAL, "success-modal"), id: SUCCESS_MODAL,
                h3 { "Prompt Published" }
                p { "Every check passed. Time to see the difference it makes." }
                button {
                    class: "btn btn-primary",
                    id: "btn-modal-next",
                    onclick: move |_| fire.call(PromptTrigger::SwitchView("comparison".into())),
                    "Open the Lab →"
                }
            }
        }
    }
}

#[component]
fn ComparisonSection(vm: PageVm, fire: Callback<PromptTrigger>) -> Element {
    let raw = vm.text(OUT_BAD, "");
    let framed = vm.html(OUT_GOOD).unwrap_or_default();
    let label = vm.text(BTN_RUN_ALL, "Run Comparison");

    rsx! {
        section { class: "view active-view", id: "view-comparison",
            h2 { "Raw vs. Framed" }
            div { class: "comparison",
                div { class: vm.class(CARD_BAD, "compare-card bad"), id: CARD_BAD,
                    h4 { "Raw prompt" }
                    pre { id: OUT_BAD, "{raw}" }
                }
                div { class: vm.class(CARD_GOOD, "compare-card good"), id: CARD_GOOD,
                    h4 { "Framework prompt" }
                    div { id: OUT_GOOD, dangerous_inner_html: "{framed}" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_RUN_ALL, "btn btn-primary"),
                    id: BTN_RUN_ALL,
                    disabled: !vm.is_enabled(BTN_RUN_ALL),
                    onclick: move |_| fire.call(PromptTrigger::RunComparison),
                    "{label}"
                }
                button {
                    class: vm.class(BTN_COMP_SUMMARY, "btn btn-secondary"),
                    id: BTN_COMP_SUMMARY,
                    onclick: move |_| fire.call(PromptTrigger::ShowCompSummary),
                    "See the Analysis →"
                }
            }
        }
    }
}

#[component]
fn PromptDashboard(vm: PageVm) -> Element {
    let Some(report) = vm.prompt_report.clone() else {
        return rsx! {
            section { class: "view active-view", id: "view-dashboard",
                h2 { "Performance Analysis" }
            }
        };
    };
    let summary = vm.prompt_summary_html.clone().unwrap_or_default();
    let impact = report.impact;

    rsx! {
        section { class: "view active-view", id: "view-dashboard",
            h2 { "Performance Analysis" }
            div { class: "bar-chart",
                for bar in report.bars.iter() {
                    div { key: "{bar.label}", class: "bar-col",
                        div { class: "bar", style: "height: {bar.height}%" }
                        span { class: "bar-label", "{bar.label}" }
                    }
                }
            }
            div { class: "gauge",
                span { class: "impact-val", id: "impact-val", "{impact}%" }
                span { "Impact" }
            }
            svg { class: "timeline", view_box: "0 0 300 110", width: "300", height: "110",
                path { id: "graph-timeline", d: "{report.timeline_path}" }
            }
            div { class: "final-summary", id: "final-summary", dangerous_inner_html: "{summary}" }
        }
    }
}
