use dioxus::prelude::*;
use explainer_core::model::{Tone, VisionLabel};
use explainer_services::pages::ml::{
    BTN_NLP_NEXT, BTN_PIPELINE_NEXT, BTN_RUN_PIPELINE, BTN_SPAM_RUN, BTN_START, BTN_VISION_NEXT,
    BTN_VISION_RUN, FILE_CLUSTER, MESSAGE_CARD, MODEL_CUBE, MSG_PREVIEW, NODE_INGEST, NODE_TRAIN,
    OPT_CAT, OPT_DOG, PATH_MODEL, PATH_TRAIN, PIPELINE_STATUS, PRESETS, RING_CIRCUMFERENCE,
    SCAN_LASER, SPAM_MESSAGES, SPAM_RING, SPAM_SCORE, SPAM_VERDICT, SUMMARY_TEXT, TRAINING_RING,
    VIS_BAR, VIS_PRED, VISION_IMG,
};
use explainer_services::{MlExplainer, MlTrigger};

use super::narrator::{LogPanel, NarratorBubble};
use super::page::use_page;
use crate::vm::{PageVm, tone_name};

#[component]
pub fn MlView() -> Element {
    let (vm, fire) = use_page(MlExplainer);
    let vm = vm();

    rsx! {
        div { class: "page explainer ml-page",
            LogPanel { lines: vm.log.clone() }
            main { class: "stage",
                if let Some(message) = vm.unavailable.clone() {
                    div { class: "fatal", "{message}" }
                }
                if vm.is_active("hero") {
                    section { class: "view active-view", id: "view-hero",
                        h1 { "How Machines Learn" }
                        p { class: "lead", "Follow raw data through training and put the finished model to work." }
                        button {
                            class: vm.class(BTN_START, "btn btn-primary-lg"),
                            id: BTN_START,
                            disabled: !vm.is_enabled(BTN_START),
                            onclick: move |_| fire.call(MlTrigger::StartExperience),
                            "Start the Experience"
                        }
                    }
                }
                if vm.is_active("pipeline") {
                    PipelineSection { vm: vm.clone(), fire }
                }
                if vm.is_active("vision") {
                    VisionSection { vm: vm.clone(), fire }
                }
                if vm.is_active("nlp") {
                    SpamSection { vm: vm.clone(), fire }
                }
                if vm.is_active("summary") {
                    DashboardSection { vm: vm.clone() }
                }
            }
            NarratorBubble { narrator: vm.narrator.clone() }
        }
    }
}

#[component]
fn PipelineSection(vm: PageVm, fire: Callback<MlTrigger>) -> Element {
    let status = vm.text(PIPELINE_STATUS, "Waiting to start");

    rsx! {
        section { class: "view active-view", id: "view-pipeline",
            h2 { "The Training Pipeline" }
            p { class: vm.class(PIPELINE_STATUS, "pipeline-status"), id: PIPELINE_STATUS,
                "{status}"
            }
            div { class: "pipeline-stage-area",
                div { class: vm.class(NODE_INGEST, "pipeline-node"), id: NODE_INGEST,
                    div { class: vm.class(FILE_CLUSTER, "file-cluster"), id: FILE_CLUSTER }
                    div { class: "node-circle", "Data" }
                }
                div { class: vm.class(PATH_TRAIN, "pipeline-path"), id: PATH_TRAIN }
                div { class: vm.class(NODE_TRAIN, "pipeline-node"), id: NODE_TRAIN,
                    div { class: vm.class(TRAINING_RING, "training-ring") }
                    div { class: "node-circle", "Training" }
                }
                div { class: vm.class(PATH_MODEL, "pipeline-path"), id: PATH_MODEL }
                div { class: "pipeline-node", id: "node-model",
                    div { class: vm.class(MODEL_CUBE, "model-cube"), id: MODEL_CUBE }
                    div { class: "node-circle", "Model" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_RUN_PIPELINE, "btn btn-primary"),
                    id: BTN_RUN_PIPELINE,
                    disabled: !vm.is_enabled(BTN_RUN_PIPELINE),
                    onclick: move |_| fire.call(MlTrigger::PipelineSequenceStart),
                    "Run Pipeline"
                }
                button {
                    class: vm.class(BTN_PIPELINE_NEXT, "btn btn-secondary"),
                    id: BTN_PIPELINE_NEXT,
                    onclick: move |_| fire.call(MlTrigger::SwitchView("vision".into())),
                    "Test the Vision Model →"
                }
            }
        }
    }
}

#[component]
fn VisionSection(vm: PageVm, fire: Callback<MlTrigger>) -> Element {
    let confidence = vm.progress(VIS_BAR);
    let prediction = vm.text(VIS_PRED, "--");

    rsx! {
        section { class: "view active-view", id: "view-vision",
            h2 { "Vision Lab" }
            div { class: "toggle",
                button {
                    class: vm.class(OPT_CAT, "toggle-opt"),
                    id: OPT_CAT,
                    onclick: move |_| fire.call(MlTrigger::SetVisionSource(VisionLabel::Cat)),
                    "Cat"
                }
                button {
                    class: vm.class(OPT_DOG, "toggle-opt"),
                    id: OPT_DOG,
                    onclick: move |_| fire.call(MlTrigger::SetVisionSource(VisionLabel::Dog)),
                    "Dog"
                }
            }
            div { class: vm.class(VISION_IMG, "vision-frame"), id: VISION_IMG,
                div { class: vm.class(SCAN_LASER, "scan-laser") }
            }
            div { class: "prediction",
                span { "Prediction: " }
                strong { id: VIS_PRED, "{prediction}" }
                div { class: "bar-track",
                    div { class: "bar-fill", id: VIS_BAR, style: "width: {confidence}%" }
                }
            }
            div { class: "actions",
                button {
                    class: vm.class(BTN_VISION_RUN, "btn btn-primary"),
                    id: BTN_VISION_RUN,
                    disabled: !vm.is_enabled(BTN_VISION_RUN),
                    onclick: move |_| fire.call(MlTrigger::RunVisionAnalysis),
                    "Analyze Image"
                }
                button {
                    class: vm.class(BTN_VISION_NEXT, "btn btn-secondary"),
                    id: BTN_VISION_NEXT,
                    onclick: move |_| fire.call(MlTrigger::SwitchView("nlp".into())),
                    "Next: Spam Filter →"
                }
            }
        }
    }
}

#[component]
fn SpamSection(vm: PageVm, fire: Callback<MlTrigger>) -> Element {
    let (ring_offset, ring_tone) = vm
        .ring(SPAM_RING)
        .unwrap_or((RING_CIRCUMFERENCE, Tone::Danger));
    let ring_class = format!("ring-fill tone-{}", tone_name(ring_tone));
    let preview = vm.text(MSG_PREVIEW, "Select a message to analyze.");
    let verdict = vm.text(SPAM_VERDICT, "");
    let score = vm.text(SPAM_SCORE, "--");

    rsx! {
        section { class: "view active-view", id: "view-nlp",
            h2 { "Spam Detection Lab" }
            div { class: "presets",
                for (index, (text, _)) in SPAM_MESSAGES.iter().enumerate() {
                    button {
                        key: "{index}",
                        class: vm.class(PRESETS[index], "preset-msg"),
                        id: PRESETS[index],
                        onclick: move |_| fire.call(MlTrigger::LoadSpamPreset(index)),
                        "{text}"
                    }
                }
            }
            div { class: vm.class(MESSAGE_CARD, "message-card"), id: MESSAGE_CARD,
                p { id: MSG_PREVIEW, "{preview}" }
                span { class: vm.class(SPAM_VERDICT, "verdict"), id: SPAM_VERDICT, "{verdict}" }
            }
            svg { class: "ring", view_box: "0 0 100 100", width: "120", height: "120",
                circle { class: "ring-track", cx: "50", cy: "50", r: "45" }
                circle {
                    class: "{ring_class}",
                    id: SPAM_RING,
                    cx: "50",
                    cy: "50",
                    r: "45",
                    stroke_dasharray: "{RING_CIRCUMFERENCE}",
                    stroke_dashoffset: "{ring_offset}",
                }
            }
            p { class: "spam-score", id: SPAM_SCORE, "{score}" }
            div { class: "actions",
                button {
                    class: vm.class(BTN_SPAM_RUN, "btn btn-primary"),
                    id: BTN_SPAM_RUN,
                    disabled: !vm.is_enabled(BTN_SPAM_RUN),
                    onclick: move |_| fire.call(MlTrigger::RunSpamAnalysis),
                    "Check Message"
                }
                button {
                    class: vm.class(BTN_NLP_NEXT, "btn btn-secondary"),
                    id: BTN_NLP_NEXT,
                    onclick: move |_| fire.call(MlTrigger::SwitchView("summary".into())),
                    "View Dashboard →"
                }
            }
        }
    }
}

#[component]
fn DashboardSection(vm: PageVm) -> Element {
    let Some(report) = vm.lab_report.clone() else {
        return rsx! {
            section { class: "view active-view", id: "view-summary",
                h2 { "Session Dashboard" }
                p { "Preparing your report..." }
            }
        };
    };
    let narrative = vm.lab_narrative_html.clone().unwrap_or_default();
    let real_transform = format!("rotate({} 50 50)", report.real_rotation);

    rsx! {
        section { class: "view active-view", id: "view-summary",
            h2 { "Session Dashboard" }
            div { class: "summary-text", id: SUMMARY_TEXT, dangerous_inner_html: "{narrative}" }
            div { class: "charts",
                div { class: "bar-chart",
                    for bar in report.bars.iter() {
                        div { key: "{bar.label}", class: "bar-col",
                            div { class: "bar", style: "height: {bar.height}%" }
                            span { class: "bar-label", "{bar.label} ({bar.value})" }
                        }
                    }
                }
                svg { class: "pie", view_box: "0 0 100 100", width: "120", height: "120",
                    circle {
                        class: "pie-spam",
                        cx: "50",
                        cy: "50",
                        r: "25",
                        stroke_dasharray: "{report.spam_arc} 158",
                    }
                    circle {
                        class: "pie-real",
                        cx: "50",
                        cy: "50",
                        r: "25",
                        transform: "{real_transform}",
                        stroke_dasharray: "{report.real_arc} 158",
                    }
                }
                svg { class: "loss", view_box: "0 0 200 100", width: "200", height: "100",
                    path { class: "loss-curve", d: "{report.loss_path}" }
                }
            }
        }
    }
}
