//! Prompt-framework page: the framework flow, two generators, a pre-flight
//! checklist, a raw-versus-framed comparison and a fixed dashboard.

use std::time::Duration;

use explainer_core::model::{
    CHECKLIST_LEN, Effect, Motion, PageId, PageManifest, Scene, SceneStep, SessionState, Tone,
    ViewId,
};
use rand::rngs::StdRng;

use crate::controller::{Action, PageScript, Trigger};

pub const VIEWS: [&str; 6] = ["hero", "email", "job", "checklist", "comparison", "dashboard"];

pub const BTN_HERO_PLAY: &str = "btn-hero-play";
pub const HERO_STATUS: &str = "hero-status";
pub const TRAVEL_TOKEN: &str = "travel-token";
/// Framework stages, in the order the token visits them.
pub const FRAMEWORK_NODES: [&str; 5] = [
    "node-role",
    "node-task",
    "node-context",
    "node-constraints",
    "node-format",
];
pub const BTN_HERO_NEXT: &str = "btn-hero-next";

pub const BUILDER_PREVIEWS: [&str; 4] = [
    "preview-role",
    "preview-task",
    "preview-context",
    "preview-constraints",
];
pub const EMAIL_CARD: &str = "email-card";
pub const EMAIL_BODY: &str = "email-body-text";
pub const BTN_GENERATE_EMAIL: &str = "btn-generate-email";
pub const BTN_EMAIL_NEXT: &str = "btn-email-next";

pub const JD_BODY: &str = "jd-body-text";
pub const JD_METER: &str = "jd-meter";
pub const BTN_GENERATE_JOB: &str = "btn-generate-job";
pub const BTN_JOB_NEXT: &str = "btn-job-next";

pub const CHECK_ITEMS: [&str; CHECKLIST_LEN] = ["check-0", "check-1", "check-2", "check-3", "check-4"];
pub const CHECK_BAR: &str = "cl-bar";
pub const CHECK_TEXT: &str = "cl-text";
pub const BTN_PUBLISH: &str = "btn-publish";
pub const SUCCESS_MODAL: &str = "success-modal";

pub const BTN_RUN_ALL: &str = "btn-run-all";
pub const CARD_BAD: &str = "card-bad";
pub const OUT_BAD: &str = "out-bad";
pub const CARD_GOOD: &str = "card-good";
pub const OUT_GOOD: &str = "out-good";
pub const BTN_COMP_SUMMARY: &str = "btn-comp-summary";

pub const CHECKLIST_LABELS: [&str; CHECKLIST_LEN] = [
    "Role is stated",
    "Task is a single clear goal",
    "Context covers audience and background",
    "Constraints are explicit",
    "Output format is specified",
];

pub const EMAIL_DRAFT: &str = "**Subject: Update on Q3 Timeline - Revised Scope**

Hi Team,

As the **Project Manager**, I want to address the recent timeline shifts caused by the scope changes.

**Constraint Check:** We cannot move the launch date. Therefore, we will be prioritizing the core features outlined in the attached doc.

Please review by EOD.

Best,  
Project Lead";

pub const JOB_DRAFT: &str = "### Senior React Developer (FinTech)

We are seeking a 5+ Year veteran to lead our frontend architecture.

- **Context:** High-performance trading dashboard.
- **Task:** Migrate legacy codebase to React 18 + TS.
- **Must Haves:** AWS, Node.js, Real-time sockets.";

pub const RAW_OUTPUT: &str = "Subject: New Product\n\nHi,\n\nWe have a new product. It is great. You should buy it.\n\nThanks,\nTeam";

pub const FRAMED_OUTPUT: &str = "**Subject:** Exclusive Summer Launch ☀️

Hi [Name],

We are thrilled to unveil our new eco-friendly line designed just for you. Early access starts now!

**CTA:** Shop the Collection

Warmly,  
The EcoTeam";

const FRAMEWORK_LINE: &str =
    "Every great prompt follows this path. Watch the token gather context at each node.";
const EMAIL_INTRO: &str = "Applying the framework: fill in the constraints and context to see how the email evolves from generic to great.";
const JOB_INTRO: &str = "Notice how adding specific 'Context' like skills and 'Role' changes the output tone completely.";
const CHECKLIST_INTRO: &str =
    "Great prompts need a safety check. Verify your Logic before deploying.";
const COMPARISON_INTRO: &str =
    "Welcome to the Lab. Test a raw prompt versus one optimized with our Framework.";
const DASHBOARD_INTRO: &str = "Simulation Complete. Here is your performance analysis.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptTrigger {
    RunFrameworkAnim,
    /// Typing into one of the builder fields above the email card.
    BuilderInput { field: usize, value: String },
    GenerateEmail,
    GenerateJob,
    ToggleCheck(usize),
    PublishPrompt,
    RunComparison,
    ShowCompSummary,
    SwitchView(ViewId),
}

impl Trigger for PromptTrigger {
    fn name(&self) -> &'static str {
        match self {
            PromptTrigger::RunFrameworkAnim => "runFrameworkAnim",
            PromptTrigger::BuilderInput { .. } => "builderInput",
            PromptTrigger::GenerateEmail => "generateEmail",
            PromptTrigger::GenerateJob => "generateJob",
            PromptTrigger::ToggleCheck(_) => "toggleCheck",
            PromptTrigger::PublishPrompt => "publishPrompt",
            PromptTrigger::RunComparison => "runComparison",
            PromptTrigger::ShowCompSummary => "showCompSummary",
            PromptTrigger::SwitchView(_) => "switchView",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PromptFramework;

impl PromptFramework {
    #[must_use]
    pub fn walkthrough() -> Vec<PromptTrigger> {
        let mut triggers = vec![
            PromptTrigger::RunFrameworkAnim,
            PromptTrigger::SwitchView("email".into()),
            PromptTrigger::BuilderInput {
                field: 0,
                value: "Project Manager".to_string(),
            },
            PromptTrigger::GenerateEmail,
            PromptTrigger::SwitchView("job".into()),
            PromptTrigger::GenerateJob,
            PromptTrigger::SwitchView("checklist".into()),
        ];
        triggers.extend((0..CHECKLIST_LEN).map(PromptTrigger::ToggleCheck));
        triggers.extend([
            PromptTrigger::PublishPrompt,
            PromptTrigger::SwitchView("comparison".into()),
            PromptTrigger::RunComparison,
            PromptTrigger::ShowCompSummary,
        ]);
        triggers
    }
}

fn framework_scene() -> Scene {
    let mut scene = Scene::new("framework")
        .triggered_by(BTN_HERO_PLAY)
        .step(SceneStep::instant(vec![Effect::set_text(
            HERO_STATUS,
            "Simulating Token Flow...",
        )]))
        .speak(FRAMEWORK_LINE)
        .step(SceneStep::instant(vec![Effect::reveal(TRAVEL_TOKEN)]));
    for node in FRAMEWORK_NODES {
        scene = scene
            .animate(
                vec![Effect::play(TRAVEL_TOKEN, Motion::Arrive)],
                Duration::from_secs(1),
            )
            .animate(
                vec![Effect::tone(node, Tone::Accent), Effect::play(node, Motion::Pulse)],
                Duration::from_millis(400),
            );
    }
    scene
        .animate(
            vec![Effect::play(TRAVEL_TOKEN, Motion::FadeOut)],
            Duration::from_millis(500),
        )
        .on_complete(vec![
            Effect::hide(TRAVEL_TOKEN),
            Effect::set_text(HERO_STATUS, "Framework visualization completed ✔"),
            Effect::tone(HERO_STATUS, Tone::Success),
            Effect::reveal(BTN_HERO_NEXT),
        ])
}

fn email_scene() -> Scene {
    Scene::new("email")
        .triggered_by(BTN_GENERATE_EMAIL)
        .animate(
            vec![
                Effect::set_text(BTN_GENERATE_EMAIL, "Generating..."),
                Effect::play(EMAIL_CARD, Motion::Pulse),
            ],
            Duration::from_secs(1),
        )
        .animate(
            vec![
                Effect::markdown(EMAIL_BODY, EMAIL_DRAFT),
                Effect::play(EMAIL_BODY, Motion::FadeIn),
            ],
            Duration::from_millis(500),
        )
        .on_complete(vec![
            Effect::set_text(BTN_GENERATE_EMAIL, "Regenerate"),
            Effect::enable(BTN_GENERATE_EMAIL),
            Effect::reveal(BTN_EMAIL_NEXT),
        ])
}

fn job_scene() -> Scene {
    Scene::new("job")
        .triggered_by(BTN_GENERATE_JOB)
        .animate(
            vec![Effect::set_text(BTN_GENERATE_JOB, "Drafting...")],
            Duration::from_millis(1200),
        )
        .animate(
            vec![
                Effect::markdown(JD_BODY, JOB_DRAFT),
                Effect::reveal(JD_METER),
                Effect::play(JD_METER, Motion::SlideIn),
            ],
            Duration::from_millis(1500),
        )
        .on_complete(vec![
            Effect::set_text(BTN_GENERATE_JOB, "Update Draft"),
            Effect::enable(BTN_GENERATE_JOB),
            Effect::reveal(BTN_JOB_NEXT),
        ])
}

fn comparison_scene() -> Scene {
    Scene::new("comparison")
        .triggered_by(BTN_RUN_ALL)
        .step(SceneStep::instant(vec![
            Effect::set_text(BTN_RUN_ALL, "Running Comparison... ⏳"),
            Effect::reveal(CARD_BAD),
        ]))
        .step(SceneStep::wait(Duration::from_millis(600)))
        .animate(
            vec![
                Effect::set_text(OUT_BAD, RAW_OUTPUT),
                Effect::play(CARD_BAD, Motion::SlideIn),
                Effect::reveal(CARD_GOOD),
            ],
            Duration::from_millis(800),
        )
        .step(SceneStep::instant(vec![
            Effect::markdown(OUT_GOOD, FRAMED_OUTPUT),
            Effect::play(CARD_GOOD, Motion::SlideIn),
        ]))
        .on_complete(vec![
            Effect::set_text(BTN_RUN_ALL, "Simulation Complete ✔"),
            Effect::reveal(BTN_COMP_SUMMARY),
        ])
}

fn toggle_check(index: usize, session: &SessionState) -> Action {
    let Some(&item) = CHECK_ITEMS.get(index) else {
        return Action::Ignore("no such checklist item");
    };
    let mut checklist = session.checklist();
    let checked = !checklist.is_checked(index);
    checklist.set(index, checked);
    let count = checklist.count();
    #[allow(clippy::cast_precision_loss)]
    let percent = count as f32 * 100.0 / CHECKLIST_LEN as f32;

    let mut effects = vec![
        Effect::SetCheck { index, checked },
        Effect::tone(item, if checked { Tone::Success } else { Tone::Neutral }),
    ];
    if checked {
        effects.push(Effect::play(item, Motion::Pop));
    }
    effects.extend([
        Effect::progress(CHECK_BAR, percent),
        Effect::set_text(CHECK_TEXT, format!("{count}/{CHECKLIST_LEN} Verified")),
    ]);
    if checklist.is_complete() {
        effects.extend([Effect::enable(BTN_PUBLISH), Effect::play(BTN_PUBLISH, Motion::Pulse)]);
    } else {
        effects.push(Effect::disable(BTN_PUBLISH));
    }
    Action::Apply(effects)
}

impl PageScript for PromptFramework {
    type Trigger = PromptTrigger;

    fn page(&self) -> PageId {
        PageId::PromptFramework
    }

    fn manifest(&self) -> PageManifest {
        PageManifest::new(PageId::PromptFramework, &VIEWS)
            .visible(&[
                BTN_HERO_PLAY,
                HERO_STATUS,
                EMAIL_CARD,
                EMAIL_BODY,
                BTN_GENERATE_EMAIL,
                JD_BODY,
                BTN_GENERATE_JOB,
                CHECK_BAR,
                CHECK_TEXT,
                BTN_PUBLISH,
                BTN_RUN_ALL,
                OUT_BAD,
                OUT_GOOD,
            ])
            .visible(&FRAMEWORK_NODES)
            .visible(&BUILDER_PREVIEWS)
            .visible(&CHECK_ITEMS)
            .hidden(&[
                TRAVEL_TOKEN,
                BTN_HERO_NEXT,
                BTN_EMAIL_NEXT,
                JD_METER,
                BTN_JOB_NEXT,
                SUCCESS_MODAL,
                CARD_BAD,
                CARD_GOOD,
                BTN_COMP_SUMMARY,
            ])
            .disabled(&[BTN_PUBLISH])
    }

    fn on_enter(&self, view: &ViewId, _session: &SessionState) -> Option<Scene> {
        let scene = match view.as_str() {
            "email" => Scene::new("email-intro").speak(EMAIL_INTRO),
            "job" => Scene::new("job-intro").speak(JOB_INTRO),
            "checklist" => Scene::new("checklist-intro").speak(CHECKLIST_INTRO),
            "comparison" => Scene::new("comparison-intro")
                .step(SceneStep::instant(vec![Effect::hide(SUCCESS_MODAL)]))
                .speak(COMPARISON_INTRO),
            "dashboard" => Scene::new("dashboard")
                .step(SceneStep::wait(Duration::from_millis(500)))
                .step(SceneStep::instant(vec![Effect::RenderPromptReport]))
                .speak(DASHBOARD_INTRO),
            _ => return None,
        };
        Some(scene)
    }

    fn handle(&self, trigger: PromptTrigger, session: &SessionState, _rng: &mut StdRng) -> Action {
        match trigger {
            PromptTrigger::RunFrameworkAnim => Action::Run(framework_scene()),
            PromptTrigger::BuilderInput { field, value } => match BUILDER_PREVIEWS.get(field) {
                Some(&preview) => {
                    let shown = if value.is_empty() {
                        "...".to_string()
                    } else {
                        value
                    };
                    Action::Apply(vec![Effect::set_text(preview, shown)])
                }
                None => Action::Ignore("no such builder field"),
            },
            PromptTrigger::GenerateEmail => Action::Run(email_scene()),
            PromptTrigger::GenerateJob => Action::Run(job_scene()),
            PromptTrigger::ToggleCheck(index) => toggle_check(index, session),
            PromptTrigger::PublishPrompt => {
                if session.elements().is_usable(&BTN_PUBLISH.into()) {
                    Action::Apply(vec![Effect::reveal(SUCCESS_MODAL)])
                } else {
                    Action::Ignore("checklist incomplete")
                }
            }
            PromptTrigger::RunComparison => Action::Run(comparison_scene()),
            PromptTrigger::ShowCompSummary => Action::Switch("dashboard".into()),
            PromptTrigger::SwitchView(view) => Action::Switch(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn session() -> SessionState {
        SessionState::from_manifest(&PromptFramework.manifest()).unwrap()
    }

    fn apply(session: &mut SessionState, action: Action) {
        let Action::Apply(effects) = action else {
            panic!("expected effects, got {action:?}");
        };
        for effect in effects {
            session.apply(effect).unwrap();
        }
    }

    #[test]
    fn publish_unlocks_only_when_all_items_are_checked() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            PromptFramework.handle(PromptTrigger::PublishPrompt, &session, &mut rng),
            Action::Ignore("checklist incomplete")
        );

        for index in 0..CHECKLIST_LEN - 1 {
            let action = PromptFramework.handle(PromptTrigger::ToggleCheck(index), &session, &mut rng);
            apply(&mut session, action);
        }
        assert_eq!(session.checklist().count(), 4);
        assert!(!session.elements().is_usable(&BTN_PUBLISH.into()));

        let action = PromptFramework.handle(PromptTrigger::ToggleCheck(4), &session, &mut rng);
        apply(&mut session, action);
        assert!(session.checklist().is_complete());
        assert!(session.elements().is_usable(&BTN_PUBLISH.into()));

        let action = PromptFramework.handle(PromptTrigger::ToggleCheck(2), &session, &mut rng);
        apply(&mut session, action);
        assert_eq!(session.checklist().count(), 4);
        assert!(!session.elements().is_usable(&BTN_PUBLISH.into()));
    }

    #[test]
    fn toggle_reports_progress_text() {
        let session = session();
        let mut rng = StdRng::seed_from_u64(0);
        let Action::Apply(effects) =
            PromptFramework.handle(PromptTrigger::ToggleCheck(0), &session, &mut rng)
        else {
            panic!("toggle should apply effects");
        };
        assert!(effects.contains(&Effect::set_text(CHECK_TEXT, "1/5 Verified")));
        assert!(effects.contains(&Effect::progress(CHECK_BAR, 20.0)));
    }

    #[test]
    fn empty_builder_input_shows_placeholder() {
        let session = session();
        let mut rng = StdRng::seed_from_u64(0);
        let mut preview = |value: &str| {
            PromptFramework.handle(
                PromptTrigger::BuilderInput {
                    field: 1,
                    value: value.to_string(),
                },
                &session,
                &mut rng,
            )
        };
        assert_eq!(
            preview(""),
            Action::Apply(vec![Effect::set_text("preview-task", "...")])
        );
        assert_eq!(
            preview("  "),
            Action::Apply(vec![Effect::set_text("preview-task", "  ")])
        );
    }

    #[test]
    fn scenes_only_touch_declared_elements() {
        let session = session();
        let mut rng = StdRng::seed_from_u64(0);
        for trigger in PromptFramework::walkthrough() {
            match PromptFramework.handle(trigger, &session, &mut rng) {
                Action::Run(scene) => session.check_targets(scene.targets()).unwrap(),
                Action::Apply(effects) => session
                    .check_targets(effects.iter().filter_map(Effect::target))
                    .unwrap(),
                Action::Switch(_) | Action::Ignore(_) => {}
            }
        }
        for view in VIEWS {
            if let Some(scene) = PromptFramework.on_enter(&view.into(), &session) {
                session.check_targets(scene.targets()).unwrap();
            }
        }
    }
}
