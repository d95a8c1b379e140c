//! Machine-learning pipeline page: a training animation, a vision lab, a
//! spam lab and a dashboard built from what the visitor did.

use std::time::Duration;

use explainer_core::model::{
    Effect, MessageKind, Motion, PageId, PageManifest, Scene, SceneStep, SessionState, Tone,
    Utterance, ViewId, VisionLabel,
};
use rand::Rng;
use rand::rngs::StdRng;

use crate::controller::{Action, PageScript, Trigger};

pub const VIEWS: [&str; 5] = ["hero", "pipeline", "vision", "nlp", "summary"];

pub const BTN_START: &str = "btn-start";
pub const BTN_RUN_PIPELINE: &str = "btn-run-pipeline";
pub const PIPELINE_STATUS: &str = "pipeline-status";
pub const FILE_CLUSTER: &str = "file-cluster";
pub const NODE_INGEST: &str = "node-ingest";
pub const PATH_TRAIN: &str = "path-1";
pub const NODE_TRAIN: &str = "node-train";
pub const TRAINING_RING: &str = "training-ring";
pub const PATH_MODEL: &str = "path-2";
pub const MODEL_CUBE: &str = "model-cube";
pub const BTN_PIPELINE_NEXT: &str = "btn-pipeline-next";

pub const OPT_CAT: &str = "opt-cat";
pub const OPT_DOG: &str = "opt-dog";
pub const VISION_IMG: &str = "vision-img";
pub const SCAN_LASER: &str = "scan-laser";
pub const VIS_PRED: &str = "vis-pred";
pub const VIS_BAR: &str = "vis-bar";
pub const BTN_VISION_RUN: &str = "btn-vision-run";
pub const BTN_VISION_NEXT: &str = "btn-vision-next";

pub const PRESETS: [&str; 4] = ["preset-0", "preset-1", "preset-2", "preset-3"];
pub const MSG_PREVIEW: &str = "msg-preview-text";
pub const MESSAGE_CARD: &str = "message-card";
pub const SPAM_VERDICT: &str = "spam-verdict";
pub const SPAM_RING: &str = "spam-ring";
pub const SPAM_SCORE: &str = "spam-score";
pub const BTN_SPAM_RUN: &str = "btn-spam-run";
pub const BTN_NLP_NEXT: &str = "btn-nlp-next";

pub const SUMMARY_TEXT: &str = "dynamic-summary-text";

/// Full stroke of the spam-score ring.
pub const RING_CIRCUMFERENCE: f32 = 283.0;

/// The spam lab's sample messages.
pub const SPAM_MESSAGES: [(&str, MessageKind); 4] = [
    ("Congrats! You won $1000.", MessageKind::Spam),
    ("Meeting changed to 4pm.", MessageKind::Ham),
    ("Cheap pharmacy pills.", MessageKind::Spam),
    ("Hey, see you soon.", MessageKind::Ham),
];

const HELLO: &str = "Hello! I'm Aura, your AI guide. Let's explore how machines learn.";
const PIPELINE_LINES: [&str; 4] = [
    "First, we need raw data. Watch as we ingest thousands of images.",
    "The data travels to the Training Engine to find patterns.",
    "Finally, we compile the learned patterns into a predictive Model.",
    "Training complete! The model is ready for testing.",
];
const VISION_INTRO: &str = "Welcome to the Vision Lab. Use the learned model to classify new images as either Cat or Dog.";
const NLP_INTRO: &str = "Excellent. Now let's test the Natural Language Processing model. Can it detect spam emails correctly?";
const SUMMARY_INTRO: &str = "Analysis complete. Let's review the performance metrics generated from your session.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MlTrigger {
    StartExperience,
    PipelineSequenceStart,
    SetVisionSource(VisionLabel),
    RunVisionAnalysis,
    LoadSpamPreset(usize),
    RunSpamAnalysis,
    SwitchView(ViewId),
}

impl Trigger for MlTrigger {
    fn name(&self) -> &'static str {
        match self {
            MlTrigger::StartExperience => "startExperience",
            MlTrigger::PipelineSequenceStart => "pipelineSequenceStart",
            MlTrigger::SetVisionSource(_) => "setVisionSource",
            MlTrigger::RunVisionAnalysis => "runVisionAnalysis",
            MlTrigger::LoadSpamPreset(_) => "loadSpamPreset",
            MlTrigger::RunSpamAnalysis => "runSpamAnalysis",
            MlTrigger::SwitchView(_) => "switchView",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MlExplainer;

impl MlExplainer {
    /// A full visit: pipeline, one image, two emails, then the dashboard.
    #[must_use]
    pub fn walkthrough() -> Vec<MlTrigger> {
        vec![
            MlTrigger::StartExperience,
            MlTrigger::PipelineSequenceStart,
            MlTrigger::SwitchView("vision".into()),
            MlTrigger::SetVisionSource(VisionLabel::Cat),
            MlTrigger::RunVisionAnalysis,
            MlTrigger::SwitchView("nlp".into()),
            MlTrigger::LoadSpamPreset(0),
            MlTrigger::RunSpamAnalysis,
            MlTrigger::LoadSpamPreset(1),
            MlTrigger::RunSpamAnalysis,
            MlTrigger::SwitchView("summary".into()),
        ]
    }
}

fn vision_explanation(label: VisionLabel) -> &'static str {
    match label {
        VisionLabel::Cat => {
            "Analysis Clear: I detected triangular ears and whisker patterns. The Convolutional Network matched these edges to the 'Cat' class."
        }
        VisionLabel::Dog => {
            "Analysis Clear: I identified a longer snout and floppy ear shape. These geometric features strongly activated the 'Dog' neurons."
        }
    }
}

fn spam_explanation(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Spam => {
            "Risk Detected! I found urgency keywords like 'Won' or 'Cheap'. The probability model flagged this pattern as typical phishing."
        }
        MessageKind::Ham => {
            "This looks safe. The semantic structure is conversational and lacks the aggressive sales tokens found in our spam dataset."
        }
    }
}

fn pipeline_scene() -> Scene {
    let status = |text: &'static str| Effect::set_text(PIPELINE_STATUS, text);
    Scene::new("pipeline")
        .triggered_by(BTN_RUN_PIPELINE)
        .speak(PIPELINE_LINES[0])
        .animate(
            vec![
                status("Ingesting Data..."),
                Effect::play(FILE_CLUSTER, Motion::Gather),
                Effect::play(NODE_INGEST, Motion::Glow),
            ],
            Duration::from_secs(2),
        )
        .speak(PIPELINE_LINES[1])
        .animate(
            vec![
                status("Training Model..."),
                Effect::play(PATH_TRAIN, Motion::DrawPath),
                Effect::play(NODE_TRAIN, Motion::Glow),
                Effect::play(TRAINING_RING, Motion::Spin),
            ],
            Duration::from_millis(2500),
        )
        .speak(PIPELINE_LINES[2])
        .animate(
            vec![
                status("Finalizing Model..."),
                Effect::play(PATH_MODEL, Motion::DrawPath),
                Effect::play(MODEL_CUBE, Motion::Flip),
            ],
            Duration::from_secs(2),
        )
        .speak(PIPELINE_LINES[3])
        .on_complete(vec![
            status("Pipeline Ready ✔"),
            Effect::tone(PIPELINE_STATUS, Tone::Success),
            Effect::hide(BTN_RUN_PIPELINE),
            Effect::reveal(BTN_PIPELINE_NEXT),
        ])
}

fn vision_scene(label: VisionLabel, confidence: u8) -> Scene {
    Scene::new("vision-analysis")
        .triggered_by(BTN_VISION_RUN)
        .animate(
            vec![Effect::play(SCAN_LASER, Motion::Scan)],
            Duration::from_millis(1200),
        )
        .animate(
            vec![
                Effect::set_text(VIS_PRED, label.as_str()),
                Effect::progress(VIS_BAR, f32::from(confidence)),
                Effect::RecordVision { label, confidence },
            ],
            Duration::from_millis(1500),
        )
        .speak(vision_explanation(label))
        .on_complete(vec![
            Effect::enable(BTN_VISION_RUN),
            Effect::reveal(BTN_VISION_NEXT),
        ])
}

fn spam_scene(kind: MessageKind) -> Scene {
    let spam = kind == MessageKind::Spam;
    let probability = if spam { 0.95 } else { 0.05 };
    let tone = if spam { Tone::Danger } else { Tone::Success };
    Scene::new("spam-analysis")
        .triggered_by(BTN_SPAM_RUN)
        .animate(
            vec![
                Effect::play(MESSAGE_CARD, Motion::Flip),
                Effect::set_text(SPAM_VERDICT, if spam { "SPAM" } else { "SAFE" }),
                Effect::tone(SPAM_VERDICT, tone),
                Effect::SetRing {
                    target: SPAM_RING.into(),
                    offset: RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * probability,
                    tone,
                },
                Effect::set_text(SPAM_SCORE, if spam { "95%" } else { "5%" }),
                Effect::RecordSpam { kind },
            ],
            Duration::from_secs(2),
        )
        .speak(spam_explanation(kind))
        .on_complete(vec![Effect::enable(BTN_SPAM_RUN), Effect::reveal(BTN_NLP_NEXT)])
}

impl PageScript for MlExplainer {
    type Trigger = MlTrigger;

    fn page(&self) -> PageId {
        PageId::MlExplainer
    }

    fn manifest(&self) -> PageManifest {
        PageManifest::new(PageId::MlExplainer, &VIEWS)
            .visible(&[
                BTN_START,
                BTN_RUN_PIPELINE,
                PIPELINE_STATUS,
                FILE_CLUSTER,
                NODE_INGEST,
                PATH_TRAIN,
                NODE_TRAIN,
                TRAINING_RING,
                PATH_MODEL,
                MODEL_CUBE,
                OPT_CAT,
                OPT_DOG,
                VISION_IMG,
                SCAN_LASER,
                VIS_PRED,
                VIS_BAR,
                BTN_VISION_RUN,
                MSG_PREVIEW,
                MESSAGE_CARD,
                SPAM_VERDICT,
                SPAM_RING,
                SPAM_SCORE,
                BTN_SPAM_RUN,
                SUMMARY_TEXT,
            ])
            .visible(&PRESETS)
            .hidden(&[BTN_PIPELINE_NEXT, BTN_VISION_NEXT, BTN_NLP_NEXT])
    }

    fn on_enter(&self, view: &ViewId, _session: &SessionState) -> Option<Scene> {
        match view.as_str() {
            "vision" => Some(Scene::new("vision-intro").speak(VISION_INTRO)),
            "nlp" => Some(Scene::new("nlp-intro").speak(NLP_INTRO)),
            "summary" => Some(
                Scene::new("dashboard")
                    .animate(vec![Effect::RenderLabReport], Duration::ZERO)
                    .speak(SUMMARY_INTRO),
            ),
            _ => None,
        }
    }

    fn handle(&self, trigger: MlTrigger, session: &SessionState, rng: &mut StdRng) -> Action {
        match trigger {
            MlTrigger::StartExperience => Action::Run(
                Scene::new("welcome")
                    .triggered_by(BTN_START)
                    .step(SceneStep::Speak(
                        Utterance::new(HELLO).with_pause(Duration::from_secs(2)),
                    ))
                    .then_switch_to("pipeline"),
            ),
            MlTrigger::PipelineSequenceStart => Action::Run(pipeline_scene()),
            MlTrigger::SetVisionSource(label) => {
                let (selected, other) = match label {
                    VisionLabel::Cat => (OPT_CAT, OPT_DOG),
                    VisionLabel::Dog => (OPT_DOG, OPT_CAT),
                };
                Action::Apply(vec![
                    Effect::SelectVisionSource { label },
                    Effect::tone(selected, Tone::Accent),
                    Effect::tone(other, Tone::Neutral),
                    Effect::play(VISION_IMG, Motion::Swap),
                    Effect::progress(VIS_BAR, 0.0),
                    Effect::set_text(VIS_PRED, "--"),
                ])
            }
            MlTrigger::RunVisionAnalysis => match session.vision_source() {
                Some(label) => {
                    let confidence = 85 + rng.random_range(0..14_u8);
                    Action::Run(vision_scene(label, confidence))
                }
                None => Action::Ignore("no image selected"),
            },
            MlTrigger::LoadSpamPreset(index) => {
                let Some((text, _)) = SPAM_MESSAGES.get(index) else {
                    return Action::Ignore("no such preset");
                };
                let mut effects = vec![Effect::SelectSpamPreset { index }];
                effects.extend(PRESETS.iter().enumerate().map(|(i, &preset)| {
                    Effect::tone(preset, if i == index { Tone::Accent } else { Tone::Neutral })
                }));
                effects.extend([
                    Effect::set_text(MSG_PREVIEW, *text),
                    Effect::play(MESSAGE_CARD, Motion::Reset),
                    Effect::SetRing {
                        target: SPAM_RING.into(),
                        offset: RING_CIRCUMFERENCE,
                        tone: Tone::Danger,
                    },
                ]);
                Action::Apply(effects)
            }
            MlTrigger::RunSpamAnalysis => {
                match session.spam_preset().and_then(|index| SPAM_MESSAGES.get(index)) {
                    Some((_, kind)) => Action::Run(spam_scene(*kind)),
                    None => Action::Ignore("no message selected"),
                }
            }
            MlTrigger::SwitchView(view) => Action::Switch(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn session() -> SessionState {
        SessionState::from_manifest(&MlExplainer.manifest()).unwrap()
    }

    #[test]
    fn every_scene_only_touches_declared_elements() {
        let mut session = session();
        session
            .apply(Effect::SelectVisionSource {
                label: VisionLabel::Dog,
            })
            .unwrap();
        session.apply(Effect::SelectSpamPreset { index: 2 }).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for trigger in MlExplainer::walkthrough() {
            if let Action::Run(scene) = MlExplainer.handle(trigger, &session, &mut rng) {
                session.check_targets(scene.targets()).unwrap();
            }
        }
        for view in VIEWS {
            if let Some(scene) = MlExplainer.on_enter(&view.into(), &session) {
                session.check_targets(scene.targets()).unwrap();
            }
        }
    }

    #[test]
    fn vision_confidence_stays_in_range() {
        let mut session = session();
        session
            .apply(Effect::SelectVisionSource {
                label: VisionLabel::Cat,
            })
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let Action::Run(scene) = MlExplainer.handle(MlTrigger::RunVisionAnalysis, &session, &mut rng)
            else {
                panic!("vision run should start a scene");
            };
            let confidence = scene
                .steps
                .iter()
                .find_map(|step| match step {
                    SceneStep::Animate { effects, .. } => {
                        effects.iter().find_map(|effect| match effect {
                            Effect::RecordVision { confidence, .. } => Some(*confidence),
                            _ => None,
                        })
                    }
                    SceneStep::Speak(_) => None,
                })
                .unwrap();
            assert!((85..=98).contains(&confidence));
        }
    }

    #[test]
    fn labs_without_a_selection_are_ignored() {
        let session = session();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            MlExplainer.handle(MlTrigger::RunVisionAnalysis, &session, &mut rng),
            Action::Ignore("no image selected")
        );
        assert_eq!(
            MlExplainer.handle(MlTrigger::RunSpamAnalysis, &session, &mut rng),
            Action::Ignore("no message selected")
        );
        assert_eq!(
            MlExplainer.handle(MlTrigger::LoadSpamPreset(9), &session, &mut rng),
            Action::Ignore("no such preset")
        );
    }

    #[test]
    fn ham_verdict_reads_safe_with_low_ring() {
        let scene = spam_scene(MessageKind::Ham);
        let ShownValues { texts, ring } = inspect(&scene);
        assert!(texts.contains(&"SAFE".to_string()));
        assert!(texts.contains(&"5%".to_string()));
        assert!((ring - 268.85).abs() < 0.01);
    }

    struct ShownValues {
        texts: Vec<String>,
        ring: f32,
    }

    fn inspect(scene: &Scene) -> ShownValues {
        let mut texts = Vec::new();
        let mut ring = 0.0;
        for step in &scene.steps {
            if let SceneStep::Animate { effects, .. } = step {
                for effect in effects {
                    match effect {
                        Effect::SetText { text, .. } => texts.push(text.clone()),
                        Effect::SetRing { offset, .. } => ring = *offset,
                        _ => {}
                    }
                }
            }
        }
        ShownValues { texts, ring }
    }
}
