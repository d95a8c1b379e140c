//! Token explorer page: tokenization, context windows and hallucination.

use std::time::Duration;

use explainer_core::model::{
    Effect, Motion, PageId, PageManifest, SMALL_WINDOW_LIMIT, Scene, SceneStep, SessionState,
    TokenColor, Tone, ViewId,
};
use rand::Rng;
use rand::rngs::StdRng;

use crate::controller::{Action, PageScript, Trigger};

pub const VIEWS: [&str; 4] = ["token", "context", "hallucinate", "summary"];

/// The demo sentence, already split the way a tokenizer would split it.
pub const TOKENS: [&str; 7] = ["Machine", " learning", " makes", " computer", "s", " smart", "."];

/// Mini tokens pushed through the context-window demo.
pub const CONTEXT_STREAM_LEN: usize = 40;

pub const BTN_TOKENIZE: &str = "btn-tokenize";
pub const RAW_TEXT: &str = "raw-text";
pub const TOKENS_OUTPUT: &str = "tokens-output";
pub const BTN_TOKEN_NEXT: &str = "btn-token-next";

pub const BTN_CONTEXT_RUN: &str = "btn-context-run";
pub const OVERFLOW_ZONE: &str = "overflow-zone";
pub const BTN_NEXT_HALLUCINATE: &str = "btn-next-hallucinate";

pub const BTN_HALLUCINATE_RUN: &str = "btn-hallucinate-run";
pub const AI_RESPONSE: &str = "ai-response";
pub const GLITCH_TEXT: &str = "glitch-text";
pub const WARNING_BADGE: &str = "warning-badge";
pub const BTN_FINISH: &str = "btn-finish";

const WELCOME: &str = "Welcome to the Token Explorer. I'll guide you through the three pillars of LLMs: Tokens, Context, and Hallucinations.";
const TOKENIZE_LINES: [&str; 2] = [
    "Computers don't strictly read 'words'. They break text into efficient chunks called Tokens. Let's tokenize this sentence.",
    "Did you see that? 'Learning' is one token, but punctuation marks like '.' get their own token. This efficiency is key for speed.",
];
const CONTEXT_LINES: [&str; 2] = [
    "The Context Window is a conveyor belt. New tokens push old ones out if the window is too small.",
    "See how the small window lost the beginning of the conversation? That's why larger Context Windows are a massive breakthrough.",
];
const HALLUCINATE_LINES: [&str; 2] = [
    "I'll ask the model a question it definitely doesn't know the answer to, because the event hasn't happened yet.",
    "This is a Hallucination. The AI confidently predicted 'Elena Voronova' simply because it sounded probable in a sci-fi context, not because it's true.",
];
const CONTEXT_INTRO: &str = "Tokens need a temporary home while the model thinks. We call this the Context Window. It's like the model's short-term memory.";
const HALLUCINATE_INTRO: &str = "What happens when the model doesn't know the answer? Sometimes, instead of saying 'I don't know', it hallucinates.";
const SUMMARY_INTRO: &str = "Excellent work. We've covered Tokens, Context Windows, and Hallucinations. Review your session notes on the left.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenTrigger {
    RunTokenization,
    RunContextSim,
    RunHallucinationSim,
    SwitchView(ViewId),
}

impl Trigger for TokenTrigger {
    fn name(&self) -> &'static str {
        match self {
            TokenTrigger::RunTokenization => "runTokenization",
            TokenTrigger::RunContextSim => "runContextSim",
            TokenTrigger::RunHallucinationSim => "runHallucinationSim",
            TokenTrigger::SwitchView(_) => "switchView",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokenExplainer;

impl TokenExplainer {
    #[must_use]
    pub fn walkthrough() -> Vec<TokenTrigger> {
        vec![
            TokenTrigger::RunTokenization,
            TokenTrigger::SwitchView("context".into()),
            TokenTrigger::RunContextSim,
            TokenTrigger::SwitchView("hallucinate".into()),
            TokenTrigger::RunHallucinationSim,
            TokenTrigger::SwitchView("summary".into()),
        ]
    }
}

fn tokenization_scene() -> Scene {
    Scene::new("tokenization")
        .triggered_by(BTN_TOKENIZE)
        .speak(TOKENIZE_LINES[0])
        .step(SceneStep::instant(vec![
            Effect::play(RAW_TEXT, Motion::FadeOut),
            Effect::ClearItems {
                target: TOKENS_OUTPUT.into(),
            },
        ]))
        .steps(TOKENS.iter().map(|&token| {
            SceneStep::animate(
                vec![Effect::AppendItem {
                    target: TOKENS_OUTPUT.into(),
                    text: token.to_string(),
                }],
                Duration::from_millis(800),
            )
        }))
        .step(SceneStep::wait(Duration::from_secs(1)))
        .speak(TOKENIZE_LINES[1])
        .on_complete(vec![Effect::hide(BTN_TOKENIZE), Effect::reveal(BTN_TOKEN_NEXT)])
}

/// `already_small` is how many tokens the small window holds before the run,
/// so replays flash the overflow zone on the right pushes.
fn context_scene(colors: &[TokenColor], already_small: usize) -> Scene {
    let pushes = colors.iter().enumerate().map(|(i, &color)| {
        let mut effects = vec![Effect::PushContextToken { color }];
        if already_small + i + 1 > SMALL_WINDOW_LIMIT {
            effects.push(Effect::play(OVERFLOW_ZONE, Motion::Flash));
        }
        SceneStep::animate(effects, Duration::from_millis(300))
    });
    Scene::new("context-window")
        .triggered_by(BTN_CONTEXT_RUN)
        .step(SceneStep::instant(vec![Effect::hide(BTN_CONTEXT_RUN)]))
        .speak(CONTEXT_LINES[0])
        .steps(pushes)
        .speak(CONTEXT_LINES[1])
        .on_complete(vec![Effect::reveal(BTN_NEXT_HALLUCINATE)])
}

fn hallucination_scene() -> Scene {
    Scene::new("hallucination")
        .triggered_by(BTN_HALLUCINATE_RUN)
        .step(SceneStep::instant(vec![Effect::hide(BTN_HALLUCINATE_RUN)]))
        .speak(HALLUCINATE_LINES[0])
        .animate(
            vec![Effect::reveal(AI_RESPONSE), Effect::play(AI_RESPONSE, Motion::FadeIn)],
            Duration::from_secs(2),
        )
        .step(SceneStep::instant(vec![
            Effect::play(GLITCH_TEXT, Motion::Shake),
            Effect::tone(GLITCH_TEXT, Tone::Danger),
            Effect::reveal(WARNING_BADGE),
            Effect::play(WARNING_BADGE, Motion::Pop),
        ]))
        .speak(HALLUCINATE_LINES[1])
        .on_complete(vec![Effect::reveal(BTN_FINISH)])
}

impl PageScript for TokenExplainer {
    type Trigger = TokenTrigger;

    fn page(&self) -> PageId {
        PageId::TokenExplainer
    }

    fn manifest(&self) -> PageManifest {
        PageManifest::new(PageId::TokenExplainer, &VIEWS)
            .visible(&[
                BTN_TOKENIZE,
                RAW_TEXT,
                TOKENS_OUTPUT,
                BTN_CONTEXT_RUN,
                OVERFLOW_ZONE,
                BTN_HALLUCINATE_RUN,
                GLITCH_TEXT,
            ])
            .hidden(&[
                BTN_TOKEN_NEXT,
                BTN_NEXT_HALLUCINATE,
                AI_RESPONSE,
                WARNING_BADGE,
                BTN_FINISH,
            ])
    }

    fn on_load(&self) -> Option<Scene> {
        Some(
            Scene::new("welcome")
                .step(SceneStep::wait(Duration::from_secs(1)))
                .speak(WELCOME),
        )
    }

    fn on_enter(&self, view: &ViewId, _session: &SessionState) -> Option<Scene> {
        match view.as_str() {
            "context" => Some(Scene::new("context-intro").speak(CONTEXT_INTRO)),
            "hallucinate" => Some(Scene::new("hallucinate-intro").speak(HALLUCINATE_INTRO)),
            "summary" => Some(Scene::new("summary-intro").speak(SUMMARY_INTRO)),
            _ => None,
        }
    }

    fn handle(&self, trigger: TokenTrigger, session: &SessionState, rng: &mut StdRng) -> Action {
        match trigger {
            TokenTrigger::RunTokenization => Action::Run(tokenization_scene()),
            TokenTrigger::RunContextSim => {
                let colors: Vec<TokenColor> = (0..CONTEXT_STREAM_LEN)
                    .map(|_| {
                        if rng.random_bool(0.5) {
                            TokenColor::Cyan
                        } else {
                            TokenColor::Amber
                        }
                    })
                    .collect();
                Action::Run(context_scene(&colors, session.context().small().len()))
            }
            TokenTrigger::RunHallucinationSim => Action::Run(hallucination_scene()),
            TokenTrigger::SwitchView(view) => Action::Switch(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn tokenization_appends_the_seven_tokens_in_order() {
        let appended: Vec<String> = tokenization_scene()
            .steps
            .into_iter()
            .filter_map(|step| match step {
                SceneStep::Animate { effects, .. } => Some(effects),
                SceneStep::Speak(_) => None,
            })
            .flatten()
            .filter_map(|effect| match effect {
                Effect::AppendItem { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(appended, TOKENS);
    }

    #[test]
    fn overflow_flashes_once_the_small_window_is_full() {
        let colors = [TokenColor::Cyan; CONTEXT_STREAM_LEN];
        let flashes = context_scene(&colors, 0)
            .steps
            .iter()
            .filter(|step| match step {
                SceneStep::Animate { effects, .. } => effects
                    .iter()
                    .any(|effect| effect.target().is_some_and(|t| t.as_str() == OVERFLOW_ZONE)),
                SceneStep::Speak(_) => false,
            })
            .count();
        assert_eq!(flashes, CONTEXT_STREAM_LEN - SMALL_WINDOW_LIMIT);
    }

    #[test]
    fn context_run_pushes_forty_tokens() {
        let session = SessionState::from_manifest(&TokenExplainer.manifest()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let Action::Run(scene) = TokenExplainer.handle(TokenTrigger::RunContextSim, &session, &mut rng)
        else {
            panic!("context sim should start a scene");
        };
        let pushes = scene
            .steps
            .iter()
            .filter(|step| {
                matches!(step, SceneStep::Animate { effects, .. }
                    if effects.iter().any(|e| matches!(e, Effect::PushContextToken { .. })))
            })
            .count();
        assert_eq!(pushes, CONTEXT_STREAM_LEN);
        session.check_targets(scene.targets()).unwrap();
    }
}
