use std::sync::Arc;

use explainer_core::model::PageId;
use explainer_services::{
    ControllerError, ControllerOptions, Dispatch, FanoutSurface, MlExplainer, PageController,
    PageScript, PromptFramework, RecordingSurface, Surface, TokenExplainer, TracingSurface,
};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkthroughReport {
    pub page: Option<PageId>,
    pub completed: usize,
    pub ignored: usize,
    pub aborted: usize,
    pub log_lines: usize,
    /// Surface events excluding typing frames.
    pub events: usize,
}

/// Plays the scripted triggers of `page` against a logging surface.
pub async fn run_page(
    page: PageId,
    options: ControllerOptions,
) -> Result<WalkthroughReport, ControllerError> {
    match page {
        PageId::MlExplainer => play(MlExplainer, MlExplainer::walkthrough(), options).await,
        PageId::PromptFramework => {
            play(PromptFramework, PromptFramework::walkthrough(), options).await
        }
        PageId::TokenExplainer => {
            play(TokenExplainer, TokenExplainer::walkthrough(), options).await
        }
    }
}

async fn play<P: PageScript>(
    script: P,
    triggers: Vec<P::Trigger>,
    options: ControllerOptions,
) -> Result<WalkthroughReport, ControllerError> {
    let recording = RecordingSurface::new();
    let sinks: Vec<Arc<dyn Surface>> = vec![Arc::new(TracingSurface), Arc::new(recording.clone())];
    let surface: Arc<dyn Surface> = Arc::new(FanoutSurface::new(sinks));
    let controller = PageController::new(script, surface, options)?;
    let mut report = WalkthroughReport {
        page: Some(controller.page()),
        ..WalkthroughReport::default()
    };

    info!(page = %controller.page(), triggers = triggers.len(), "walkthrough started");
    tally(&mut report, controller.load().await);
    for trigger in triggers {
        tally(&mut report, controller.dispatch(trigger).await);
    }

    let session = controller.snapshot().await;
    report.log_lines = session.log().len();
    report.events = recording.milestones().len();
    info!(
        page = %controller.page(),
        completed = report.completed,
        ignored = report.ignored,
        aborted = report.aborted,
        notes = report.log_lines,
        events = report.events,
        "walkthrough finished"
    );
    Ok(report)
}

fn tally(report: &mut WalkthroughReport, outcome: Dispatch) {
    match outcome {
        Dispatch::Completed => report.completed += 1,
        Dispatch::Ignored(_) => report.ignored += 1,
        Dispatch::Aborted(err) => {
            warn!(error = %err, "walkthrough step aborted");
            report.aborted += 1;
        }
    }
}
