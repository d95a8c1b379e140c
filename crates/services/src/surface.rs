//! Where page output goes.

use std::sync::{Arc, Mutex, PoisonError};

use explainer_core::model::SurfaceEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Receives every visible change of a page, in order.
pub trait Surface: Send + Sync {
    fn emit(&self, event: SurfaceEvent);
}

/// Keeps every event; used by tests and by anything that wants a replay.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events without the per-character typing frames.
    #[must_use]
    pub fn milestones(&self) -> Vec<SurfaceEvent> {
        self.events()
            .into_iter()
            .filter(|event| !event.is_typing_frame())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Surface for RecordingSurface {
    fn emit(&self, event: SurfaceEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Writes events to the log; the headless walkthrough renders through this.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSurface;

impl Surface for TracingSurface {
    fn emit(&self, event: SurfaceEvent) {
        match &event {
            SurfaceEvent::NarratorTyped { .. } => {}
            SurfaceEvent::NarratorStarted { text } => tracing::info!(target: "narrator", "{text}"),
            SurfaceEvent::LogAppended(entry) => {
                tracing::debug!(target: "narrator", spoken_at = %entry.spoken_at, "logged");
            }
            SurfaceEvent::ViewShown(view) => tracing::info!(%view, "view shown"),
            other => tracing::debug!(event = ?other, "surface"),
        }
    }
}

/// Forwards events over a channel to a renderer living on another task.
#[derive(Clone)]
pub struct ChannelSurface {
    tx: UnboundedSender<SurfaceEvent>,
}

impl ChannelSurface {
    #[must_use]
    pub fn new(tx: UnboundedSender<SurfaceEvent>) -> Self {
        Self { tx }
    }
}

impl Surface for ChannelSurface {
    fn emit(&self, event: SurfaceEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("surface receiver dropped; event discarded");
        }
    }
}

/// Sends every event to each inner surface in turn.
pub struct FanoutSurface {
    surfaces: Vec<Arc<dyn Surface>>,
}

impl FanoutSurface {
    #[must_use]
    pub fn new(surfaces: Vec<Arc<dyn Surface>>) -> Self {
        Self { surfaces }
    }
}

impl Surface for FanoutSurface {
    fn emit(&self, event: SurfaceEvent) {
        for surface in &self.surfaces {
            surface.emit(event.clone());
        }
    }
}
