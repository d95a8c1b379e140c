use std::sync::Arc;

use dioxus::prelude::*;
use explainer_services::{ChannelSurface, PageController, PageScript, Surface};
use tokio::sync::mpsc::unbounded_channel;

use crate::context::AppContext;
use crate::vm::PageVm;

/// Starts `script` for the lifetime of the calling component.
///
/// Surface events stream into the returned signal; the callback dispatches a
/// trigger without blocking the click handler.
pub fn use_page<P: PageScript + Clone>(script: P) -> (Signal<PageVm>, Callback<P::Trigger>) {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal(|| PageVm::new(&script.manifest()));

    let controller = use_hook(move || {
        let page = script.page();
        let (tx, mut rx) = unbounded_channel();
        let surface: Arc<dyn Surface> = Arc::new(ChannelSurface::new(tx));
        match PageController::new(script, surface, ctx.controller_options(page)) {
            Ok(controller) => {
                let controller = Arc::new(controller);
                spawn(async move {
                    while let Some(event) = rx.recv().await {
                        vm.write().apply(&event);
                    }
                });
                let loading = Arc::clone(&controller);
                spawn(async move {
                    loading.load().await;
                });
                Some(controller)
            }
            Err(err) => {
                tracing::error!(page = %page, error = %err, "page failed to start");
                let message = err.to_string();
                spawn(async move {
                    vm.write().unavailable = Some(message);
                });
                None
            }
        }
    });

    let fire = use_callback(move |trigger: P::Trigger| {
        if let Some(controller) = controller.clone() {
            spawn(async move {
                controller.dispatch(trigger).await;
            });
        }
    });

    (vm, fire)
}
