mod cli;
mod config;
mod walkthrough;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use explainer_core::model::PageId;
use explainer_ui::{App, AppContext};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let overrides = config::load_overrides(cli.timing.as_deref())?;
    let context = AppContext::new(cli.page, &overrides, cli.speed)?.with_seed(cli.seed);

    match cli.command() {
        Command::Ui => {
            // Some window managers default dev builds to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Guided Explainers")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Walkthrough => {
            let pages = match cli.page {
                Some(page) => vec![page],
                None => PageId::ALL.to_vec(),
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(async {
                for page in pages {
                    let report = walkthrough::run_page(page, context.controller_options(page)).await?;
                    println!(
                        "{page}: completed={} ignored={} aborted={} notes={} events={}",
                        report.completed,
                        report.ignored,
                        report.aborted,
                        report.log_lines,
                        report.events
                    );
                }
                Ok::<_, Box<dyn std::error::Error>>(())
            })
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
