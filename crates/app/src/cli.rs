use std::path::PathBuf;

use clap::{Parser, Subcommand};
use explainer_core::model::PageId;

#[derive(Parser, Debug)]
#[command(name = "explainer", about = "Guided explainer pages with a narrated walkthrough")]
pub struct Cli {
    /// Page to open first (ml, prompt or token).
    #[arg(long, global = true, env = "EXPLAINER_PAGE")]
    pub page: Option<PageId>,
    /// TOML file overriding any subset of the page timing.
    #[arg(long, global = true, env = "EXPLAINER_TIMING")]
    pub timing: Option<PathBuf>,
    /// Multiplies every duration; 0.5 plays twice as fast.
    #[arg(long, global = true)]
    pub speed: Option<f64>,
    /// Seed for the lab results and token colours.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the desktop window (default).
    Ui,
    /// Play every trigger of the selected pages headlessly and log the surface events.
    Walkthrough,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Ui)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_to_ui_without_subcommand() {
        let cli = Cli::try_parse_from(["explainer"]).unwrap();
        assert_eq!(cli.command(), Command::Ui);
        assert!(cli.page.is_none());
    }

    #[test]
    fn parses_walkthrough_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "explainer",
            "walkthrough",
            "--page",
            "token",
            "--speed",
            "0.05",
            "--seed",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.command(), Command::Walkthrough);
        assert_eq!(cli.page, Some(PageId::TokenExplainer));
        assert_eq!(cli.speed, Some(0.05));
        assert_eq!(cli.seed, Some(3));
    }

    #[test]
    fn rejects_unknown_page() {
        assert!(Cli::try_parse_from(["explainer", "--page", "chemistry"]).is_err());
    }
}
