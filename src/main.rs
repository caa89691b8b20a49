mod app;
mod cli;
mod color;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use crate::cli::Cli;
use crate::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(cli.payload_step);

    // A dataset named on the command line must load, otherwise startup fails.
    if let Some(path) = &cli.data {
        let dataset = data::loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
            dataset.len(),
            path.display(),
            dataset.distinct_sites().len(),
            dataset.min_payload_kg(),
            dataset.max_payload_kg()
        );
        let selector = dataset
            .resolve_site(&cli.site)
            .context("choosing the initial launch site")?;
        state.set_dataset(dataset);
        state.select_site(selector);
    } else if cli.site != data::model::ALL_SITES_VALUE {
        log::warn!("--site {} ignored: no dataset given", cli.site);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
