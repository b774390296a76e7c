mod backend_bridge;
mod controller;
mod ui;

use anyhow::Result;
use clap::Parser;
use client_core::config::{self, Settings};
use crossbeam_channel::bounded;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::PollWidgetApp;

/// Desktop poll widget: shows the current poll and submits votes.
#[derive(Parser, Debug)]
struct Args {
    /// Host name the widget resolves its API base from.
    #[arg(long)]
    host: Option<String>,
    /// Origin the relative `/api` base resolves against for non-local hosts.
    #[arg(long)]
    origin: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings: Settings = config::load_settings();
    if let Some(host) = args.host {
        settings.api_host = host;
    }
    if let Some(origin) = args.origin {
        settings.origin = origin;
    }
    let api_base = settings.api_base()?;
    tracing::info!(%api_base, "using poll API base");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(api_base, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Poll Widget")
            .with_inner_size([480.0, 360.0])
            .with_min_inner_size([360.0, 280.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Poll Widget",
        options,
        Box::new(|_cc| Ok(Box::new(PollWidgetApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run widget window: {err}"))?;
    Ok(())
}
