mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::SurfaceApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
        settings.validate()?;
    }
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (settings, startup_error) = match resolve_settings(&args) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::error!("falling back to default settings: {err:#}");
            let err = UiError::from_message(UiErrorContext::BackendStartup, format!("{err:#}"));
            (Settings::default(), Some(err))
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Championship Simulator")
            .with_inner_size([640.0, 560.0])
            .with_min_inner_size([420.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Championship Simulator",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SurfaceApp::new(
                &settings,
                cmd_tx,
                ui_rx,
                startup_error,
            )))
        }),
    )
}
