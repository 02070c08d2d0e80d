//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
};

use client_core::{ControlSurface, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let surface = match ControlSurface::connect(&settings) {
                Ok(surface) => surface,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to bind control surface: {err}");
                    return;
                }
            };
            let toggles_applied = Arc::new(AtomicU64::new(0));
            publish(&surface, &toggles_applied, &ui_tx).await;

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: processing command");
                match cmd {
                    BackendCommand::Toggle { entity, outcome } => {
                        if !surface.toggle(&entity, &outcome).await {
                            tracing::warn!(%entity, %outcome, "backend: toggle had no matching control");
                        }
                        toggles_applied.fetch_add(1, Ordering::SeqCst);
                        publish(&surface, &toggles_applied, &ui_tx).await;
                    }
                    // Network operations run as their own tasks and may overlap.
                    BackendCommand::Randomize => {
                        let surface = Arc::clone(&surface);
                        let toggles_applied = Arc::clone(&toggles_applied);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            surface.randomize().await;
                            publish(&surface, &toggles_applied, &ui_tx).await;
                        });
                    }
                    BackendCommand::Evaluate => {
                        let surface = Arc::clone(&surface);
                        let toggles_applied = Arc::clone(&toggles_applied);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            surface.evaluate().await;
                            publish(&surface, &toggles_applied, &ui_tx).await;
                        });
                    }
                }
            }
            tracing::info!("backend: command queue closed, worker exiting");
        });
    });
}

async fn publish(surface: &ControlSurface, toggles_applied: &AtomicU64, ui_tx: &Sender<UiEvent>) {
    // Read before the snapshot: every counted toggle is already in the state.
    let toggles_applied = toggles_applied.load(Ordering::SeqCst);
    let state = surface.snapshot().await;
    let event = UiEvent::Surface {
        state,
        in_flight: surface.in_flight(),
        toggles_applied,
    };
    if ui_tx.try_send(event).is_err() {
        tracing::warn!("ui event queue unavailable; dropping surface update");
    }
}
