use client_core::{EntryStyle, ResultEntry, ResultView, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::RichText;
use shared::domain::{EntityId, Outcome};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::GuiModel;
use crate::ui::theme;

pub struct SurfaceApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: GuiModel,
}

impl SurfaceApp {
    pub fn new(
        settings: &Settings,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup_error: Option<UiError>,
    ) -> Self {
        let mut model = GuiModel::new(settings);
        model.banner = startup_error;
        Self {
            cmd_tx,
            ui_rx,
            model,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => true,
            Err(err) => {
                self.model.dispatch_failed(err);
                false
            }
        }
    }

    fn toggle(&mut self, entity: EntityId, outcome: Outcome) {
        if self.model.toggle_locally(&entity, &outcome)
            && self.dispatch(BackendCommand::Toggle { entity, outcome })
        {
            self.model.toggle_dispatched();
        }
    }

    fn randomize(&mut self) {
        if self.dispatch(BackendCommand::Randomize) {
            self.model.randomize_requested();
        }
    }

    fn evaluate(&mut self) {
        if self.dispatch(BackendCommand::Evaluate) {
            self.model.evaluate_requested();
        }
    }

    fn show_toggle_rows(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        egui::Grid::new("entity_rows")
            .num_columns(2)
            .spacing([24.0, 10.0])
            .show(ui, |ui| {
                for group in self.model.surface.binder.groups() {
                    ui.label(RichText::new(&group.entity.label).strong());
                    ui.horizontal(|ui| {
                        for control in &group.controls {
                            let caption = theme::outcome_caption(&control.outcome);
                            if ui.selectable_label(control.active, caption).clicked() {
                                clicked = Some((group.entity.id.clone(), control.outcome.clone()));
                            }
                        }
                    });
                    ui.end_row();
                }
            });

        if let Some((entity, outcome)) = clicked {
            self.toggle(entity, outcome);
        }
    }

    fn show_triggers(&mut self, ui: &mut egui::Ui) {
        let mut randomize = false;
        let mut evaluate = false;
        ui.horizontal(|ui| {
            randomize = ui.button("Randomize").clicked();
            evaluate = ui.button("Go").clicked();
            if self.model.in_flight > 0 {
                ui.spinner();
            }
        });

        if randomize {
            self.randomize();
        }
        if evaluate {
            self.evaluate();
        }
    }

    fn show_status_regions(&self, ui: &mut egui::Ui) {
        let panel = &self.model.surface.panel;
        if let Some(view) = panel.visible_results() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.heading("Championship Game");
                ui.add_space(6.0);
                show_result_view(ui, view);
            });
        }
        if let Some(message) = panel.visible_error() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(RichText::new(message).color(theme::ERROR_TEXT));
            });
        }
    }

    fn show_banner(&mut self, ctx: &egui::Context) {
        let Some(banner) = &self.model.banner else {
            return;
        };
        let prefix = match banner.context() {
            UiErrorContext::BackendStartup => "Startup",
            UiErrorContext::Dispatch => "Backend",
        };
        let hint = match banner.category() {
            UiErrorCategory::Configuration => " (check surface.toml or --server-url)",
            UiErrorCategory::Transport => " (restart the app to reconnect)",
            UiErrorCategory::Unknown => "",
        };
        let text = format!("{prefix}: {}{hint}", banner.message());
        let mut dismiss = false;
        egui::TopBottomPanel::bottom("status_banner").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(text).color(theme::ERROR_TEXT));
                dismiss = ui.small_button("Dismiss").clicked();
            });
        });
        if dismiss {
            self.model.banner = None;
        }
    }
}

fn show_entry(ui: &mut egui::Ui, entry: &ResultEntry) {
    let fill = match &entry.style {
        EntryStyle::Keyed(key) => theme::entry_fill(Some(key.as_str())),
        EntryStyle::Generic => theme::entry_fill(None),
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(12, 6))
        .show(ui, |ui| {
            ui.label(RichText::new(&entry.label).color(theme::ENTRY_TEXT).strong());
        });
}

fn show_result_view(ui: &mut egui::Ui, view: &ResultView) {
    match (&view.connector, view.entries.as_slice()) {
        (Some(connector), [left, right]) => {
            ui.horizontal(|ui| {
                show_entry(ui, left);
                ui.label(RichText::new(connector).italics());
                show_entry(ui, right);
            });
        }
        _ => {
            for entry in &view.entries {
                show_entry(ui, entry);
            }
        }
    }
    if let Some(note) = view.note {
        ui.add_space(8.0);
        ui.label(RichText::new(note.text()).color(theme::NOTE_TEXT));
    }
}

impl eframe::App for SurfaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_banner(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Championship Simulator");
            ui.add_space(12.0);
            self.show_toggle_rows(ui);
            ui.add_space(12.0);
            self.show_triggers(ui);
            ui.separator();
            self.show_status_regions(ui);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
