//! Local view model and the transitions applied to it.
//!
//! The backend's `ControlSurface` stays authoritative; the GUI applies the
//! same transitions optimistically so clicks render without a round-trip.
//! A backend snapshot replaces the local copy, except that the outcomes of a
//! snapshot taken before the latest dispatched toggle are ignored.

use client_core::{Settings, SurfaceState};
use shared::domain::{EntityId, Outcome};

use crate::controller::events::{UiError, UiEvent};

pub struct GuiModel {
    pub surface: SurfaceState,
    pub in_flight: usize,
    pub banner: Option<UiError>,
    toggles_sent: u64,
}

impl GuiModel {
    pub fn new(settings: &Settings) -> Self {
        Self {
            surface: SurfaceState::new(
                &settings.entities,
                &settings.outcomes,
                &settings.default_outcome,
            ),
            in_flight: 0,
            banner: None,
            toggles_sent: 0,
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Surface {
                state,
                in_flight,
                toggles_applied,
            } => {
                if toggles_applied >= self.toggles_sent {
                    self.surface = state;
                } else {
                    self.surface.panel = state.panel;
                }
                self.in_flight = in_flight;
            }
            UiEvent::Error(err) => {
                tracing::error!(context = ?err.context(), "{}", err.message());
                self.banner = Some(err);
            }
        }
    }

    pub fn toggle_locally(&mut self, entity: &EntityId, outcome: &Outcome) -> bool {
        let SurfaceState { store, binder, .. } = &mut self.surface;
        binder.activate(entity, outcome, store)
    }

    pub fn toggle_dispatched(&mut self) {
        self.toggles_sent += 1;
    }

    pub fn evaluate_requested(&mut self) {
        self.surface.panel.hide_results();
        self.surface.panel.hide_error();
        self.in_flight += 1;
    }

    pub fn randomize_requested(&mut self) {
        self.in_flight += 1;
    }

    pub fn dispatch_failed(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), "{}", err.message());
        self.banner = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use client_core::render_results;

    use super::*;
    use crate::controller::events::UiErrorContext;

    #[test]
    fn local_toggle_mirrors_backend_semantics() {
        let mut model = GuiModel::new(&Settings::default());
        let uga = EntityId::from("uga");
        assert!(model.toggle_locally(&uga, &Outcome::loss()));
        assert_eq!(model.surface.store.get(&uga), Some(&Outcome::loss()));
        assert_eq!(
            model.surface.binder.group(&uga).and_then(|g| g.active_outcome()),
            Some(&Outcome::loss())
        );
    }

    #[test]
    fn evaluate_request_clears_regions_and_marks_pending() {
        let mut model = GuiModel::new(&Settings::default());
        model.surface.panel.show_results(render_results(&[]));
        model.surface.panel.show_error("old");

        model.evaluate_requested();

        assert!(!model.surface.panel.results().is_visible());
        assert!(!model.surface.panel.error().is_visible());
        assert_eq!(model.in_flight, 1);
    }

    #[test]
    fn backend_snapshot_replaces_local_state() {
        let settings = Settings::default();
        let mut model = GuiModel::new(&settings);
        model.randomize_requested();

        let mut state = SurfaceState::new(
            &settings.entities,
            &settings.outcomes,
            &settings.default_outcome,
        );
        state.panel.show_error("Failed to randomize results. Please try again.");
        model.apply(UiEvent::Surface {
            state: state.clone(),
            in_flight: 0,
            toggles_applied: 0,
        });

        assert_eq!(model.surface, state);
        assert_eq!(model.in_flight, 0);
    }

    #[test]
    fn snapshot_older_than_latest_toggle_keeps_local_outcomes() {
        let settings = Settings::default();
        let mut model = GuiModel::new(&settings);
        let tamu = EntityId::from("tamu");
        let bama = EntityId::from("bama");

        model.toggle_locally(&tamu, &Outcome::loss());
        model.toggle_dispatched();
        model.toggle_locally(&bama, &Outcome::loss());
        model.toggle_dispatched();

        // Backend has processed only the first toggle.
        let mut first = SurfaceState::new(
            &settings.entities,
            &settings.outcomes,
            &settings.default_outcome,
        );
        let SurfaceState { store, binder, .. } = &mut first;
        binder.activate(&tamu, &Outcome::loss(), store);
        first.panel.show_error("Failed to randomize results. Please try again.");
        model.apply(UiEvent::Surface {
            state: first.clone(),
            in_flight: 0,
            toggles_applied: 1,
        });

        assert_eq!(model.surface.store.get(&bama), Some(&Outcome::loss()));
        assert_eq!(
            model.surface.binder.group(&bama).and_then(|g| g.active_outcome()),
            Some(&Outcome::loss())
        );
        assert_eq!(model.surface.panel, first.panel);

        let mut second = first.clone();
        let SurfaceState { store, binder, .. } = &mut second;
        binder.activate(&bama, &Outcome::loss(), store);
        model.apply(UiEvent::Surface {
            state: second.clone(),
            in_flight: 0,
            toggles_applied: 2,
        });
        assert_eq!(model.surface, second);
    }

    #[test]
    fn failed_dispatch_raises_banner() {
        let mut model = GuiModel::new(&Settings::default());
        model.dispatch_failed(UiError::from_message(
            UiErrorContext::Dispatch,
            "UI command queue is full; please retry",
        ));
        assert_eq!(model.in_flight, 0);
        assert!(model.banner.is_some());
    }
}
