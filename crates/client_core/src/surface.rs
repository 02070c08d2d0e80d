use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use shared::{
    domain::{EntityId, EntitySpec, Outcome},
    protocol::SimulateVerdict,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    binder::ToggleBinder,
    config::Settings,
    error::SyncError,
    panel::StatusPanel,
    render::{render_results, ResultView},
    store::OutcomeStore,
    sync::{HttpSyncTransport, SyncTransport},
};

pub const RANDOMIZE_FAILED_MESSAGE: &str = "Failed to randomize results. Please try again.";
pub const SIMULATION_FAILED_MESSAGE: &str = "Simulation failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Everything the surface displays, with the store as the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceState {
    pub store: OutcomeStore,
    pub binder: ToggleBinder,
    pub panel: StatusPanel,
}

impl SurfaceState {
    pub fn new(entities: &[EntitySpec], outcomes: &[Outcome], default: &Outcome) -> Self {
        let store = OutcomeStore::new(entities.iter().map(|entity| entity.id.clone()), default);
        let binder = ToggleBinder::bind(entities, outcomes, &store);
        Self {
            store,
            binder,
            panel: StatusPanel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOutcome {
    Randomized,
    Evaluated(ResultView),
    Failed(String),
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns the surface state and sequences the randomize/evaluate cycles.
///
/// The state lock is released for the duration of each network round-trip,
/// so overlapping operations are allowed and apply in arrival order.
pub struct ControlSurface {
    transport: Arc<dyn SyncTransport>,
    state: Mutex<SurfaceState>,
    in_flight: AtomicUsize,
}

impl ControlSurface {
    pub fn new(settings: &Settings, transport: Arc<dyn SyncTransport>) -> Arc<Self> {
        Arc::new(Self {
            transport,
            state: Mutex::new(SurfaceState::new(
                &settings.entities,
                &settings.outcomes,
                &settings.default_outcome,
            )),
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn connect(settings: &Settings) -> Result<Arc<Self>, SyncError> {
        let transport = HttpSyncTransport::new(&settings.server_url)?;
        info!(server_url = %transport.base_url(), "control surface bound to server");
        Ok(Self::new(settings, Arc::new(transport)))
    }

    pub async fn snapshot(&self) -> SurfaceState {
        self.state.lock().await.clone()
    }

    pub async fn outcome(&self, entity: &EntityId) -> Option<Outcome> {
        self.state.lock().await.store.get(entity).cloned()
    }

    /// Number of randomize/evaluate requests still awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn toggle(&self, entity: &EntityId, outcome: &Outcome) -> bool {
        let mut guard = self.state.lock().await;
        let SurfaceState { store, binder, .. } = &mut *guard;
        binder.activate(entity, outcome, store)
    }

    pub async fn randomize(&self) -> SurfaceOutcome {
        let response = {
            let _in_flight = InFlightGuard::enter(&self.in_flight);
            self.transport.randomize().await
        };

        let mut guard = self.state.lock().await;
        let SurfaceState {
            store,
            binder,
            panel,
        } = &mut *guard;
        match response {
            Ok(outcomes) => {
                for (entity, outcome) in &outcomes {
                    if store.set(entity, outcome.clone()) {
                        binder.sync_from([(entity, outcome)]);
                    } else {
                        warn!(entity = %entity, "randomize returned an untracked entity");
                    }
                }
                panel.hide_results();
                panel.hide_error();
                info!(entities = outcomes.len(), "randomized outcomes applied");
                SurfaceOutcome::Randomized
            }
            Err(err) => {
                warn!("randomize failed: {err}");
                panel.show_error(RANDOMIZE_FAILED_MESSAGE);
                SurfaceOutcome::Failed(RANDOMIZE_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub async fn evaluate(&self) -> SurfaceOutcome {
        let submitted = {
            let mut guard = self.state.lock().await;
            guard.panel.hide_results();
            guard.panel.hide_error();
            guard.store.clone()
        };

        let response = {
            let _in_flight = InFlightGuard::enter(&self.in_flight);
            self.transport.simulate(&submitted).await
        };

        let verdict = response
            .and_then(|response| response.into_verdict().ok_or(SyncError::MissingQualifiers));

        let mut guard = self.state.lock().await;
        match verdict {
            Ok(SimulateVerdict::Qualified(teams)) => {
                info!(qualifiers = ?teams, "evaluation succeeded");
                let view = render_results(&teams);
                guard.panel.show_results(view.clone());
                SurfaceOutcome::Evaluated(view)
            }
            Ok(SimulateVerdict::Rejected(error)) => {
                let message = error
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| SIMULATION_FAILED_MESSAGE.to_string());
                warn!(%message, "evaluation rejected by server");
                guard.panel.show_error(message.clone());
                SurfaceOutcome::Failed(message)
            }
            Err(err) => {
                warn!("evaluate failed: {err}");
                guard.panel.show_error(NETWORK_ERROR_MESSAGE);
                SurfaceOutcome::Failed(NETWORK_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
