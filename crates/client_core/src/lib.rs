pub mod binder;
pub mod config;
pub mod error;
pub mod panel;
pub mod render;
pub mod store;
pub mod surface;
pub mod sync;

pub use binder::{ToggleBinder, ToggleControl, ToggleGroup};
pub use config::{load_settings, Settings};
pub use error::SyncError;
pub use panel::{Region, StatusPanel};
pub use render::{render_results, style_key, EntryStyle, ResultEntry, ResultNote, ResultView};
pub use store::OutcomeStore;
pub use surface::{
    ControlSurface, SurfaceOutcome, SurfaceState, NETWORK_ERROR_MESSAGE, RANDOMIZE_FAILED_MESSAGE,
    SIMULATION_FAILED_MESSAGE,
};
pub use sync::{HttpSyncTransport, SyncTransport};
