//! UI layer for desktop GUI: app shell and theme.

pub mod app;
pub mod theme;

pub use app::SurfaceApp;
