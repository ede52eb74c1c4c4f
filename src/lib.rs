// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod audio;
pub mod config;
pub mod error;
pub mod field;
pub mod game;
pub mod hud;
pub mod logging;
pub mod placement;
pub mod popup;
pub mod runtime;
pub mod session;
