// Module declarations
mod app;
pub mod render;
pub mod splash;
// Re-exports for external use
pub use app::{App, Screen, run};
