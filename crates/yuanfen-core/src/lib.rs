pub mod ai;
pub mod config;
pub mod constants;
pub mod events;
pub mod models;
pub mod nav;
pub mod session;
pub mod store;
pub mod tracing_setup;

// Re-export the controller types at crate root for convenience
pub use events::{Command, CoreEvent};
pub use session::{Phase, Session};
