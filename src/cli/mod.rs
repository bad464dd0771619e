//! Command-line shell around the session core. Parsing, logging setup, and
//! dispatch follow the `start -> handler -> Action::execute` shape; the
//! actions are the thin orchestration layer that reacts to session events
//! by driving the navigator.

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod globals;
pub mod start;
pub mod telemetry;

pub use start::start;
