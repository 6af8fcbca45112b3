//! Airport map console: session state, HTTP surface, and telemetry.
//!
//! The module is split into focused submodules:
//! - `config`: CLI flags and environment overrides.
//! - `session`: snapshot-owning map session applying viewport and query
//!   events.
//! - `data`: request/response structs shared with the embedded page.
//! - `server`: Actix Web console endpoints.
//! - `telemetry`: tracing and Prometheus bootstrap.
//! - `runtime`: run loop tying session, server, and shutdown together.

/// Re-export console settings so callers can configure runs without reaching
/// into submodules.
pub use config::{ConsoleCliArgs, ConsoleConfig};
/// Launch the console with a ready-made configuration.
pub use runtime::run;

mod config;
mod data;
mod runtime;
mod server;
mod session;
mod telemetry;
