//! Run loop tying the session, server, and shutdown signal together.

use std::{
    sync::{
        Arc, Once,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use anyhow::Result;
use tracing::{info, warn};

use crate::console::config::ConsoleConfig;
use crate::console::server::spawn_console_server;
use crate::console::session::MapSession;
use crate::console::telemetry;

/// Run the console until Ctrl+C.
pub fn run(config: ConsoleConfig) -> Result<()> {
    static CTRL_HANDLER: Once = Once::new();

    let _telemetry_guard = telemetry::enter_runtime(config.verbose);
    let _ = telemetry::init_metrics_recorder();

    let session_span = tracing::info_span!(
        "console.session",
        bind = %config.bind,
        source_layer = %config.source_layer,
        key = %config.key_property,
    );
    let _session_span_guard = session_span.enter();

    let shutdown = Arc::new(AtomicBool::new(false));
    let handler_shutdown = shutdown.clone();
    CTRL_HANDLER.call_once(move || {
        if let Err(err) = ctrlc::set_handler({
            let handler_shutdown = handler_shutdown.clone();
            move || {
                handler_shutdown.store(true, Ordering::SeqCst);
            }
        }) {
            warn!("Failed to install Ctrl+C handler: {err}");
        }
    });

    let session = MapSession::new(&config.key_property);
    let server = spawn_console_server(session, &config)?;
    info!("console ready at http://{}", config.bind);

    while !shutdown.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(200));
    }

    info!("shutting down");
    server.stop();
    Ok(())
}
