//! Telemetry helpers for tracing subscribers and Prometheus metrics.

use std::{io, sync::OnceLock, thread, time::Duration};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, prelude::*};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static PROM_UPKEEP_THREAD: OnceLock<thread::JoinHandle<()>> = OnceLock::new();

/// Guard returned when a telemetry subscriber has been installed for the
/// current thread.
pub(crate) struct TelemetryGuard {
    _default_guard: tracing::subscriber::DefaultGuard,
}

/// Ensure the global metrics recorder is installed and return the Prometheus
/// handle.
pub(crate) fn init_metrics_recorder() -> &'static PrometheusHandle {
    PROM_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::set_global_recorder(recorder).expect("metrics recorder already installed");

        let upkeep_handle = handle.clone();
        PROM_UPKEEP_THREAD.get_or_init(|| {
            spawn_thread("prometheus-upkeep", move || {
                loop {
                    thread::sleep(Duration::from_secs(5));
                    upkeep_handle.run_upkeep();
                }
            })
            .expect("failed to spawn prometheus upkeep thread")
        });

        handle
    })
}

/// Access the Prometheus handle when already initialised.
pub(crate) fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROM_HANDLE.get()
}

/// Install the tracing subscriber for the runtime. `verbose` lowers the
/// default filter to debug; `RUST_LOG` still wins when set.
pub(crate) fn enter_runtime(verbose: bool) -> TelemetryGuard {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let default_guard = tracing::subscriber::set_default(
        tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_filter(env_filter),
        ),
    );

    TelemetryGuard {
        _default_guard: default_guard,
    }
}

/// Spawn a thread that inherits the current tracing dispatcher.
pub(crate) fn spawn_thread<F, T>(name: impl Into<String>, f: F) -> io::Result<thread::JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let dispatch = tracing::dispatcher::get_default(|current| current.clone());
    thread::Builder::new()
        .name(name.into())
        .spawn(move || tracing::dispatcher::with_default(&dispatch, f))
}
