//! Actix Web console server exposing the embedded map page, the session
//! APIs, and Prometheus metrics.
//!
//! The server runs on a dedicated thread so the main thread stays free for
//! signal handling. It surfaces the listing/filter endpoints the page calls,
//! a session snapshot, and an SSE stream for downstream consumers.

use std::time::Duration;

use actix_web::{
    App, HttpResponse, HttpServer,
    http::header,
    web::{self, Bytes},
};
use anyhow::{Context, Result};
use async_stream::stream;
use serde_json::to_string;
use tokio::sync::oneshot;
use tracing::error;

use crate::console::config::ConsoleConfig;
use crate::console::data::{FilterQuery, ViewportReport};
use crate::console::session::MapSession;
use crate::console::telemetry;
use crate::html;

/// Shared state backing HTTP handlers.
struct ServerState {
    session: MapSession,
    page: String,
}

#[derive(Default)]
/// Handle for the console server thread.
pub(crate) struct ConsoleServer {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl ConsoleServer {
    /// Signal the server to stop and block until the thread exits.
    pub(crate) fn stop(self) {
        if let Some(tx) = self.shutdown {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle {
            let _ = handle.join();
        }
    }
}

/// Spawn the console server thread and return a handle that can stop it.
pub(crate) fn spawn_console_server(
    session: MapSession,
    config: &ConsoleConfig,
) -> Result<ConsoleServer> {
    let page = html::console::render(config);
    let bind = config.bind.clone();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = telemetry::spawn_thread("console-server", move || {
        if let Err(err) = actix_web::rt::System::new().block_on(async move {
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(web::Data::new(ServerState {
                        session: session.clone(),
                        page: page.clone(),
                    }))
                    .route("/", web::get().to(index_route))
                    .route("/api/viewport", web::post().to(viewport_handler))
                    .route("/api/filter", web::get().to(filter_handler))
                    .route("/api/state", web::get().to(state_handler))
                    .route("/api/stream_state", web::get().to(stream_state_handler))
                    .route("/metrics", web::get().to(metrics_handler))
            })
            .bind(bind.as_str())?
            .run();

            let srv_handle = server.handle();
            actix_web::rt::spawn(async move {
                let _ = shutdown_rx.await;
                srv_handle.stop(true).await;
            });

            server.await
        }) {
            error!("HTTP server error: {err}");
        }
    })
    .context("Failed to spawn console server thread")?;
    Ok(ConsoleServer {
        shutdown: Some(shutdown_tx),
        handle: Some(handle),
    })
}

/// Serve the embedded console page.
async fn index_route(state: web::Data<ServerState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.page.clone())
}

/// Apply a viewport settle report and return the refreshed listing.
async fn viewport_handler(
    report: web::Json<ViewportReport>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    match state.session.apply_viewport(report.into_inner().features) {
        Some(update) => with_cors(HttpResponse::Ok()).json(update),
        None => HttpResponse::InternalServerError().body("session lock poisoned"),
    }
}

/// Apply a filter keystroke and return the narrowed listing plus the visual
/// filter expression.
async fn filter_handler(
    query: web::Query<FilterQuery>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    let raw_query = query.into_inner().q.unwrap_or_default();
    match state.session.apply_query(raw_query) {
        Some(update) => with_cors(HttpResponse::Ok()).json(update),
        None => HttpResponse::InternalServerError().body("session lock poisoned"),
    }
}

/// Return the current session snapshot as JSON.
async fn state_handler(state: web::Data<ServerState>) -> HttpResponse {
    match state.session.snapshot() {
        Some(snapshot) => with_cors(HttpResponse::Ok()).json(snapshot),
        None => HttpResponse::InternalServerError().body("session lock poisoned"),
    }
}

/// Stream session snapshots as Server-Sent Events.
async fn stream_state_handler(state: web::Data<ServerState>) -> HttpResponse {
    let state = state.clone();
    let stream = stream! {
        yield Ok::<Bytes, actix_web::Error>(Bytes::from_static(b"retry: 500\n\n"));
        let mut interval = actix_web::rt::time::interval(Duration::from_millis(250));
        let mut last_revision = None;
        loop {
            interval.tick().await;
            match state.session.snapshot() {
                Some(snapshot) if last_revision != Some(snapshot.revision) => {
                    last_revision = Some(snapshot.revision);
                    match to_string(&snapshot) {
                        Ok(json) => {
                            let mut sse_chunk = String::with_capacity(json.len() + 32);
                            sse_chunk.push_str("id: ");
                            sse_chunk.push_str(&snapshot.revision.to_string());
                            sse_chunk.push('\n');
                            sse_chunk.push_str("data: ");
                            sse_chunk.push_str(&json);
                            sse_chunk.push_str("\n\n");
                            yield Ok::<Bytes, actix_web::Error>(Bytes::from(sse_chunk));
                        }
                        Err(err) => {
                            let error_chunk = format!("event: error\ndata: {}\n\n", err);
                            yield Ok::<Bytes, actix_web::Error>(Bytes::from(error_chunk));
                        }
                    }
                }
                _ => {
                    yield Ok::<Bytes, actix_web::Error>(Bytes::from_static(b": keep-alive\n\n"));
                }
            }
        }
    };

    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET"))
        .insert_header((header::ACCESS_CONTROL_EXPOSE_HEADERS, "Content-Type"))
        .append_header(("Cache-Control", "no-cache"))
        .append_header(("Content-Type", "text/event-stream"))
        .append_header(("Connection", "keep-alive"))
        .streaming(stream)
}

/// Prometheus exposition endpoint.
async fn metrics_handler() -> HttpResponse {
    match telemetry::prometheus_handle() {
        Some(handle) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(handle.render()),
        None => HttpResponse::ServiceUnavailable().body("metrics recorder not installed"),
    }
}

fn with_cors(mut builder: actix_web::HttpResponseBuilder) -> actix_web::HttpResponseBuilder {
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"));
    builder
}
