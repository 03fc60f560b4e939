//! Quiz Engine · interactive quiz service
//!
//! - Axum HTTP + WebSocket API over server-side quiz pages
//! - Quiz definitions and UI-string catalogs loaded from JSON files
//! - Static demo page (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML engine config (languages, paths, styles)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use quiz_engine::routes::build_router;
use quiz_engine::state::AppState;
use quiz_engine::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: engine config, loader, instance-id allocator, page store.
  let state = Arc::new(AppState::new());

  // HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quiz_engine", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "quiz_engine", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "quiz_engine", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
