//! Clinical case trainer · front-end server
//!
//! - Page shell + WebSocket page sessions (axum)
//! - Talks to the grading backend's REST API (reqwest)
//! - Renders the task list, task text and score report server-side
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   API_BASE             : grading backend base URL (default "http://localhost:8000/api")
//!   FRONTEND_CONFIG_PATH : path to TOML config (see `config::FrontendConfig`)
//!   DECLINE_REDIRECT_URL : where declining the terms sends the visitor
//!   STATIC_DIR           : directory with style.css and app.js (default "./static")
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod api;
mod config;
mod consent;
mod domain;
mod error;
mod normalize;
mod protocol;
mod report;
mod routes;
mod session;
mod state;
mod telemetry;
mod util;
mod views;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::FrontendConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = FrontendConfig::from_env()?;
  let state = Arc::new(AppState::new(config)?);

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quiz_front", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if tokio::signal::ctrl_c().await.is_ok() {
    info!(target: "quiz_front", "Shutdown requested");
  }
}
