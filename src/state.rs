//! Shared application state: front-end configuration and the grading API
//! client. Built once at startup and shared read-only across connections;
//! per-page state lives in `session::PageState`.

use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::config::FrontendConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
  pub config: FrontendConfig,
  pub api: ApiClient,
}

impl AppState {
  #[instrument(level = "info", skip_all, fields(api_base = %config.api_base))]
  pub fn new(config: FrontendConfig) -> Result<Self, ApiError> {
    let api = ApiClient::new(&config.api_base)?;
    info!(
      target: "quiz_front",
      api_base = %api.base_url(),
      static_dir = %config.static_dir,
      "Grading backend configured"
    );
    Ok(Self { config, api })
  }
}
