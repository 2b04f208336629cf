//! Errors surfaced by the grading API client.

/// The two ways a backend call can fail. Both end up as an inline message in
/// the page region that issued the request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
  /// The request never got an HTTP response.
  #[error("Failed to fetch: {message}")]
  Connectivity { message: String },

  /// The backend answered with a non-2xx status, or with a body we could not
  /// decode.
  #[error("{message}")]
  Application { status: Option<u16>, message: String },
}

impl ApiError {
  pub fn is_connectivity(&self) -> bool {
    matches!(self, ApiError::Connectivity { .. })
  }

  /// HTTP status of the failed response, when there was one.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Connectivity { .. } => None,
      ApiError::Application { status, .. } => *status,
    }
  }

  /// Error for a non-2xx response. `detail` is the backend's own message, if
  /// the body carried one.
  pub fn from_status(status: u16, detail: Option<String>) -> Self {
    let message = detail.unwrap_or_else(|| format!("HTTP error! status: {status}"));
    ApiError::Application { status: Some(status), message }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() || e.is_status() {
      ApiError::Application {
        status: e.status().map(|s| s.as_u16()),
        message: format!("invalid response: {e}"),
      }
    } else {
      ApiError::Connectivity { message: e.to_string() }
    }
  }
}

/// Errors while loading the front-end configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}
