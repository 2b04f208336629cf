//! Front-end configuration: defaults, then an optional TOML file, then
//! environment overrides.
//!
//! Environment:
//!   FRONTEND_CONFIG_PATH : TOML file (all keys optional)
//!   API_BASE             : grading backend base URL
//!   DECLINE_REDIRECT_URL : where "decline" sends the visitor
//!   STATIC_DIR           : directory with style.css / app.js

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
  pub api_base: String,
  pub decline_redirect_url: String,
  pub page_title: String,
  pub static_dir: String,
  /// Paragraphs of the consent modal.
  pub disclaimer: Vec<String>,
}

impl Default for FrontendConfig {
  fn default() -> Self {
    Self {
      api_base: DEFAULT_API_BASE.into(),
      decline_redirect_url: "about:blank".into(),
      page_title: "Клинические задачи".into(),
      static_dir: "./static".into(),
      disclaimer: vec![
        "Сервис предназначен исключительно для учебной самопроверки и не является медицинской консультацией.".into(),
        "Оценка формируется автоматически и может содержать ошибки. Не используйте её для принятия клинических решений.".into(),
        "Не вводите персональные данные пациентов.".into(),
      ],
    }
  }
}

impl FrontendConfig {
  /// Parse a TOML document; missing keys keep their defaults.
  pub fn from_toml_str(s: &str, path: &str) -> Result<Self, ConfigError> {
    toml::from_str::<FrontendConfig>(s).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
  }

  /// Build the config from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut cfg = match std::env::var("FRONTEND_CONFIG_PATH") {
      Ok(path) => {
        let s = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        let cfg = Self::from_toml_str(&s, &path)?;
        info!(target: "quiz_front", %path, "Loaded front-end config (TOML)");
        cfg
      }
      Err(_) => Self::default(),
    };
    cfg.apply_overrides(|key| std::env::var(key).ok());
    Ok(cfg)
  }

  fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
    if let Some(v) = non_empty("API_BASE") {
      self.api_base = v;
    }
    if let Some(v) = non_empty("DECLINE_REDIRECT_URL") {
      self.decline_redirect_url = v;
    }
    if let Some(v) = non_empty("STATIC_DIR") {
      self.static_dir = v;
    }
  }
}
