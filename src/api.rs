//! Client for the grading backend's REST API.
//!
//! Three calls: list tasks, fetch one task's text, and submit an answer for
//! grading. No retries and no client-side timeout; a request resolves or
//! fails once. Calls are instrumented and log sizes and statuses, never the
//! answer text.

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::{GradingResult, TaskSummary};
use crate::error::ApiError;

const CLIENT_UA: &str = concat!("clinical-quiz-front/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ApiClient {
  client: reqwest::Client,
  base_url: String,
}

#[derive(Deserialize)]
struct TasksOut {
  #[serde(default)]
  tasks: Option<Vec<TaskSummary>>,
}

#[derive(Deserialize)]
struct TaskOut {
  #[serde(default)]
  task_text: Option<String>,
}

#[derive(Serialize)]
struct CheckAnswerIn<'a> {
  answer: &'a str,
  task_id: i64,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self, ApiError> {
    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| ApiError::Connectivity { message: e.to_string() })?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  /// `GET /tasks`. A missing `tasks` field is an empty list.
  #[instrument(level = "info", skip(self))]
  pub async fn list_tasks(&self) -> Result<Vec<TaskSummary>, ApiError> {
    let res = self
      .client
      .get(self.url("/tasks"))
      .header(USER_AGENT, CLIENT_UA)
      .header(ACCEPT, "application/json")
      .send()
      .await?;
    let res = ensure_success(res).await?;
    let body: TasksOut = res.json().await?;
    let tasks = body.tasks.unwrap_or_default();
    debug!(target: "quiz_front", count = tasks.len(), "Task list received");
    Ok(tasks)
  }

  /// `GET /task/{id}`, returning the task text to be shown verbatim.
  #[instrument(level = "info", skip(self))]
  pub async fn fetch_task(&self, task_id: i64) -> Result<String, ApiError> {
    let res = self
      .client
      .get(self.url(&format!("/task/{task_id}")))
      .header(USER_AGENT, CLIENT_UA)
      .header(ACCEPT, "application/json")
      .send()
      .await?;
    let res = ensure_success(res).await?;
    let body: TaskOut = res.json().await?;
    let text = body.task_text.unwrap_or_default();
    debug!(target: "quiz_front", task_id, text_len = text.len(), "Task text received");
    Ok(text)
  }

  /// `POST /check-answer`. The payload is normalized before it is returned.
  #[instrument(level = "info", skip(self, answer), fields(answer_len = answer.len()))]
  pub async fn check_answer(&self, task_id: i64, answer: &str) -> Result<GradingResult, ApiError> {
    let res = self
      .client
      .post(self.url("/check-answer"))
      .header(USER_AGENT, CLIENT_UA)
      .json(&CheckAnswerIn { answer, task_id })
      .send()
      .await?;
    let res = ensure_success(res).await?;
    let raw: Value = res.json().await?;
    let result = GradingResult::from_value(&raw);
    debug!(
      target: "quiz_front",
      task_id,
      overall_score = result.overall_score,
      criteria = result.criteria.len(),
      "Grading result received"
    );
    Ok(result)
  }
}

/// What gets logged about a failed response. Error bodies may echo the
/// request (FastAPI 422 repeats the submitted answer), so only their shape is
/// recorded, never their content.
#[derive(Debug, PartialEq, Eq)]
struct ErrorBodySummary {
  status: u16,
  has_detail: bool,
  body_len: usize,
}

impl ErrorBodySummary {
  fn new(status: u16, body: &str, detail: Option<&str>) -> Self {
    Self { status, has_detail: detail.is_some(), body_len: body.len() }
  }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Application`
/// using the body's `detail` string when present.
async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
  let status = res.status();
  if status.is_success() {
    return Ok(res);
  }
  let body = res.text().await.unwrap_or_default();
  let detail = extract_detail(&body);
  let summary = ErrorBodySummary::new(status.as_u16(), &body, detail.as_deref());
  warn!(
    target: "quiz_front",
    status = summary.status,
    has_detail = summary.has_detail,
    body_len = summary.body_len,
    "Backend returned an error status"
  );
  Err(ApiError::from_status(status.as_u16(), detail))
}

/// `{"detail": "..."}` -> message. Any other shape yields None.
fn extract_detail(body: &str) -> Option<String> {
  let v: Value = serde_json::from_str(body).ok()?;
  match v.get("detail")? {
    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
    _ => None,
  }
}
