//! HTTP endpoint handlers: the page shell plus HTML fragment endpoints that
//! render the same views the WebSocket session uses.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{Html, IntoResponse},
  Json,
};
use tracing::{info, instrument, warn};

use crate::protocol::{CheckAnswerForm, HealthOut};
use crate::report;
use crate::state::AppState;
use crate::views;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_index(State(state): State<Arc<AppState>>) -> Html<String> {
  Html(views::page_shell(&state.config))
}

#[instrument(level = "info", skip(state))]
pub async fn http_ui_tasks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  match state.api.list_tasks().await {
    Ok(tasks) => {
      info!(target: "quiz_front", count = tasks.len(), "HTTP task options served");
      (StatusCode::OK, Html(views::task_options(&tasks)))
    }
    Err(e) => {
      warn!(target: "quiz_front", error = %e, "HTTP task list failed");
      (StatusCode::BAD_GATEWAY, Html(views::task_options_error(&e)))
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_ui_task(State(state): State<Arc<AppState>>, Path(task_id): Path<i64>) -> impl IntoResponse {
  match state.api.fetch_task(task_id).await {
    Ok(text) => (StatusCode::OK, Html(views::task_text_block(&text))),
    Err(e) => {
      warn!(target: "quiz_front", task_id, status = ?e.status(), error = %e, "HTTP task load failed");
      (StatusCode::BAD_GATEWAY, Html(views::task_error(&e)))
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(task_id = body.task_id, answer_len = body.answer.len()))]
pub async fn http_ui_check_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckAnswerForm>,
) -> impl IntoResponse {
  let answer = body.answer.trim();
  if answer.is_empty() {
    return (
      StatusCode::BAD_REQUEST,
      Html(format!("<p class=\"error\">{}</p>", views::ALERT_NO_ANSWER)),
    );
  }
  match state.api.check_answer(body.task_id, answer).await {
    Ok(result) => {
      info!(target: "quiz_front", task_id = body.task_id, overall_score = result.overall_score, "HTTP answer graded");
      (StatusCode::OK, Html(report::render(&result)))
    }
    Err(e) => {
      warn!(target: "quiz_front", task_id = body.task_id, status = ?e.status(), error = %e, "HTTP answer check failed");
      (StatusCode::BAD_GATEWAY, Html(views::check_error(&e)))
    }
  }
}
