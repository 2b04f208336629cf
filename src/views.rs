//! Page shell and the small HTML fragments the session swaps into it.
//!
//! Everything backend-supplied goes through `escape_html`.

use crate::config::FrontendConfig;
use crate::consent::ACCEPT_LABEL_LOCKED;
use crate::domain::TaskSummary;
use crate::error::ApiError;
use crate::util::escape_html;

pub const CHECK_LABEL_IDLE: &str = "Проверить ответ";
pub const CHECK_LABEL_BUSY: &str = "Проверка...";
pub const ALERT_NO_TASK: &str = "Пожалуйста, выберите задачу из списка";
pub const ALERT_NO_ANSWER: &str = "Пожалуйста, введите ваш ответ";

/// Options for the task selector: a "choose" placeholder followed by one
/// option per task, or a single disabled placeholder when there are none.
pub fn task_options(tasks: &[TaskSummary]) -> String {
  if tasks.is_empty() {
    return "<option value=\"\" disabled selected>Задачи не найдены</option>".to_string();
  }
  let mut out = String::from("<option value=\"\">Выберите задачу...</option>");
  for t in tasks {
    out.push_str(&format!(
      "<option value=\"{}\">{}</option>",
      t.id,
      escape_html(&t.display_title())
    ));
  }
  out
}

/// Selector content when the list could not be loaded.
pub fn task_options_error(err: &ApiError) -> String {
  let text = if err.is_connectivity() {
    "⚠️ Сервер не запущен или недоступен".to_string()
  } else {
    format!("Ошибка загрузки задач: {err}")
  };
  format!("<option value=\"\" disabled selected>{}</option>", escape_html(&text))
}

pub fn task_prompt() -> &'static str {
  "<p class=\"loading\">Выберите задачу из списка выше</p>"
}

/// Task text as an HTML fragment, for clients that cannot set plain text.
pub fn task_text_block(text: &str) -> String {
  format!("<div class=\"task-text\">{}</div>", escape_html(text))
}

pub fn task_error(err: &ApiError) -> String {
  let mut out = format!(
    "<p class=\"error\">Ошибка загрузки задачи: {}</p>",
    escape_html(&err.to_string())
  );
  if err.is_connectivity() {
    out.push_str("<p class=\"hint\">Убедитесь, что сервер проверки запущен и доступен.</p>");
  }
  out
}

pub fn check_error(err: &ApiError) -> String {
  format!("<p class=\"error\">Ошибка при проверке ответа: {}</p>", escape_html(&err.to_string()))
}

/// Full page. The disclaimer modal starts visible; the script opens `/ws`
/// and applies whatever the session sends.
pub fn page_shell(cfg: &FrontendConfig) -> String {
  let disclaimer: String = cfg
    .disclaimer
    .iter()
    .map(|p| format!("<p>{}</p>", escape_html(p)))
    .collect();
  let title = escape_html(&cfg.page_title);

  format!(
    r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<div id="disclaimer-modal" class="modal show">
  <div class="modal-content">
    <h2>Условия использования</h2>
    {disclaimer}
    <div class="modal-actions">
      <div id="timer-info" class="timer-info"></div>
      <button id="accept-button" disabled>{accept}</button>
      <button id="decline-button">Я не согласен</button>
    </div>
  </div>
</div>
<main class="container">
  <h1>{title}</h1>
  <section class="task-section">
    <select id="task-select"><option value="">Загрузка задач...</option></select>
    <div id="task-content" class="task-content">{prompt}</div>
  </section>
  <section class="answer-section">
    <textarea id="answer-input" rows="12" placeholder="Введите ваш ответ..."></textarea>
    <button id="check-button">{check}</button>
  </section>
  <section id="results-section" class="results-section" style="display: none">
    <h2>Результаты проверки</h2>
    <div id="results-content"></div>
  </section>
</main>
<script src="/static/app.js"></script>
</body>
</html>
"#,
    title = title,
    disclaimer = disclaimer,
    accept = ACCEPT_LABEL_LOCKED,
    prompt = task_prompt(),
    check = CHECK_LABEL_IDLE,
  )
}
