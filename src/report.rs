//! Score report renderer.
//!
//! `render` turns a normalized `GradingResult` into the HTML that replaces the
//! whole results container. It is a pure function: no I/O, no clock, and every
//! optional field has a fallback, so it cannot fail.

use crate::domain::{criterion_label, CriterionResult, GradingResult};
use crate::util::escape_html;

const NO_FEEDBACK: &str = "Отзыв не предоставлен";
const NO_CRITERION_FEEDBACK: &str = "Нет отзыва";

// Minimal writer with deterministic push order.
struct Html {
  buf: String,
}

impl Html {
  fn new() -> Self {
    Self { buf: String::with_capacity(4 * 1024) }
  }
  fn push<S: AsRef<str>>(&mut self, s: S) {
    self.buf.push_str(s.as_ref());
  }
  fn text(&mut self, s: &str) {
    self.buf.push_str(&escape_html(s));
  }
  fn list(&mut self, items: &[String]) {
    self.push("<ul>");
    for item in items {
      self.push("<li>");
      self.text(item);
      self.push("</li>");
    }
    self.push("</ul>");
  }
  fn finish(self) -> String {
    self.buf
  }
}

pub fn render(result: &GradingResult) -> String {
  let mut w = Html::new();

  w.push(format!(
    "<div class=\"score {}\">Общая оценка: {}/100</div>",
    result.band().css_class(),
    result.overall_score
  ));

  w.push("<div class=\"feedback-section\"><h3>Общий отзыв</h3><p>");
  w.text(result.feedback.as_deref().unwrap_or(NO_FEEDBACK));
  w.push("</p></div>");

  if !result.criteria.is_empty() {
    w.push("<div class=\"feedback-section\"><h3>Детальная проверка по критериям</h3>");
    for (key, criterion) in &result.criteria {
      render_criterion(&mut w, key, criterion);
    }
    w.push("</div>");
  }

  if !result.strengths.is_empty() {
    list_section(&mut w, "✅ Сильные стороны", &result.strengths);
  }

  // Recommendations and weaknesses are alternatives, never both.
  if !result.recommendations.is_empty() {
    list_section(&mut w, "💡 Рекомендации для улучшения", &result.recommendations);
  } else if !result.weaknesses.is_empty() {
    list_section(&mut w, "💡 Что нужно улучшить", &result.weaknesses);
  }

  w.finish()
}

fn render_criterion(w: &mut Html, key: &str, c: &CriterionResult) {
  let state = if c.is_complete { "complete" } else { "incomplete" };
  w.push(format!("<div class=\"criterion-card {state}\"><div class=\"criterion-header\"><h4>"));
  w.text(criterion_label(key));
  w.push(format!(
    "</h4><span class=\"criterion-score {}\">{}/100</span></div>",
    c.band().css_class(),
    c.score
  ));

  w.push("<div class=\"criterion-feedback\"><p><strong>Отзыв:</strong> ");
  w.text(c.feedback.as_deref().unwrap_or(NO_CRITERION_FEEDBACK));
  w.push("</p></div>");

  if !c.missing_points.is_empty() {
    w.push("<div class=\"missing-points\"><strong>❌ Отсутствует в ответе:</strong>");
    w.list(&c.missing_points);
    w.push("</div>");
  }
  if !c.incorrect_points.is_empty() {
    w.push("<div class=\"incorrect-points\"><strong>⚠️ Указано неверно:</strong>");
    w.list(&c.incorrect_points);
    w.push("</div>");
  }

  w.push("</div>");
}

fn list_section(w: &mut Html, heading: &str, items: &[String]) {
  w.push("<div class=\"feedback-section\"><h3>");
  w.text(heading);
  w.push("</h3>");
  w.list(items);
  w.push("</div>");
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn render_json(v: serde_json::Value) -> String {
    render(&GradingResult::from_value(&v))
  }

  #[test]
  fn bare_result_renders_only_score_and_feedback() {
    let html = render_json(json!({ "overall_score": 55, "detailed_feedback": "so-so" }));
    assert!(html.contains("<div class=\"score average\">Общая оценка: 55/100</div>"));
    assert!(html.contains("<p>so-so</p>"));
    assert_eq!(html.matches("<h3>").count(), 1);
    assert!(!html.contains("criterion-card"));
    assert!(!html.contains("<ul>"));
  }

  #[test]
  fn missing_feedback_uses_placeholder() {
    let html = render_json(json!({}));
    assert!(html.contains("score poor"));
    assert!(html.contains("0/100"));
    assert!(html.contains(NO_FEEDBACK));
  }

  #[test]
  fn recommendations_hide_weaknesses() {
    let html = render_json(json!({
      "recommendations": ["read more"],
      "weaknesses": ["too short"]
    }));
    assert!(html.contains("Рекомендации для улучшения"));
    assert!(html.contains("read more"));
    assert!(!html.contains("Что нужно улучшить"));
    assert!(!html.contains("too short"));
  }

  #[test]
  fn weaknesses_used_when_recommendations_empty() {
    let html = render_json(json!({ "recommendations": [], "weaknesses": ["too short"] }));
    assert!(html.contains("Что нужно улучшить"));
    assert!(html.contains("<li>too short</li>"));
    assert!(!html.contains("Рекомендации для улучшения"));
  }

  #[test]
  fn missing_points_render_only_when_present() {
    let html = render_json(json!({
      "criteria_evaluation": { "criteria_2": { "score": 50, "missing_points": [] } }
    }));
    assert!(!html.contains("missing-points"));

    let html = render_json(json!({
      "criteria_evaluation": { "criteria_2": { "score": 50, "missing_points": ["контакт с больным"] } }
    }));
    assert!(html.contains("missing-points"));
    assert_eq!(html.matches("<li>").count(), 1);
    assert!(html.contains("<li>контакт с больным</li>"));
    assert!(!html.contains("incorrect-points"));
  }

  #[test]
  fn incorrect_points_have_own_block() {
    let html = render_json(json!({
      "criteria_evaluation": { "criteria_4": { "incorrect_points": ["wrong dx"] } }
    }));
    assert!(html.contains("<strong>⚠️ Указано неверно:</strong><ul><li>wrong dx</li></ul>"));
    assert!(html.contains(NO_CRITERION_FEEDBACK));
    assert!(html.contains("criterion-card incomplete"));
  }

  #[test]
  fn unknown_criterion_key_is_its_own_label() {
    let html = render_json(json!({
      "criteria_evaluation": { "criteria_9": { "score": 10, "feedback": "?" } }
    }));
    assert!(html.contains("<h4>criteria_9</h4>"));
    assert!(html.contains("criterion-score poor"));
  }

  #[test]
  fn excellent_answer_scenario() {
    let html = render_json(json!({
      "overall_score": 85,
      "criteria_evaluation": {
        "criteria_1": { "score": 90, "is_complete": true, "feedback": "ok" }
      },
      "strengths": ["clear reasoning"]
    }));
    assert!(html.contains("<div class=\"score excellent\">"));
    assert_eq!(html.matches("criterion-card").count(), 1);
    assert!(html.contains("criterion-card complete"));
    assert!(html.contains("<h4>1. Ведущие синдромы заболевания</h4>"));
    assert!(html.contains("<span class=\"criterion-score excellent\">90/100</span>"));
    assert!(html.contains("<strong>Отзыв:</strong> ok"));
    assert!(html.contains("Сильные стороны"));
    assert!(html.contains("<ul><li>clear reasoning</li></ul>"));
  }

  #[test]
  fn criteria_render_in_backend_order() {
    let raw: serde_json::Value = serde_json::from_str(
      r#"{"criteria_evaluation": {"criteria_6": {"score": 1}, "criteria_1": {"score": 2}}}"#,
    )
    .unwrap();
    let html = render(&GradingResult::from_value(&raw));
    let six = html.find("6. План лечения").unwrap();
    let one = html.find("1. Ведущие синдромы").unwrap();
    assert!(six < one);
  }

  #[test]
  fn empty_criteria_object_renders_no_section() {
    let html = render_json(json!({ "criteria_evaluation": {} }));
    assert!(!html.contains("Детальная проверка"));
  }

  #[test]
  fn backend_text_is_escaped() {
    let html = render_json(json!({
      "detailed_feedback": "<script>alert(1)</script>",
      "strengths": ["a < b"]
    }));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<li>a &lt; b</li>"));
  }
}
