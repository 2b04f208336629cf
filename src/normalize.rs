//! Raw grader payload -> `GradingResult`.
//!
//! The grader is an LLM behind an HTTP API, so field names and types drift:
//! `overall_score` vs `score`, numbers sent as strings, lists with stray
//! non-string items. Everything is resolved here so the renderer only sees
//! the strict shape.

use serde_json::{Map, Value};

use crate::domain::{CriterionResult, GradingResult};

impl GradingResult {
  /// Normalize a raw payload. Never fails: every missing or malformed field
  /// falls back to its default.
  pub fn from_value(raw: &Value) -> Self {
    let obj = match raw.as_object() {
      Some(o) => o,
      None => return Self::default(),
    };

    let criteria = match obj.get("criteria_evaluation").and_then(Value::as_object) {
      Some(map) => map
        .iter()
        .map(|(key, v)| (key.clone(), CriterionResult::from_value(v)))
        .collect(),
      None => Vec::new(),
    };

    Self {
      overall_score: first_score(obj, &["overall_score", "score"]).unwrap_or(0),
      feedback: first_text(obj, &["detailed_feedback", "feedback"]),
      criteria,
      strengths: string_list(obj.get("strengths")),
      recommendations: string_list(obj.get("recommendations")),
      weaknesses: string_list(obj.get("weaknesses")),
    }
  }
}

impl CriterionResult {
  pub fn from_value(raw: &Value) -> Self {
    let obj = match raw.as_object() {
      Some(o) => o,
      None => return Self::default(),
    };
    Self {
      score: first_score(obj, &["score"]).unwrap_or(0),
      is_complete: obj.get("is_complete").map(truthy).unwrap_or(false),
      feedback: first_text(obj, &["feedback"]),
      missing_points: string_list(obj.get("missing_points")),
      incorrect_points: string_list(obj.get("incorrect_points")),
    }
  }
}

fn score_of(v: &Value) -> Option<i64> {
  let f = match v {
    Value::Number(n) => n.as_f64()?,
    Value::String(s) => s.trim().parse::<f64>().ok()?,
    _ => return None,
  };
  if f.is_finite() { Some(f.round() as i64) } else { None }
}

fn first_score(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
  keys.iter().find_map(|k| obj.get(*k).and_then(score_of))
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
  keys.iter().find_map(|k| match obj.get(*k) {
    Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
    _ => None,
  })
}

fn string_list(v: Option<&Value>) -> Vec<String> {
  match v {
    Some(Value::Array(items)) => items
      .iter()
      .filter_map(|item| match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  }
}

fn truthy(v: &Value) -> bool {
  match v {
    Value::Bool(b) => *b,
    Value::String(s) => s.eq_ignore_ascii_case("true"),
    Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
    _ => false,
  }
}
