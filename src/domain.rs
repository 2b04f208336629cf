//! Domain models shown by the front-end: task summaries, grading results,
//! per-criterion results and the score bands used to style them.

use serde::Deserialize;

/// Fixed rubric labels, keyed by the criterion id the grader returns.
pub const CRITERION_LABELS: [(&str, &str); 6] = [
  ("criteria_1", "1. Ведущие синдромы заболевания"),
  ("criteria_2", "2. Эпидемиологические данные"),
  ("criteria_3", "3. Характерные объективные данные"),
  ("criteria_4", "4. Обоснование диагноза"),
  ("criteria_5", "5. План диагностики"),
  ("criteria_6", "6. План лечения"),
];

/// Display label for a criterion key. Unknown keys are shown as-is.
pub fn criterion_label(key: &str) -> &str {
  CRITERION_LABELS
    .iter()
    .find(|(k, _)| *k == key)
    .map(|(_, label)| *label)
    .unwrap_or(key)
}

/// Qualitative band derived from a 0-100 score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
  Excellent,
  Good,
  Average,
  Poor,
}

impl Band {
  pub fn from_score(score: i64) -> Self {
    if score >= 80 {
      Band::Excellent
    } else if score >= 60 {
      Band::Good
    } else if score >= 40 {
      Band::Average
    } else {
      Band::Poor
    }
  }

  /// CSS class used by the report stylesheet.
  pub fn css_class(self) -> &'static str {
    match self {
      Band::Excellent => "excellent",
      Band::Good => "good",
      Band::Average => "average",
      Band::Poor => "poor",
    }
  }
}

/// One entry of `GET /tasks`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TaskSummary {
  pub id: i64,
  #[serde(default)]
  pub title: Option<String>,
}

impl TaskSummary {
  pub fn display_title(&self) -> String {
    match self.title.as_deref().map(str::trim) {
      Some(t) if !t.is_empty() => t.to_string(),
      _ => format!("Задача {}", self.id),
    }
  }
}

/// Strict, normalized view of the grader's answer assessment.
/// Built once per check by `GradingResult::from_value`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradingResult {
  pub overall_score: i64,
  pub feedback: Option<String>,
  /// Criteria in the order the grader listed them. Empty when absent.
  pub criteria: Vec<(String, CriterionResult)>,
  pub strengths: Vec<String>,
  pub recommendations: Vec<String>,
  pub weaknesses: Vec<String>,
}

impl GradingResult {
  pub fn band(&self) -> Band {
    Band::from_score(self.overall_score)
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriterionResult {
  pub score: i64,
  pub is_complete: bool,
  pub feedback: Option<String>,
  pub missing_points: Vec<String>,
  pub incorrect_points: Vec<String>,
}

impl CriterionResult {
  pub fn band(&self) -> Band {
    Band::from_score(self.score)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn band_boundaries_round_up_to_higher_tier() {
    assert_eq!(Band::from_score(100), Band::Excellent);
    assert_eq!(Band::from_score(80), Band::Excellent);
    assert_eq!(Band::from_score(79), Band::Good);
    assert_eq!(Band::from_score(60), Band::Good);
    assert_eq!(Band::from_score(59), Band::Average);
    assert_eq!(Band::from_score(40), Band::Average);
    assert_eq!(Band::from_score(39), Band::Poor);
    assert_eq!(Band::from_score(0), Band::Poor);
    assert_eq!(Band::from_score(-5), Band::Poor);
  }

  #[test]
  fn every_score_maps_to_exactly_its_range() {
    for s in 0..=100 {
      let expected = match s {
        80..=100 => "excellent",
        60..=79 => "good",
        40..=59 => "average",
        _ => "poor",
      };
      assert_eq!(Band::from_score(s).css_class(), expected, "score {s}");
    }
  }

  #[test]
  fn labels_fall_back_to_raw_key() {
    assert_eq!(criterion_label("criteria_1"), "1. Ведущие синдромы заболевания");
    assert_eq!(criterion_label("criteria_6"), "6. План лечения");
    assert_eq!(criterion_label("criteria_9"), "criteria_9");
  }

  #[test]
  fn task_title_falls_back_to_id() {
    let t = TaskSummary { id: 7, title: None };
    assert_eq!(t.display_title(), "Задача 7");
    let t = TaskSummary { id: 7, title: Some("  ".into()) };
    assert_eq!(t.display_title(), "Задача 7");
    let t = TaskSummary { id: 7, title: Some("Лихорадка".into()) };
    assert_eq!(t.display_title(), "Лихорадка");
  }
}
