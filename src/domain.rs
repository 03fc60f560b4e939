//! Domain models: quiz definitions as they appear in quiz JSON files.
//!
//! The JSON schema is the durable contract with quiz authors:
//! `{ question, config: {type, ...}, answers?: [{text, correct, description?}], answer?, explanation? }`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Either language-agnostic text or a map from language code to text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultilingualText {
  Plain(String),
  Localized(BTreeMap<String, String>),
}

impl From<&str> for MultilingualText {
  fn from(s: &str) -> Self { MultilingualText::Plain(s.to_string()) }
}

/// Which answer-kind strategy renders and evaluates the quiz.
/// Unrecognized `type` values are kept verbatim so they can be reported to the reader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuizKind {
  SingleChoice,
  MultipleChoice,
  InputField,
  Unknown(String),
}

impl Default for QuizKind {
  fn default() -> Self { QuizKind::Unknown(String::new()) }
}

impl From<String> for QuizKind {
  fn from(s: String) -> Self {
    match s.as_str() {
      "single-choice" => QuizKind::SingleChoice,
      "multiple-choice" => QuizKind::MultipleChoice,
      "input-field" => QuizKind::InputField,
      _ => QuizKind::Unknown(s),
    }
  }
}

impl From<QuizKind> for String {
  fn from(k: QuizKind) -> Self { k.to_string() }
}

impl fmt::Display for QuizKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuizKind::SingleChoice => f.write_str("single-choice"),
      QuizKind::MultipleChoice => f.write_str("multiple-choice"),
      QuizKind::InputField => f.write_str("input-field"),
      QuizKind::Unknown(raw) => f.write_str(raw),
    }
  }
}

/// Which per-answer descriptions a choice quiz reveals after checking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationPolicy {
  Selected,
  All,
  /// Also the fallback for unrecognized policy names.
  #[default]
  #[serde(other)]
  None,
}

/// Per-quiz display configuration (`config` object of the quiz JSON).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
  #[serde(rename = "type", default)]
  pub kind: QuizKind,
  #[serde(default, alias = "showExplanation")]
  pub explanation_policy: ExplanationPolicy,
  #[serde(default)]
  pub show_explanation_on_error: bool,
  // Case-sensitive unless the author opts out.
  #[serde(default = "default_true")]
  pub case_sensitive: bool,
  #[serde(default = "default_true", alias = "showCheckButton")]
  pub show_check_control: bool,
  #[serde(default, alias = "showTryAgainButton")]
  pub show_retry_on_incorrect: bool,
}

fn default_true() -> bool { true }

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      kind: QuizKind::default(),
      explanation_policy: ExplanationPolicy::None,
      show_explanation_on_error: false,
      case_sensitive: true,
      show_check_control: true,
      show_retry_on_incorrect: false,
    }
  }
}

/// One option of a choice quiz. Its position in `answers` is its identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
  #[serde(default)] pub text: Option<MultilingualText>,
  #[serde(default)] pub correct: bool,
  #[serde(default)] pub description: Option<MultilingualText>,
}

/// Immutable quiz definition, loaded once per instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
  #[serde(default)] pub question: Option<MultilingualText>,
  #[serde(default)] pub config: DisplayConfig,
  // Choice kinds
  #[serde(default)] pub answers: Vec<AnswerOption>,
  // Input field: answer key and optional explanation
  #[serde(default)] pub answer: Option<MultilingualText>,
  #[serde(default)] pub explanation: Option<MultilingualText>,
}

impl QuizDefinition {
  pub fn kind(&self) -> &QuizKind { &self.config.kind }

  /// Indices of every answer flagged correct, ascending.
  pub fn correct_indices(&self) -> Vec<usize> {
    self.answers.iter().enumerate().filter(|(_, a)| a.correct).map(|(i, _)| i).collect()
  }
}
