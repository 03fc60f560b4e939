//! Loading engine configuration (languages, paths, container selector, styles) from TOML.
//!
//! See `EngineConfig` and `StyleConfig` for the expected schema. Every key is optional;
//! missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// Languages a page may be rendered in; anything else falls back to `default_language`.
  pub supported_languages: Vec<String>,
  pub default_language: String,
  /// Directory holding `{lang}.json` UI-string catalogs.
  pub locales_path: PathBuf,
  /// Directory quiz sources (`data-quiz-src`) are resolved against.
  pub quiz_root: PathBuf,
  /// Class marking quiz containers in a page.
  pub container_class: String,
  /// Open pages kept by the service; opening one more evicts the oldest.
  pub max_pages: usize,
  pub styles: StyleConfig,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      supported_languages: vec!["en".into(), "ru".into()],
      default_language: "en".into(),
      locales_path: PathBuf::from("locales"),
      quiz_root: PathBuf::from("quizzes"),
      container_class: "quiz-container".into(),
      max_pages: 1024,
      styles: StyleConfig::default(),
    }
  }
}

impl EngineConfig {
  pub fn is_supported(&self, lang: &str) -> bool {
    self.supported_languages.iter().any(|l| l == lang)
  }
}

/// Presentation values applied by `styles::ThemeStyles`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
  pub correct_color: String,
  pub incorrect_color: String,
  pub error_color: String,
  pub try_again_margin: String,
  pub message_margin_top: String,
  pub message_display: String,
  pub message_align_items: String,
  pub result_margin: String,
  pub explanation_margin_top: String,
  pub answer_margin_bottom: String,
}

impl Default for StyleConfig {
  fn default() -> Self {
    Self {
      correct_color: "green".into(),
      incorrect_color: "red".into(),
      error_color: "red".into(),
      try_again_margin: "10px".into(),
      message_margin_top: "10px".into(),
      message_display: "flex".into(),
      message_align_items: "center".into(),
      result_margin: "0".into(),
      explanation_margin_top: "5px".into(),
      answer_margin_bottom: "10px".into(),
    }
  }
}

/// Parse an `EngineConfig` from TOML text.
pub fn parse_engine_config(s: &str) -> Result<EngineConfig, toml::de::Error> {
  toml::from_str::<EngineConfig>(s)
}

/// Read and parse a config file. On any IO/parsing error, logs and returns None.
pub fn load_engine_config(path: &Path) -> Option<EngineConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match parse_engine_config(&s) {
      Ok(cfg) => {
        info!(target: "quiz_engine", path = %path.display(), "Loaded engine config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quiz_engine", path = %path.display(), error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quiz_engine", path = %path.display(), error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Attempt to load `EngineConfig` from QUIZ_CONFIG_PATH. Absent variable or a broken file yields None.
pub fn load_engine_config_from_env() -> Option<EngineConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  load_engine_config(Path::new(&path))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_yields_defaults() {
    let cfg = parse_engine_config("").unwrap();
    assert_eq!(cfg.default_language, "en");
    assert!(cfg.is_supported("ru"));
    assert!(!cfg.is_supported("de"));
    assert_eq!(cfg.container_class, "quiz-container");
    assert_eq!(cfg.max_pages, 1024);
    assert_eq!(cfg.styles, StyleConfig::default());
  }

  #[test]
  fn partial_toml_overrides_only_given_keys() {
    let cfg = parse_engine_config(
      r##"
        supported_languages = ["en", "de"]
        quiz_root = "/srv/quizzes"

        [styles]
        correct_color = "#0a0"
      "##,
    ).unwrap();
    assert!(cfg.is_supported("de"));
    assert_eq!(cfg.quiz_root, PathBuf::from("/srv/quizzes"));
    assert_eq!(cfg.styles.correct_color, "#0a0");
    assert_eq!(cfg.styles.incorrect_color, "red");
  }

  #[test]
  fn unreadable_file_is_none() {
    assert!(load_engine_config(Path::new("/definitely/not/here.toml")).is_none());
  }
}
