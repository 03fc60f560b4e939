//! Built-in UI-string catalogs.
//!
//! Used when a locale file is missing so the app stays usable without a
//! `locales/` directory next to the binary.

use crate::i18n::UiStrings;

/// Built-in catalog for `lang`, if one ships with the binary.
pub fn builtin_ui_strings(lang: &str) -> Option<UiStrings> {
  match lang {
    "en" => Some(UiStrings {
      check_answer: "Check Answer".into(),
      correct: "Correct!".into(),
      incorrect: "Incorrect.".into(),
      try_again: "Try Again".into(),
      error_no_src: "Error: quiz source (data-quiz-src) is not specified.".into(),
      error_loading: "Error loading quiz.".into(),
      error_unknown_type: "Error: unknown quiz type".into(),
    }),
    "ru" => Some(UiStrings {
      check_answer: "Проверить ответ".into(),
      correct: "Правильно!".into(),
      incorrect: "Неправильно.".into(),
      try_again: "Попробовать снова".into(),
      error_no_src: "Ошибка: не указан источник квиза (data-quiz-src).".into(),
      error_loading: "Ошибка загрузки квиза.".into(),
      error_unknown_type: "Ошибка: неизвестный тип квиза".into(),
    }),
    _ => None,
  }
}
