//! Translation resolution, language detection and UI-string catalogs.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::MultilingualText;

/// Shown in every container when the UI-string catalog itself cannot be loaded,
/// so it cannot come from that catalog.
pub const TRANSLATIONS_UNAVAILABLE: &str = "Failed to load UI translations.";

/// Localized labels used by the engine chrome (buttons, verdicts, errors).
/// Missing keys resolve to empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiStrings {
    pub check_answer: String,
    pub correct: String,
    pub incorrect: String,
    pub try_again: String,
    pub error_no_src: String,
    pub error_loading: String,
    pub error_unknown_type: String,
}

/// Best-available text for `lang`.
///
/// Plain strings are returned as-is. Maps try `lang`, then `default_lang`; an empty
/// entry counts as missing. Absent content, or no usable entry, yields "".
pub fn resolve(content: Option<&MultilingualText>, lang: &str, default_lang: &str) -> String {
    match content {
        Some(MultilingualText::Plain(s)) => s.clone(),
        Some(MultilingualText::Localized(map)) => [lang, default_lang]
            .iter()
            .filter_map(|l| map.get(*l))
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// Pick the page language.
///
/// Order: explicit `lang` query value, then the primary subtag of the first
/// `Accept-Language` entry (`ru-RU;q=0.9` → `ru`), then the configured default.
/// Only configured languages are accepted from the first two sources.
pub fn detect_lang(query_lang: Option<&str>, accept_language: Option<&str>, config: &EngineConfig) -> String {
    if let Some(q) = query_lang.map(str::trim).filter(|q| config.is_supported(q)) {
        return q.to_string();
    }

    let browser = accept_language
        .and_then(|h| h.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .and_then(|tag| tag.trim().split('-').next())
        .map(str::to_ascii_lowercase);
    if let Some(b) = browser.filter(|b| config.is_supported(b)) {
        return b;
    }

    config.default_language.clone()
}
