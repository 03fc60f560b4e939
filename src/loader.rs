//! Loading quiz definitions and UI-string catalogs.
//!
//! `QuizLoader` is the seam the bootstrap calls; `FsLoader` reads JSON files from the
//! configured quiz and locale directories.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::domain::QuizDefinition;
use crate::error::LoadError;
use crate::i18n::UiStrings;
use crate::seeds::builtin_ui_strings;

#[allow(async_fn_in_trait)]
pub trait QuizLoader {
    async fn load_quiz(&self, src: &str) -> Result<QuizDefinition, LoadError>;
    async fn load_ui_strings(&self, lang: &str) -> Result<UiStrings, LoadError>;
}

#[derive(Clone, Debug)]
pub struct FsLoader {
    quiz_root: PathBuf,
    locales_path: PathBuf,
    /// Serve the built-in catalogs when a locale file does not exist.
    builtin_fallback: bool,
}

impl FsLoader {
    pub fn new(quiz_root: impl Into<PathBuf>, locales_path: impl Into<PathBuf>) -> Self {
        Self {
            quiz_root: quiz_root.into(),
            locales_path: locales_path.into(),
            builtin_fallback: true,
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(&cfg.quiz_root, &cfg.locales_path)
    }

    pub fn without_builtin_fallback(mut self) -> Self {
        self.builtin_fallback = false;
        self
    }

    /// Map a `data-quiz-src` value to a file under the quiz root.
    /// A leading `/` is tolerated; `..` and other escapes are rejected.
    pub fn resolve_source(&self, src: &str) -> Result<PathBuf, LoadError> {
        let rel = Path::new(src.trim().trim_start_matches('/'));
        let clean = !rel.as_os_str().is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !clean {
            return Err(LoadError::InvalidSource { src: src.to_string() });
        }
        Ok(self.quiz_root.join(rel))
    }

    fn locale_file(&self, lang: &str) -> Result<PathBuf, LoadError> {
        let valid = !lang.is_empty() && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(LoadError::InvalidLanguage { lang: lang.to_string() });
        }
        Ok(self.locales_path.join(format!("{lang}.json")))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T, LoadError> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io { path: path.clone(), source })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse { path, source })
}

impl QuizLoader for FsLoader {
    #[instrument(level = "debug", skip(self))]
    async fn load_quiz(&self, src: &str) -> Result<QuizDefinition, LoadError> {
        let path = self.resolve_source(src)?;
        let def: QuizDefinition = read_json(path).await?;
        debug!(target: "quiz_engine", %src, kind = %def.kind(), answers = def.answers.len(), "Quiz definition loaded");
        Ok(def)
    }

    #[instrument(level = "debug", skip(self))]
    async fn load_ui_strings(&self, lang: &str) -> Result<UiStrings, LoadError> {
        let path = self.locale_file(lang)?;
        match read_json::<UiStrings>(path).await {
            Err(LoadError::Io { path, source }) if source.kind() == ErrorKind::NotFound => {
                match builtin_ui_strings(lang).filter(|_| self.builtin_fallback) {
                    Some(ui) => {
                        warn!(target: "quiz_engine", path = %path.display(), %lang, "Locale file missing; using built-in catalog");
                        Ok(ui)
                    }
                    None => Err(LoadError::Io { path, source }),
                }
            }
            other => other,
        }
    }
}
