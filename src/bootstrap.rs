//! Page scan: find quiz containers, load their definitions and mount one instance each.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::controller::Phase;
use crate::i18n::TRANSLATIONS_UNAVAILABLE;
use crate::ids::{InstanceId, InstanceIdAllocator};
use crate::loader::QuizLoader;
use crate::page::Page;

/// What happened to the containers of one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapReport {
    /// Instances that reached `Answering`.
    pub mounted: Vec<InstanceId>,
    /// Instances that rendered an unknown-type error.
    pub unbuilt: Vec<InstanceId>,
    pub missing_source: usize,
    pub load_failures: usize,
    pub translations_failed: bool,
}

/// Mount every container of `page`.
///
/// Ids are allocated in document order, one per container that names a source,
/// whether or not its definition then loads.
#[instrument(level = "info", skip_all, fields(lang = %page.lang()))]
pub async fn bootstrap<L: QuizLoader>(
    page: &mut Page,
    loader: &L,
    allocator: &InstanceIdAllocator,
) -> BootstrapReport {
    let mut report = BootstrapReport::default();
    let containers = page.containers();

    let ui = match loader.load_ui_strings(page.lang()).await {
        Ok(ui) => Arc::new(ui),
        Err(e) => {
            error!(target: "quiz_engine", lang = %page.lang(), error = %e, "Failed to load UI translations");
            for c in containers {
                page.show_error(c, TRANSLATIONS_UNAVAILABLE);
            }
            report.translations_failed = true;
            return report;
        }
    };

    for container in containers {
        let Some(src) = page.source_of(container) else {
            warn!(target: "quiz_engine", "Quiz container without data-quiz-src");
            page.show_error(container, &ui.error_no_src);
            report.missing_source += 1;
            continue;
        };

        let id = allocator.next_id();
        match loader.load_quiz(&src).await {
            Ok(def) => match page.mount(container, Arc::new(def), ui.clone(), id) {
                Phase::Unbuilt => report.unbuilt.push(id),
                _ => report.mounted.push(id),
            },
            Err(e) => {
                error!(target: "quiz_engine", instance = %id, %src, error = %e, "Error loading or processing quiz data");
                page.show_error(container, &ui.error_loading);
                report.load_failures += 1;
            }
        }
    }

    info!(
        target: "quiz_engine",
        mounted = report.mounted.len(),
        unbuilt = report.unbuilt.len(),
        missing_source = report.missing_source,
        load_failures = report.load_failures,
        "Page bootstrapped"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuizDefinition;
    use crate::error::LoadError;
    use crate::i18n::UiStrings;
    use crate::seeds::builtin_ui_strings;
    use crate::styles::Unstyled;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory loader keyed by source name.
    struct MapLoader {
        quizzes: HashMap<&'static str, serde_json::Value>,
        locales: bool,
    }

    impl QuizLoader for MapLoader {
        async fn load_quiz(&self, src: &str) -> Result<QuizDefinition, LoadError> {
            let v = self.quizzes.get(src).cloned().ok_or_else(|| LoadError::Io {
                path: PathBuf::from(src),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })?;
            serde_json::from_value(v).map_err(|source| LoadError::Parse { path: PathBuf::from(src), source })
        }

        async fn load_ui_strings(&self, lang: &str) -> Result<UiStrings, LoadError> {
            builtin_ui_strings(lang).filter(|_| self.locales).ok_or(LoadError::InvalidLanguage {
                lang: lang.to_string(),
            })
        }
    }

    fn loader(locales: bool) -> MapLoader {
        let mut quizzes = HashMap::new();
        quizzes.insert(
            "sc.json",
            serde_json::json!({
                "question": "Q", "config": { "type": "single-choice" },
                "answers": [ { "text": "A", "correct": true } ]
            }),
        );
        quizzes.insert("odd.json", serde_json::json!({ "question": "Q", "config": { "type": "matrix" } }));
        MapLoader { quizzes, locales }
    }

    fn page() -> Page {
        Page::new("ru", "en", "quiz-container", Arc::new(Unstyled))
    }

    #[tokio::test]
    async fn mounts_each_container_and_reports_failures() {
        let mut p = page();
        let a = p.add_container(Some("sc.json"));
        let b = p.add_container(None);
        let c = p.add_container(Some("missing.json"));
        let d = p.add_container(Some("odd.json"));
        let e = p.add_container(Some("sc.json"));
        let alloc = InstanceIdAllocator::new();

        let report = bootstrap(&mut p, &loader(true), &alloc).await;

        let ids: Vec<u64> = report.mounted.iter().map(|i| i.get()).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(report.unbuilt.iter().map(|i| i.get()).collect::<Vec<_>>(), vec![3]);
        assert_eq!(report.missing_source, 1);
        assert_eq!(report.load_failures, 1);

        let doc = p.document();
        assert!(doc.find_by_id(a, "quiz-1-check").is_some());
        assert!(doc.text_content(b).starts_with("Ошибка: не указан источник"));
        assert_eq!(doc.text_content(c), "Ошибка загрузки квиза.");
        assert!(doc.text_content(d).contains("\"matrix\""));
        assert!(doc.find_by_id(e, "quiz-4-check").is_some());
    }

    #[tokio::test]
    async fn missing_translations_fail_every_container() {
        let mut p = page();
        let a = p.add_container(Some("sc.json"));
        let b = p.add_container(None);
        let alloc = InstanceIdAllocator::new();

        let report = bootstrap(&mut p, &loader(false), &alloc).await;

        assert!(report.translations_failed);
        assert!(report.mounted.is_empty());
        for c in [a, b] {
            assert_eq!(p.document().text_content(c), TRANSLATIONS_UNAVAILABLE);
        }
        assert_eq!(alloc.next_id().get(), 1);
    }
}
