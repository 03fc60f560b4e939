//! End-to-end reader flows over the bundled quiz files and locale catalogs.

use std::path::PathBuf;
use std::sync::Arc;

use quiz_engine::page::IgnoreReason;
use quiz_engine::styles::ThemeStyles;
use quiz_engine::{bootstrap, ClickOutcome, FsLoader, InstanceIdAllocator, Page, Phase};

fn loader() -> FsLoader {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    FsLoader::new(root.join("quizzes"), root.join("locales")).without_builtin_fallback()
}

async fn open(sources: &[&str], lang: &str) -> Page {
    let mut page = Page::new(lang, "en", "quiz-container", Arc::new(ThemeStyles::default()));
    for src in sources {
        page.add_container(Some(src));
    }
    let report = bootstrap(&mut page, &loader(), &InstanceIdAllocator::new()).await;
    assert!(!report.translations_failed);
    page
}

fn text_of(page: &Page, id: &str) -> String {
    let doc = page.document();
    doc.find_by_id(doc.root(), id)
        .map(|n| doc.text_content(n))
        .unwrap_or_default()
}

fn verdict_color(page: &Page, results_id: &str) -> Option<String> {
    let doc = page.document();
    let results = doc.find_by_id(doc.root(), results_id)?;
    let p = doc.find_all(results, |e| e.tag == "p").into_iter().next()?;
    doc.get(p)?.style("color").map(str::to_string)
}

#[tokio::test]
async fn check_label_follows_page_language() {
    let ru = open(&["sc-base.json"], "ru").await;
    assert_eq!(text_of(&ru, "quiz-1-check"), "Проверить ответ");

    let en = open(&["sc-base.json"], "en").await;
    assert_eq!(text_of(&en, "quiz-1-check"), "Check Answer");
}

#[tokio::test]
async fn localized_question_and_explanation() {
    let mut page = open(&["sc-extension-mod.json"], "en").await;
    let doc = page.document();
    let h2 = doc.find_all(doc.root(), |e| e.tag == "h2")[0];
    assert_eq!(doc.text_content(h2), "Which tag is the most important?");

    page.click("quiz-1-answer-0");
    page.click("quiz-1-check");
    assert!(text_of(&page, "quiz-1-answer-container-0").ends_with("Correct, h1 is the most important."));
}

#[tokio::test]
async fn single_choice_verdicts() {
    let mut page = open(&["sc-base.json"], "ru").await;
    page.click("quiz-1-answer-0");
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-results"), "Правильно!");
    assert_eq!(verdict_color(&page, "quiz-1-results").as_deref(), Some("green"));

    let mut page = open(&["sc-base.json"], "ru").await;
    page.click("quiz-1-answer-1");
    page.click("quiz-1-check");
    assert!(text_of(&page, "quiz-1-results").starts_with("Неправильно."));
    assert_eq!(verdict_color(&page, "quiz-1-results").as_deref(), Some("red"));
}

#[tokio::test]
async fn multiple_choice_needs_exactly_the_correct_set() {
    let mut page = open(&["mc-base.json"], "ru").await;
    page.click("quiz-1-answer-0");
    page.click("quiz-1-answer-2");
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-results"), "Правильно!");

    let mut page = open(&["mc-base.json"], "ru").await;
    page.click("quiz-1-answer-0");
    page.click("quiz-1-check");
    assert!(text_of(&page, "quiz-1-results").starts_with("Неправильно."));
}

#[tokio::test]
async fn input_field_ignores_case_when_configured() {
    let mut page = open(&["if-mod.json"], "ru").await;
    assert!(page.set_value("quiz-1-answer-input", "cSS"));
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-results"), "Правильно!");
}

#[tokio::test]
async fn input_field_explains_on_error() {
    let mut page = open(&["if-mod-extension.json"], "ru").await;
    page.set_value("quiz-1-answer-input", "wrong");
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-explanation"), "Правильный ответ: CSS.");
}

#[tokio::test]
async fn retry_appears_only_after_a_wrong_answer_and_resets() {
    let mut page = open(&["sc-base.json"], "ru").await;
    page.click("quiz-1-answer-0");
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-retry"), "");

    let mut page = open(&["sc-base.json"], "ru").await;
    let fresh = page.to_html();
    page.click("quiz-1-answer-1");
    page.click("quiz-1-check");
    assert_eq!(text_of(&page, "quiz-1-retry"), "Попробовать снова");

    assert!(matches!(page.click("quiz-1-retry"), ClickOutcome::Retried { .. }));
    assert_eq!(page.to_html(), fresh);
    let doc = page.document();
    let second = doc.find_by_id(doc.root(), "quiz-1-answer-1").unwrap();
    let el = doc.get(second).unwrap();
    assert!(!el.checked && !el.disabled);
    assert_eq!(text_of(&page, "quiz-1-results"), "");
}

#[tokio::test]
async fn explanations_stay_inside_their_own_instance() {
    let mut page = open(&["sc-base.json", "sc-extension.json"], "ru").await;
    page.click("quiz-2-answer-0");
    page.click("quiz-2-check");

    let doc = page.document();
    let first = page.containers()[0];
    let explained = doc.find_all(first, |e| {
        e.id.as_deref().is_some_and(|id| id.starts_with("quiz-1-answer-container-"))
    });
    for container in explained {
        assert!(doc.find_all(container, |e| e.tag == "p").is_empty());
    }
    assert!(text_of(&page, "quiz-2-answer-container-0").contains("Верно, h1 - самый важный."));
    assert_eq!(page.instance(quiz_engine::InstanceId::new(1).unwrap()).unwrap().phase(), Phase::Answering);
}

#[tokio::test]
async fn checked_quiz_is_locked() {
    let mut page = open(&["sc-base.json"], "en").await;
    page.click("quiz-1-answer-0");
    page.click("quiz-1-check");
    assert_eq!(
        page.click("quiz-1-answer-1"),
        ClickOutcome::Ignored { reason: IgnoreReason::Disabled }
    );
}

#[tokio::test]
async fn missing_file_shows_loading_error() {
    let page = open(&["nope.json"], "en").await;
    let doc = page.document();
    assert_eq!(doc.text_content(page.containers()[0]), "Error loading quiz.");
}
