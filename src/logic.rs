//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Opening and closing a page (language detection, container layout, bootstrap)
//!   - Forwarding clicks and text input to a stored page
//!   - Stateless evaluation of one submission on a scratch page

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::bootstrap::{bootstrap, BootstrapReport};
use crate::controller::Phase;
use crate::domain::QuizKind;
use crate::error::ApiError;
use crate::i18n::detect_lang;
use crate::loader::QuizLoader;
use crate::page::{ClickOutcome, Page};
use crate::protocol::{ClickOut, ContainerIn, EvaluateIn, EvaluateOut, InputOut, InstanceOut, PageOut};
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Snapshot of a page for the wire.
pub fn page_out(page_id: &str, page: &Page, report: Option<BootstrapReport>) -> PageOut {
  PageOut {
    page_id: page_id.to_string(),
    lang: page.lang().to_string(),
    instances: page
      .instances()
      .map(|i| InstanceOut { id: i.id(), kind: i.definition().kind().to_string(), phase: i.phase() })
      .collect(),
    report,
    html: page.to_html(),
  }
}

fn page_lang(state: &AppState, query_lang: Option<&str>, accept_language: Option<&str>) -> String {
  detect_lang(query_lang, accept_language, &state.config)
}

#[instrument(level = "info", skip(state, containers), fields(containers = containers.len()))]
pub async fn open_page(
  state: &AppState,
  containers: &[ContainerIn],
  query_lang: Option<&str>,
  accept_language: Option<&str>,
) -> PageOut {
  let lang = page_lang(state, query_lang, accept_language);
  let mut page = state.new_page(&lang);
  for c in containers {
    page.add_container(c.quiz_src.as_deref());
  }
  let report = bootstrap(&mut page, &state.loader, &state.allocator).await;

  let mut out = page_out("", &page, Some(report));
  out.page_id = state.insert_page(page).await;
  info!(target: "quiz", page_id = %out.page_id, %lang, instances = out.instances.len(), "Page opened");
  out
}

pub async fn get_page(state: &AppState, page_id: &str) -> Result<PageOut, ApiError> {
  state.with_page(page_id, |p| page_out(page_id, p, None)).await
}

#[instrument(level = "info", skip(state))]
pub async fn close_page(state: &AppState, page_id: &str) -> Result<(), ApiError> {
  state.remove_page(page_id).await?;
  info!(target: "quiz", %page_id, "Page closed");
  Ok(())
}

#[instrument(level = "info", skip(state), fields(%page_id, %element_id))]
pub async fn click(state: &AppState, page_id: &str, element_id: &str) -> Result<ClickOut, ApiError> {
  let (outcome, page) = state
    .with_page(page_id, |p| {
      let outcome = p.click(element_id);
      (outcome, page_out(page_id, p, None))
    })
    .await?;
  match outcome {
    ClickOutcome::NotFound => Err(ApiError::ElementNotFound(element_id.to_string())),
    outcome => {
      info!(target: "quiz", %page_id, %element_id, ?outcome, "Click handled");
      Ok(ClickOut { outcome, page })
    }
  }
}

#[instrument(level = "info", skip(state, value), fields(%page_id, %element_id, value_len = value.len()))]
pub async fn input(state: &AppState, page_id: &str, element_id: &str, value: &str) -> Result<InputOut, ApiError> {
  let (accepted, page) = state
    .with_page(page_id, |p| {
      let accepted = p.set_value(element_id, value);
      (accepted, page_out(page_id, p, None))
    })
    .await?;
  debug!(target: "quiz", %page_id, %element_id, accepted, value = %trunc_for_log(value, 64), "Input handled");
  Ok(InputOut { accepted, page })
}

/// Mount `body.definition` on a throwaway page, apply the submission and check it.
#[instrument(level = "info", skip(state, body), fields(kind = %body.definition.kind(), selected = ?body.selected))]
pub async fn evaluate_submission(
  state: &AppState,
  body: EvaluateIn,
  accept_language: Option<&str>,
) -> Result<EvaluateOut, ApiError> {
  let lang = page_lang(state, body.lang.as_deref(), accept_language);
  let ui = state.loader.load_ui_strings(&lang).await?;

  let answers = body.definition.answers.len();
  if let Some(i) = body.selected.iter().find(|&&i| i >= answers) {
    return Err(ApiError::BadRequest(format!("answer index {i} out of range (0..{answers})")));
  }
  let selected: BTreeSet<usize> = body.selected.iter().copied().collect();
  let kind = body.definition.kind().clone();
  if kind == QuizKind::SingleChoice && selected.len() > 1 {
    return Err(ApiError::BadRequest("single-choice accepts at most one selection".into()));
  }

  let mut page = state.new_page(&lang);
  let container = page.add_container(None);
  let id = state.allocator.next_id();
  let (correct_label, incorrect_label) = (ui.correct.clone(), ui.incorrect.clone());
  if page.mount(container, Arc::new(body.definition), Arc::new(ui), id) == Phase::Unbuilt {
    return Err(ApiError::BadRequest(format!("unknown quiz type {:?}", kind.to_string())));
  }

  if kind == QuizKind::InputField {
    page.set_value(&id.text_input(), body.text.as_deref().unwrap_or_default());
  } else {
    for i in &selected {
      page.click(&id.answer_input(*i));
    }
  }

  let evaluation = page
    .check(id)
    .ok_or_else(|| ApiError::BadRequest("quiz cannot be checked".into()))?;
  let verdict = if evaluation.correct { correct_label } else { incorrect_label };
  info!(target: "quiz", instance = %id, correct = evaluation.correct, "Submission evaluated");
  Ok(EvaluateOut {
    correct: evaluation.correct,
    selected: evaluation.selected,
    revealed: evaluation.revealed,
    verdict,
    html: page.html_of(container),
  })
}
