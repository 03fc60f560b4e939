//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::{header::ACCEPT_LANGUAGE, HeaderMap, StatusCode},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn accept_language(headers: &HeaderMap) -> Option<&str> {
  headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok())
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, headers, body), fields(containers = body.containers.len()))]
pub async fn http_post_page(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LangQuery>,
  headers: HeaderMap,
  Json(body): Json<PageIn>,
) -> impl IntoResponse {
  let lang = body.lang.as_deref().or(q.lang.as_deref());
  let out = open_page(&state, &body.containers, lang, accept_language(&headers)).await;
  info!(target: "quiz", page_id = %out.page_id, lang = %out.lang, "HTTP page opened");
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_page(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
) -> Result<Json<PageOut>, ApiError> {
  get_page(&state, &page_id).await.map(Json)
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_page(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
) -> Result<StatusCode, ApiError> {
  close_page(&state, &page_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(element_id = %body.element_id))]
pub async fn http_post_click(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
  Json(body): Json<ClickIn>,
) -> Result<Json<ClickOut>, ApiError> {
  click(&state, &page_id, &body.element_id).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(element_id = %body.element_id, value_len = body.value.len()))]
pub async fn http_post_input(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
  Json(body): Json<InputIn>,
) -> Result<Json<InputOut>, ApiError> {
  input(&state, &page_id, &body.element_id, &body.value).await.map(Json)
}

#[instrument(level = "info", skip(state, headers, body))]
pub async fn http_post_evaluate(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<EvaluateIn>,
) -> Result<Json<EvaluateOut>, ApiError> {
  let out = evaluate_submission(&state, body, accept_language(&headers)).await?;
  info!(target: "quiz", correct = out.correct, "HTTP evaluate served");
  Ok(Json(out))
}
