//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  http::{header::ACCEPT_LANGUAGE, HeaderMap},
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(ws, state, headers))]
pub async fn ws_upgrade(
  ws: WebSocketUpgrade,
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> impl IntoResponse {
  info!(target: "quiz_engine", "WebSocket upgrade requested");
  // The handshake's Accept-Language applies to every page opened on this socket.
  let accept_language = headers
    .get(ACCEPT_LANGUAGE)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string);
  ws.on_upgrade(move |socket| handle_ws(socket, state, accept_language))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>, accept_language: Option<String>) {
  info!(target: "quiz_engine", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "quiz_engine", msg = %trunc_for_log(&txt, 256), "WS received");
            handle_client_ws(incoming, &state, accept_language.as_deref()).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "quiz_engine", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "quiz_engine", "WebSocket disconnected");
}

/// Dispatch one client message. Errors become `ServerWsMessage::Error` replies.
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState, accept_language: Option<&str>) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::OpenPage { containers, lang } => {
      let page = open_page(state, &containers, lang.as_deref(), accept_language).await;
      ServerWsMessage::Page { page }
    }

    ClientWsMessage::ClosePage { page_id } => match close_page(state, &page_id).await {
      Ok(()) => ServerWsMessage::Closed { page_id },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::Click { page_id, element_id } => match click(state, &page_id, &element_id).await {
      Ok(out) => ServerWsMessage::Click { outcome: out.outcome, page: out.page },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::Input { page_id, element_id, value } => {
      match input(state, &page_id, &element_id, &value).await {
        Ok(out) => ServerWsMessage::Input { accepted: out.accepted, page: out.page },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }
  }
}
