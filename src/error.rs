//! Error types for the plumbing around the engine (loading, HTTP API).
//!
//! The engine core itself has no error paths: unknown quiz types are shown in place,
//! missing translations are empty text and missing answers are incorrect answers.

use std::path::PathBuf;

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::protocol::ErrorOut;

/// Failure to obtain a quiz definition or a UI-string catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid quiz source {src:?}")]
    InvalidSource { src: String },
    #[error("invalid language code {lang:?}")]
    InvalidLanguage { lang: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the HTTP / WebSocket API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown page {0}")]
    PageNotFound(String),
    #[error("unknown element {0}")]
    ElementNotFound(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PageNotFound(_) | ApiError::ElementNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "quiz_engine", error = %self, "Request failed");
        }
        (status, Json(ErrorOut { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = LoadError::InvalidSource { src: "../etc/passwd".into() };
        assert_eq!(e.to_string(), "invalid quiz source \"../etc/passwd\"");
        let e = LoadError::Io {
            path: PathBuf::from("quizzes/x.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(e.to_string(), "failed to read quizzes/x.json: gone");
    }

    #[test]
    fn api_errors_map_to_statuses() {
        assert_eq!(ApiError::PageNotFound("p".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        let load = ApiError::from(LoadError::InvalidLanguage { lang: "??".into() });
        assert_eq!(load.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
