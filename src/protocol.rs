//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::bootstrap::BootstrapReport;
use crate::controller::Phase;
use crate::domain::QuizDefinition;
use crate::ids::InstanceId;
use crate::page::ClickOutcome;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    OpenPage {
        containers: Vec<ContainerIn>,
        #[serde(default)]
        lang: Option<String>,
    },
    ClosePage {
        #[serde(rename = "pageId")]
        page_id: String,
    },
    Click {
        #[serde(rename = "pageId")]
        page_id: String,
        #[serde(rename = "elementId")]
        element_id: String,
    },
    Input {
        #[serde(rename = "pageId")]
        page_id: String,
        #[serde(rename = "elementId")]
        element_id: String,
        value: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Page { page: PageOut },
    Closed {
        #[serde(rename = "pageId")]
        page_id: String,
    },
    Click { outcome: ClickOutcome, page: PageOut },
    Input { accepted: bool, page: PageOut },
    Error { message: String },
}

//
// HTTP request/response DTOs
//

/// One quiz container of a page to open.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIn {
    #[serde(default)]
    pub quiz_src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageIn {
    pub containers: Vec<ContainerIn>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InstanceOut {
    pub id: InstanceId,
    pub kind: String,
    pub phase: Phase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOut {
    pub page_id: String,
    pub lang: String,
    pub instances: Vec<InstanceOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BootstrapReport>,
    pub html: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickIn {
    pub element_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClickOut {
    pub outcome: ClickOutcome,
    pub page: PageOut,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputIn {
    pub element_id: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct InputOut {
    pub accepted: bool,
    pub page: PageOut,
}

/// Stateless check of one submission against a definition.
#[derive(Debug, Deserialize)]
pub struct EvaluateIn {
    pub definition: QuizDefinition,
    #[serde(default)]
    pub lang: Option<String>,
    /// Selected answer indices (choice kinds).
    #[serde(default)]
    pub selected: Vec<usize>,
    /// Submitted text (input field).
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateOut {
    pub correct: bool,
    pub selected: Vec<usize>,
    pub revealed: Vec<usize>,
    pub verdict: String,
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
