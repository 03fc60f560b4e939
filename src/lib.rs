//! Embeddable quiz engine.
//!
//! Quiz definitions (JSON) are mounted into containers of an in-memory `Page`, one
//! isolated `QuizInstance` per container. Readers interact through clicks and text
//! input on element ids; the `routes` module exposes the same operations over HTTP
//! and WebSocket.

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod dom;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ids;
pub mod loader;
pub mod logic;
pub mod page;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod strategy;
pub mod styles;
pub mod telemetry;
pub mod util;

pub use bootstrap::{bootstrap, BootstrapReport};
pub use config::{EngineConfig, StyleConfig};
pub use controller::{Phase, QuizInstance};
pub use domain::{QuizDefinition, QuizKind};
pub use error::{ApiError, LoadError};
pub use ids::{InstanceId, InstanceIdAllocator};
pub use loader::{FsLoader, QuizLoader};
pub use page::{ClickOutcome, Page};
pub use strategy::Evaluation;
