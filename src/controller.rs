//! Lifecycle of one quiz instance.
//!
//! ```text
//! Unbuilt --build--> Answering --check--> Checked{correct}
//!                        ^                      |
//!                        +------retry-----------+   (incorrect and retry configured)
//! ```
//!
//! `build` always starts from an empty container, so building twice is the same as
//! building once and retry is a full rebuild from the stored definition.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::{QuizDefinition, QuizKind};
use crate::dom::{Document, Element, NodeId};
use crate::i18n::UiStrings;
use crate::ids::InstanceId;
use crate::strategy::{AnswerKind, Evaluation, QuizContext, Strategy};
use crate::styles::StyleHook;

/// Attribute naming what a control does when activated.
pub const ACTION_ATTR: &str = "data-action";
/// Attribute naming the instance a control belongs to.
pub const INSTANCE_ATTR: &str = "data-quiz-instance";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    Unbuilt,
    Answering,
    Checked { correct: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Check,
    Retry,
}

impl ControlAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlAction::Check => "check",
            ControlAction::Retry => "retry",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "check" => Some(ControlAction::Check),
            "retry" => Some(ControlAction::Retry),
            _ => None,
        }
    }
}

pub struct QuizInstance {
    id: InstanceId,
    container: NodeId,
    definition: Arc<QuizDefinition>,
    lang: String,
    default_lang: String,
    ui: Arc<UiStrings>,
    styles: Arc<dyn StyleHook>,
    strategy: Option<Strategy>,
    phase: Phase,
}

impl std::fmt::Debug for QuizInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizInstance")
            .field("id", &self.id)
            .field("container", &self.container)
            .field("kind", self.definition.kind())
            .field("lang", &self.lang)
            .field("phase", &self.phase)
            .finish()
    }
}

impl QuizInstance {
    /// Bind a definition to a container. Nothing is rendered until `build`.
    pub fn new(
        container: NodeId,
        definition: Arc<QuizDefinition>,
        lang: &str,
        default_lang: &str,
        ui: Arc<UiStrings>,
        id: InstanceId,
        styles: Arc<dyn StyleHook>,
    ) -> Self {
        Self {
            id,
            container,
            definition,
            lang: lang.to_string(),
            default_lang: default_lang.to_string(),
            ui,
            styles,
            strategy: None,
            phase: Phase::Unbuilt,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    fn ctx(&self) -> QuizContext<'_> {
        QuizContext {
            definition: &self.definition,
            lang: &self.lang,
            default_lang: &self.default_lang,
            instance: self.id,
            styles: self.styles.as_ref(),
        }
    }

    /// Render question, controls, check control and an empty results region.
    ///
    /// An unknown quiz type replaces the container content with a visible error and
    /// leaves the instance `Unbuilt`.
    #[instrument(level = "debug", skip(self, doc), fields(instance = %self.id, kind = %self.definition.kind()))]
    pub fn build(&mut self, doc: &mut Document) -> Phase {
        doc.clear(self.container);
        self.strategy = None;
        self.phase = Phase::Unbuilt;

        let Some(strategy) = Strategy::for_kind(self.definition.kind()) else {
            let raw = match self.definition.kind() {
                QuizKind::Unknown(raw) => raw.clone(),
                other => other.to_string(),
            };
            warn!(target: "quiz", instance = %self.id, kind = %raw, "Unknown quiz type; rendering error");
            let mut p = Element::new("p")
                .with_text(format!("{} \"{}\".", self.ui.error_unknown_type, raw));
            self.styles.error_message(&mut p);
            doc.append(self.container, p);
            return self.phase;
        };

        let ctx = self.ctx();
        let id = self.id;
        doc.append(
            self.container,
            Element::new("h2").with_text(ctx.text(self.definition.question.as_ref())),
        );
        let form = doc.append(self.container, Element::new("form").with_id(id.form()));
        strategy.render(doc, form, &ctx);

        let mut check = Element::new("button")
            .with_id(id.check_control())
            .with_attr("type", "button")
            .with_attr(ACTION_ATTR, ControlAction::Check.as_str())
            .with_attr(INSTANCE_ATTR, id.to_string())
            .with_text(self.ui.check_answer.clone());
        if !self.definition.config.show_check_control {
            check.set_style("display", "none");
        }
        doc.append(self.container, check);
        doc.append(self.container, Element::new("div").with_id(id.results()));

        self.strategy = Some(strategy);
        self.phase = Phase::Answering;
        self.phase
    }

    /// Score the current answer. Only valid while `Answering`; otherwise `None`.
    #[instrument(level = "debug", skip(self, doc), fields(instance = %self.id))]
    pub fn check(&mut self, doc: &mut Document) -> Option<Evaluation> {
        if self.phase != Phase::Answering {
            return None;
        }
        let strategy = self.strategy?;
        let form = doc.find_by_id(self.container, &self.id.form())?;
        let eval = strategy.evaluate(doc, form, &self.ctx());

        // A scored answer cannot be edited any more.
        for input in doc.find_all(form, |e| e.tag == "input") {
            if let Some(el) = doc.get_mut(input) {
                el.disabled = true;
            }
        }
        if let Some(check) = doc.find_by_id(self.container, &self.id.check_control()) {
            if let Some(el) = doc.get_mut(check) {
                el.set_style("display", "none");
            }
        }

        if let Some(results) = doc.find_by_id(self.container, &self.id.results()) {
            doc.clear(results);
            let verdict_text = if eval.correct {
                &self.ui.correct
            } else {
                &self.ui.incorrect
            };
            let mut verdict = Element::new("p").with_text(verdict_text.clone());
            self.styles.verdict(&mut verdict, eval.correct);
            doc.append(results, verdict);
            if let Some(el) = doc.get_mut(results) {
                self.styles.results_region(el);
            }

            if !eval.correct && self.definition.config.show_retry_on_incorrect {
                let mut retry = Element::new("button")
                    .with_id(self.id.retry_control())
                    .with_attr("type", "button")
                    .with_attr(ACTION_ATTR, ControlAction::Retry.as_str())
                    .with_attr(INSTANCE_ATTR, self.id.to_string())
                    .with_text(self.ui.try_again.clone());
                self.styles.retry_control(&mut retry);
                doc.append(results, retry);
            }
        }

        self.phase = Phase::Checked {
            correct: eval.correct,
        };
        info!(target: "quiz", instance = %self.id, correct = eval.correct, selected = ?eval.selected, revealed = ?eval.revealed, "Answer checked");
        Some(eval)
    }

    /// Rebuild from scratch after an incorrect answer, if retry is configured.
    /// Returns false (and changes nothing) in any other state.
    #[instrument(level = "debug", skip(self, doc), fields(instance = %self.id))]
    pub fn retry(&mut self, doc: &mut Document) -> bool {
        let allowed = self.phase == Phase::Checked { correct: false }
            && self.definition.config.show_retry_on_incorrect;
        if !allowed {
            return false;
        }
        info!(target: "quiz", instance = %self.id, "Retry requested; rebuilding");
        self.build(doc);
        true
    }

    /// True if `node` belongs to this instance's container.
    pub fn owns(&self, doc: &Document, node: NodeId) -> bool {
        doc.contains(self.container, node)
    }
}
