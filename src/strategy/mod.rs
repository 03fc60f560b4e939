//! Answer-kind strategies.
//!
//! The set of kinds is closed: single choice, multiple choice and free-text input.
//! Each one renders its controls into the quiz form and later evaluates whatever the
//! reader left in those controls. The strategy is picked once per `build` from
//! `config.type` and kept for the lifetime of the instance.

mod choice;
pub mod explanation;
mod input_field;
mod multiple_choice;
mod single_choice;

use serde::Serialize;

use crate::domain::{MultilingualText, QuizDefinition, QuizKind};
use crate::dom::{Document, NodeId};
use crate::i18n::resolve;
use crate::ids::InstanceId;
use crate::styles::StyleHook;

pub use input_field::InputField;
pub use multiple_choice::MultipleChoice;
pub use single_choice::SingleChoice;

/// Everything a strategy needs besides the document itself.
#[derive(Clone, Copy)]
pub struct QuizContext<'a> {
    pub definition: &'a QuizDefinition,
    pub lang: &'a str,
    pub default_lang: &'a str,
    pub instance: InstanceId,
    pub styles: &'a dyn StyleHook,
}

impl QuizContext<'_> {
    /// Resolve multilingual content for this instance's language.
    pub fn text(&self, content: Option<&MultilingualText>) -> String {
        resolve(content, self.lang, self.default_lang)
    }
}

/// Outcome of checking one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub correct: bool,
    /// Answer indices the reader had selected, ascending. Empty for input fields.
    pub selected: Vec<usize>,
    /// Answer indices whose description was rendered.
    pub revealed: Vec<usize>,
}

/// Capability shared by every answer kind.
pub trait AnswerKind {
    /// Build the interactive controls as children of `form`.
    fn render(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>);

    /// Judge the current control state and render any explanations it calls for.
    /// Missing input is an incorrect answer, never an error.
    fn evaluate(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) -> Evaluation;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    SingleChoice(SingleChoice),
    MultipleChoice(MultipleChoice),
    InputField(InputField),
}

impl Strategy {
    /// `None` for kinds the engine does not know.
    pub fn for_kind(kind: &QuizKind) -> Option<Self> {
        match kind {
            QuizKind::SingleChoice => Some(Strategy::SingleChoice(SingleChoice)),
            QuizKind::MultipleChoice => Some(Strategy::MultipleChoice(MultipleChoice)),
            QuizKind::InputField => Some(Strategy::InputField(InputField)),
            QuizKind::Unknown(_) => None,
        }
    }

    fn inner(&self) -> &dyn AnswerKind {
        match self {
            Strategy::SingleChoice(s) => s,
            Strategy::MultipleChoice(s) => s,
            Strategy::InputField(s) => s,
        }
    }
}

impl AnswerKind for Strategy {
    fn render(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) {
        self.inner().render(doc, form, ctx)
    }

    fn evaluate(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) -> Evaluation {
        self.inner().evaluate(doc, form, ctx)
    }
}
