//! Free-text answer compared against the answer key after trimming.

use crate::dom::{Document, Element, NodeId};

use super::{AnswerKind, Evaluation, QuizContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputField;

/// Compare a trimmed submission with the key; case-folded unless `case_sensitive`.
pub fn answer_matches(submitted: &str, key: &str, case_sensitive: bool) -> bool {
    let submitted = submitted.trim();
    if case_sensitive {
        submitted == key
    } else {
        submitted.to_lowercase() == key.to_lowercase()
    }
}

impl AnswerKind for InputField {
    fn render(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) {
        let id = ctx.instance;
        doc.append(
            form,
            Element::new("input")
                .with_id(id.text_input())
                .with_attr("type", "text")
                .with_attr("name", id.group_name()),
        );
        // Empty slot, filled by `evaluate` when the explanation is due.
        doc.append(form, Element::new("div").with_id(id.explanation()));
    }

    fn evaluate(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) -> Evaluation {
        let def = ctx.definition;
        let submitted = doc
            .find_by_id(form, &ctx.instance.text_input())
            .and_then(|n| doc.get(n))
            .map(|e| e.value.clone())
            .unwrap_or_default();
        let key = ctx.text(def.answer.as_ref());
        let correct = answer_matches(&submitted, &key, def.config.case_sensitive);

        if !correct && def.config.show_explanation_on_error {
            let text = ctx.text(def.explanation.as_ref());
            let slot = doc
                .find_by_id(form, &ctx.instance.explanation())
                .filter(|_| !text.is_empty());
            if let Some(slot) = slot {
                doc.clear(slot);
                // Shown as guidance towards the right answer, hence the "correct" styling.
                let mut p = Element::new("p").with_text(text);
                ctx.styles.explanation(&mut p, true);
                doc.append(slot, p);
            }
        }

        Evaluation {
            correct,
            ..Default::default()
        }
    }
}
