//! Per-answer explanation reveal for the choice kinds.

use crate::domain::ExplanationPolicy;
use crate::dom::{Document, Element, NodeId};

use super::QuizContext;

/// Which answer indices `policy` reveals, given the selection.
pub fn indices_to_reveal(
    policy: ExplanationPolicy,
    selected: &[usize],
    answer_count: usize,
) -> Vec<usize> {
    match policy {
        ExplanationPolicy::None => Vec::new(),
        ExplanationPolicy::Selected => selected
            .iter()
            .copied()
            .filter(|i| *i < answer_count)
            .collect(),
        ExplanationPolicy::All => (0..answer_count).collect(),
    }
}

/// Append answer `index`'s description to its answer container.
///
/// Returns false when there is nothing to show: no description in this language,
/// or no container for that index under `form`.
pub fn show_description(
    doc: &mut Document,
    form: NodeId,
    ctx: &QuizContext<'_>,
    index: usize,
) -> bool {
    let Some(answer) = ctx.definition.answers.get(index) else {
        return false;
    };
    let text = ctx.text(answer.description.as_ref());
    if text.is_empty() {
        return false;
    }
    let Some(container) = doc.find_by_id(form, &ctx.instance.answer_container(index)) else {
        return false;
    };
    let mut p = Element::new("p").with_text(text);
    ctx.styles.explanation(&mut p, answer.correct);
    doc.append(container, p);
    true
}

/// Apply the configured policy; returns the indices actually rendered.
pub fn reveal(
    doc: &mut Document,
    form: NodeId,
    ctx: &QuizContext<'_>,
    selected: &[usize],
) -> Vec<usize> {
    let policy = ctx.definition.config.explanation_policy;
    indices_to_reveal(policy, selected, ctx.definition.answers.len())
        .into_iter()
        .filter(|i| show_description(doc, form, ctx, *i))
        .collect()
}
