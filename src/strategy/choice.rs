//! Rendering and reading shared by the two choice kinds.

use crate::dom::{Document, Element, NodeId};

use super::QuizContext;

/// One `<input type={input_type}>` plus label per answer, each in its own container.
pub(super) fn render_choices(
    doc: &mut Document,
    form: NodeId,
    ctx: &QuizContext<'_>,
    input_type: &str,
) {
    let id = ctx.instance;
    let group = id.group_name();
    for (index, answer) in ctx.definition.answers.iter().enumerate() {
        let mut container = Element::new("div").with_id(id.answer_container(index));
        ctx.styles.answer_container(&mut container);
        let container = doc.append(form, container);

        let input_id = id.answer_input(index);
        doc.append(
            container,
            Element::new("input")
                .with_id(input_id.clone())
                .with_attr("type", input_type)
                .with_attr("name", group.clone())
                .with_value(index.to_string()),
        );
        doc.append(
            container,
            Element::new("label")
                .with_attr("for", input_id)
                .with_text(format!(" {}", ctx.text(answer.text.as_ref()))),
        );
    }
}

/// Indices of the checked inputs of this instance's group inside `form`, ascending.
/// Values that do not parse as an index are skipped.
pub(super) fn checked_indices(doc: &Document, form: NodeId, ctx: &QuizContext<'_>) -> Vec<usize> {
    let group = ctx.instance.group_name();
    let mut out: Vec<usize> = doc
        .find_all(form, |e| {
            e.tag == "input" && e.checked && e.attr("name") == Some(group.as_str())
        })
        .into_iter()
        .filter_map(|n| doc.get(n))
        .filter_map(|e| e.value.parse::<usize>().ok())
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
