//! Any subset of options may be selected; correct iff it equals the correct subset.

use std::collections::BTreeSet;

use crate::dom::{Document, NodeId};

use super::choice::{checked_indices, render_choices};
use super::explanation::reveal;
use super::{AnswerKind, Evaluation, QuizContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MultipleChoice;

impl AnswerKind for MultipleChoice {
    fn render(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) {
        render_choices(doc, form, ctx, "checkbox");
    }

    fn evaluate(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) -> Evaluation {
        let selected = checked_indices(doc, form, ctx);
        let chosen: BTreeSet<usize> = selected.iter().copied().collect();
        let expected: BTreeSet<usize> = ctx.definition.correct_indices().into_iter().collect();
        let correct = chosen == expected;
        let revealed = reveal(doc, form, ctx, &selected);
        Evaluation {
            correct,
            selected,
            revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuizDefinition;
    use crate::strategy::test_support::{click_answer, ctx, rendered};
    use proptest::prelude::*;
    use serde_json::json;

    fn quiz(correct: &[bool]) -> QuizDefinition {
        let answers: Vec<_> = correct
            .iter()
            .enumerate()
            .map(|(i, c)| json!({ "text": format!("option {i}"), "correct": c }))
            .collect();
        serde_json::from_value(json!({
            "question": "Pick all that apply",
            "config": { "type": "multiple-choice" },
            "answers": answers
        }))
        .unwrap()
    }

    fn check(def: &QuizDefinition, picks: &[usize]) -> Evaluation {
        let (mut doc, form, s) = rendered(def, 9);
        for i in picks {
            click_answer(&mut doc, 9, *i);
        }
        s.evaluate(&mut doc, form, &ctx(def, 9))
    }

    #[test]
    fn exact_set_is_correct_regardless_of_click_order() {
        let def = quiz(&[true, false, true]);
        assert!(check(&def, &[0, 2]).correct);
        assert!(check(&def, &[2, 0]).correct);
    }

    #[test]
    fn subset_and_superset_are_incorrect() {
        let def = quiz(&[true, false, true]);
        assert!(!check(&def, &[0]).correct);
        assert!(!check(&def, &[0, 1, 2]).correct);
    }

    #[test]
    fn trick_question_with_nothing_correct() {
        let def = quiz(&[false, false]);
        assert!(check(&def, &[]).correct);
        assert!(!check(&def, &[1]).correct);
    }

    #[test]
    fn toggling_twice_deselects() {
        let def = quiz(&[true, false]);
        let eval = check(&def, &[0, 1, 1]);
        assert_eq!(eval.selected, vec![0]);
        assert!(eval.correct);
    }

    proptest! {
        #[test]
        fn correct_iff_selection_equals_key(
            key in proptest::collection::vec(any::<bool>(), 1..6),
            picks in proptest::collection::vec(any::<bool>(), 6),
        ) {
            let def = quiz(&key);
            let chosen: Vec<usize> = (0..key.len()).filter(|i| picks[*i]).collect();
            let eval = check(&def, &chosen);
            let expected: Vec<usize> = (0..key.len()).filter(|i| key[*i]).collect();
            prop_assert_eq!(eval.correct, chosen == expected);
        }
    }
}
