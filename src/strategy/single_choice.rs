//! Exactly one option may be selected; radios grouped per instance.

use crate::dom::{Document, NodeId};

use super::choice::{checked_indices, render_choices};
use super::explanation::reveal;
use super::{AnswerKind, Evaluation, QuizContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleChoice;

impl AnswerKind for SingleChoice {
    fn render(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) {
        render_choices(doc, form, ctx, "radio");
    }

    fn evaluate(&self, doc: &mut Document, form: NodeId, ctx: &QuizContext<'_>) -> Evaluation {
        let Some(index) = checked_indices(doc, form, ctx).first().copied() else {
            return Evaluation::default();
        };
        let correct = ctx
            .definition
            .answers
            .get(index)
            .is_some_and(|a| a.correct);
        let selected = vec![index];
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
    use serde_json::json;

    fn quiz(policy: &str) -> QuizDefinition {
        serde_json::from_value(json!({
            "question": "Which tag is the most important?",
            "config": { "type": "single-choice", "explanationPolicy": policy },
            "answers": [
                { "text": "h1", "correct": true, "description": "h1 is the top heading." },
                { "text": "p", "correct": false, "description": "p is a paragraph." },
                { "text": "div", "correct": false }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn renders_one_radio_per_answer_in_the_instance_group() {
        let def = quiz("none");
        let (doc, form, _) = rendered(&def, 4);
        let radios = doc.find_all(form, |e| e.input_type() == Some("radio"));
        assert_eq!(radios.len(), 3);
        for r in radios {
            assert_eq!(doc.get(r).unwrap().attr("name"), Some("answer-group-4"));
        }
        assert!(doc.find_by_id(form, "quiz-4-answer-container-2").is_some());
    }

    #[test]
    fn only_the_correct_index_is_correct() {
        let def = quiz("none");
        for (index, expected) in [(0, true), (1, false), (2, false)] {
            let (mut doc, form, s) = rendered(&def, 1);
            click_answer(&mut doc, 1, index);
            let eval = s.evaluate(&mut doc, form, &ctx(&def, 1));
            assert_eq!(eval.correct, expected, "index {index}");
            assert_eq!(eval.selected, vec![index]);
        }
    }

    #[test]
    fn no_selection_is_incorrect() {
        let def = quiz("all");
        let (mut doc, form, s) = rendered(&def, 1);
        let eval = s.evaluate(&mut doc, form, &ctx(&def, 1));
        assert!(!eval.correct);
        assert!(eval.revealed.is_empty());
    }

    #[test]
    fn later_click_replaces_earlier_one() {
        let def = quiz("none");
        let (mut doc, form, s) = rendered(&def, 1);
        click_answer(&mut doc, 1, 1);
        click_answer(&mut doc, 1, 0);
        assert!(s.evaluate(&mut doc, form, &ctx(&def, 1)).correct);
    }

    #[test]
    fn selected_policy_reveals_the_chosen_description() {
        let def = quiz("selected");
        let (mut doc, form, s) = rendered(&def, 1);
        click_answer(&mut doc, 1, 1);
        let eval = s.evaluate(&mut doc, form, &ctx(&def, 1));
        assert_eq!(eval.revealed, vec![1]);
        let container = doc.find_by_id(form, "quiz-1-answer-container-1").unwrap();
        assert!(doc.text_content(container).contains("p is a paragraph."));
        let other = doc.find_by_id(form, "quiz-1-answer-container-0").unwrap();
        assert!(!doc.text_content(other).contains("h1 is the top heading."));
    }

    #[test]
    fn all_policy_skips_answers_without_description() {
        let def = quiz("all");
        let (mut doc, form, s) = rendered(&def, 1);
        click_answer(&mut doc, 1, 0);
        let eval = s.evaluate(&mut doc, form, &ctx(&def, 1));
        assert_eq!(eval.revealed, vec![0, 1]);
    }
}
