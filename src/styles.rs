//! Presentation hook called after the engine creates result, retry, explanation and
//! error elements. It only touches inline styles and holds no quiz state.

use crate::config::StyleConfig;
use crate::dom::Element;

pub trait StyleHook: Send + Sync {
    fn results_region(&self, _el: &mut Element) {}
    fn verdict(&self, _el: &mut Element, _correct: bool) {}
    fn retry_control(&self, _el: &mut Element) {}
    fn explanation(&self, _el: &mut Element, _correct: bool) {}
    fn answer_container(&self, _el: &mut Element) {}
    fn error_message(&self, _el: &mut Element) {}
}

/// Hook that leaves every element unstyled.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unstyled;

impl StyleHook for Unstyled {}

/// Applies the configured colors and spacing as inline styles.
#[derive(Clone, Debug, Default)]
pub struct ThemeStyles {
    pub theme: StyleConfig,
}

impl ThemeStyles {
    pub fn new(theme: StyleConfig) -> Self {
        Self { theme }
    }

    fn color(&self, correct: bool) -> &str {
        if correct {
            &self.theme.correct_color
        } else {
            &self.theme.incorrect_color
        }
    }
}

impl StyleHook for ThemeStyles {
    fn results_region(&self, el: &mut Element) {
        el.set_style("display", &self.theme.message_display);
        el.set_style("align-items", &self.theme.message_align_items);
        el.set_style("margin-top", &self.theme.message_margin_top);
    }

    fn verdict(&self, el: &mut Element, correct: bool) {
        el.set_style("color", self.color(correct));
        el.set_style("margin", &self.theme.result_margin);
    }

    fn retry_control(&self, el: &mut Element) {
        el.set_style("margin-left", &self.theme.try_again_margin);
    }

    fn explanation(&self, el: &mut Element, correct: bool) {
        el.set_style("margin-top", &self.theme.explanation_margin_top);
        el.set_style("font-style", "italic");
        el.set_style("color", self.color(correct));
    }

    fn answer_container(&self, el: &mut Element) {
        el.set_style("margin-bottom", &self.theme.answer_margin_bottom);
    }

    fn error_message(&self, el: &mut Element) {
        el.set_style("color", &self.theme.error_color);
    }
}
