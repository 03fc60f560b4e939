//! One document hosting any number of independent quiz instances.
//!
//! The page owns the `Document` and the controllers. Reader interaction comes in as
//! `click` / `set_value` on element ids; clicks on check and retry controls are routed
//! to the instance that owns the control.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::controller::{ControlAction, Phase, QuizInstance, ACTION_ATTR, INSTANCE_ATTR};
use crate::domain::QuizDefinition;
use crate::dom::{Document, Element, NodeId};
use crate::i18n::UiStrings;
use crate::ids::InstanceId;
use crate::strategy::Evaluation;
use crate::styles::StyleHook;

/// Attribute carrying the quiz source of a container.
pub const SOURCE_ATTR: &str = "data-quiz-src";

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    Toggled { checked: bool },
    Checked { instance: InstanceId, evaluation: Evaluation },
    Retried { instance: InstanceId },
    Ignored { reason: IgnoreReason },
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    Disabled,
    Hidden,
    /// The element does nothing when clicked.
    Inert,
    /// The owning instance is not in a state that accepts this action.
    Rejected,
}

pub struct Page {
    doc: Document,
    lang: String,
    default_lang: String,
    container_class: String,
    styles: Arc<dyn StyleHook>,
    instances: BTreeMap<InstanceId, QuizInstance>,
}

impl Page {
    pub fn new(
        lang: &str,
        default_lang: &str,
        container_class: &str,
        styles: Arc<dyn StyleHook>,
    ) -> Self {
        Self {
            doc: Document::new(),
            lang: lang.to_string(),
            default_lang: default_lang.to_string(),
            container_class: container_class.to_string(),
            styles,
            instances: BTreeMap::new(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Append a quiz container (separated from the previous one by `<hr>`).
    pub fn add_container(&mut self, quiz_src: Option<&str>) -> NodeId {
        let root = self.doc.root();
        if !self.containers().is_empty() {
            self.doc.append(root, Element::new("hr"));
        }
        let mut el = Element::new("div").with_class(&self.container_class);
        if let Some(src) = quiz_src {
            el = el.with_attr(SOURCE_ATTR, src);
        }
        self.doc.append(root, el)
    }

    /// Every quiz container in document order.
    pub fn containers(&self) -> Vec<NodeId> {
        let class = self.container_class.as_str();
        self.doc.find_all(self.doc.root(), |e| e.has_class(class))
    }

    /// Non-empty `data-quiz-src` of a container.
    pub fn source_of(&self, container: NodeId) -> Option<String> {
        self.doc
            .get(container)
            .and_then(|e| e.attr(SOURCE_ATTR))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Replace a container's content with a visible error message.
    pub fn show_error(&mut self, container: NodeId, message: &str) {
        self.doc.clear(container);
        let mut p = Element::new("p").with_text(message);
        self.styles.error_message(&mut p);
        self.doc.append(container, p);
    }

    /// Create the controller for `container` and build it.
    pub fn mount(
        &mut self,
        container: NodeId,
        definition: Arc<QuizDefinition>,
        ui: Arc<UiStrings>,
        id: InstanceId,
    ) -> Phase {
        let mut instance = QuizInstance::new(
            container,
            definition,
            &self.lang,
            &self.default_lang,
            ui,
            id,
            self.styles.clone(),
        );
        let phase = instance.build(&mut self.doc);
        self.instances.insert(id, instance);
        phase
    }

    pub fn instance(&self, id: InstanceId) -> Option<&QuizInstance> {
        self.instances.get(&id)
    }

    pub fn instances(&self) -> impl Iterator<Item = &QuizInstance> {
        self.instances.values()
    }

    /// Check an instance directly, e.g. when its check control is hidden.
    pub fn check(&mut self, id: InstanceId) -> Option<Evaluation> {
        self.instances.get_mut(&id)?.check(&mut self.doc)
    }

    /// Simulate a pointer click on the element with `element_id`.
    pub fn click(&mut self, element_id: &str) -> ClickOutcome {
        let Some(node) = self.doc.find_by_id(self.doc.root(), element_id) else {
            return ClickOutcome::NotFound;
        };
        let Some(el) = self.doc.get(node) else {
            return ClickOutcome::NotFound;
        };
        if el.disabled {
            return ClickOutcome::Ignored { reason: IgnoreReason::Disabled };
        }
        if el.is_hidden() {
            return ClickOutcome::Ignored { reason: IgnoreReason::Hidden };
        }
        if matches!(el.input_type(), Some("radio") | Some("checkbox")) {
            self.doc.activate_choice(node);
            let checked = self.doc.get(node).is_some_and(|e| e.checked);
            debug!(target: "quiz", %element_id, checked, "Choice toggled");
            return ClickOutcome::Toggled { checked };
        }

        let action = el.attr(ACTION_ATTR).and_then(ControlAction::parse);
        let owner = el
            .attr(INSTANCE_ATTR)
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(InstanceId::new);
        let (Some(action), Some(id)) = (action, owner) else {
            return ClickOutcome::Ignored { reason: IgnoreReason::Inert };
        };
        let Some(instance) = self.instances.get_mut(&id) else {
            return ClickOutcome::Ignored { reason: IgnoreReason::Inert };
        };
        // A control only drives the instance whose container holds it.
        if !instance.owns(&self.doc, node) {
            return ClickOutcome::Ignored { reason: IgnoreReason::Inert };
        }

        let rejected = ClickOutcome::Ignored { reason: IgnoreReason::Rejected };
        match action {
            ControlAction::Check => match instance.check(&mut self.doc) {
                Some(evaluation) => ClickOutcome::Checked { instance: id, evaluation },
                None => rejected,
            },
            ControlAction::Retry => {
                if instance.retry(&mut self.doc) {
                    ClickOutcome::Retried { instance: id }
                } else {
                    rejected
                }
            }
        }
    }

    /// Type into a text input. Returns false if there is no enabled text input with
    /// that id.
    pub fn set_value(&mut self, element_id: &str, value: &str) -> bool {
        let Some(node) = self.doc.find_by_id(self.doc.root(), element_id) else {
            return false;
        };
        match self.doc.get_mut(node) {
            Some(el) if el.input_type() == Some("text") && !el.disabled => {
                el.value = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// HTML of the page body.
    pub fn to_html(&self) -> String {
        self.doc.to_html(self.doc.root())
    }

    /// HTML of a single node (e.g. one container).
    pub fn html_of(&self, node: NodeId) -> String {
        self.doc.to_html(node)
    }
}
