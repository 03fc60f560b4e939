//! Minimal in-memory element tree standing in for the page document.
//!
//! Nodes live in an arena and are addressed by `NodeId`. Removing a subtree frees its
//! slots and later appends reuse them, so a `NodeId` of a removed node resolves to
//! `None` until its slot is taken again. Do not hold ids across a `clear` of an
//! ancestor. Only the
//! slice of DOM behaviour the quiz engine needs is modelled:
//!   - element ids, classes, attributes and inline styles
//!   - `checked` / `disabled` / `value` control state
//!   - radio-group exclusivity inside the closest `<form>`
//!   - HTML serialization with escaping

use std::collections::BTreeMap;

/// Handle of a node inside one `Document`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const VOID_TAGS: &[&str] = &["input", "hr", "br"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Inline style declarations in insertion order.
    pub styles: Vec<(String, String)>,
    pub text: String,
    pub checked: bool,
    pub disabled: bool,
    pub value: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn id_is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// `type` attribute of an `<input>`, `None` for any other tag.
    pub fn input_type(&self) -> Option<&str> {
        if self.tag == "input" {
            Some(self.attr("type").unwrap_or("text"))
        } else {
            None
        }
    }

    /// Set (or overwrite) one inline style declaration.
    pub fn set_style(&mut self, property: &str, value: &str) {
        match self.styles.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.styles.push((property.to_string(), value.to_string())),
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_hidden(&self) -> bool {
        self.style("display") == Some("none")
    }
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    /// Vacated slots, reused by `append` before the arena grows.
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// New document with an empty `<body>` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Number of nodes currently attached to the arena (root included).
    pub fn live_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Slots held by the arena, live or vacant.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Append `element` as the last child of `parent`. Appending to a removed node
    /// still allocates the element but leaves it detached.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = match self.free.pop() {
            Some(slot) => NodeId(slot),
            None => {
                self.nodes.push(None);
                NodeId(self.nodes.len() - 1)
            }
        };
        element.children.clear();
        element.parent = None;
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
            element.parent = Some(parent);
        }
        self.nodes[id.0] = Some(element);
        id
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    /// Remove every descendant of `node` and clear its own text (`innerHTML = ''`).
    pub fn clear(&mut self, node: NodeId) {
        let doomed = self.descendants(node);
        for d in doomed {
            if let Some(slot) = self.nodes.get_mut(d.0) {
                if slot.take().is_some() {
                    self.free.push(d.0);
                }
            }
        }
        if let Some(e) = self.get_mut(node) {
            e.children.clear();
            e.text.clear();
        }
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Every node under `scope` (inclusive) matching `pred`, in document order.
    pub fn find_all<F>(&self, scope: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        std::iter::once(scope)
            .chain(self.descendants(scope))
            .filter(|n| self.get(*n).is_some_and(&pred))
            .collect()
    }

    /// Element with the given id inside `scope` (inclusive).
    pub fn find_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find_all(scope, |e| e.id_is(id)).into_iter().next()
    }

    /// Closest ancestor-or-self matching `pred`.
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        let mut cur = Some(node);
        while let Some(n) = cur {
            let el = self.get(n)?;
            if pred(el) {
                return Some(n);
            }
            cur = el.parent;
        }
        None
    }

    /// True if `node` sits inside the subtree rooted at `scope` (inclusive).
    pub fn contains(&self, scope: NodeId, node: NodeId) -> bool {
        let mut cur = self.get(node).map(|_| node);
        while let Some(n) = cur {
            if n == scope {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .filter_map(|n| self.get(n))
            .map(|e| e.text.as_str())
            .collect()
    }

    /// Activate a radio or checkbox the way a pointer click would.
    ///
    /// Radios become checked and every other radio sharing their `name` inside the
    /// closest `<form>` (or the whole document) is unchecked. Checkboxes toggle.
    /// Returns false if `node` is not a choice input.
    pub fn activate_choice(&mut self, node: NodeId) -> bool {
        let Some(el) = self.get(node) else {
            return false;
        };
        let kind = el.input_type().map(str::to_string);
        let name = el.attr("name").map(str::to_string);
        match kind.as_deref() {
            Some("checkbox") => {
                if let Some(el) = self.get_mut(node) {
                    el.checked = !el.checked;
                }
                true
            }
            Some("radio") => {
                let scope = self
                    .closest(node, |e| e.tag == "form")
                    .unwrap_or(self.root);
                if let Some(name) = name {
                    let peers = self.find_all(scope, |e| {
                        e.input_type() == Some("radio") && e.attr("name") == Some(name.as_str())
                    });
                    for p in peers {
                        if let Some(peer) = self.get_mut(p) {
                            peer.checked = false;
                        }
                    }
                }
                if let Some(el) = self.get_mut(node) {
                    el.checked = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Serialize `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = &el.id {
            push_attr(out, "id", id);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        for (k, v) in &el.attrs {
            push_attr(out, k, v);
        }
        if !el.value.is_empty() {
            push_attr(out, "value", &el.value);
        }
        if !el.styles.is_empty() {
            let style: Vec<String> = el.styles.iter().map(|(p, v)| format!("{p}: {v};")).collect();
            push_attr(out, "style", &style.join(" "));
        }
        if el.checked {
            out.push_str(" checked");
        }
        if el.disabled {
            out.push_str(" disabled");
        }
        out.push('>');
        if VOID_TAGS.contains(&el.tag.as_str()) {
            return;
        }
        out.push_str(&escape_html(&el.text));
        for child in &el.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
