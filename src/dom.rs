//! Markup tree construction and the handful of queries the extractor needs.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed document. html5ever applies the HTML5 error-recovery rules, so unclosed or misnested
/// tags produce a best-effort tree rather than an error.
pub struct Document {
    dom: RcDom,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    pub fn root(&self) -> &Handle {
        &self.dom.document
    }
}

/// Lower-cased local name for element nodes, `None` for text, comments and the like.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Every descendant element named `tag`, in document order. `node` itself is not included.
pub fn find_all(node: &Handle, tag: &str) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();
    while let Some(n) = stack.pop() {
        if tag_name(&n).as_deref() == Some(tag) {
            out.push(n.clone());
        }
        stack.extend(n.children.borrow().iter().rev().cloned());
    }
    out
}

/// All text under `node` with one space between adjacent text nodes.
///
/// Comments and the bodies of `script`/`style` are skipped. The result is raw; callers run it
/// through [`crate::normalize::normalize_text`].
pub fn text_joined(node: &Handle) -> String {
    let mut parts = Vec::new();
    let mut stack = vec![node.clone()];
    while let Some(n) = stack.pop() {
        match &n.data {
            NodeData::Text { contents } => parts.push(contents.borrow().to_string()),
            NodeData::Element { .. } => {
                if matches!(tag_name(&n).as_deref(), Some("script" | "style")) {
                    continue;
                }
                stack.extend(n.children.borrow().iter().rev().cloned());
            }
            NodeData::Document => stack.extend(n.children.borrow().iter().rev().cloned()),
            _ => {}
        }
    }
    parts.join(" ")
}
