//! Arena document
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Nodes are
//! never removed, so ids stay valid for the lifetime of the document.

use std::collections::HashSet;

use crate::error::DomError;
use crate::node::{Element, NodeId, NodeKind};
use crate::Result;

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    /// Element holding keyboard focus
    focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Doctype(name.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Attach a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_kind = &self.data(parent)?.kind;
        if !matches!(parent_kind, NodeKind::Document | NodeKind::Element(_)) {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "parent cannot have children",
            });
        }
        if child == self.root() {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "the document root cannot be a child",
            });
        }
        if self.data(child)?.parent.is_some() {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "child is already attached",
            });
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "child is an ancestor of parent",
            });
        }

        self.attach(parent, child);
        Ok(())
    }

    /// Link a node the caller just created under `parent`, skipping the
    /// checks of [`Document::append_child`]
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create an element and append it to `parent` in one step
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId> {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attr(id, name, *value)?;
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn data(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.data(id)?.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// `root` and all nodes below it, in document (pre-)order
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id.0 >= self.nodes.len() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn element(&self, id: NodeId) -> Result<&Element> {
        match self.kind(id)? {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(el)) => Ok(el),
            Some(_) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::NodeNotFound(id)),
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_ok()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        if !is_valid_attribute_name(name) {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).map(|el| el.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.element_mut(id)?.add_class(class))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.element_mut(id)?.remove_class(class))
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.element(id).ok().and_then(|el| el.style_property(property))
    }

    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.set_style_property(property, value);
        Ok(())
    }

    /// Elements under `root` (inclusive) carrying `class`
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// Elements under `root` (inclusive) whose `role` attribute equals `role`
    pub fn query_role(&self, root: NodeId, role: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.attr(id, "role") == Some(role))
            .collect()
    }

    /// Elements carrying `class` under any of `roots`, in root order.
    /// Elements reachable from several overlapping roots appear once.
    pub fn query_class_all(&self, roots: &[NodeId], class: &str) -> Vec<NodeId> {
        dedup(roots.iter().flat_map(|&root| self.query_class(root, class)))
    }

    /// Like [`Document::query_class_all`], matching on `role`
    pub fn query_role_all(&self, roots: &[NodeId], role: &str) -> Vec<NodeId> {
        dedup(roots.iter().flat_map(|&root| self.query_role(root, role)))
    }

    /// First element in document order with the given id
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.element(id).ok().and_then(Element::id) == Some(element_id))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move keyboard focus to an element. Does not dispatch focus events.
    pub fn focus(&mut self, id: NodeId) -> Result<()> {
        self.element(id)?;
        if self.focused != Some(id) {
            tracing::trace!(node = %id, "Focus moved");
        }
        self.focused = Some(id);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| match self.kind(n) {
                Ok(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Short human readable label for error messages, e.g. `button#tab-1`
    pub fn describe(&self, id: NodeId) -> String {
        match self.kind(id) {
            Ok(NodeKind::Element(el)) => match el.id() {
                Some(element_id) => format!("{}#{}", el.tag(), element_id),
                None => format!("{}({})", el.tag(), id),
            },
            Ok(NodeKind::Document) => "#document".to_string(),
            Ok(NodeKind::Text(_)) => format!("#text({})", id),
            Ok(NodeKind::Comment(_)) => format!("#comment({})", id),
            Ok(NodeKind::Doctype(name)) => format!("<!DOCTYPE {}>", name),
            Err(_) => id.to_string(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup(ids: impl Iterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc
            .append_element(root, "div", &[("role", "tablist"), ("class", "tablist-hidden")])
            .unwrap();
        let a = doc
            .append_element(list, "button", &[("role", "tab"), ("id", "a")])
            .unwrap();
        let b = doc
            .append_element(list, "button", &[("role", "tab"), ("id", "b")])
            .unwrap();
        (doc, list, a, b)
    }

    #[test]
    fn test_tree_queries() {
        let (doc, list, a, b) = sample();
        assert_eq!(doc.children(list), &[a, b]);
        assert_eq!(doc.parent(a), Some(list));
        assert_eq!(doc.query_role(doc.root(), "tab"), vec![a, b]);
        assert_eq!(doc.query_class(doc.root(), "tablist-hidden"), vec![list]);
        assert_eq!(doc.get_element_by_id("b"), Some(b));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.ancestors(a).collect::<Vec<_>>(), vec![list, doc.root()]);
        assert_eq!(doc.describe(a), "button#a");
    }

    #[test]
    fn test_overlapping_roots_deduplicated() {
        let (doc, list, a, b) = sample();
        assert_eq!(doc.query_role_all(&[list, doc.root(), a], "tab"), vec![a, b]);
        assert_eq!(
            doc.query_class_all(&[doc.root(), list], "tablist-hidden"),
            vec![list]
        );
    }

    #[test]
    fn test_append_rejects_cycles_and_reattach() {
        let (mut doc, list, a, _) = sample();
        assert!(doc.append_child(a, list).is_err());

        let c = doc.create_element("span");
        doc.append_child(a, c).unwrap();
        assert!(doc.append_child(list, c).is_err());

        let text = doc.create_text("hi");
        doc.append_child(c, text).unwrap();
        let orphan = doc.create_element("i");
        assert!(doc.append_child(text, orphan).is_err());
        assert_eq!(doc.text_content(a), "hi");
    }

    #[test]
    fn test_focus_requires_element() {
        let (mut doc, _, a, _) = sample();
        let text = doc.create_text("x");
        assert!(doc.focus(text).is_err());
        doc.focus(a).unwrap();
        assert_eq!(doc.focused(), Some(a));
        doc.blur();
        assert!(doc.focused().is_none());
    }

    #[test]
    fn test_invalid_attribute_name() {
        let (mut doc, _, a, _) = sample();
        assert!(matches!(
            doc.set_attr(a, "bad name", "x"),
            Err(DomError::InvalidAttributeName(_))
        ));
    }
}
