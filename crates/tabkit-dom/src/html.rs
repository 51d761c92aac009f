//! HTML loading (via `scraper`) and serialization

use scraper::{ElementRef, Html, Node};

use crate::document::Document;
use crate::node::{NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content html5ever hands over unparsed
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Element whose children still have to be imported
type Pending<'a> = Vec<(NodeId, ElementRef<'a>)>;

enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

impl Document {
    /// Parse a full HTML document. The doctype, if any, and the `<html>`
    /// element become children of the document root.
    pub fn parse_html(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Document::new();
        let root = doc.root();
        let mut pending = Vec::new();
        for child in parsed.tree.root().children() {
            doc.import_node(root, child.value(), ElementRef::wrap(child), &mut pending);
        }
        doc.import_pending(pending);
        tracing::debug!(nodes = doc.len(), "Parsed HTML document");
        doc
    }

    /// Parse an HTML fragment. Top-level nodes of the fragment become
    /// children of the document root, without an `<html>` wrapper.
    pub fn parse_fragment(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let mut doc = Document::new();
        let root = doc.root();
        doc.import_pending(vec![(root, parsed.root_element())]);
        tracing::debug!(nodes = doc.len(), "Parsed HTML fragment");
        doc
    }

    /// Import the children of every pending element, depth first, without
    /// recursing so nesting depth is bounded only by memory
    fn import_pending<'a>(&mut self, mut pending: Pending<'a>) {
        while let Some((parent, source)) = pending.pop() {
            for child in source.children() {
                self.import_node(parent, child.value(), ElementRef::wrap(child), &mut pending);
            }
        }
    }

    fn import_node<'a>(
        &mut self,
        parent: NodeId,
        node: &Node,
        element: Option<ElementRef<'a>>,
        pending: &mut Pending<'a>,
    ) {
        let id = match (node, element) {
            (_, Some(source)) => {
                let id = self.create_element(source.value().name());
                if let Ok(el) = self.element_mut(id) {
                    for (name, value) in source.value().attrs() {
                        el.set_attr(name, value);
                    }
                }
                pending.push((id, source));
                id
            }
            (Node::Text(text), None) => self.create_text(&**text),
            (Node::Comment(comment), None) => self.create_comment(&**comment),
            (Node::Doctype(doctype), None) => self.create_doctype(doctype.name()),
            _ => return,
        };
        self.attach(parent, id);
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root(), &mut out);
        out
    }

    /// Serialize a node including its own tag
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Open(id) => id,
                Step::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                    continue;
                }
            };

            match self.kind(id) {
                Ok(NodeKind::Document) => {
                    stack.extend(self.children(id).iter().rev().map(|&c| Step::Open(c)));
                }
                Ok(NodeKind::Doctype(name)) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(name);
                    out.push('>');
                }
                Ok(NodeKind::Element(el)) => {
                    out.push('<');
                    out.push_str(el.tag());
                    for (name, value) in el.attributes() {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        escape_into(value, true, out);
                        out.push('"');
                    }
                    out.push('>');

                    if VOID_ELEMENTS.contains(&el.tag()) {
                        continue;
                    }

                    stack.push(Step::Close(el.tag()));
                    if RAW_TEXT_ELEMENTS.contains(&el.tag()) {
                        for &child in self.children(id) {
                            if let Ok(NodeKind::Text(text)) = self.kind(child) {
                                out.push_str(text);
                            }
                        }
                    } else {
                        stack.extend(self.children(id).iter().rev().map(|&c| Step::Open(c)));
                    }
                }
                Ok(NodeKind::Text(text)) => escape_into(text, false, out),
                Ok(NodeKind::Comment(text)) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                Err(_) => {}
            }
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
