//! Structured view tree.
//!
//! Renderers build [`Node`] trees instead of strings. Turning a tree into markup
//! happens in exactly one place, [`Node::to_html`], and every piece of text and
//! every attribute value goes through askama's HTML escaper there.

use std::fmt::Write;

use askama::Html as HtmlEscaper;
use askama::MarkupDisplay;

pub mod page;
pub mod recommendations;

pub use recommendations::{render_error, render_recommendations, NO_RESULTS_MESSAGE};

/// Markup that is already escaped and can be embedded into a template as-is
pub type SafeMarkup = MarkupDisplay<HtmlEscaper, String>;

/// Elements written without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "img", "input", "meta"];

/// A node of the view tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a child only when one is given
    pub fn maybe_child(mut self, child: Option<impl Into<Node>>) -> Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Serializes the tree to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => write_escaped(out, text),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    write_escaped(out, value);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// Renders a sequence of sibling nodes
pub fn fragment_to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

/// Renders a sequence of sibling nodes as markup safe to embed in a template
pub fn fragment_to_markup(nodes: &[Node]) -> SafeMarkup {
    MarkupDisplay::new_safe(fragment_to_html(nodes), HtmlEscaper)
}

fn write_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail
    let _ = write!(out, "{}", MarkupDisplay::new_unsafe(text, HtmlEscaper));
}

#[cfg(test)]
impl Element {
    /// Looks up an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
impl Node {
    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for elements carrying `class`
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            let matches = element
                .get_attr("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class));
            if matches {
                found.push(element);
            }
            for child in &element.children {
                child.collect_by_class(class, found);
            }
        }
    }
}
