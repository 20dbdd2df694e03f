//! Minimal mutable XML tree for rewriting simulation inputs.
//!
//! roxmltree handles parsing; the documents this pipeline rewrites (trip
//! sets, network descriptors, configuration templates) are element/attribute
//! shaped, so a small owned tree is enough to mutate and re-serialize them.
//! Serialization is a pure function of the tree: the same tree always yields
//! the same bytes, which the rewrite idempotence guarantees rely on.

use std::fmt::Write as _;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("invalid xml: {0}")]
    Parse(#[from] roxmltree::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an attribute in place, or append it if absent. Existing
    /// attributes keep their position, so repeated rewrites are byte-stable.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn insert_first(&mut self, child: Element) {
        self.children.insert(0, Node::Element(child));
    }

    /// Apply `f` to every descendant element with the given tag, returning
    /// the number of elements visited.
    pub fn visit_tag_mut(&mut self, tag: &str, f: &mut dyn FnMut(&mut Element)) -> usize {
        let mut hits = 0;
        for child in self.elements_mut() {
            if child.tag == tag {
                f(child);
                hits += 1;
            }
            hits += child.visit_tag_mut(tag, f);
        }
        hits
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self {
            root: convert(doc.root_element()),
        })
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_element(&mut out, &self.root, 0);
        out
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el.attrs.push((attr.name().to_string(), attr.value().to_string()));
    }
    for child in node.children() {
        if child.is_element() {
            el.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                el.children.push(Node::Text(text.trim().to_string()));
            }
        }
    }
    el
}

fn write_element(out: &mut String, el: &Element, depth: usize) {
    indent(out, depth);
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    if el.children.is_empty() {
        out.push_str("/>\n");
        return;
    }
    if let [Node::Text(text)] = el.children.as_slice() {
        let _ = writeln!(out, ">{}</{}>", escape_text(text), el.tag);
        return;
    }
    out.push_str(">\n");
    for child in &el.children {
        match child {
            Node::Element(child) => write_element(out, child, depth + 1),
            Node::Text(text) => {
                indent(out, depth + 1);
                out.push_str(&escape_text(text));
                out.push('\n');
            }
        }
    }
    indent(out, depth);
    let _ = writeln!(out, "</{}>", el.tag);
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
