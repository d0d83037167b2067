// src/formatting/markup.rs
//! A small HTML tree that renderers build and the page composer serializes.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// One node of rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
    /// A sequence of nodes with no wrapping element.
    Fragment(Vec<MarkupNode>),
}

impl Default for MarkupNode {
    fn default() -> Self {
        MarkupNode::Fragment(Vec::new())
    }
}

impl MarkupNode {
    pub fn element(tag: &'static str) -> Self {
        MarkupNode::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    pub fn empty() -> Self {
        MarkupNode::default()
    }

    /// Adds an attribute. No effect on text or fragment nodes.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let MarkupNode::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    /// Adds a boolean attribute, rendered as `name=""`, when `on` is true.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Appends a child. Appending to a text node turns it into a fragment.
    pub fn child(self, node: MarkupNode) -> Self {
        match self {
            MarkupNode::Element {
                tag,
                attrs,
                mut children,
            } => {
                children.push(node);
                MarkupNode::Element {
                    tag,
                    attrs,
                    children,
                }
            }
            MarkupNode::Fragment(mut children) => {
                children.push(node);
                MarkupNode::Fragment(children)
            }
            text @ MarkupNode::Text(_) => MarkupNode::Fragment(vec![text, node]),
        }
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = MarkupNode>) -> Self {
        for node in nodes {
            self = self.child(node);
        }
        self
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Direct children of an element or fragment.
    pub fn child_nodes(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } | MarkupNode::Fragment(children) => children,
            MarkupNode::Text(_) => &[],
        }
    }

    /// Whether this node renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            MarkupNode::Element { .. } => false,
            MarkupNode::Text(text) => text.is_empty(),
            MarkupNode::Fragment(children) => children.iter().all(MarkupNode::is_empty),
        }
    }

    /// Depth-first search for every element with `tag`.
    pub fn find_all(&self, tag: &str) -> Vec<&MarkupNode> {
        let mut found = Vec::new();
        self.collect_tag(tag, &mut found);
        found
    }

    fn collect_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a MarkupNode>) {
        if self.tag() == Some(tag) {
            found.push(self);
        }
        for child in self.child_nodes() {
            child.collect_tag(tag, found);
        }
    }

    /// Concatenated text content, ignoring markup.
    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Text(text) => text.clone(),
            MarkupNode::Element { children, .. } | MarkupNode::Fragment(children) => {
                children.iter().map(MarkupNode::text_content).collect()
            }
        }
    }

    /// Serializes to HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(&encode_text(text)),
            MarkupNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            MarkupNode::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(tag) {
                    return;
                }

                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node = MarkupNode::element("a")
            .attr("href", "https://x.test/?a=1&b=\"2\"")
            .child(MarkupNode::text("<script>"));
        assert_eq!(
            node.to_html(),
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;</a>"
        );
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let node = MarkupNode::element("img").attr("src", "a.png");
        assert_eq!(node.to_html(), "<img src=\"a.png\">");
    }

    #[test]
    fn test_fragment_and_flag() {
        let node = MarkupNode::Fragment(vec![
            MarkupNode::element("details").flag("open", true),
            MarkupNode::element("details").flag("open", false),
        ]);
        assert_eq!(
            node.to_html(),
            "<details open=\"\"></details><details></details>"
        );
        assert!(MarkupNode::empty().is_empty());
    }

    #[test]
    fn test_find_all_and_text_content() {
        let node = MarkupNode::element("div")
            .child(MarkupNode::element("p").child(MarkupNode::text("a")))
            .child(MarkupNode::element("p").child(MarkupNode::text("b")));
        assert_eq!(node.find_all("p").len(), 2);
        assert_eq!(node.text_content(), "ab");
    }
}
