use derive_more::Display;
use log::trace;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

/// An opaque handle to a node owned by a [`Document`].
///
/// Handles never dangle: nodes are not removable, so a `NodeId` stays valid for the lifetime of
/// the document that created it. Passing it to a *different* document is detected and reported as
/// [`DocumentError::UnknownNode`].
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[display("#{_0}")]
pub struct NodeId(usize);

/// An error raised by a [`Document`] operation.
///
/// There is no recovery path: callers propagate these with `?`. A failed operation leaves the
/// document unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The tag name passed to [`Document::create_element`] is not a creatable node kind.
    #[error("invalid tag name {0:?}")]
    InvalidTagName(String),
    /// The node handle belongs to a different document.
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),
    /// The operation requires an element node, but the handle refers to a text node.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    /// The operation requires a text node, but the handle refers to an element.
    #[error("node {0} is not a text node")]
    NotAText(NodeId),
    /// The child passed to [`Document::append_child`] already has a parent.
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),
    /// Attaching the child would make a node its own ancestor.
    #[error("appending {child} to {parent} would create a cycle")]
    WouldCycle {
        /// The intended parent.
        parent: NodeId,
        /// The child whose subtree contains the intended parent.
        child: NodeId,
    },
}

#[derive(Debug)]
enum NodeData {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },
    Text {
        value: String,
    },
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory tree of element and text nodes, playing the role a host page's document plays for
/// a browser renderer.
///
/// A new document contains a single `body` element, available via [`Document::root`]. Nodes are
/// created detached and become part of the tree once appended. The lifecycle is
/// create-configure-append only; nodes are never updated structurally or removed.
///
/// The [`Display`](fmt::Display) implementation serializes the tree as indented markup with
/// alphabetically ordered attributes, which is how demos and tests observe mutations:
///
/// ```
/// use didact::Document;
///
/// let mut document = Document::new();
/// let div = document.create_element("div")?;
/// document.set_attribute(div, "id", "root")?;
/// document.append_child(document.root(), div)?;
///
/// assert_eq!(document.to_string(), "<body>\n  <div id=\"root\" />\n</body>\n");
/// # Ok::<(), didact::DocumentError>(())
/// ```
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Creates an empty document containing only the `body` root element.
    pub fn new() -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        document.root = document.insert(NodeData::Element {
            tag: "body".to_string(),
            attributes: BTreeMap::new(),
        });
        document
    }

    /// Returns the root element of the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn insert(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes.get(id.0).ok_or(DocumentError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownNode(id))
    }

    /// Creates a new detached element node with the given tag name.
    ///
    /// The tag must start with an ASCII letter and contain only ASCII letters, digits, and
    /// dashes; anything else is not a creatable node kind.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DocumentError> {
        if !is_valid_tag_name(tag) {
            return Err(DocumentError::InvalidTagName(tag.to_string()));
        }
        let id = self.insert(NodeData::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
        });
        trace!("created element {id} <{tag}>");
        Ok(id)
    }

    /// Creates a new detached text node with the given value.
    pub fn create_text_node(&mut self, value: &str) -> NodeId {
        let id = self.insert(NodeData::Text {
            value: value.to_string(),
        });
        trace!("created text node {id}");
        id
    }

    /// Assigns an attribute on an element node, replacing any existing value.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        match &mut self.node_mut(node)?.data {
            NodeData::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            NodeData::Text { .. } => Err(DocumentError::NotAnElement(node)),
        }
    }

    /// Returns the value of an element's attribute, if set.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text { .. } => None,
        }
    }

    /// Overwrites the value of a text node.
    pub fn set_node_value(&mut self, node: NodeId, value: &str) -> Result<(), DocumentError> {
        match &mut self.node_mut(node)?.data {
            NodeData::Text { value: current } => {
                *current = value.to_string();
                Ok(())
            }
            NodeData::Element { .. } => Err(DocumentError::NotAText(node)),
        }
    }

    /// Returns the value of a text node.
    pub fn node_value(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Text { value } => Some(value),
            NodeData::Element { .. } => None,
        }
    }

    /// Appends a detached node as the last child of an element node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        if !matches!(self.node(parent)?.data, NodeData::Element { .. }) {
            return Err(DocumentError::NotAnElement(parent));
        }
        if self.node(child)?.parent.is_some() {
            return Err(DocumentError::AlreadyAttached(child));
        }
        // Walk up from the parent; reaching the child means the attachment would close a loop.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DocumentError::WouldCycle { parent, child });
            }
            cursor = self.node(id)?.parent;
        }
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        trace!("appended {child} to {parent}");
        Ok(())
    }

    /// Returns the first element in depth-first document order whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node_id) = stack.pop() {
            let node = self.nodes.get(node_id.0)?;
            if let NodeData::Element { attributes, .. } = &node.data {
                if attributes.get("id").is_some_and(|value| value == id) {
                    return Some(node_id);
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Returns the tag name of an element node.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }

    /// Returns a node's children, in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the number of children of a node.
    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Returns a node's parent, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    /// Returns whether the handle refers to an element node.
    pub fn is_element(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|node| matches!(node.data, NodeData::Element { .. }))
    }

    /// Returns whether the handle refers to a text node.
    pub fn is_text(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|node| matches!(node.data, NodeData::Text { .. }))
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.nodes.get(id.0) else {
            return Ok(());
        };
        let indent = "  ".repeat(depth);
        match &node.data {
            NodeData::Text { value } => writeln!(f, "{indent}{}", escape(value)),
            NodeData::Element { tag, attributes } => {
                write!(f, "{indent}<{tag}")?;
                for (name, value) in attributes {
                    write!(f, " {name}=\"{}\"", escape(value))?;
                }
                if node.children.is_empty() {
                    writeln!(f, " />")
                } else {
                    writeln!(f, ">")?;
                    for &child in &node.children {
                        self.fmt_node(f, child, depth + 1)?;
                    }
                    writeln!(f, "{indent}</{tag}>")
                }
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use indoc::indoc;

    #[test]
    fn test_new_document() {
        let document = Document::new();
        assert_eq!(document.tag_name(document.root()), Some("body"));
        assert_eq!(document.child_count(document.root()), 0);
        assert_eq!(document.parent(document.root()), None);
    }

    #[test]
    fn test_create_element() {
        let mut document = Document::new();
        let div = document.create_element("div").unwrap();
        assert!(document.is_element(div));
        assert_eq!(document.tag_name(div), Some("div"));
        assert_eq!(document.parent(div), None);

        for tag in ["", "1up", "with space", "<div>", "naïve"] {
            assert_eq!(
                document.create_element(tag),
                Err(DocumentError::InvalidTagName(tag.to_string()))
            );
        }
    }

    #[test]
    fn test_attributes() {
        let mut document = Document::new();
        let h1 = document.create_element("h1").unwrap();
        assert_eq!(document.attribute(h1, "title"), None);

        document.set_attribute(h1, "title", "foo").unwrap();
        assert_eq!(document.attribute(h1, "title"), Some("foo"));

        document.set_attribute(h1, "title", "bar").unwrap();
        assert_eq!(document.attribute(h1, "title"), Some("bar"));

        let text = document.create_text_node("hello");
        assert_eq!(
            document.set_attribute(text, "title", "foo"),
            Err(DocumentError::NotAnElement(text))
        );
    }

    #[test]
    fn test_text_nodes() {
        let mut document = Document::new();
        let text = document.create_text_node("");
        assert!(document.is_text(text));
        assert_eq!(document.node_value(text), Some(""));

        document.set_node_value(text, "hello").unwrap();
        assert_eq!(document.node_value(text), Some("hello"));

        let h1 = document.create_element("h1").unwrap();
        assert_eq!(
            document.set_node_value(h1, "hello"),
            Err(DocumentError::NotAText(h1))
        );
        assert_eq!(document.node_value(h1), None);
    }

    #[test]
    fn test_append_child() {
        let mut document = Document::new();
        let div = document.create_element("div").unwrap();
        let text = document.create_text_node("hello");

        document.append_child(document.root(), div).unwrap();
        document.append_child(div, text).unwrap();
        assert_eq!(document.children(document.root()), &[div]);
        assert_eq!(document.children(div), &[text]);
        assert_eq!(document.parent(text), Some(div));

        // A node has at most one parent.
        assert_eq!(
            document.append_child(document.root(), text),
            Err(DocumentError::AlreadyAttached(text))
        );

        // Text nodes can't receive children.
        let orphan = document.create_element("span").unwrap();
        assert_eq!(
            document.append_child(text, orphan),
            Err(DocumentError::NotAnElement(text))
        );

        // The tree stays acyclic.
        let root = document.root();
        assert_eq!(
            document.append_child(root, root),
            Err(DocumentError::WouldCycle {
                parent: root,
                child: root
            })
        );
        assert_eq!(
            document.append_child(div, root),
            Err(DocumentError::WouldCycle {
                parent: div,
                child: root
            })
        );
    }

    #[test]
    fn test_append_order() {
        let mut document = Document::new();
        let first = document.create_element("p").unwrap();
        let second = document.create_element("p").unwrap();
        document.append_child(document.root(), first).unwrap();
        document.append_child(document.root(), second).unwrap();
        assert_eq!(document.children(document.root()), &[first, second]);
    }

    #[test]
    fn test_foreign_node() {
        let mut document = Document::new();
        let mut other = Document::new();
        for _ in 0..4 {
            other.create_element("div").unwrap();
        }
        let foreign = other.create_element("div").unwrap();

        assert!(matches!(
            document.set_attribute(foreign, "id", "root"),
            Err(DocumentError::UnknownNode(_))
        ));
        let root = document.root();
        assert!(matches!(
            document.append_child(root, foreign),
            Err(DocumentError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut document = Document::new();
        assert_eq!(document.get_element_by_id("root"), None);

        let div = document.create_element("div").unwrap();
        document.set_attribute(div, "id", "root").unwrap();
        // Not attached yet, so not part of the document tree.
        assert_eq!(document.get_element_by_id("root"), None);

        document.append_child(document.root(), div).unwrap();
        assert_eq!(document.get_element_by_id("root"), Some(div));

        // Document order wins when ids collide.
        let nested = document.create_element("span").unwrap();
        document.set_attribute(nested, "id", "dup").unwrap();
        document.append_child(div, nested).unwrap();
        let later = document.create_element("span").unwrap();
        document.set_attribute(later, "id", "dup").unwrap();
        document.append_child(document.root(), later).unwrap();
        assert_eq!(document.get_element_by_id("dup"), Some(nested));
    }

    #[test]
    fn test_display() {
        let mut document = Document::new();
        let div = document.create_element("div").unwrap();
        document.set_attribute(div, "id", "root").unwrap();
        document.set_attribute(div, "class", "outer").unwrap();
        document.append_child(document.root(), div).unwrap();
        let h1 = document.create_element("h1").unwrap();
        document.append_child(div, h1).unwrap();
        let text = document.create_text_node("tom & \"jerry\" <3");
        document.append_child(h1, text).unwrap();
        let hr = document.create_element("hr").unwrap();
        document.append_child(div, hr).unwrap();

        assert_eq!(
            document.to_string(),
            indoc! {r#"
                <body>
                  <div class="outer" id="root">
                    <h1>
                      tom &amp; &quot;jerry&quot; &lt;3
                    </h1>
                    <hr />
                  </div>
                </body>
            "#}
        );
    }
}
