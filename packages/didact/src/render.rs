use crate::{Children, Document, DocumentError, Element, NodeId};
use log::debug;

/// Materializes an element description into `document` as a new child of `container`,
/// synchronously, and returns the created node.
///
/// For each described node this creates an element of the description's type, copies every prop
/// attribute onto it, and gives it its content: a string child becomes a text node, nested
/// descriptions are materialized in order. The finished node is appended after the container's
/// existing children. Rendering only ever creates and appends; nothing is diffed, replaced, or
/// removed, so rendering twice into the same container yields two siblings.
///
/// Failures from the document, such as a description whose type is not a creatable node kind or a
/// container that belongs to a different document, propagate unchanged.
///
/// ```
/// use didact::prelude::*;
///
/// let mut document = Document::new();
/// let container = document.create_element("div")?;
/// document.append_child(document.root(), container)?;
///
/// let element = Element::new("h1", Props::new().attr("title", "foo").text("hello"));
/// let node = render(&element, &mut document, container)?;
///
/// assert_eq!(document.tag_name(node), Some("h1"));
/// assert_eq!(document.parent(node), Some(container));
/// # Ok::<(), DocumentError>(())
/// ```
pub fn render(
    element: &Element,
    document: &mut Document,
    container: NodeId,
) -> Result<NodeId, DocumentError> {
    debug!("rendering <{}> into {container}", element.element_type);
    let node = create_node(element, document)?;
    document.append_child(container, node)?;
    Ok(node)
}

// Builds the subtree for one description, leaving it detached for the caller to append.
fn create_node(element: &Element, document: &mut Document) -> Result<NodeId, DocumentError> {
    let node = document.create_element(&element.element_type)?;
    for (name, value) in &element.props.attributes {
        document.set_attribute(node, name, value)?;
    }
    match &element.props.children {
        Children::None => {}
        Children::Text(content) => {
            let text = document.create_text_node("");
            document.set_node_value(text, content)?;
            document.append_child(node, text)?;
        }
        Children::Elements(children) => {
            for child in children {
                let child_node = create_node(child, document)?;
                document.append_child(node, child_node)?;
            }
        }
    }
    Ok(node)
}
