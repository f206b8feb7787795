// Materializes a single element description by hand, one document call at a time, the way you
// would before reaching for `didact::render`.

use anyhow::{Context, Result};
use didact::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    // The host page: a document whose body holds an empty container.
    let mut document = Document::new();
    let div = document.create_element("div")?;
    document.set_attribute(div, "id", "root")?;
    document.append_child(document.root(), div)?;

    // A heading with a title attribute and plain text content.
    let element = Element::new("h1", Props::new().attr("title", "foo").text("hello"));

    let container = document
        .get_element_by_id("root")
        .context("no #root container in the document")?;

    let node = document.create_element(&element.element_type)?;
    if let Some(title) = element.props.attributes.get("title") {
        document.set_attribute(node, "title", title)?;
    }

    let text = document.create_text_node("");
    if let Children::Text(content) = &element.props.children {
        document.set_node_value(text, content)?;
    }

    document.append_child(node, text)?;
    document.append_child(container, node)?;

    print!("{document}");
    Ok(())
}
