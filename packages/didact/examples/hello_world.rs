use anyhow::{Context, Result};
use didact::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    // The host page: a document whose body holds an empty container.
    let mut document = Document::new();
    let div = document.create_element("div")?;
    document.set_attribute(div, "id", "root")?;
    document.append_child(document.root(), div)?;

    let element = didact::element! {
        div(style: "background: salmon") {
            h1 { "Hello World" }
            h2(style: "text-align:right") { "from Didact" }
        }
    };

    let container = document
        .get_element_by_id("root")
        .context("no #root container in the document")?;
    render(&element, &mut document, container)?;

    print!("{document}");
    Ok(())
}
