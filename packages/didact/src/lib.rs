//! # didact
//!
//! `didact` is a tiny library for describing UI as plain data and materializing those
//! descriptions into a document tree.
//!
//! A description says what a node should look like; nothing happens until it is handed to
//! [`render`] together with a [`Document`] and a container node:
//!
//! ```
//! use didact::prelude::*;
//!
//! let mut document = Document::new();
//! let container = document.create_element("div")?;
//! document.set_attribute(container, "id", "root")?;
//! document.append_child(document.root(), container)?;
//!
//! let greeting = didact::element! {
//!     h1(title: "greeting") { "hello" }
//! };
//! render(&greeting, &mut document, container)?;
//!
//! assert_eq!(document.child_count(container), 1);
//! # Ok::<(), DocumentError>(())
//! ```

#![warn(missing_docs)]

// # Organization
//
// Code is organized into modules primarily for the benefit of the maintainers. Types will be
// re-exported in the root so that users of the library have a flat namespace to work with.

mod document;
mod element;
mod render;

mod flattened_exports {
    pub use crate::document::*;
    pub use crate::element::*;
    pub use crate::render::*;
}

pub use flattened_exports::*;

/// By importing this module, you'll bring all of the crate's commonly used types into scope.
pub mod prelude {
    pub use crate::flattened_exports::*;
}
