use derive_more::From;
use std::collections::BTreeMap;

/// A description of a desired UI node before it is materialized into a [`Document`](crate::Document).
///
/// Descriptions are inert plain data. Constructing one never touches a document; handing one to
/// [`render`](crate::render) does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// The kind of node to create, e.g. `"div"` or `"h1"`.
    pub element_type: String,
    /// The node's attributes and content.
    pub props: Props,
}

impl Element {
    /// Creates a new element description.
    pub fn new(element_type: impl Into<String>, props: Props) -> Self {
        Self {
            element_type: element_type.into(),
            props,
        }
    }
}

/// The attributes and content of an [`Element`] description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props {
    /// Attributes to copy onto the created node.
    pub attributes: BTreeMap<String, String>,
    /// The node's content.
    pub children: Children,
}

impl Props {
    /// Creates empty props: no attributes, no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the children to a plain string of text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children = Children::Text(text.into());
        self
    }

    /// Sets the children to a list of nested descriptions.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children = Children::Elements(children.into_iter().collect());
        self
    }
}

/// The content of an element description: either one plain string or a list of nested
/// descriptions, never both.
#[derive(Clone, Debug, Default, PartialEq, Eq, From)]
pub enum Children {
    /// No content.
    #[default]
    None,
    /// A single string of text content.
    #[from(String, &'static str)]
    Text(String),
    /// Nested element descriptions.
    #[from]
    Elements(Vec<Element>),
}

/// Builds an [`Element`] description tree with a lightweight markup syntax.
///
/// Each node is written as `tag`, `tag(attr: value, ...)`, `tag { ... }`, or
/// `tag(attr: value, ...) { ... }`. A body consisting of a single string literal becomes the
/// node's text content; otherwise the body is a sequence of nested nodes. Attribute values can be
/// any expression implementing `Display`.
///
/// ```
/// use didact::Children;
///
/// let markup = didact::element! {
///     div(style: "background: salmon") {
///         h1 { "Hello World" }
///         h2(style: "text-align:right") { "from Didact" }
///     }
/// };
///
/// assert_eq!(markup.element_type, "div");
/// let Children::Elements(children) = &markup.props.children else {
///     unreachable!();
/// };
/// assert_eq!(children.len(), 2);
/// ```
#[macro_export]
macro_rules! element {
    // A string literal body is the node's text content.
    ($tag:ident ( $($name:ident: $value:expr),* $(,)? ) { $text:literal }) => {
        $crate::Element::new(
            ::std::stringify!($tag),
            $crate::element!(@props [$($name: $value),*]).text($text),
        )
    };
    ($tag:ident { $text:literal }) => {
        $crate::Element::new(::std::stringify!($tag), $crate::Props::new().text($text))
    };
    // Any other body is a sequence of nested nodes.
    ($tag:ident ( $($name:ident: $value:expr),* $(,)? ) { $($body:tt)* }) => {
        $crate::Element::new(
            ::std::stringify!($tag),
            $crate::element!(@props [$($name: $value),*]).children($crate::element!(@list [] $($body)*)),
        )
    };
    ($tag:ident { $($body:tt)* }) => {
        $crate::Element::new(
            ::std::stringify!($tag),
            $crate::Props::new().children($crate::element!(@list [] $($body)*)),
        )
    };
    ($tag:ident ( $($name:ident: $value:expr),* $(,)? )) => {
        $crate::Element::new(
            ::std::stringify!($tag),
            $crate::element!(@props [$($name: $value),*]),
        )
    };
    ($tag:ident) => {
        $crate::Element::new(::std::stringify!($tag), $crate::Props::new())
    };
    (@props [$($name:ident: $value:expr),*]) => {{
        #[allow(unused_mut)]
        let mut props = $crate::Props::new();
        $(props.attributes.insert(::std::stringify!($name).to_string(), ($value).to_string());)*
        props
    }};
    (@list [$($acc:expr,)*]) => {
        ::std::vec![$($acc,)*]
    };
    (@list [$($acc:expr,)*] $tag:ident ( $($name:ident: $value:expr),* $(,)? ) { $($body:tt)* } $($rest:tt)*) => {
        $crate::element!(@list [$($acc,)* $crate::element!($tag ( $($name: $value),* ) { $($body)* }),] $($rest)*)
    };
    (@list [$($acc:expr,)*] $tag:ident ( $($name:ident: $value:expr),* $(,)? ) $($rest:tt)*) => {
        $crate::element!(@list [$($acc,)* $crate::element!($tag ( $($name: $value),* )),] $($rest)*)
    };
    (@list [$($acc:expr,)*] $tag:ident { $($body:tt)* } $($rest:tt)*) => {
        $crate::element!(@list [$($acc,)* $crate::element!($tag { $($body)* }),] $($rest)*)
    };
    (@list [$($acc:expr,)*] $tag:ident $($rest:tt)*) => {
        $crate::element!(@list [$($acc,)* $crate::element!($tag),] $($rest)*)
    };
}
