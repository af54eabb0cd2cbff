//! Arena DOM with CSS selector queries.
//!
//! Documents are parsed with html5ever into an [`ArenaDom`], queried with
//! [`Selector`]s (the `selectors` crate, the same engine browsers use) and
//! written back out with html5ever's serializer.
//!
//! # Example
//!
//! ```
//! use booktidy::dom::{parse_html, Selector};
//!
//! let dom = parse_html("<tt><code>x=1</code></tt>");
//! let code = Selector::parse("tt code").unwrap();
//! assert_eq!(dom.select(dom.document(), &code).len(), 1);
//! ```

mod arena;
mod element_ref;
mod select;
mod serialize;
mod tree_sink;

pub use arena::{
    ArenaDom, Attribute, ChildrenIter, Descendants, Node, NodeData, NodeId, attr_name, html_name,
};
pub use element_ref::{BookSelectors, ElementRef};
pub use select::Selector;
pub use serialize::SerializableNode;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document into an arena DOM.
///
/// Always yields `<html>`, `<head>` and `<body>`, synthesizing them when the
/// input omits them.
pub fn parse_html(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse raw document bytes, decoding them as UTF-8 with a Windows-1252 fallback.
pub fn parse_html_bytes(bytes: &[u8]) -> ArenaDom {
    parse_html(&crate::util::decode_text(bytes, None))
}
