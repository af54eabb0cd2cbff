//! Layout rewrite passes.
//!
//! Each pass finds the elements matching a selector and mutates them. A pass
//! that matches nothing is a no-op, which is how the rules tolerate books
//! that lack code listings, callouts or a cover.
//!
//! ## Pipeline Order
//!
//! Later passes assume the earlier ones have run:
//!
//! 1. **Stylesheet** - Inject the typography rules into `<head>`
//! 2. **Unwrap code** - `tt code` collapses into its text
//! 3. **Unwrap cell paragraphs** - `td > p > font` loses its paragraph
//! 4. **Strip size** - Drop every hard-coded `size` attribute
//! 5. **Code blocks** - Class the `div` around each `tt` as `code-block`
//! 6. **Callouts** - Class `div`s around Tip/Note/Warning headings
//! 7. **Cover** - Move the last image to the top of the content
//! 8. **Table borders** - Strip `border` from the first N tables (N = 0)

mod attrs;
mod classify;
mod cover;
mod stylesheet;
mod unwrap;

pub use attrs::{StripAttribute, StripTableBorder};
pub use classify::{CalloutGroup, ClassifyAncestor, ClassifyCallouts, DEFAULT_CALLOUTS};
pub use cover::RelocateCover;
pub use stylesheet::{BOOK_STYLESHEET, InjectStylesheet};
pub use unwrap::{UnwrapContents, UnwrapParent};

use tracing::debug;

use crate::config::ReflowConfig;
use crate::dom::{ArenaDom, NodeId};
use crate::error::Result;

/// One rewrite rule over the DOM.
pub trait Pass {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the rule to `scope` (usually the content container).
    ///
    /// Returns the number of elements changed.
    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize;
}

/// An ordered list of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass to the end of the pipeline.
    pub fn with(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// The rule set for Calibre HTML exports.
    pub fn standard(config: &ReflowConfig) -> Result<Self> {
        Ok(Self::new()
            .with(InjectStylesheet::new(BOOK_STYLESHEET))
            .with(UnwrapContents::new("tt code")?)
            .with(UnwrapParent::new("td > p > font")?)
            .with(StripAttribute::new("[size]", "size")?)
            .with(ClassifyAncestor::new("tt", "div", "code-block")?)
            .with(ClassifyCallouts::new("h3", "div", DEFAULT_CALLOUTS)?)
            .with(RelocateCover::new("img")?)
            .with(StripTableBorder::new(config.table_border_limit)?))
    }

    /// Names of the passes, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass in order. Returns the total number of elements changed.
    pub fn run(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let mut total = 0;
        for pass in &self.passes {
            let changed = pass.apply(dom, scope);
            debug!(pass = pass.name(), changed, "applied reflow pass");
            total += changed;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    const BOOK: &str = r#"<html><head><title>t</title></head><body>
        <div id="content">
          <div class="calibre1"><h3>Tip: careful</h3><p>text</p></div>
          <div><h3>Note</h3></div>
          <div><h3>Caution, hot</h3></div>
          <div><h3>Chapter 1</h3><p>plain <font size="3">big</font></p></div>
          <div><tt><code>x=1</code></tt></div>
          <table border="1"><tr><td><p><font size="1">cell</font></p></td></tr></table>
          <img src="cover.jpg">
        </div></body></html>"#;

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = Pipeline::standard(&ReflowConfig::default()).unwrap();
        assert_eq!(
            pipeline.names(),
            [
                "stylesheet",
                "unwrap-contents",
                "unwrap-parent",
                "strip-attribute",
                "classify-ancestor",
                "callouts",
                "cover",
                "table-border",
            ]
        );
    }

    #[test]
    fn test_full_pipeline() {
        let mut dom = parse_html(BOOK);
        let content = dom.get_by_id("content").unwrap();
        let pipeline = Pipeline::standard(&ReflowConfig::default()).unwrap();

        assert!(pipeline.run(&mut dom, content) > 0);

        let html = dom.to_html().unwrap();
        assert!(html.contains(r#"<div class="calibre1 tip"><h3>Tip: careful</h3>"#));
        assert!(html.contains(r#"<div class="note"><h3>Note</h3>"#));
        assert!(html.contains(r#"<div class="warn"><h3>Caution, hot</h3>"#));
        assert!(html.contains("<div><h3>Chapter 1</h3>"));
        assert!(html.contains(r#"<div class="code-block"><tt>x=1</tt></div>"#));
        assert!(html.contains("<td><font>cell</font></td>"));
        assert!(html.contains(r#"<table border="1">"#));
        assert!(!html.contains("size="));
        assert!(html.contains("<style type=\"text/css\">"));

        let first = dom.children(content).find(|&c| dom.is_element(c)).unwrap();
        assert_eq!(dom.get_attr(first, "src"), Some("cover.jpg"));
    }

    #[test]
    fn test_empty_content_is_noop() {
        let mut dom = parse_html(r#"<body><div id="content"></div></body>"#);
        let content = dom.get_by_id("content").unwrap();
        let pipeline = Pipeline::standard(&ReflowConfig::default()).unwrap();

        // Only the stylesheet is added.
        assert_eq!(pipeline.run(&mut dom, content), 1);
        assert_eq!(dom.children(content).count(), 0);
    }
}
