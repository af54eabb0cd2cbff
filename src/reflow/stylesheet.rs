//! Pass 1: Typography stylesheet

use crate::dom::{ArenaDom, NodeId};

use super::Pass;

/// Typography and spacing for code blocks, tables and callouts.
///
/// `fixup.js` carries the same rules; a test keeps the two in step.
pub const BOOK_STYLESHEET: &str = concat!(
    "tt {font-size: 1.2em !important; margin-top:1em;}",
    "body {font-family: arial; font-size: 0.8em;}",
    "code {font-size: 1.2em;}",
    "table { border-collapse: collapse; }",
    "th {text-align: left;}",
    "th,td {padding: 0.2em;}",
    "hr {display:none;}",
    ".code-block { margin-top: 1em; margin-left: 1em; }",
    ".tip  { background-color: #E0FFE0; }",
    ".note { background-color: #FFFFDD; }",
    ".warn { background-color: #FFDDDD; }",
);

/// Append a `<style>` block to the document head.
///
/// The head lives outside the content container, so this pass ignores its
/// scope. Without a head it does nothing.
pub struct InjectStylesheet {
    css: &'static str,
}

impl InjectStylesheet {
    pub fn new(css: &'static str) -> Self {
        Self { css }
    }
}

impl Pass for InjectStylesheet {
    fn name(&self) -> &'static str {
        "stylesheet"
    }

    fn apply(&self, dom: &mut ArenaDom, _scope: NodeId) -> usize {
        let Some(head) = dom.head() else {
            return 0;
        };
        let style = dom.create_html_element("style", &[("type", "text/css")]);
        dom.append_text(style, self.css);
        dom.append(head, style);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_appends_after_existing_head_content() {
        let mut dom = parse_html("<head><title>Book</title></head><body></body>");
        let body = dom.body().unwrap();

        assert_eq!(InjectStylesheet::new(BOOK_STYLESHEET).apply(&mut dom, body), 1);

        let head = dom.head().unwrap();
        let last = dom.get(head).unwrap().last_child;
        assert!(dom.is_tag(last, "style"));
        assert_eq!(dom.get_attr(last, "type"), Some("text/css"));
        assert_eq!(dom.text(last), BOOK_STYLESHEET);
    }

    #[test]
    fn test_stylesheet_covers_callout_classes() {
        for class in [".code-block", ".tip", ".note", ".warn"] {
            assert!(BOOK_STYLESHEET.contains(class), "missing {class}");
        }
    }
}
