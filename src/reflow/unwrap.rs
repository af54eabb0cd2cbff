//! Passes 2 and 3: Unwrap redundant wrappers

use std::collections::HashSet;

use crate::dom::{ArenaDom, NodeId, Selector};
use crate::error::Result;

use super::Pass;

/// Replace every matching element with its own children.
///
/// Empty matches are left in place: with no children there is nothing to
/// hoist.
///
/// ```html
/// <tt><code>x=1</code></tt>  →  <tt>x=1</tt>
/// ```
pub struct UnwrapContents {
    selector: Selector,
}

impl UnwrapContents {
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(selector)?,
        })
    }
}

impl Pass for UnwrapContents {
    fn name(&self) -> &'static str {
        "unwrap-contents"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let matches = dom.select(scope, &self.selector);
        matches
            .into_iter()
            .filter(|&id| dom.get(id).is_some_and(|n| n.first_child.is_some()) && dom.unwrap(id))
            .count()
    }
}

/// Replace the parent of every matching element with the parent's children.
///
/// Each parent is unwrapped once even when several matches share it, and
/// `<body>` is never unwrapped.
///
/// ```html
/// <td><p><font>cell</font></p></td>  →  <td><font>cell</font></td>
/// ```
pub struct UnwrapParent {
    selector: Selector,
}

impl UnwrapParent {
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(selector)?,
        })
    }
}

impl Pass for UnwrapParent {
    fn name(&self) -> &'static str {
        "unwrap-parent"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let mut seen = HashSet::new();
        let parents: Vec<NodeId> = dom
            .select(scope, &self.selector)
            .into_iter()
            .filter_map(|id| dom.get(id).map(|n| n.parent))
            .filter(|&parent| dom.is_element(parent) && !dom.is_tag(parent, "body"))
            .filter(|&parent| seen.insert(parent))
            .collect();

        parents.into_iter().filter(|&id| dom.unwrap(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn content(dom: &ArenaDom) -> NodeId {
        dom.get_by_id("content").unwrap()
    }

    #[test]
    fn test_unwraps_code_inside_tt() {
        let mut dom = parse_html(r#"<div id="content"><p>see <tt><code>x=1</code></tt> here</p></div>"#);
        let scope = content(&dom);

        assert_eq!(UnwrapContents::new("tt code").unwrap().apply(&mut dom, scope), 1);

        let tt = dom.find_by_tag("tt").unwrap();
        let children: Vec<_> = dom.children(tt).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("x=1"));
        assert!(dom.find_by_tag("code").is_none());
    }

    #[test]
    fn test_code_outside_tt_is_kept() {
        let mut dom = parse_html(r#"<div id="content"><pre><code>fn main()</code></pre></div>"#);
        let scope = content(&dom);

        assert_eq!(UnwrapContents::new("tt code").unwrap().apply(&mut dom, scope), 0);
        assert!(dom.find_by_tag("code").is_some());
    }

    #[test]
    fn test_nested_code_fully_collapses() {
        let mut dom = parse_html(
            r#"<div id="content"><tt><code>a<code>b</code></code></tt></div>"#,
        );
        let scope = content(&dom);

        assert_eq!(UnwrapContents::new("tt code").unwrap().apply(&mut dom, scope), 2);
        let tt = dom.find_by_tag("tt").unwrap();
        assert!(dom.children(tt).all(|c| dom.is_text(c)));
        assert_eq!(dom.text(tt), "ab");
    }

    #[test]
    fn test_empty_code_is_kept() {
        let mut dom = parse_html(
            r#"<div id="content"><tt><code></code></tt><tt><code>y</code></tt></div>"#,
        );
        let scope = content(&dom);

        assert_eq!(UnwrapContents::new("tt code").unwrap().apply(&mut dom, scope), 1);
        assert_eq!(
            dom.node_to_html(scope, false).unwrap(),
            "<tt><code></code></tt><tt>y</tt>"
        );
    }

    #[test]
    fn test_unwraps_cell_paragraph_once() {
        let mut dom = parse_html(
            r#"<div id="content"><table><tr><td><p><font>a</font> <font>b</font></p></td></tr></table></div>"#,
        );
        let scope = content(&dom);

        assert_eq!(UnwrapParent::new("td > p > font").unwrap().apply(&mut dom, scope), 1);

        let td = dom.find_by_tag("td").unwrap();
        let tags: Vec<_> = dom
            .children(td)
            .filter(|&c| dom.is_element(c))
            .map(|c| dom.element_name(c).unwrap().to_string())
            .collect();
        assert_eq!(tags, ["font", "font"]);
        assert_eq!(dom.text(td), "a b");
        assert!(dom.find_by_tag("p").is_none());
    }

    #[test]
    fn test_paragraph_outside_cell_is_kept() {
        let mut dom = parse_html(r#"<div id="content"><p><font>body text</font></p></div>"#);
        let scope = content(&dom);

        assert_eq!(UnwrapParent::new("td > p > font").unwrap().apply(&mut dom, scope), 0);
        assert!(dom.find_by_tag("p").is_some());
    }

    #[test]
    fn test_never_unwraps_body() {
        let mut dom = parse_html("<body><font>x</font></body>");
        let document = dom.document();

        assert_eq!(UnwrapParent::new("body > font").unwrap().apply(&mut dom, document), 0);
        assert!(dom.body().is_some_and(|b| dom.is_attached(b)));
    }
}
