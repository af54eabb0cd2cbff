//! Pass 7: Cover image relocation

use crate::dom::{ArenaDom, NodeId, Selector};
use crate::error::Result;

use super::Pass;

/// Move the last image in the scope to the scope's first child.
///
/// The exporter emits the cover image at the very end of the book.
pub struct RelocateCover {
    image: Selector,
}

impl RelocateCover {
    pub fn new(image: &str) -> Result<Self> {
        Ok(Self {
            image: Selector::parse(image)?,
        })
    }
}

impl Pass for RelocateCover {
    fn name(&self) -> &'static str {
        "cover"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let Some(cover) = dom.select(scope, &self.image).pop() else {
            return 0;
        };
        dom.prepend(scope, cover);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_last_image_becomes_first_child() {
        let mut dom = parse_html(
            r#"<div id="content"><p>one <img src="fig1.png"></p><p>two</p><div><img src="cover.jpg"></div></div>"#,
        );
        let content = dom.get_by_id("content").unwrap();

        assert_eq!(RelocateCover::new("img").unwrap().apply(&mut dom, content), 1);

        let first = dom.get(content).unwrap().first_child;
        assert_eq!(dom.get_attr(first, "src"), Some("cover.jpg"));
        let fig = dom.find_by_tag("img").unwrap();
        assert_eq!(fig, first);
        assert_eq!(dom.select(content, &Selector::parse("img").unwrap()).len(), 2);
    }

    #[test]
    fn test_no_images_is_noop() {
        let mut dom = parse_html(r#"<div id="content"><p>text only</p></div>"#);
        let content = dom.get_by_id("content").unwrap();
        let before = dom.to_html().unwrap();

        assert_eq!(RelocateCover::new("img").unwrap().apply(&mut dom, content), 0);
        assert_eq!(dom.to_html().unwrap(), before);
    }

    #[test]
    fn test_single_leading_image_stays_put() {
        let mut dom = parse_html(r#"<div id="content"><img src="cover.jpg"><p>t</p></div>"#);
        let content = dom.get_by_id("content").unwrap();

        RelocateCover::new("img").unwrap().apply(&mut dom, content);

        assert_eq!(
            dom.node_to_html(content, false).unwrap(),
            r#"<img src="cover.jpg"><p>t</p>"#
        );
    }
}
