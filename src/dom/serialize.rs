//! HTML serialization of the arena DOM through html5ever's serializer.

use std::collections::VecDeque;
use std::io;

use html5ever::QualName;
use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, NodeData, NodeId};
use crate::error::Result;

/// A node borrowed for serialization.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: NodeId,
}

enum Op {
    Open(NodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let dom = self.dom;
        let mut ops: VecDeque<Op> = match traversal_scope {
            TraversalScope::IncludeNode => VecDeque::from([Op::Open(self.id)]),
            TraversalScope::ChildrenOnly(_) => dom.children(self.id).map(Op::Open).collect(),
        };

        while let Some(op) = ops.pop_front() {
            let id = match op {
                Op::Open(id) => id,
                Op::Close(name) => {
                    serializer.end_elem(name)?;
                    continue;
                }
            };
            let Some(node) = dom.get(id) else {
                continue;
            };

            match &node.data {
                NodeData::Element { name, attrs, .. } => {
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|a| (&a.name, a.value.as_str())),
                    )?;
                    ops.push_front(Op::Close(name.clone()));
                    let children: Vec<_> = dom.children(id).collect();
                    for child in children.into_iter().rev() {
                        ops.push_front(Op::Open(child));
                    }
                }
                NodeData::Document => {
                    let children: Vec<_> = dom.children(id).collect();
                    for child in children.into_iter().rev() {
                        ops.push_front(Op::Open(child));
                    }
                }
                NodeData::Text(text) => serializer.write_text(text)?,
                NodeData::Comment(text) => serializer.write_comment(text)?,
                NodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
            }
        }
        Ok(())
    }
}

impl ArenaDom {
    /// Borrow a node for use with html5ever's `serialize`.
    pub fn serializable(&self, id: NodeId) -> SerializableNode<'_> {
        SerializableNode { dom: self, id }
    }

    /// Serialize the whole document to an HTML string.
    pub fn to_html(&self) -> Result<String> {
        self.node_to_html(self.document(), false)
    }

    /// Serialize a single node, or only its children when `include_node` is false.
    pub fn node_to_html(&self, id: NodeId, include_node: bool) -> Result<String> {
        let opts = SerializeOpts {
            traversal_scope: if include_node {
                TraversalScope::IncludeNode
            } else {
                TraversalScope::ChildrenOnly(None)
            },
            ..Default::default()
        };
        let mut out = Vec::new();
        serialize(&mut out, &self.serializable(id), opts)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_document_roundtrip() {
        let dom = parse_html(
            "<!DOCTYPE html><html><head><title>Book</title></head>\
             <body><p class=\"x\">a &amp; b</p><br></body></html>",
        );
        let html = dom.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Book</title>"));
        assert!(html.contains(r#"<p class="x">a &amp; b</p>"#));
        assert!(html.contains("<br>"));
        assert!(!html.contains("</br>"));
    }

    #[test]
    fn test_script_text_is_not_escaped() {
        let dom = parse_html("<head><script>if (a < b && c) {}</script></head>");
        let html = dom.to_html().unwrap();

        assert!(html.contains("<script>if (a < b && c) {}</script>"));
    }

    #[test]
    fn test_single_node() {
        let dom = parse_html("<div id=content><img src=cover.jpg><p>t</p></div>");
        let div = dom.get_by_id("content").unwrap();

        assert_eq!(
            dom.node_to_html(div, true).unwrap(),
            r#"<div id="content"><img src="cover.jpg"><p>t</p></div>"#
        );
        assert_eq!(
            dom.node_to_html(div, false).unwrap(),
            r#"<img src="cover.jpg"><p>t</p>"#
        );
    }
}
