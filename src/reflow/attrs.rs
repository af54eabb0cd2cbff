//! Passes 4 and 8: Legacy attribute stripping

use crate::dom::{ArenaDom, NodeId, Selector};
use crate::error::Result;

use super::Pass;

/// Remove an attribute from every matching element in the document.
///
/// Unlike the other passes this one is document-wide: it covers the live
/// document and, when the scope has been detached for rewriting, the scope
/// as well.
pub struct StripAttribute {
    selector: Selector,
    attr: &'static str,
}

impl StripAttribute {
    pub fn new(selector: &str, attr: &'static str) -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(selector)?,
            attr,
        })
    }
}

impl Pass for StripAttribute {
    fn name(&self) -> &'static str {
        "strip-attribute"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let mut targets = dom.select(dom.document(), &self.selector);
        if !dom.is_attached(scope) {
            if self.selector.matches(dom, scope) {
                targets.push(scope);
            }
            targets.extend(dom.select(scope, &self.selector));
        }

        targets
            .into_iter()
            .filter(|&id| dom.remove_attr(id, self.attr))
            .count()
    }
}

/// Remove `border` from the first `limit` tables in scope.
///
/// Books exported with layout tables carry a hard-coded border. Which tables
/// to clean is a per-book decision, so the default limit of zero leaves every
/// table alone.
pub struct StripTableBorder {
    tables: Selector,
    limit: usize,
}

impl StripTableBorder {
    pub fn new(limit: usize) -> Result<Self> {
        Ok(Self {
            tables: Selector::parse("table")?,
            limit,
        })
    }
}

impl Pass for StripTableBorder {
    fn name(&self) -> &'static str {
        "table-border"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        if self.limit == 0 {
            return 0;
        }
        dom.select(scope, &self.tables)
            .into_iter()
            .take(self.limit)
            .filter(|&id| dom.remove_attr(id, "border"))
            .count()
    }
}
