//! Passes 5 and 6: Block classification

use crate::dom::{ArenaDom, NodeId, Selector};
use crate::error::Result;

use super::Pass;

/// Add a class to the nearest block ancestor of every matching element.
///
/// Used to mark the `div` around monospace text as a `code-block`.
pub struct ClassifyAncestor {
    target: Selector,
    block: Selector,
    class: &'static str,
}

impl ClassifyAncestor {
    pub fn new(target: &str, block: &str, class: &'static str) -> Result<Self> {
        Ok(Self {
            target: Selector::parse(target)?,
            block: Selector::parse(block)?,
            class,
        })
    }
}

impl Pass for ClassifyAncestor {
    fn name(&self) -> &'static str {
        "classify-ancestor"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let blocks: Vec<_> = dom
            .select(scope, &self.target)
            .into_iter()
            .filter_map(|id| dom.closest(id, &self.block))
            .collect();

        blocks
            .into_iter()
            .filter(|&block| dom.add_class(block, self.class))
            .count()
    }
}

/// Heading labels that share one callout style.
#[derive(Debug, Clone, Copy)]
pub struct CalloutGroup {
    pub class: &'static str,
    /// Alternatives: a heading containing any one of them matches.
    pub labels: &'static [&'static str],
}

impl CalloutGroup {
    /// Check whether a heading's text names this group.
    pub fn matches(&self, text: &str) -> bool {
        self.labels.iter().any(|label| text.contains(label))
    }
}

/// Tip, note and warning callouts as the exporter titles them.
pub const DEFAULT_CALLOUTS: &[CalloutGroup] = &[
    CalloutGroup {
        class: "tip",
        labels: &["Tip"],
    },
    CalloutGroup {
        class: "note",
        labels: &["Note"],
    },
    CalloutGroup {
        class: "warn",
        labels: &["Warning", "Caution"],
    },
];

/// Class the block around each labelled heading with its group's style.
///
/// Labels match as case-sensitive substrings of the heading's text, so
/// "Tip: careful" is a tip and "tipping point" is not. The first group that
/// matches a heading wins, and a block that already carries a callout class
/// keeps it.
pub struct ClassifyCallouts {
    heading: Selector,
    block: Selector,
    groups: &'static [CalloutGroup],
}

impl ClassifyCallouts {
    pub fn new(heading: &str, block: &str, groups: &'static [CalloutGroup]) -> Result<Self> {
        Ok(Self {
            heading: Selector::parse(heading)?,
            block: Selector::parse(block)?,
            groups,
        })
    }
}

impl Pass for ClassifyCallouts {
    fn name(&self) -> &'static str {
        "callouts"
    }

    fn apply(&self, dom: &mut ArenaDom, scope: NodeId) -> usize {
        let mut changed = 0;

        for heading in dom.select(scope, &self.heading) {
            let text = dom.text(heading);
            let Some(group) = self.groups.iter().find(|g| g.matches(&text)) else {
                continue;
            };
            let Some(block) = dom.closest(heading, &self.block) else {
                continue;
            };
            if self.groups.iter().any(|g| dom.has_class(block, g.class)) {
                continue;
            }
            if dom.add_class(block, group.class) {
                changed += 1;
            }
        }
        changed
    }
}
