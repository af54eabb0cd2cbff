//! CSS selector queries over the arena DOM.

use cssparser::{Parser, ParserInput};
use selectors::context::{
    MatchingContext, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, QuirksMode,
    SelectorCaches,
};
use selectors::parser::{ParseRelative, SelectorList};

use super::arena::{ArenaDom, NodeId};
use super::element_ref::{BookSelectors, ElementRef};
use crate::error::{Error, Result};

/// A compiled, comma-separated selector list.
#[derive(Debug, Clone)]
pub struct Selector {
    list: Vec<selectors::parser::Selector<BookSelectors>>,
}

impl Selector {
    /// Compile a selector list such as `"tt code"` or `"td > p > font"`.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let list = SelectorList::parse(&BookSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| Error::Selector(format!("{source:?}: {:?}", e.kind)))?;

        Ok(Self {
            list: list.slice().to_vec(),
        })
    }

    /// Check whether a single node matches.
    pub fn matches(&self, dom: &ArenaDom, id: NodeId) -> bool {
        let mut caches = SelectorCaches::default();
        let mut context = matching_context(&mut caches);
        self.matches_in(dom, id, &mut context)
    }

    fn matches_in(
        &self,
        dom: &ArenaDom,
        id: NodeId,
        context: &mut MatchingContext<'_, BookSelectors>,
    ) -> bool {
        if !dom.is_element(id) {
            return false;
        }
        let elem = ElementRef::new(dom, id);
        self.list.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &elem, context)
        })
    }
}

fn matching_context(caches: &mut SelectorCaches) -> MatchingContext<'_, BookSelectors> {
    MatchingContext::new(
        MatchingMode::Normal,
        None,
        caches,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        MatchingForInvalidation::No,
    )
}

impl ArenaDom {
    /// All elements under `scope` (excluding `scope`) matching `selector`, in document order.
    ///
    /// An empty result is a normal outcome, never an error.
    pub fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut caches = SelectorCaches::default();
        let mut context = matching_context(&mut caches);
        self.descendants(scope)
            .filter(|&id| selector.matches_in(self, id, &mut context))
            .collect()
    }

    /// Nearest node matching `selector`, starting with `id` itself and walking up.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut caches = SelectorCaches::default();
        let mut context = matching_context(&mut caches);
        let mut current = id;
        while let Some(node) = self.get(current) {
            if selector.matches_in(self, current, &mut context) {
                return Some(current);
            }
            current = node.parent;
        }
        None
    }
}
