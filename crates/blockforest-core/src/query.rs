//! Lookup over a block forest.
//!
//! [`find_block`] is the only query primitive the model guarantees. Callers
//! that need repeated lookups should build their own index from [`blocks`].

use crate::{block::Block, value::Value};

/// Finds the first block whose text attribute `attribute` equals `value`.
///
/// All siblings of a scope are checked before any of their children, so a
/// match at a shallower scope always wins over a nested one. Children are
/// then searched sibling by sibling, recursively with the same rule.
///
/// # Examples
///
/// ```
/// use blockforest_core::{block::Block, query::find_block, value::AttributeMap};
///
/// let mut attributes = AttributeMap::new();
/// attributes.insert("Name".to_string(), "Gain".into());
/// let roots = vec![Block::new(attributes)];
///
/// assert!(find_block(&roots, "Name", "Gain").is_some());
/// assert!(find_block(&roots, "Name", "Sum").is_none());
/// ```
pub fn find_block<'a>(blocks: &'a [Block], attribute: &str, value: &str) -> Option<&'a Block> {
    blocks
        .iter()
        .find(|block| block.attribute(attribute).and_then(Value::as_text) == Some(value))
        .or_else(|| {
            blocks
                .iter()
                .find_map(|block| find_block(block.children(), attribute, value))
        })
}

/// Iterates over every block of the forest in pre-order: a block, then its
/// children, then its next sibling.
pub fn blocks(roots: &[Block]) -> Blocks<'_> {
    Blocks {
        stack: roots.iter().rev().collect(),
    }
}

/// Pre-order iterator returned by [`blocks`].
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    stack: Vec<&'a Block>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stack.pop()?;
        self.stack.extend(block.children().iter().rev());
        Some(block)
    }
}
