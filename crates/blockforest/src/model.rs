//! The reconstructed model.

use serde::Serialize;

use blockforest_core::{
    block::Block,
    net::Net,
    query::{self, Blocks},
};
use blockforest_parser::Scope;

/// A reconstructed model: the root scope's blocks, with nested scopes
/// attached as children, and the root scope's nets.
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    roots: Vec<Block>,
    nets: Vec<Net>,
}

impl Model {
    pub fn new(roots: Vec<Block>, nets: Vec<Net>) -> Self {
        Self { roots, nets }
    }

    /// Blocks of the root scope, in document order.
    pub fn roots(&self) -> &[Block] {
        &self.roots
    }

    /// Raw nets of the root scope.
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    /// Finds the first block whose `attribute` equals `value`, preferring
    /// shallower scopes. See [`query::find_block`].
    pub fn find_block(&self, attribute: &str, value: &str) -> Option<&Block> {
        query::find_block(&self.roots, attribute, value)
    }

    /// Every block of the forest, in pre-order.
    pub fn blocks(&self) -> Blocks<'_> {
        query::blocks(&self.roots)
    }

    /// Number of blocks across all scopes.
    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }
}

impl From<Scope> for Model {
    fn from(scope: Scope) -> Self {
        let (roots, nets) = scope.into_parts();
        Self::new(roots, nets)
    }
}

#[cfg(test)]
mod tests {
    use blockforest_core::value::AttributeMap;

    use super::*;

    fn block(sid: &str) -> Block {
        let mut attributes = AttributeMap::new();
        attributes.insert("SID".to_string(), sid.into());
        Block::new(attributes)
    }

    #[test]
    fn test_block_count_includes_nested() {
        let model = Model::new(
            vec![
                block("1").with_children(vec![block("3"), block("4")], Vec::new()),
                block("2"),
            ],
            Vec::new(),
        );

        assert_eq!(model.block_count(), 4);
        let order: Vec<_> = model.blocks().filter_map(Block::sid).collect();
        assert_eq!(order, ["1", "3", "4", "2"]);
        assert_eq!(model.find_block("SID", "4").and_then(Block::sid), Some("4"));
    }

    #[test]
    fn test_empty_model() {
        let model = Model::default();

        assert_eq!(model.block_count(), 0);
        assert!(model.find_block("SID", "1").is_none());
    }
}
