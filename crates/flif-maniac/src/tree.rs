/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The MANIAC context decision tree.
//!
//! A tree of [`PropertyDecisionNode`]s routes every coded symbol to a
//! leaf model based on the caller supplied property vector. Nodes
//! reference their children by index into an append-only vector and
//! leaf models live in a parallel vector indexed by `leaf_id`, so a
//! split appends and never invalidates an existing index.
//!
//! Inner nodes carry a transmitted `count` and defer their split: the
//! node serves symbols from its own leaf model for `count` visits, then
//! clones that model into both children so each side starts from the
//! warmed-up prior of the shared ancestor before diverging.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use flif_core::bytestream::{ByteReaderTrait, ByteWriterTrait};
use flif_core::log::trace;

use crate::chance::ChanceTable;
use crate::constants::{
    CONTEXT_TREE_MAX_COUNT, CONTEXT_TREE_MIN_COUNT, PROPERTY_CODER_ALPHA, PROPERTY_CODER_CUT,
    SIMPLE_CODER_ALPHA, SIMPLE_CODER_CUT
};
use crate::errors::{ManiacDecodeErrors, ManiacEncodeErrors};
use crate::rac::{RacDecoder, RacEncoder};
use crate::symbol::{
    read_int, read_int_bits, write_int, write_int_bits, SimpleSymbolCoder, SymbolBitReader,
    SymbolBitWriter, SymbolChance
};

/// One component of a caller supplied property vector
pub type PropertyValue = i32;

/// `[min, max]` limits per property, one pair per vector component
pub type PropertyRanges = Vec<(PropertyValue, PropertyValue)>;

/// A decision tree node.
///
/// `property < 0` marks a leaf whose model is `leaf_id`; otherwise the
/// node compares `properties[property]` against `splitval`: strictly
/// greater goes to `child_id`, less-or-equal to `child_id + 1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PropertyDecisionNode {
    pub property: i8,
    pub count:    i16,
    pub splitval: PropertyValue,
    pub child_id: u32,
    pub leaf_id:  u32
}

impl Default for PropertyDecisionNode {
    fn default() -> PropertyDecisionNode {
        PropertyDecisionNode {
            property: -1,
            count:    0,
            splitval: 0,
            child_id: 0,
            leaf_id:  0
        }
    }
}

/// An append-only decision tree; element 0 is the root
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    nodes: Vec<PropertyDecisionNode>
}

impl Tree {
    /// Create a tree holding a single leaf root
    pub fn new() -> Tree {
        Tree {
            nodes: vec![PropertyDecisionNode::default()]
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no nodes; a freshly created tree
    /// always holds its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node; callers always append children in pairs so the
    /// `child_id`/`child_id + 1` addressing stays valid
    pub fn push(&mut self, node: PropertyDecisionNode) {
        self.nodes.push(node);
    }
}

impl Default for Tree {
    fn default() -> Tree {
        Tree::new()
    }
}

impl Index<usize> for Tree {
    type Output = PropertyDecisionNode;

    fn index(&self, index: usize) -> &PropertyDecisionNode {
        &self.nodes[index]
    }
}

impl IndexMut<usize> for Tree {
    fn index_mut(&mut self, index: usize) -> &mut PropertyDecisionNode {
        &mut self.nodes[index]
    }
}

/// Integer coder that picks its context bundle by walking the decision
/// tree with the property vector of the current symbol.
///
/// The tree must have been fully decoded (or built) before the first
/// symbol is coded; the coder then owns it for the whole session, the
/// deferred-split logic mutates nodes while symbols flow.
pub struct PropertySymbolCoder {
    table:         ChanceTable,
    nb_properties: usize,
    leaf_pool:     Vec<SymbolChance>,
    tree:          Tree
}

impl PropertySymbolCoder {
    /// Create a coder over `tree` for property vectors shaped like
    /// `ranges`
    pub fn new(ranges: &[(PropertyValue, PropertyValue)], mut tree: Tree) -> PropertySymbolCoder {
        tree[0].leaf_id = 0;
        PropertySymbolCoder {
            table: ChanceTable::new(PROPERTY_CODER_CUT, PROPERTY_CODER_ALPHA),
            nb_properties: ranges.len(),
            leaf_pool: vec![SymbolChance::new()],
            tree
        }
    }

    /// Walk the tree to the leaf model for `properties`, performing a
    /// deferred split when a node's count runs out
    fn find_leaf(&mut self, properties: &[PropertyValue]) -> usize {
        assert_eq!(properties.len(), self.nb_properties);

        let mut pos = 0_usize;
        loop {
            let node = self.tree[pos];
            if node.property < 0 {
                break;
            }
            let p = usize::from(node.property as u8);
            let to_first_child = properties[p] > node.splitval;

            if node.count < 0 {
                pos = node.child_id as usize + usize::from(!to_first_child);
            } else if node.count > 0 {
                // still warming up, serve from this node's own model
                self.tree[pos].count -= 1;
                break;
            } else {
                // count ran out: hand the warmed-up model to one child,
                // a clone of it to the other, then route this symbol
                self.tree[pos].count = -1;
                let old_leaf = node.leaf_id as usize;
                let new_leaf = self.leaf_pool.len();
                let split_model = self.leaf_pool[old_leaf].clone();
                self.leaf_pool.push(split_model);

                let child = node.child_id as usize;
                self.tree[child].leaf_id = old_leaf as u32;
                self.tree[child + 1].leaf_id = new_leaf as u32;

                return if to_first_child { old_leaf } else { new_leaf };
            }
        }
        self.tree[pos].leaf_id as usize
    }

    /// Decode a value in `[min, max]` under the leaf selected by
    /// `properties`
    pub fn read_int<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>, properties: &[PropertyValue], min: i32, max: i32
    ) -> Result<i32, ManiacDecodeErrors> {
        if min == max {
            return Ok(min);
        }
        let leaf = self.find_leaf(properties);
        let mut bits = SymbolBitReader {
            rac,
            chances: &mut self.leaf_pool[leaf],
            table: &self.table
        };
        read_int(&mut bits, min, max)
    }

    /// Encode a value in `[min, max]` under the leaf selected by
    /// `properties`
    pub fn write_int<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, properties: &[PropertyValue], min: i32, max: i32,
        value: i32
    ) -> Result<(), ManiacEncodeErrors> {
        if min == max {
            debug_assert_eq!(value, min);
            return Ok(());
        }
        let leaf = self.find_leaf(properties);
        let mut bits = SymbolBitWriter {
            rac,
            chances: &mut self.leaf_pool[leaf],
            table: &self.table
        };
        write_int(&mut bits, min, max, value)
    }

    /// Decode a sign and `nbits` magnitude bits under the leaf selected
    /// by `properties`
    pub fn read_int_bits<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>, properties: &[PropertyValue], nbits: usize
    ) -> Result<i32, ManiacDecodeErrors> {
        let leaf = self.find_leaf(properties);
        let mut bits = SymbolBitReader {
            rac,
            chances: &mut self.leaf_pool[leaf],
            table: &self.table
        };
        read_int_bits(&mut bits, nbits)
    }

    /// Encode a sign and `nbits` magnitude bits under the leaf selected
    /// by `properties`
    pub fn write_int_bits<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, properties: &[PropertyValue], nbits: usize, value: i32
    ) -> Result<(), ManiacEncodeErrors> {
        let leaf = self.find_leaf(properties);
        let mut bits = SymbolBitWriter {
            rac,
            chances: &mut self.leaf_pool[leaf],
            table: &self.table
        };
        write_int_bits(&mut bits, nbits, value)
    }

    /// Borrow the tree, including any deferred-split mutations so far
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Number of currently active leaf models
    pub fn leaf_count(&self) -> usize {
        self.leaf_pool.len()
    }
}

/// Serializes and deserializes the decision tree itself.
///
/// Runs on a [`SimpleSymbolCoder`] of its own; the recursive subrange
/// narrowing bounds the alphabet the splitval coder sees at every
/// level, which keeps the tree's own encoding short.
pub struct MetaPropertySymbolCoder {
    coder:  SimpleSymbolCoder,
    ranges: PropertyRanges
}

impl MetaPropertySymbolCoder {
    /// Create a meta coder for trees over properties shaped like
    /// `ranges`
    ///
    /// # Panics
    /// If any range has `min > max`
    pub fn new(ranges: &[(PropertyValue, PropertyValue)]) -> MetaPropertySymbolCoder {
        for (min, max) in ranges {
            assert!(min <= max, "property range [{min}, {max}] is inverted");
        }
        MetaPropertySymbolCoder {
            coder:  SimpleSymbolCoder::new(SIMPLE_CODER_CUT, SIMPLE_CODER_ALPHA),
            ranges: ranges.to_vec()
        }
    }

    /// Decode a whole tree from `rac`
    pub fn read_tree<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>
    ) -> Result<Tree, ManiacDecodeErrors> {
        let mut subrange = self.ranges.clone();
        let mut tree = Tree::new();
        self.read_subtree(rac, 0, &mut subrange, &mut tree)?;
        trace!("Decoded context tree with {} nodes", tree.len());
        Ok(tree)
    }

    fn read_subtree<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>, pos: usize, subrange: &mut PropertyRanges,
        tree: &mut Tree
    ) -> Result<(), ManiacDecodeErrors> {
        let nb_properties = self.ranges.len() as i32;
        let property = self.coder.read_int(rac, 0, nb_properties)? - 1;
        tree[pos].property = property as i8;
        if property < 0 {
            return Ok(());
        }

        let p = property as usize;
        let (old_min, old_max) = subrange[p];
        if old_min >= old_max {
            return Err(ManiacDecodeErrors::InvalidTree(
                "split on a property whose range is exhausted"
            ));
        }

        let count = self
            .coder
            .read_int(rac, CONTEXT_TREE_MIN_COUNT, CONTEXT_TREE_MAX_COUNT)?;
        tree[pos].count = count as i16;

        let splitval = self.coder.read_int(rac, old_min, old_max - 1)?;
        tree[pos].splitval = splitval;

        let child_id = tree.len() as u32;
        tree[pos].child_id = child_id;
        tree.push(PropertyDecisionNode::default());
        tree.push(PropertyDecisionNode::default());

        // > splitval
        subrange[p].0 = splitval + 1;
        self.read_subtree(rac, child_id as usize, subrange, tree)?;

        // <= splitval
        subrange[p].0 = old_min;
        subrange[p].1 = splitval;
        self.read_subtree(rac, child_id as usize + 1, subrange, tree)?;

        subrange[p].1 = old_max;
        Ok(())
    }

    /// Encode a whole tree into `rac`
    ///
    /// # Panics
    /// If the tree holds a splitval or count outside the range the
    /// matching decoder would accept
    pub fn write_tree<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, tree: &Tree
    ) -> Result<(), ManiacEncodeErrors> {
        let mut subrange = self.ranges.clone();
        self.write_subtree(rac, 0, &mut subrange, tree)
    }

    fn write_subtree<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, pos: usize, subrange: &mut PropertyRanges, tree: &Tree
    ) -> Result<(), ManiacEncodeErrors> {
        let nb_properties = self.ranges.len() as i32;
        let node = tree[pos];
        let property = i32::from(node.property);
        self.coder.write_int(rac, 0, nb_properties, property + 1)?;
        if property < 0 {
            return Ok(());
        }

        let p = property as usize;
        let (old_min, old_max) = subrange[p];
        debug_assert!(old_min < old_max);

        self.coder.write_int(
            rac,
            CONTEXT_TREE_MIN_COUNT,
            CONTEXT_TREE_MAX_COUNT,
            i32::from(node.count)
        )?;
        self.coder
            .write_int(rac, old_min, old_max - 1, node.splitval)?;

        let child_id = node.child_id as usize;

        subrange[p].0 = node.splitval + 1;
        self.write_subtree(rac, child_id, subrange, tree)?;

        subrange[p].0 = old_min;
        subrange[p].1 = node.splitval;
        self.write_subtree(rac, child_id + 1, subrange, tree)?;

        subrange[p].1 = old_max;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flif_core::bytestream::ByteCursor;

    use super::*;

    /// root splits on property 0 at 0 with the given count, children
    /// are leaves
    fn two_level_tree(count: i16) -> Tree {
        let mut tree = Tree::new();
        tree[0] = PropertyDecisionNode {
            property: 0,
            count,
            splitval: 0,
            child_id: 1,
            leaf_id: 0
        };
        tree.push(PropertyDecisionNode::default());
        tree.push(PropertyDecisionNode::default());
        tree
    }

    #[test]
    fn warmup_visits_serve_the_root_leaf_then_split() {
        let ranges = [(-8, 8)];
        let mut coder = PropertySymbolCoder::new(&ranges, two_level_tree(3));

        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);

        // three warm-up visits keep a single shared model
        for _ in 0..3 {
            coder.write_int(&mut rac, &[5], 0, 100, 42).unwrap();
            assert_eq!(coder.leaf_count(), 1);
        }
        // the fourth visit fires the split and routes to a child
        coder.write_int(&mut rac, &[5], 0, 100, 42).unwrap();
        assert_eq!(coder.leaf_count(), 2);
        assert_eq!(coder.tree()[0].count, -1);
        assert_eq!(coder.tree()[1].leaf_id, 0);
        assert_eq!(coder.tree()[2].leaf_id, 1);
        rac.flush().unwrap();
    }

    #[test]
    fn count_zero_splits_on_first_visit() {
        let ranges = [(-8, 8)];
        let mut coder = PropertySymbolCoder::new(&ranges, two_level_tree(0));

        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        coder.write_int(&mut rac, &[-3], 0, 100, 1).unwrap();
        rac.flush().unwrap();

        // the split fired exactly once and the node is internal now
        assert_eq!(coder.leaf_count(), 2);
        assert_eq!(coder.tree()[0].count, -1);
    }

    #[test]
    fn warmup_matches_a_plain_leaf_bit_for_bit() {
        let ranges = [(-8, 8)];
        let symbols = [(3, 0, 100, 17), (-2, -50, 50, -13), (8, 0, 100, 99), (0, -5, 5, 0), (1, 0, 10, 7)];

        let mut leaf_sink = vec![];
        let mut rac = RacEncoder::new(&mut leaf_sink);
        let mut leaf_coder = PropertySymbolCoder::new(&ranges, Tree::new());
        for (prop, min, max, value) in symbols {
            leaf_coder.write_int(&mut rac, &[prop], min, max, value).unwrap();
        }
        rac.flush().unwrap();

        let mut warm_sink = vec![];
        let mut rac = RacEncoder::new(&mut warm_sink);
        let mut warm_coder = PropertySymbolCoder::new(&ranges, two_level_tree(10));
        for (prop, min, max, value) in symbols {
            warm_coder.write_int(&mut rac, &[prop], min, max, value).unwrap();
        }
        rac.flush().unwrap();

        // five visits against a count of ten never split, so the output
        // is the one the plain leaf produces
        assert_eq!(leaf_sink, warm_sink);
        assert_eq!(warm_coder.leaf_count(), 1);
    }

    #[test]
    fn single_point_ranges_decode_to_a_lone_leaf() {
        // a range with a single value cannot be split, the only tree
        // the coder accepts is a root leaf
        let ranges = [(0, 0)];
        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        MetaPropertySymbolCoder::new(&ranges)
            .write_tree(&mut rac, &Tree::new())
            .unwrap();
        rac.flush().unwrap();

        let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        let tree = MetaPropertySymbolCoder::new(&ranges).read_tree(&mut rac).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].property, -1);
    }
}
