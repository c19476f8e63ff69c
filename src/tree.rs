//! Build a Huffman tree from a frequency table.
//!
//! The tree lives in an arena: nodes are stored in a `Vec` and refer to their
//! children by index. Leaves take the first ids, in frequency table order;
//! every merge appends one internal node, so the root is always the last node.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, Symbol};

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode<S> {
    Leaf {
        symbol: S,
        weight: usize,
    },
    /// `weight` is the sum of both children's weights.
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl<S> TreeNode<S> {
    pub fn weight(&self) -> usize {
        match self {
            TreeNode::Leaf { weight, .. } => *weight,
            TreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    /// `(left, right)` children of an internal node, `None` for leaves.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { left, right, .. } => Some((*left, *right)),
        }
    }
}

/// A complete Huffman tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    nodes: Vec<TreeNode<S>>,
    root: NodeId,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for `frequencies`.
    ///
    /// The two lightest nodes are merged until one node is left; the first one
    /// taken out of the queue becomes the left child. Ties on weight are broken
    /// by insertion order, so the same table always gives the same tree.
    /// A table with a single symbol gives a tree that is just one leaf.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::invalid_input(
                "cannot build a Huffman tree from an empty frequency table",
            ));
        }

        let mut nodes: Vec<TreeNode<S>> = frequencies
            .iter()
            .map(|(symbol, weight)| TreeNode::Leaf {
                symbol: symbol.clone(),
                weight,
            })
            .collect();

        // Ids grow in insertion order, so (weight, id) is a total order that
        // breaks weight ties by insertion.
        let mut queue: BinaryHeap<Reverse<(usize, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight(), id)))
            .collect();

        loop {
            let Reverse((weight, first)) = match queue.pop() {
                Some(entry) => entry,
                None => {
                    return Err(HuffmanError::invalid_input("priority queue drained"));
                }
            };
            let Reverse((second_weight, second)) = match queue.pop() {
                Some(entry) => entry,
                None => {
                    // `first` was the only node left: it is the root.
                    log::trace!("huffman tree built with {} nodes", nodes.len());
                    return Ok(Self { nodes, root: first });
                }
            };

            let merged_weight = weight.checked_add(second_weight).ok_or_else(|| {
                HuffmanError::invalid_input("total frequency overflows usize")
            })?;
            let merged = nodes.len();
            nodes.push(TreeNode::Internal {
                weight: merged_weight,
                left: first,
                right: second,
            });
            log::trace!(
                "merge {}({}) + {}({}) -> {}",
                first,
                weight,
                second,
                second_weight,
                merged
            );
            queue.push(Reverse((merged_weight, merged)));
        }
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode<S> {
        &self.nodes[id]
    }

    pub fn root_node(&self) -> &TreeNode<S> {
        &self.nodes[self.root]
    }

    /// All nodes, indexed by `NodeId`.
    pub fn nodes(&self) -> &[TreeNode<S>] {
        &self.nodes
    }

    /// Number of nodes, leaves and internal nodes together.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Weight of the root, equal to the length of the counted input.
    pub fn weight(&self) -> usize {
        self.root_node().weight()
    }

    /// Whether the tree is a lone leaf (an alphabet of one symbol).
    pub fn is_single_leaf(&self) -> bool {
        self.root_node().is_leaf()
    }
}
