//! Derive the symbol to bit-string mapping from a Huffman tree.

use std::collections::HashMap;

use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffmanTree, NodeId, TreeNode};

/// Code given to the only symbol of a one-symbol alphabet.
/// Walking a lone leaf yields an empty path, which would encode to nothing.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Mapping from symbol to its prefix-free code, a string of '0' and '1'.
///
/// Entries iterate in left-to-right leaf order of the tree they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    entries: Vec<(S, String)>,
    index: HashMap<S, usize>,
}

impl<S: Symbol> CodeTable<S> {
    /// Walk `tree` depth first, appending '0' on the way left and '1' on the
    /// way right, and record the path at every leaf.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut table = Self::default();
        if tree.is_single_leaf() {
            if let Some(symbol) = tree.root_node().symbol() {
                table.insert(symbol.clone(), SINGLE_SYMBOL_CODE.to_string());
            }
            return table;
        }
        let mut path = String::new();
        table.collect(tree, tree.root(), &mut path);
        table
    }

    fn collect(&mut self, tree: &HuffmanTree<S>, id: NodeId, path: &mut String) {
        match tree.node(id) {
            TreeNode::Leaf { symbol, .. } => {
                self.insert(symbol.clone(), path.clone());
            }
            TreeNode::Internal { left, right, .. } => {
                path.push('0');
                self.collect(tree, *left, path);
                path.pop();
                path.push('1');
                self.collect(tree, *right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, symbol: S, code: String) {
        log::debug!("symbol {:?} huffman code {}", symbol, code);
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push((symbol, code));
    }

    /// Code of `symbol`, if the table has one.
    pub fn get(&self, symbol: &S) -> Option<&str> {
        self.index
            .get(symbol)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &str)> + '_ {
        self.entries
            .iter()
            .map(|(symbol, code)| (symbol, code.as_str()))
    }

    /// Total encoded length in bits of an input with these `frequencies`:
    /// the sum of count times code length. Symbols without a code count as zero.
    /// Saturates at `usize::MAX` for distributions too heavy to encode in memory.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|code| count.saturating_mul(code.len()))
            })
            .fold(0usize, usize::saturating_add)
    }

    /// Whether no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.entries.iter().map(|(_, code)| code.as_str()).collect();
        // After sorting, a code that prefixes another sorts right before one of them.
        codes.sort_unstable();
        codes
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0]))
    }
}

impl<S: Symbol> Default for CodeTable<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}
