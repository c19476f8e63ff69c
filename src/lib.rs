//! # Huffman coding, end to end
//! This project is a toy library that builds an optimal prefix-free code for a symbol stream
//! and uses it to turn text into a string of bits and back.
//! Symbols are counted, a Huffman tree is grown from the counts with a min-priority queue,
//! codes are read off the tree, and the tree itself drives decoding.
//! Everything stays in memory: there is no file format and no stored code table.
pub mod bit_stream;

pub mod code_table;

pub mod codec;

pub mod error;

pub mod frequency;

pub mod render;

pub mod report;

pub mod tree;

pub use code_table::CodeTable;
pub use codec::{compress_and_decompress, EncodedStream, HuffmanCodec};
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyTable, Symbol};
pub use tree::{HuffmanTree, NodeId, TreeNode};
