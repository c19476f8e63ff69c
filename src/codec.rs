//! Encode symbols into a bit string and decode them back.
//!
//! Encoding looks every symbol up in a [`CodeTable`]; decoding walks the
//! [`HuffmanTree`] bit by bit, emitting a symbol and returning to the root
//! whenever a leaf is reached. A stream is only well formed if it ends with
//! the cursor back at the root.

use std::fmt;
use std::str::FromStr;

use crate::bit_stream::{BitWriter, PackedBits};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffmanTree, NodeId, TreeNode};

const ZERO: char = '0';
const ONE: char = '1';

/// An encoded bit sequence, held as a string of '0' and '1'.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct EncodedStream(String);

impl EncodedStream {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.chars().map(|c| c == ONE)
    }

    /// Pack the bits eight to a byte.
    pub fn pack(&self) -> PackedBits {
        let mut writer = BitWriter::with_capacity(self.len());
        self.bits().for_each(|bit| writer.write_bit(bit));
        writer.finish()
    }

    /// Rebuild the bit string from its packed form.
    pub fn unpack(packed: &PackedBits) -> Result<Self> {
        let reader = packed.reader()?;
        Ok(Self(
            reader.map(|bit| if bit { ONE } else { ZERO }).collect(),
        ))
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedStream {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for EncodedStream {
    type Err = HuffmanError;

    /// Accept only '0' and '1'.
    fn from_str(s: &str) -> Result<Self> {
        match s.char_indices().find(|&(_, c)| c != ZERO && c != ONE) {
            Some((at, c)) => Err(invalid_bit(at, c)),
            None => Ok(Self(s.to_string())),
        }
    }
}

fn invalid_bit(at: usize, c: char) -> HuffmanError {
    HuffmanError::malformed(format!("invalid bit {:?} at offset {}", c, at))
}

/// Concatenate the codes of `symbols`, in input order.
///
/// Fails with `MissingCode` on the first symbol the table does not know; no
/// partial output is returned.
pub fn encode<'s, S, I>(symbols: I, table: &CodeTable<S>) -> Result<EncodedStream>
where
    S: Symbol + 's,
    I: IntoIterator<Item = &'s S>,
{
    let mut bits = String::new();
    for symbol in symbols {
        let code = table
            .get(symbol)
            .ok_or_else(|| HuffmanError::missing_code(symbol))?;
        bits.push_str(code);
    }
    Ok(EncodedStream(bits))
}

/// Decode a string of '0' and '1' against the tree that produced it.
pub fn decode<S: Symbol>(bits: &str, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let mut walker = TreeWalker::new(tree);
    for (at, c) in bits.char_indices() {
        let bit = match c {
            ZERO => false,
            ONE => true,
            _ => return Err(invalid_bit(at, c)),
        };
        walker.step(bit)?;
    }
    walker.finish()
}

/// Decode packed bits against the tree that produced them.
pub fn decode_packed<S: Symbol>(packed: &PackedBits, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let mut walker = TreeWalker::new(tree);
    for bit in packed.reader()? {
        walker.step(bit)?;
    }
    walker.finish()
}

/// Decoding state: a cursor into the tree plus the symbols emitted so far.
/// The cursor never rests on a leaf; reaching one emits it and resets to root.
struct TreeWalker<'t, S> {
    tree: &'t HuffmanTree<S>,
    cursor: NodeId,
    consumed: usize,
    output: Vec<S>,
}

impl<'t, S: Symbol> TreeWalker<'t, S> {
    fn new(tree: &'t HuffmanTree<S>) -> Self {
        Self {
            tree,
            cursor: tree.root(),
            consumed: 0,
            output: Vec::new(),
        }
    }

    fn step(&mut self, bit: bool) -> Result<()> {
        let next = match self.tree.node(self.cursor) {
            TreeNode::Internal { left, right, .. } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
            // A lone leaf root: its code is the single bit '0'.
            TreeNode::Leaf { .. } if !bit => self.cursor,
            TreeNode::Leaf { .. } => {
                return Err(HuffmanError::malformed(format!(
                    "bit 1 at offset {} has no branch in a single-symbol tree",
                    self.consumed
                )));
            }
        };
        self.consumed += 1;

        if let TreeNode::Leaf { symbol, .. } = self.tree.node(next) {
            self.output.push(symbol.clone());
            self.cursor = self.tree.root();
        } else {
            self.cursor = next;
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<S>> {
        if self.cursor != self.tree.root() {
            return Err(HuffmanError::malformed(format!(
                "stream of {} bits ends inside a code",
                self.consumed
            )));
        }
        Ok(self.output)
    }
}

/// Everything built from one input: its frequencies, tree and code table.
///
/// The tree is absent when the input was empty; such a codec encodes only the
/// empty sequence and decodes only the empty stream.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S: Symbol> {
    frequencies: FrequencyTable<S>,
    tree: Option<HuffmanTree<S>>,
    table: CodeTable<S>,
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Count `symbols` and build the tree and code table for them.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        Self::from_frequencies(FrequencyTable::count(symbols))
    }

    /// Build the tree and code table for a known distribution.
    pub fn from_frequencies(frequencies: FrequencyTable<S>) -> Result<Self> {
        if frequencies.is_empty() {
            return Ok(Self {
                frequencies,
                tree: None,
                table: CodeTable::default(),
            });
        }
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        log::debug!(
            "codec ready: {} symbols, {} input symbols, {} encoded bits",
            table.len(),
            frequencies.total(),
            table.weighted_length(&frequencies)
        );
        Ok(Self {
            frequencies,
            tree: Some(tree),
            table,
        })
    }

    pub fn encode(&self, symbols: &[S]) -> Result<EncodedStream> {
        encode(symbols, &self.table)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<S>> {
        self.decode_str(stream.as_str())
    }

    /// Decode a raw '0'/'1' string.
    pub fn decode_str(&self, bits: &str) -> Result<Vec<S>> {
        match &self.tree {
            Some(tree) => decode(bits, tree),
            None if bits.is_empty() => Ok(Vec::new()),
            None => Err(HuffmanError::malformed(
                "non-empty stream for a codec built from empty input",
            )),
        }
    }

    pub fn decode_packed(&self, packed: &PackedBits) -> Result<Vec<S>> {
        match &self.tree {
            Some(tree) => decode_packed(packed, tree),
            None if packed.bit_len == 0 => Ok(Vec::new()),
            None => Err(HuffmanError::malformed(
                "non-empty stream for a codec built from empty input",
            )),
        }
    }

    pub fn frequencies(&self) -> &FrequencyTable<S> {
        &self.frequencies
    }

    pub fn tree(&self) -> Option<&HuffmanTree<S>> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Length in bits of the encoded input the codec was built from.
    pub fn encoded_len(&self) -> usize {
        self.table.weighted_length(&self.frequencies)
    }
}

impl HuffmanCodec<char> {
    /// Codec over the characters of `text`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_symbols(text.chars())
    }

    pub fn encode_text(&self, text: &str) -> Result<EncodedStream> {
        let symbols: Vec<char> = text.chars().collect();
        self.encode(&symbols)
    }

    pub fn decode_to_string(&self, stream: &EncodedStream) -> Result<String> {
        Ok(self.decode(stream)?.into_iter().collect())
    }
}

impl HuffmanCodec<u8> {
    /// Codec over the raw bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_symbols(data.iter().copied())
    }
}

/// Build a codec for `text`, encode it and decode the result again.
/// Returns the encoded stream together with the decoded text.
pub fn compress_and_decompress(text: &str) -> Result<(EncodedStream, String)> {
    let codec = HuffmanCodec::from_text(text)?;
    let encoded = codec.encode_text(text)?;
    let decoded = codec.decode_to_string(&encoded)?;
    Ok((encoded, decoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(text: &str) -> HuffmanCodec<char> {
        HuffmanCodec::from_text(text).unwrap()
    }

    #[test]
    fn test_encode_concatenates_codes() {
        let codec = codec("aab");
        // a(2) outweighs b(1): b pops first and takes the '0' branch.
        assert_eq!(codec.code_table().get(&'b'), Some("0"));
        assert_eq!(codec.code_table().get(&'a'), Some("1"));
        let encoded = codec.encode_text("aab").unwrap();
        assert_eq!(encoded.as_str(), "110");
        assert_eq!(encoded.len(), codec.encoded_len());
    }

    #[test]
    fn test_encode_missing_code() {
        let codec = codec("abc");
        let err = codec.encode_text("abz").unwrap_err();
        assert_eq!(
            err,
            HuffmanError::MissingCode {
                symbol: "'z'".to_string()
            }
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let text = "this is an example of a huffman tree";
        let codec = codec(text);
        let encoded = codec.encode_text(text).unwrap();
        assert_eq!(codec.decode_to_string(&encoded).unwrap(), text);
    }

    #[test]
    fn test_decode_truncated_stream() {
        let text = "abracadabra";
        let codec = codec(text);
        let encoded = codec.encode_text(text).unwrap();
        // Append all but the last bit of a multi-bit code.
        let r_code = codec.code_table().get(&'r').unwrap();
        let cut = format!("{}{}", encoded, &r_code[..r_code.len() - 1]);
        let err = codec.decode_str(&cut).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedStream { .. }));
    }

    #[test]
    fn test_decode_invalid_bit() {
        let codec = codec("abc");
        let err = codec.decode_str("01x0").unwrap_err();
        assert_eq!(
            err,
            HuffmanError::MalformedStream {
                reason: "invalid bit 'x' at offset 2".to_string()
            }
        );
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let codec = codec("aaaa");
        let encoded = codec.encode_text("aaaa").unwrap();
        assert_eq!(encoded.as_str(), "0000");
        assert_eq!(codec.decode_to_string(&encoded).unwrap(), "aaaa");

        let err = codec.decode_str("0010").unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedStream { .. }));
    }

    #[test]
    fn test_empty_input() {
        let codec = codec("");
        assert!(codec.frequencies().is_empty());
        assert!(codec.tree().is_none());
        assert!(codec.code_table().is_empty());
        let encoded = codec.encode_text("").unwrap();
        assert!(encoded.is_empty());
        assert_eq!(codec.decode_to_string(&encoded).unwrap(), "");
        assert!(codec.decode_str("0").is_err());
    }

    #[test]
    fn test_stream_from_str() {
        let stream: EncodedStream = "0110".parse().unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.to_string(), "0110");
        assert!("01 10".parse::<EncodedStream>().is_err());
    }

    #[test]
    fn test_pack_unpack() {
        let stream: EncodedStream = "1011001110".parse().unwrap();
        let packed = stream.pack();
        assert_eq!(packed.bit_len, 10);
        assert_eq!(packed.bytes, vec![0b11001101, 0b00000001]);
        assert_eq!(EncodedStream::unpack(&packed).unwrap(), stream);

        let short = PackedBits {
            bytes: vec![0],
            bit_len: 9,
        };
        assert!(EncodedStream::unpack(&short).is_err());
    }

    #[test]
    fn test_decode_packed() {
        let text = "packed bits decode the same way";
        let codec = codec(text);
        let encoded = codec.encode_text(text).unwrap();
        let decoded: String = codec
            .decode_packed(&encoded.pack())
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_byte_codec() {
        let data = [0u8, 255, 0, 7, 7, 7, 0];
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let encoded = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), data.to_vec());
    }

    #[test]
    fn test_compress_and_decompress() {
        let (encoded, decoded) = compress_and_decompress("سلام دنیا").unwrap();
        assert_eq!(decoded, "سلام دنیا");
        assert!(!encoded.is_empty());
    }
}
