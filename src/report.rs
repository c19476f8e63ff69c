//! Summary of one compress/decompress run, ready to display or serialize.

use serde::{Deserialize, Serialize};

use crate::codec::HuffmanCodec;
use crate::error::Result;

/// One row of the code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub symbol: String,
    pub frequency: usize,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecReport {
    /// Number of distinct symbols.
    pub symbols: usize,
    /// Number of input symbols.
    pub input_len: usize,
    pub encoded_bits: usize,
    /// Code table rows, in tree order.
    pub codes: Vec<CodeEntry>,
    pub encoded: String,
    pub decoded: String,
    pub round_trip_ok: bool,
}

impl CodecReport {
    /// Compress `text`, decompress the result and collect what happened.
    pub fn from_text(text: &str) -> Result<Self> {
        let codec = HuffmanCodec::from_text(text)?;
        let encoded = codec.encode_text(text)?;
        let decoded = codec.decode_to_string(&encoded)?;

        let frequencies = codec.frequencies();
        let codes = codec
            .code_table()
            .iter()
            .map(|(symbol, code)| CodeEntry {
                symbol: symbol.to_string(),
                frequency: frequencies.get(symbol).unwrap_or_default(),
                code: code.to_string(),
            })
            .collect();

        Ok(Self {
            symbols: frequencies.len(),
            input_len: frequencies.total(),
            encoded_bits: encoded.len(),
            codes,
            round_trip_ok: decoded == text,
            encoded: encoded.into_string(),
            decoded,
        })
    }

    /// Bits per input symbol, 0.0 for empty input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.input_len as f64
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
