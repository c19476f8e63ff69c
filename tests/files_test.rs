use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use huffman_toy::bit_stream::PackedBits;
use huffman_toy::report::CodecReport;
use huffman_toy::{render, EncodedStream, HuffmanCodec, Symbol};

/// Struct to manage test setup
pub struct TestSetup {
    pub temp_dir: PathBuf,
    pub test_data_dir: PathBuf,
}

impl TestSetup {
    /// Creates a new test setup with an output directory and a predefined test data directory
    pub fn new(temp_dir: PathBuf, test_data_dir: PathBuf) -> io::Result<Self> {
        if !temp_dir.exists() {
            std::fs::create_dir_all(&temp_dir)?;
        }
        Ok(Self {
            temp_dir,
            test_data_dir,
        })
    }

    /// Creates a file with the given content in the output directory
    pub fn create_file(&self, file_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let file_path = self.temp_dir.join(file_name);
        let mut file = File::create(&file_path)?;
        file.write_all(content)?;
        Ok(file_path)
    }

    /// Reads the content of a file at the given path
    pub fn read_path(&self, file_path: &Path) -> io::Result<Vec<u8>> {
        let mut file = File::open(file_path)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Reads the content of a predefined test file from the test data directory
    pub fn read_test_file(&self, file_name: &str) -> io::Result<Vec<u8>> {
        self.read_path(&self.test_data_dir.join(file_name))
    }
}

/// How a data file is split into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SymbolKind {
    Chars,
    Bytes,
}

const DATA_FILES_CONFIG: &str = "manifest.json";

/// Get the data file -> symbol kind map from the json manifest
fn get_data_files(setup: &TestSetup) -> io::Result<HashMap<String, SymbolKind>> {
    let manifest = setup.read_test_file(DATA_FILES_CONFIG)?;
    serde_json::from_slice(&manifest).map_err(io::Error::from)
}

/// Macro to standardize test execution over every file of the manifest
#[macro_export]
macro_rules! run_tests {
    ($test_name:ident, $test_in_dir:expr, $test_out_dir:expr, $test_body:expr) => {
        #[test]
        fn $test_name() -> std::io::Result<()> {
            let setup = TestSetup::new(
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join($test_out_dir),
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join($test_in_dir),
            )?;
            let mut files: Vec<(String, SymbolKind)> =
                get_data_files(&setup)?.into_iter().collect();
            files.sort();
            for (file, kind) in files {
                let input = setup.read_test_file(&file)?;
                $test_body(&setup, &file, kind, input)?;
            }
            Ok(())
        }
    };
}

/// Round trip through the string form and through the packed form.
fn check_round_trip<S: Symbol>(symbols: &[S]) -> io::Result<()> {
    let codec = HuffmanCodec::from_symbols(symbols.iter().cloned())?;
    let encoded = codec.encode(symbols)?;
    assert_eq!(encoded.len(), codec.encoded_len());
    assert!(codec.code_table().is_prefix_free());
    assert_eq!(codec.decode(&encoded)?, symbols);
    assert_eq!(codec.decode_packed(&encoded.pack())?, symbols);
    Ok(())
}

fn symbols_of(kind: SymbolKind, input: &[u8]) -> io::Result<Vec<String>> {
    Ok(match kind {
        SymbolKind::Chars => std::str::from_utf8(input)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .chars()
            .map(String::from)
            .collect(),
        SymbolKind::Bytes => input.iter().map(|b| format!("{:02x}", b)).collect(),
    })
}

run_tests!(
    data_files_round_trip,
    "tests/data",
    "tests/out",
    |_: &TestSetup, file: &str, kind: SymbolKind, input: Vec<u8>| -> io::Result<()> {
        println!("{}: {} bytes as {:?}", file, input.len(), kind);
        match kind {
            SymbolKind::Chars => {
                let text = String::from_utf8(input)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                check_round_trip(&text.chars().collect::<Vec<char>>())
            }
            SymbolKind::Bytes => check_round_trip(&input),
        }
    }
);

run_tests!(
    data_files_string_symbols,
    "tests/data",
    "tests/out",
    |_: &TestSetup, _: &str, kind: SymbolKind, input: Vec<u8>| -> io::Result<()> {
        check_round_trip(&symbols_of(kind, &input)?)
    }
);

run_tests!(
    data_files_packed_on_disk,
    "tests/data",
    "tests/out",
    |setup: &TestSetup, file: &str, _: SymbolKind, input: Vec<u8>| -> io::Result<()> {
        let codec = HuffmanCodec::from_bytes(&input)?;
        let encoded = codec.encode(&input)?;
        let packed = encoded.pack();

        let out_path = setup.create_file(&format!("{}.huff", file), &packed.bytes)?;
        let reread = PackedBits {
            bytes: setup.read_path(&out_path)?,
            bit_len: packed.bit_len,
        };
        assert_eq!(EncodedStream::unpack(&reread)?, encoded);
        assert_eq!(codec.decode_packed(&reread)?, input);
        // Huffman never needs more than 8 bits per byte on average here.
        assert!(reread.bytes.len() <= input.len());
        Ok(())
    }
);

run_tests!(
    data_files_reports,
    "tests/data",
    "tests/out",
    |setup: &TestSetup, file: &str, kind: SymbolKind, input: Vec<u8>| -> io::Result<()> {
        if kind != SymbolKind::Chars {
            return Ok(());
        }
        let text = String::from_utf8(input)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let report = CodecReport::from_text(&text)?;
        assert!(report.round_trip_ok);
        assert_eq!(report.input_len, text.chars().count());
        let json = report.to_json().map_err(io::Error::from)?;
        let report_path = setup.create_file(&format!("{}.json", file), json.as_bytes())?;
        let parsed: CodecReport =
            serde_json::from_slice(&setup.read_path(&report_path)?).map_err(io::Error::from)?;
        assert_eq!(parsed, report);

        let codec = HuffmanCodec::from_text(&text)?;
        if let Some(tree) = codec.tree() {
            let dot = render::to_dot(tree);
            assert!(dot.starts_with("digraph huffman {"));
            setup.create_file(&format!("{}.dot", file), dot.as_bytes())?;
        }
        Ok(())
    }
);
