//! Codec layer for reading and writing records in their serialized forms

pub mod json;
pub mod stream;

use std::path::Path;

use prost::Message;

use crate::config::InputFormat;
use crate::error::{RecordError, Result};
use crate::model::{Cell, Row};

pub use stream::{decode_rows, read_rows, Framing, RecordWriter, PIPE_DELIMITER};

/// Encode a single row in the binary wire form
pub fn encode_row(row: &Row) -> Vec<u8> {
    row.encode_to_vec()
}

/// Decode a single row; unknown fields are skipped
pub fn decode_row(bytes: &[u8]) -> Result<Row> {
    Ok(Row::decode(bytes)?)
}

/// Encode a single cell in the binary wire form
pub fn encode_cell(cell: &Cell) -> Vec<u8> {
    cell.encode_to_vec()
}

/// Decode a single cell; unknown fields are skipped
pub fn decode_cell(bytes: &[u8]) -> Result<Cell> {
    Ok(Cell::decode(bytes)?)
}

/// Trait for decoding rows from a serialized input
pub trait Decoder: Send + Sync {
    /// The input format this decoder reads
    fn format(&self) -> InputFormat;

    /// Check if this decoder handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Decode every row in the input
    fn decode(&self, input: &[u8]) -> Result<Vec<Row>>;
}

/// Decoder for a single binary record
pub struct BinaryDecoder;

impl Decoder for BinaryDecoder {
    fn format(&self) -> InputFormat {
        InputFormat::Binary
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "pb" | "bin")
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<Row>> {
        Ok(vec![decode_row(input)?])
    }
}

/// Decoder for framed multi-record streams
pub struct StreamDecoder {
    framing: Framing,
}

impl StreamDecoder {
    pub fn new(framing: Framing) -> Self {
        Self { framing }
    }
}

impl Decoder for StreamDecoder {
    fn format(&self) -> InputFormat {
        match self.framing {
            Framing::LengthPrefixed => InputFormat::LengthPrefixed,
            Framing::PipeDelimited => InputFormat::PipeDelimited,
        }
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.framing {
            Framing::LengthPrefixed => matches!(ext, "pbs" | "ldpb"),
            Framing::PipeDelimited => ext == "pipe",
        }
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<Row>> {
        decode_rows(input, self.framing)
    }
}

/// Decoder for the JSON text form
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "json"
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<Row>> {
        json::from_json(input)
    }
}

/// Factory for choosing a decoder by format, content or file extension
pub struct DecoderFactory {
    decoders: Vec<Box<dyn Decoder>>,
}

impl Default for DecoderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderFactory {
    /// Create a new decoder factory with all supported decoders
    pub fn new() -> Self {
        Self {
            decoders: vec![
                Box::new(BinaryDecoder),
                Box::new(StreamDecoder::new(Framing::LengthPrefixed)),
                Box::new(StreamDecoder::new(Framing::PipeDelimited)),
                Box::new(JsonDecoder),
            ],
        }
    }

    /// Get the decoder for a concrete format
    pub fn get_decoder(&self, format: InputFormat) -> Result<&dyn Decoder> {
        self.decoders
            .iter()
            .find(|d| d.format() == format)
            .map(|d| d.as_ref())
            .ok_or_else(|| RecordError::UnsupportedFormat(format!("{:?}", format)))
    }

    /// Resolve `Auto` by sniffing the content, then the file extension.
    ///
    /// Anything unrecognised is read as a single binary record.
    pub fn resolve(&self, format: InputFormat, input: &[u8], path: Option<&Path>) -> InputFormat {
        if format != InputFormat::Auto {
            return format;
        }
        if let Some(detected) = detect_format(input) {
            return detected;
        }

        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match self.decoders.iter().find(|d| d.supports_extension(&ext)) {
            Some(decoder) => decoder.format(),
            None => {
                log::debug!("no format detected for extension {:?}, reading binary", ext);
                InputFormat::Binary
            }
        }
    }

    /// Decode input using the resolved decoder
    pub fn decode(&self, format: InputFormat, input: &[u8], path: Option<&Path>) -> Result<Vec<Row>> {
        let format = self.resolve(format, input, path);
        log::debug!("decoding {} bytes as {:?}", input.len(), format);
        self.get_decoder(format)?.decode(input)
    }
}

/// Detect the input format from content.
///
/// A heuristic: UTF-8 text opening with `{` or `[` is JSON, and any input
/// containing the pipe delimiter bytes is a pipe-delimited stream, even a
/// single binary record whose string values happen to contain it. Pass an
/// explicit format when binary input could look like either.
pub fn detect_format(input: &[u8]) -> Option<InputFormat> {
    let first = input.iter().find(|b| !b.is_ascii_whitespace())?;
    if matches!(first, b'{' | b'[') && std::str::from_utf8(input).is_ok() {
        return Some(InputFormat::Json);
    }
    if stream::contains_delimiter(input) {
        return Some(InputFormat::PipeDelimited);
    }
    None
}
