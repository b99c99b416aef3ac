//! Framed streams of many encoded rows

use std::io::{Read, Write};

use prost::Message;

use crate::error::{RecordError, Result};
use crate::model::Row;

/// Delimiter written after each record in a pipe-delimited stream
pub const PIPE_DELIMITER: &[u8] = b"==PIPE_PROTO_DELIMITER==";

/// How records are separated within one byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Each record prefixed by its varint byte length
    LengthPrefixed,
    /// Each record followed by [`PIPE_DELIMITER`]
    PipeDelimited,
}

/// Writes rows to an underlying writer, one frame per row
pub struct RecordWriter<W: Write> {
    inner: W,
    framing: Framing,
    written: usize,
    buf: Vec<u8>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, framing: Framing) -> Self {
        Self {
            inner,
            framing,
            written: 0,
            buf: Vec::new(),
        }
    }

    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.buf.clear();
        match self.framing {
            Framing::LengthPrefixed => row.encode_length_delimited(&mut self.buf)?,
            Framing::PipeDelimited => {
                row.encode(&mut self.buf)?;
                let record_len = self.buf.len();
                self.buf.extend_from_slice(PIPE_DELIMITER);
                // The first delimiter must be the one just appended, including
                // matches that straddle the record's tail.
                if find(&self.buf, PIPE_DELIMITER) != Some(record_len) {
                    return Err(RecordError::DelimiterCollision {
                        index: self.written,
                    });
                }
            }
        }
        self.inner.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Number of rows written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the underlying writer and return the number of rows written
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        log::debug!("wrote {} framed rows ({:?})", self.written, self.framing);
        Ok(self.written)
    }
}

/// Read every row from a framed stream
pub fn read_rows<R: Read>(mut reader: R, framing: Framing) -> Result<Vec<Row>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    decode_rows(&input, framing)
}

/// Decode every row from an in-memory framed stream
pub fn decode_rows(input: &[u8], framing: Framing) -> Result<Vec<Row>> {
    let rows = match framing {
        Framing::LengthPrefixed => decode_length_prefixed(input)?,
        Framing::PipeDelimited => decode_pipe_delimited(input)?,
    };
    log::debug!("decoded {} framed rows ({:?})", rows.len(), framing);
    Ok(rows)
}

fn decode_length_prefixed(mut buf: &[u8]) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    while !buf.is_empty() {
        let index = rows.len();
        let len = prost::encoding::decode_varint(&mut buf)
            .map_err(|_| RecordError::TruncatedFrame { index })?;
        let len = usize::try_from(len).map_err(|_| RecordError::TruncatedFrame { index })?;
        if len > buf.len() {
            return Err(RecordError::TruncatedFrame { index });
        }
        let (frame, rest) = buf.split_at(len);
        rows.push(Row::decode(frame)?);
        buf = rest;
    }
    Ok(rows)
}

/// Every segment is a record; only an empty tail after the last delimiter
/// is dropped, since an all-unset row encodes to zero bytes.
fn decode_pipe_delimited(input: &[u8]) -> Result<Vec<Row>> {
    let mut segments = split_frames(input, PIPE_DELIMITER);
    if segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
        .into_iter()
        .map(|segment| Row::decode(segment).map_err(RecordError::from))
        .collect()
}

/// Whether the input contains the pipe frame delimiter
pub(crate) fn contains_delimiter(input: &[u8]) -> bool {
    find(input, PIPE_DELIMITER).is_some()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn split_frames<'a>(mut input: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    while let Some(pos) = find(input, delimiter) {
        segments.push(&input[..pos]);
        input = &input[pos + delimiter.len()..];
    }
    segments.push(input);
    segments
}
