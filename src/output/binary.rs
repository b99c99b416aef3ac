//! Binary record output

use std::io::Write;

use termcolor::WriteColor;

use crate::codec::{encode_row, Framing, RecordWriter};
use crate::error::{RecordError, Result};
use crate::model::Row;

use super::OutputFormatter;

/// A single binary record; exactly one row is required
pub struct BinaryOutput;

impl OutputFormatter for BinaryOutput {
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        match rows {
            [row] => {
                writer.write_all(&encode_row(row))?;
                Ok(())
            }
            _ => Err(RecordError::ExpectedSingleRow { count: rows.len() }),
        }
    }
}

/// A framed stream of binary records
pub struct StreamOutput {
    framing: Framing,
}

impl StreamOutput {
    pub fn new(framing: Framing) -> Self {
        Self { framing }
    }
}

impl OutputFormatter for StreamOutput {
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        let mut records = RecordWriter::new(writer, self.framing);
        records.write_rows(rows)?;
        records.finish()?;
        Ok(())
    }
}
