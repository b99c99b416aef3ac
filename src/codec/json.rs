//! JSON text form of rows

use std::io::Write;

use serde_json::Value;

use crate::error::{RecordError, Result};
use crate::model::Row;

/// Parse a single row object or an array of rows
pub fn from_json(input: &[u8]) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_slice(input)?;

    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        _ => Err(RecordError::UnsupportedFormat(
            "JSON input must be a row object or an array of rows".to_string(),
        )),
    }
}

/// Serialize rows as a JSON array
pub fn to_json(rows: &[Row], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(rows)?
    } else {
        serde_json::to_string(rows)?
    };
    Ok(json)
}

/// Write rows as a JSON array followed by a newline
pub fn write_json<W: Write + ?Sized>(writer: &mut W, rows: &[Row], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, rows)?;
    } else {
        serde_json::to_writer(&mut *writer, rows)?;
    }
    writeln!(writer)?;
    Ok(())
}
