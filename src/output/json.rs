//! JSON output

use termcolor::WriteColor;

use crate::codec::json::write_json;
use crate::error::Result;
use crate::model::Row;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        write_json(writer, rows, self.pretty)
    }
}
