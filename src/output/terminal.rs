//! Colored terminal output

use std::io::Write;

use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::error::Result;
use crate::model::{Cell, Row, RowKind};

use super::OutputFormatter;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Terminal output: one table of cells per row
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "{}", RULE)?;
        writeln!(writer, " dsrf-records: {} rows", rows.len())?;
        writeln!(writer, "{}", RULE)?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_row(&self, row: &Row, writer: &mut dyn WriteColor) -> Result<()> {
        let kind = row.kind();
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(kind_color(kind))).set_bold(true);

        writer.set_color(&spec)?;
        write!(
            writer,
            "row {}  {}",
            row.row_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.r#type.as_deref().unwrap_or("-"),
        )?;
        writer.reset()?;
        writeln!(writer, "  ({})", kind)?;

        if row.cells.is_empty() {
            writeln!(writer, "  (no cells)")?;
            writeln!(writer)?;
            return Ok(());
        }

        let mut builder = Builder::default();
        builder.push_record(
            ["#", "Name", "Type", "Values"]
                .into_iter()
                .map(String::from),
        );

        let mut inconsistent = 0;
        for (i, cell) in row.cells.iter().enumerate() {
            let mut name = cell.name.clone().unwrap_or_default();
            if !cell.is_consistent() {
                inconsistent += 1;
                name.push_str(" *");
                log::warn!(
                    "row {:?}: cell {:?} holds values outside its declared type",
                    row.row_number,
                    cell.name
                );
            }
            builder.push_record([(i + 1).to_string(), name, type_label(cell), cell.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        writeln!(writer, "{}", table)?;

        if inconsistent > 0 {
            writer.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(
                writer,
                "* {} cell(s) hold values that do not match their declared type",
                inconsistent
            )?;
            writer.reset()?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(rows, writer)?;

        if rows.is_empty() {
            writeln!(writer, "No rows found.")?;
            return Ok(());
        }

        for row in rows {
            self.write_row(row, writer)?;
        }
        Ok(())
    }
}

fn kind_color(kind: RowKind) -> Color {
    match kind {
        RowKind::Head | RowKind::Foot => Color::Green,
        RowKind::Body => Color::Cyan,
        RowKind::Unknown => Color::Yellow,
    }
}

/// Declared type name, `-` when unset, `?<code>` when unknown
fn type_label(cell: &Cell) -> String {
    match cell.data_type() {
        Ok(Some(data_type)) => data_type.to_string(),
        Ok(None) => "-".to_string(),
        Err(_) => format!("?{}", cell.cell_type.unwrap_or_default()),
    }
}
