//! Row counts by type and kind

use std::io::Write;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use termcolor::WriteColor;

use crate::error::Result;
use crate::model::Row;

use super::OutputFormatter;

/// Label used for rows without a type
const UNSET_TYPE: &str = "(unset)";

/// Aggregate counts over a set of rows, keyed in first-seen order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RowSummary {
    pub rows: usize,
    pub cells: usize,
    pub inconsistent_cells: usize,
    pub by_type: IndexMap<String, usize, FxBuildHasher>,
    pub by_kind: IndexMap<&'static str, usize, FxBuildHasher>,
}

impl RowSummary {
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary.rows += 1;
            summary.cells += row.cell_count();
            summary.inconsistent_cells += row.cells.iter().filter(|c| !c.is_consistent()).count();

            let row_type = row.r#type.as_deref().unwrap_or(UNSET_TYPE);
            *summary.by_type.entry(row_type.to_string()).or_insert(0) += 1;
            *summary.by_kind.entry(row.kind().as_str()).or_insert(0) += 1;
        }
        summary
    }
}

/// Summary output, as text or JSON
pub struct SummaryOutput {
    json: bool,
    pretty: bool,
}

impl SummaryOutput {
    pub fn new(json: bool, pretty: bool) -> Self {
        Self { json, pretty }
    }
}

impl OutputFormatter for SummaryOutput {
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()> {
        let summary = RowSummary::from_rows(rows);

        if self.json {
            if self.pretty {
                serde_json::to_writer_pretty(&mut *writer, &summary)?;
            } else {
                serde_json::to_writer(&mut *writer, &summary)?;
            }
            writeln!(writer)?;
            return Ok(());
        }

        writeln!(writer, "Rows:  {}", summary.rows)?;
        writeln!(writer, "Cells: {}", summary.cells)?;
        if summary.inconsistent_cells > 0 {
            writeln!(writer, "Inconsistent cells: {}", summary.inconsistent_cells)?;
        }
        writeln!(writer)?;
        writeln!(writer, "By kind:")?;
        for (kind, count) in &summary.by_kind {
            writeln!(writer, "  {:<8} {}", kind, count)?;
        }
        writeln!(writer, "By type:")?;
        for (row_type, count) in &summary.by_type {
            writeln!(writer, "  {:<8} {}", row_type, count)?;
        }
        Ok(())
    }
}
