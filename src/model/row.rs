//! Row record: one line of a tabular report

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::row_type::{classify, RowKind};

/// One report line: a row-type discriminator, its source line number and
/// the cells in physical column order.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Row {
    /// Row-type discriminator, e.g. `MW01`
    #[prost(string, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Line number in the originating report file
    #[prost(uint32, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,

    #[prost(message, repeated, tag = "3")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row with its type and line number set
    pub fn new(row_type: impl Into<String>, row_number: u32) -> Self {
        Self {
            r#type: Some(row_type.into()),
            row_number: Some(row_number),
            cells: Vec::new(),
        }
    }

    /// Append a cell, builder style
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// First cell with the given name
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }

    /// Cell names in column order; unnamed cells yield `""`
    pub fn cell_names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.name.as_deref().unwrap_or(""))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Block kind of this row's type; `Unknown` when the type is unset
    pub fn kind(&self) -> RowKind {
        self.r#type
            .as_deref()
            .map(classify)
            .unwrap_or(RowKind::Unknown)
    }
}
