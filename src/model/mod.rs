//! Row, cell and data type records

mod cell;
mod data_type;
mod row;
pub mod row_type;

pub use cell::{Cell, CellValues};
pub use data_type::DataType;
pub use row::Row;
pub use row_type::RowKind;
