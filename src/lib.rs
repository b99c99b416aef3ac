//! dsrf-records - Row and cell records for DSRF sales reports
//!
//! Wire-compatible protocol-buffer records for one line of a tabular report,
//! with a JSON text form, framed multi-record streams and terminal rendering.

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod output;

pub use config::Config;
pub use error::{RecordError, Result};
pub use model::{Cell, CellValues, DataType, Row, RowKind};
