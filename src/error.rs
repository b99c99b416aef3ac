//! Error types for record encoding, decoding and rendering

use thiserror::Error;

/// Errors raised while (de)serializing or rendering records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to decode record: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("failed to encode record: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell type code outside the known `DataType` range
    #[error("unrecognized cell type code {code}")]
    UnknownDataType { code: i32 },

    #[error("record stream ends inside frame {index}")]
    TruncatedFrame { index: usize },

    /// The encoded record contains the pipe delimiter and cannot be framed with it
    #[error("record {index} contains the pipe frame delimiter")]
    DelimiterCollision { index: usize },

    #[error("single-record output needs exactly one row, got {count}")]
    ExpectedSingleRow { count: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl From<prost::UnknownEnumValue> for RecordError {
    fn from(err: prost::UnknownEnumValue) -> Self {
        RecordError::UnknownDataType { code: err.0 }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
