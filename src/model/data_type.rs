//! Cell data types and their wire codes

use std::fmt;

/// Primitive value kind a cell may hold
///
/// Discriminants are the wire codes; they must never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    String = 0,
    Integer = 1,
    Decimal = 2,
    Boolean = 3,
}

impl DataType {
    /// All variants in wire-code order
    pub const ALL: [DataType; 4] = [
        DataType::String,
        DataType::Integer,
        DataType::Decimal,
        DataType::Boolean,
    ];

    /// Upper-case name used in the text form
    pub fn as_str_name(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Integer => "INTEGER",
            DataType::Decimal => "DECIMAL",
            DataType::Boolean => "BOOLEAN",
        }
    }

    /// Parse a text-form name, ignoring ASCII case
    pub fn from_str_name(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str_name().eq_ignore_ascii_case(value))
    }

    /// Wire code of this variant
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// Serde adapter for the raw `cell_type` field.
///
/// Known codes are written by name, unknown codes as the bare integer so
/// that they survive a text round-trip. Both spellings are read back.
pub(crate) mod cell_type_name {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DataType;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Code(i32),
        Name(String),
    }

    pub fn serialize<S>(code: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match code {
            None => serializer.serialize_none(),
            Some(code) => match DataType::try_from(*code) {
                Ok(data_type) => serializer.serialize_some(data_type.as_str_name()),
                Err(_) => serializer.serialize_some(code),
            },
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Code(code)) => Ok(Some(code)),
            Some(Repr::Name(name)) => DataType::from_str_name(&name)
                .map(|t| Some(t.code()))
                .ok_or_else(|| D::Error::custom(format!("unknown cell type `{}`", name))),
        }
    }
}
