//! Cell record: one named, typed value slot within a row

use std::fmt;

use serde::{Deserialize, Serialize};

use super::data_type::{cell_type_name, DataType};
use crate::error;

/// A named cell holding zero or more values of its declared type.
///
/// The four value lists are parallel: only the one selected by
/// `cell_type` is expected to be populated, but nothing here enforces it.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Cell {
    #[prost(string, optional, tag = "1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Raw wire code; see [`Cell::data_type`]
    #[prost(enumeration = "DataType", optional, tag = "2")]
    #[serde(
        default,
        with = "cell_type_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub cell_type: Option<i32>,

    #[prost(string, repeated, tag = "3")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub string_value: Vec<String>,

    #[prost(int64, repeated, packed = "false", tag = "4")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integer_value: Vec<i64>,

    #[prost(double, repeated, packed = "false", tag = "5")]
    #[serde(default, with = "decimal_text", skip_serializing_if = "Vec::is_empty")]
    pub decimal_value: Vec<f64>,

    #[prost(bool, repeated, packed = "false", tag = "6")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boolean_value: Vec<bool>,
}

/// Borrowed, typed view of the value list selected by a cell's type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValues<'a> {
    String(&'a [String]),
    Integer(&'a [i64]),
    Decimal(&'a [f64]),
    Boolean(&'a [bool]),
}

impl CellValues<'_> {
    pub fn data_type(&self) -> DataType {
        match self {
            CellValues::String(_) => DataType::String,
            CellValues::Integer(_) => DataType::Integer,
            CellValues::Decimal(_) => DataType::Decimal,
            CellValues::Boolean(_) => DataType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CellValues::String(v) => v.len(),
            CellValues::Integer(v) => v.len(),
            CellValues::Decimal(v) => v.len(),
            CellValues::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CellValues<'_> {
    /// Values joined with `|`, the report format's repeated-value delimiter
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = match self {
            CellValues::String(v) => v.join("|"),
            CellValues::Integer(v) => join_values(v),
            CellValues::Decimal(v) => join_values(v),
            CellValues::Boolean(v) => join_values(v),
        };
        f.write_str(&joined)
    }
}

fn join_values<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

impl Cell {
    /// Create a cell with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a `STRING` cell
    pub fn strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cell_type: Some(DataType::String.code()),
            string_value: values.into_iter().map(Into::into).collect(),
            ..Self::named(name)
        }
    }

    /// Create an `INTEGER` cell
    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            cell_type: Some(DataType::Integer.code()),
            integer_value: values.into_iter().collect(),
            ..Self::named(name)
        }
    }

    /// Create a `DECIMAL` cell
    pub fn decimals(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            cell_type: Some(DataType::Decimal.code()),
            decimal_value: values.into_iter().collect(),
            ..Self::named(name)
        }
    }

    /// Create a `BOOLEAN` cell
    pub fn booleans(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            cell_type: Some(DataType::Boolean.code()),
            boolean_value: values.into_iter().collect(),
            ..Self::named(name)
        }
    }

    /// Create a cell whose type matches the given values
    pub fn with_values(name: impl Into<String>, values: CellValues<'_>) -> Self {
        match values {
            CellValues::String(v) => Self::strings(name, v.iter().cloned()),
            CellValues::Integer(v) => Self::integers(name, v.iter().copied()),
            CellValues::Decimal(v) => Self::decimals(name, v.iter().copied()),
            CellValues::Boolean(v) => Self::booleans(name, v.iter().copied()),
        }
    }

    /// Declared type of the cell.
    ///
    /// `Ok(None)` when unset; an error when the stored code is not a known
    /// `DataType`. Unlike the generated `cell_type()` getter this never
    /// falls back to a default variant.
    pub fn data_type(&self) -> error::Result<Option<DataType>> {
        self.cell_type
            .map(DataType::try_from)
            .transpose()
            .map_err(Into::into)
    }

    /// The value list selected by the declared type
    pub fn values(&self) -> Option<CellValues<'_>> {
        let data_type = self.data_type().ok().flatten()?;
        Some(self.values_of(data_type))
    }

    /// The value list for `data_type`, whatever the declared type is
    pub fn values_of(&self, data_type: DataType) -> CellValues<'_> {
        match data_type {
            DataType::String => CellValues::String(&self.string_value),
            DataType::Integer => CellValues::Integer(&self.integer_value),
            DataType::Decimal => CellValues::Decimal(&self.decimal_value),
            DataType::Boolean => CellValues::Boolean(&self.boolean_value),
        }
    }

    /// Types whose value lists are non-empty, in wire-code order
    pub fn populated_types(&self) -> impl Iterator<Item = DataType> + '_ {
        DataType::ALL
            .into_iter()
            .filter(move |t| !self.values_of(*t).is_empty())
    }

    /// Whether only the list selected by the declared type holds values.
    ///
    /// Informational; cells failing this are still valid records.
    pub fn is_consistent(&self) -> bool {
        match self.data_type() {
            Ok(Some(declared)) => self.populated_types().all(|t| t == declared),
            Ok(None) | Err(_) => self.populated_types().next().is_none(),
        }
    }

    /// Total number of values across all four lists
    pub fn value_count(&self) -> usize {
        self.string_value.len()
            + self.integer_value.len()
            + self.decimal_value.len()
            + self.boolean_value.len()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(values) = self.values() {
            return write!(f, "{}", values);
        }

        // No usable type: show whatever is populated, in field order
        let joined = self
            .populated_types()
            .map(|t| self.values_of(t).to_string())
            .collect::<Vec<_>>()
            .join("|");
        f.write_str(&joined)
    }
}

/// Serde adapter for `decimal_value`.
///
/// JSON has no NaN or infinities, so those are written as the strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"` and read back from them.
mod decimal_text {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    fn to_repr(value: f64) -> Repr {
        if value.is_nan() {
            Repr::Text("NaN".to_string())
        } else if value == f64::INFINITY {
            Repr::Text("Infinity".to_string())
        } else if value == f64::NEG_INFINITY {
            Repr::Text("-Infinity".to_string())
        } else {
            Repr::Number(value)
        }
    }

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|v| to_repr(*v)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Repr>::deserialize(deserializer)?
            .into_iter()
            .map(|repr| match repr {
                Repr::Number(value) => Ok(value),
                Repr::Text(text) => match text.as_str() {
                    "NaN" => Ok(f64::NAN),
                    "Infinity" => Ok(f64::INFINITY),
                    "-Infinity" => Ok(f64::NEG_INFINITY),
                    _ => Err(D::Error::custom(format!("invalid decimal value `{}`", text))),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;

    #[test]
    fn test_constructors_set_matching_type() {
        let cell = Cell::integers("Usages", [1, 2, 3]);
        assert_eq!(cell.name.as_deref(), Some("Usages"));
        assert_eq!(cell.data_type().unwrap(), Some(DataType::Integer));
        assert_eq!(cell.values(), Some(CellValues::Integer(&[1, 2, 3])));
        assert!(cell.string_value.is_empty());
        assert!(cell.is_consistent());
    }

    #[test]
    fn test_unset_type_has_no_view() {
        let cell = Cell::named("RecordType");
        assert_eq!(cell.data_type().unwrap(), None);
        assert_eq!(cell.values(), None);
        assert!(cell.is_consistent());
    }

    #[test]
    fn test_unknown_type_is_surfaced() {
        let cell = Cell {
            cell_type: Some(9),
            ..Default::default()
        };
        assert!(matches!(
            cell.data_type(),
            Err(RecordError::UnknownDataType { code: 9 })
        ));
        assert_eq!(cell.values(), None);
    }

    #[test]
    fn test_inconsistent_cell() {
        let mut cell = Cell::strings("Title", ["A"]);
        cell.integer_value.push(7);
        assert!(!cell.is_consistent());
        assert_eq!(
            cell.populated_types().collect::<Vec<_>>(),
            vec![DataType::String, DataType::Integer]
        );
        assert_eq!(cell.value_count(), 2);
    }

    #[test]
    fn test_display_joins_with_pipe() {
        assert_eq!(Cell::strings("ISRC", ["A", "B"]).to_string(), "A|B");
        assert_eq!(Cell::decimals("Price", [0.5, 1.25]).to_string(), "0.5|1.25");
        assert_eq!(Cell::booleans("Flag", [true]).to_string(), "true");

        let untyped = Cell {
            integer_value: vec![4, 5],
            ..Default::default()
        };
        assert_eq!(untyped.to_string(), "4|5");
    }

    #[test]
    fn test_with_values() {
        let cell = Cell::with_values("Flags", CellValues::Boolean(&[true, false]));
        assert_eq!(cell, Cell::booleans("Flags", [true, false]));
    }
}
