//! Wire-format compatibility of row and cell records

use dsrf_records::codec::{decode_cell, decode_row, encode_cell, encode_row};
use dsrf_records::{Cell, DataType, RecordError, Row};

/// A later revision of `Cell` with an extra field
#[derive(Clone, PartialEq, prost::Message)]
struct CellV2 {
    #[prost(string, optional, tag = "1")]
    name: Option<String>,
    #[prost(enumeration = "DataType", optional, tag = "2")]
    cell_type: Option<i32>,
    #[prost(string, repeated, tag = "3")]
    string_value: Vec<String>,
    #[prost(int64, repeated, packed = "false", tag = "4")]
    integer_value: Vec<i64>,
    #[prost(string, optional, tag = "7")]
    date_value: Option<String>,
}

/// A later revision of `Row` with an extra field
#[derive(Clone, PartialEq, prost::Message)]
struct RowV2 {
    #[prost(string, optional, tag = "1")]
    r#type: Option<String>,
    #[prost(uint32, optional, tag = "2")]
    row_number: Option<u32>,
    #[prost(message, repeated, tag = "3")]
    cells: Vec<CellV2>,
    #[prost(string, optional, tag = "9")]
    source_file: Option<String>,
}

fn roundtrip(row: &Row) -> Row {
    decode_row(&encode_row(row)).unwrap()
}

#[test]
fn test_data_type_codes_on_the_wire() {
    for (data_type, code) in [
        (DataType::String, 0u8),
        (DataType::Integer, 1),
        (DataType::Decimal, 2),
        (DataType::Boolean, 3),
    ] {
        let cell = Cell {
            cell_type: Some(data_type.code()),
            ..Default::default()
        };
        // field 2, varint
        assert_eq!(encode_cell(&cell), vec![0x10, code]);

        let decoded = decode_cell(&[0x10, code]).unwrap();
        assert_eq!(decoded.data_type().unwrap(), Some(data_type));
    }
}

#[test]
fn test_row_number_unset_vs_zero() {
    let unset = Row::default();
    let zero = Row {
        row_number: Some(0),
        ..Default::default()
    };

    assert!(encode_row(&unset).is_empty());
    assert_eq!(encode_row(&zero), vec![0x10, 0x00]);
    assert_eq!(roundtrip(&unset).row_number, None);
    assert_eq!(roundtrip(&zero).row_number, Some(0));
    assert_ne!(roundtrip(&unset), roundtrip(&zero));
}

#[test]
fn test_empty_name_is_not_unset() {
    let cell = Cell::named("");
    let decoded = decode_cell(&encode_cell(&cell)).unwrap();
    assert_eq!(decoded.name.as_deref(), Some(""));
    assert_eq!(decode_cell(&[]).unwrap().name, None);
}

#[test]
fn test_repeated_fields_stay_independent() {
    let row = Row::new("MW01", 5).with_cell(Cell::integers("Usages", [1, 2, 3]));
    let decoded = roundtrip(&row);
    let cell = &decoded.cells[0];

    assert_eq!(cell.data_type().unwrap(), Some(DataType::Integer));
    assert_eq!(cell.integer_value, vec![1, 2, 3]);
    assert!(cell.string_value.is_empty());
    assert!(cell.decimal_value.is_empty());
    assert!(cell.boolean_value.is_empty());
}

#[test]
fn test_cell_order_is_preserved() {
    let row = Row::default()
        .with_cell(Cell::named("A"))
        .with_cell(Cell::named("B"))
        .with_cell(Cell::named("C"));
    let decoded = roundtrip(&row);
    assert_eq!(decoded.cell_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_repeated_numbers_are_unpacked() {
    let cell = Cell {
        integer_value: vec![1, 2],
        ..Default::default()
    };
    // field 4, varint, once per value
    assert_eq!(encode_cell(&cell), vec![0x20, 0x01, 0x20, 0x02]);
}

#[test]
fn test_packed_numbers_are_accepted() {
    // field 4, length-delimited, two varints
    let decoded = decode_cell(&[0x22, 0x02, 0x01, 0x02]).unwrap();
    assert_eq!(decoded.integer_value, vec![1, 2]);
}

#[test]
fn test_newer_writer_unknown_fields_are_skipped() {
    let newer = RowV2 {
        r#type: Some("AS01".to_string()),
        row_number: Some(17),
        cells: vec![CellV2 {
            name: Some("Title".to_string()),
            cell_type: Some(DataType::String.code()),
            string_value: vec!["Yesterday".to_string()],
            integer_value: vec![],
            date_value: Some("2015-06-01".to_string()),
        }],
        source_file: Some("DSR_A_B_C_2015-Q2_US_1of1_20150701T000000.tsv".to_string()),
    };

    let decoded = decode_row(&prost::Message::encode_to_vec(&newer)).unwrap();
    assert_eq!(
        decoded,
        Row::new("AS01", 17).with_cell(Cell::strings("Title", ["Yesterday"]))
    );
}

#[test]
fn test_unknown_enum_code_is_surfaced() {
    let cell = Cell {
        name: Some("Future".to_string()),
        cell_type: Some(7),
        ..Default::default()
    };
    let decoded = decode_cell(&encode_cell(&cell)).unwrap();

    assert_eq!(decoded.cell_type, Some(7));
    assert!(matches!(
        decoded.data_type(),
        Err(RecordError::UnknownDataType { code: 7 })
    ));
}

#[test]
fn test_truncated_record_fails() {
    let mut bytes = encode_row(&Row::new("MW01", 1).with_cell(Cell::strings("A", ["B"])));
    bytes.truncate(bytes.len() - 1);
    assert!(matches!(decode_row(&bytes), Err(RecordError::Decode(_))));
}
