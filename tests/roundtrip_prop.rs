use dsrf_records::codec::json::{from_json, to_json};
use dsrf_records::codec::{
    decode_row, decode_rows, encode_row, Framing, RecordWriter, PIPE_DELIMITER,
};
use dsrf_records::{Cell, RecordError, Row};
use proptest::prelude::*;

fn delimiter_text() -> String {
    String::from_utf8_lossy(PIPE_DELIMITER).into_owned()
}

/// Printable text, sometimes carrying pieces of the pipe delimiter
fn text_strategy() -> impl Strategy<Value = String> {
    let delimiter = delimiter_text();
    prop_oneof![
        4 => "[ -~]{0,8}",
        1 => "[ -~]{0,4}".prop_map({
            let d = delimiter.clone();
            move |s: String| format!("{}{}", s, &d[..d.len() - 2])
        }),
        1 => "[ -~]{0,4}".prop_map({
            let d = delimiter.clone();
            move |s: String| format!("{}{}", &d[2..], s)
        }),
        1 => "[ -~]{0,4}".prop_map(move |s: String| format!("{}{}", s, delimiter)),
    ]
}

fn cell_strategy() -> impl Strategy<Value = Cell> {
    (
        proptest::option::of("[A-Za-z]{0,12}"),
        proptest::option::of(0i32..6),
        proptest::collection::vec(text_strategy(), 0..3),
        proptest::collection::vec(any::<i64>(), 0..3),
        proptest::collection::vec(any::<f64>(), 0..3),
        proptest::collection::vec(any::<bool>(), 0..3),
    )
        .prop_map(
            |(name, cell_type, string_value, integer_value, decimal_value, boolean_value)| Cell {
                name,
                cell_type,
                string_value,
                integer_value,
                decimal_value,
                boolean_value,
            },
        )
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        proptest::option::of("[A-Z]{2}[0-9]{2}"),
        proptest::option::of(any::<u32>()),
        proptest::collection::vec(cell_strategy(), 0..6),
    )
        .prop_map(|(r#type, row_number, cells)| Row {
            r#type,
            row_number,
            cells,
        })
}

/// Bitwise comparison through the wire form, so NaN decimals compare equal
fn wire_bytes(rows: &[Row]) -> Vec<Vec<u8>> {
    rows.iter().map(encode_row).collect()
}

/// JSON has one NaN spelling, so payload bits are not kept
fn canonical_nan(rows: &[Row]) -> Vec<Row> {
    let mut rows = rows.to_vec();
    for cell in rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
        for value in cell.decimal_value.iter_mut().filter(|v| v.is_nan()) {
            *value = f64::NAN;
        }
    }
    rows
}

fn contains_early_delimiter(row: &Row) -> bool {
    let mut framed = encode_row(row);
    let record_len = framed.len();
    framed.extend_from_slice(PIPE_DELIMITER);
    framed
        .windows(PIPE_DELIMITER.len())
        .position(|w| w == PIPE_DELIMITER)
        != Some(record_len)
}

proptest! {
    #[test]
    fn binary_roundtrip(row in row_strategy()) {
        let decoded = decode_row(&encode_row(&row)).unwrap();
        prop_assert_eq!(encode_row(&decoded), encode_row(&row));
    }

    #[test]
    fn json_roundtrip(rows in proptest::collection::vec(row_strategy(), 0..4)) {
        let json = to_json(&rows, false).unwrap();
        let decoded = from_json(json.as_bytes()).unwrap();
        prop_assert_eq!(wire_bytes(&decoded), wire_bytes(&canonical_nan(&rows)));
    }

    #[test]
    fn length_prefixed_stream_roundtrip(rows in proptest::collection::vec(row_strategy(), 0..6)) {
        let mut buf = Vec::new();
        let mut writer = RecordWriter::new(&mut buf, Framing::LengthPrefixed);
        writer.write_rows(&rows).unwrap();
        writer.finish().unwrap();
        let decoded = decode_rows(&buf, Framing::LengthPrefixed).unwrap();
        prop_assert_eq!(wire_bytes(&decoded), wire_bytes(&rows));
    }

    #[test]
    fn pipe_delimited_stream_keeps_accepted_rows(rows in proptest::collection::vec(row_strategy(), 0..6)) {
        let mut buf = Vec::new();
        let mut accepted = Vec::new();
        let mut writer = RecordWriter::new(&mut buf, Framing::PipeDelimited);
        for row in &rows {
            match writer.write_row(row) {
                Ok(()) => accepted.push(row.clone()),
                Err(RecordError::DelimiterCollision { .. }) => {
                    prop_assert!(contains_early_delimiter(row));
                }
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
        }
        writer.finish().unwrap();

        let decoded = decode_rows(&buf, Framing::PipeDelimited).unwrap();
        prop_assert_eq!(wire_bytes(&decoded), wire_bytes(&accepted));
    }
}
