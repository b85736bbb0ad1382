//! End-to-end table encoding scenarios.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use pds4_table::{DataStream, FieldValue, TableCharacter, field_layouts};

/// Writer handle whose buffer stays inspectable after the stream takes
/// ownership of the writer.
#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn declare_sample_table() -> TableCharacter {
    let mut table = TableCharacter::new("OBSERVATIONS");
    table
        .declare_field("%-10s", "ASCII_String", "id", "N/A", "identifier")
        .unwrap();
    table
        .declare_field("%+6.2f", "ASCII_Real", "value", "m", "measurement")
        .unwrap();
    table
}

#[test]
fn end_to_end_record_encoding() {
    let buf = SharedBuf::default();
    let mut table = declare_sample_table();
    table.bind(DataStream::new(buf.clone()).shared());

    table
        .add_record(&[FieldValue::text("abc"), FieldValue::Real(3.14)])
        .unwrap();
    assert_eq!(buf.text(), "abc       ,  +3.14\r\n");
    assert_eq!(table.state().record_length(), 20);
    assert_eq!(table.state().record_count(), 1);

    table
        .add_record(&[FieldValue::text("def"), FieldValue::Real(-1.5)])
        .unwrap();
    assert_eq!(table.state().record_count(), 2);
    assert_eq!(
        buf.text(),
        "abc       ,  +3.14\r\ndef       ,  -1.50\r\n"
    );
}

#[test]
fn record_length_is_uniform_across_records() {
    let buf = SharedBuf::default();
    let mut table = declare_sample_table();
    table.bind(DataStream::new(buf.clone()).shared());

    for value in [0.0, 1.5, -99.99, 3.14159] {
        table
            .add_record(&[FieldValue::text("row"), FieldValue::Real(value)])
            .unwrap();
    }

    let record_length = table.state().record_length();
    assert_eq!(record_length, 20);
    let bytes = buf.text().into_bytes();
    assert_eq!(bytes.len(), record_length * 4);
    for chunk in bytes.chunks(record_length) {
        assert_eq!(&chunk[record_length - 2..], b"\r\n");
    }
}

#[test]
fn field_locations_follow_the_declared_widths() {
    let table = declare_sample_table();
    let layouts = field_layouts(table.fields());

    // field_location(k) = 1 + sum(width_i + 2) over earlier fields.
    assert_eq!(layouts[0].field_location, 1);
    assert_eq!(layouts[1].field_location, 1 + 10 + 2);
    assert_eq!(layouts[1].field_length, 6);
}

#[test]
fn reset_between_products_starts_counters_over() {
    let first = SharedBuf::default();
    let mut table = declare_sample_table();
    table.bind(DataStream::new(first.clone()).shared());
    table
        .add_record(&[FieldValue::text("abc"), FieldValue::Real(3.14)])
        .unwrap();
    assert_eq!(table.state().record_count(), 1);

    // Same table object, next product.
    let second = SharedBuf::default();
    table.reset();
    table.bind(DataStream::new(second.clone()).shared());
    assert_eq!(table.state().record_count(), 0);
    assert_eq!(table.state().offset(), None);

    table
        .add_record(&[FieldValue::text("xyz"), FieldValue::Real(1.0)])
        .unwrap();
    assert_eq!(table.state().record_count(), 1);
    assert_eq!(table.state().offset(), Some(0));
    assert_eq!(second.text(), "xyz       ,  +1.00\r\n");
    // The first product's bytes are untouched.
    assert_eq!(first.text(), "abc       ,  +3.14\r\n");
}
