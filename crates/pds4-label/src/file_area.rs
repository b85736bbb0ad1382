//! `File_Area_Observational` label fragment.
//!
//! Emits the file-area subtree describing the data file and every table
//! written into it. All numbers come verbatim from the table layout
//! snapshots; offsets are measured from the start of the data file.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use pds4_table::TableLayout;

use crate::error::{LabelError, Result};

/// Comment written into every generated `File` element.
const FILE_COMMENT: &str =
    "This product, including its data file and the label file, was generated with the pds4-writer library";

/// Render the `File_Area_Observational` fragment for one data file.
///
/// # Errors
///
/// Fails only on XML writing errors.
pub fn render_file_area(
    file_name: &str,
    created: DateTime<Utc>,
    tables: &[TableLayout],
) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 4);

    xml.write_event(Event::Start(BytesStart::new("File_Area_Observational")))?;

    xml.write_event(Event::Start(BytesStart::new("File")))?;
    write_text_element(&mut xml, "file_name", file_name)?;
    write_text_element(
        &mut xml,
        "creation_date_time",
        &created.to_rfc3339_opts(SecondsFormat::Secs, true),
    )?;
    write_text_element(&mut xml, "comment", FILE_COMMENT)?;
    xml.write_event(Event::End(BytesEnd::new("File")))?;

    for table in tables {
        write_table_character(&mut xml, table)?;
    }

    xml.write_event(Event::End(BytesEnd::new("File_Area_Observational")))?;

    String::from_utf8(xml.into_inner()).map_err(|_| LabelError::Encoding)
}

/// Write one `Table_Character` element and its record description.
fn write_table_character<W: Write>(xml: &mut Writer<W>, table: &TableLayout) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Table_Character")))?;

    if !table.name.is_empty() {
        write_text_element(xml, "name", &table.name)?;
    }
    write_byte_element(xml, "offset", &table.offset.to_string())?;
    write_text_element(xml, "records", &table.records.to_string())?;
    write_text_element(xml, "record_delimiter", &table.record_delimiter)?;

    xml.write_event(Event::Start(BytesStart::new("Record_Character")))?;
    write_text_element(xml, "fields", &table.fields.len().to_string())?;
    write_text_element(xml, "groups", "0")?;
    write_byte_element(xml, "record_length", &table.record_length.to_string())?;

    for field in &table.fields {
        xml.write_event(Event::Start(BytesStart::new("Field_Character")))?;
        write_text_element(xml, "name", &field.name)?;
        write_text_element(xml, "field_number", &field.field_number.to_string())?;
        write_byte_element(xml, "field_location", &field.field_location.to_string())?;
        write_text_element(xml, "data_type", &field.data_type)?;
        write_byte_element(xml, "field_length", &field.field_length.to_string())?;
        write_text_element(xml, "field_format", &field.format)?;
        write_text_element(xml, "unit", &field.unit)?;
        write_text_element(xml, "description", &field.description)?;
        xml.write_event(Event::End(BytesEnd::new("Field_Character")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("Record_Character")))?;
    xml.write_event(Event::End(BytesEnd::new("Table_Character")))?;
    Ok(())
}

/// Write `<tag>text</tag>`.
fn write_text_element<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(tag)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write `<tag unit="byte">text</tag>`.
fn write_byte_element<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("unit", "byte"));
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pds4_table::{DataStream, TableCharacter};

    use super::*;

    fn sample_layout() -> TableLayout {
        let mut table = TableCharacter::new("OBS");
        table
            .declare_field("%-10s", "ASCII_String", "id", "N/A", "identifier")
            .unwrap();
        table
            .declare_field("%+6.2f", "ASCII_Real", "value", "m", "measurement")
            .unwrap();
        table.bind(DataStream::new(Vec::new()).shared());
        table.add_record(&["abc".into(), 3.14.into()]).unwrap();
        table.layout()
    }

    #[test]
    fn test_file_area_structure() {
        let created = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let fragment = render_file_area("obs_001.tab", created, &[sample_layout()]).unwrap();

        assert!(fragment.starts_with("<File_Area_Observational>"));
        assert!(fragment.contains("<file_name>obs_001.tab</file_name>"));
        assert!(fragment.contains("<creation_date_time>2026-08-25T12:00:00Z</creation_date_time>"));
        assert!(fragment.contains("<offset unit=\"byte\">0</offset>"));
        assert!(fragment.contains("<records>1</records>"));
        assert!(fragment.contains("<record_delimiter>Carriage-Return Line-Feed</record_delimiter>"));
        assert!(fragment.contains("<fields>2</fields>"));
        assert!(fragment.contains("<groups>0</groups>"));
        assert!(fragment.contains("<record_length unit=\"byte\">20</record_length>"));
        assert!(fragment.ends_with("</File_Area_Observational>"));
    }

    #[test]
    fn test_field_characters_carry_layout_and_raw_format() {
        let created = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let fragment = render_file_area("obs_001.tab", created, &[sample_layout()]).unwrap();

        assert_eq!(fragment.matches("<Field_Character>").count(), 2);
        assert!(fragment.contains("<field_number>1</field_number>"));
        assert!(fragment.contains("<field_location unit=\"byte\">1</field_location>"));
        assert!(fragment.contains("<field_location unit=\"byte\">13</field_location>"));
        assert!(fragment.contains("<field_length unit=\"byte\">6</field_length>"));
        assert!(fragment.contains("<field_format>%+6.2f</field_format>"));
        assert!(fragment.contains("<data_type>ASCII_Real</data_type>"));
    }
}
