//! Fixed-width character tables.
//!
//! A `TableCharacter` describes one PDS4 `Table_Character` object: an
//! append-only list of field declarations plus the per-product write state.
//! One table object is declared once per product *type* and reused for every
//! product of that type; `reset` and `bind` mark the start of a new output
//! file.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError, ValidationError};
use crate::field::FieldDescriptor;
use crate::layout::{TableState, field_layouts};
use crate::record::{RECORD_DELIMITER_NAME, encode_record};
use crate::stream::SharedStream;
use crate::value::FieldValue;

/// A fixed-width ASCII table bound to a product's data stream.
pub struct TableCharacter {
    name: String,
    fields: Vec<FieldDescriptor>,
    state: TableState,
    stream: Option<SharedStream>,
}

impl TableCharacter {
    /// Create a table with no fields declared.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            state: TableState::new(),
            stream: None,
        }
    }

    /// Table name as it appears in the label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Per-product write state.
    #[must_use]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Append a field declaration.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` when the format string is invalid, or a
    /// `StateError` when records have already been written for the current
    /// product: the record shape is fixed once writing begins.
    pub fn declare_field(
        &mut self,
        format: &str,
        data_type: &str,
        name: &str,
        unit: &str,
        description: &str,
    ) -> Result<()> {
        if self.state.record_count() > 0 {
            return Err(StateError::declare_after_write(&self.name).into());
        }
        let field = FieldDescriptor::new(format, data_type, name, unit, description)?;
        self.fields.push(field);
        Ok(())
    }

    /// Bind the table to a product's data stream. Invoked once per product,
    /// after [`reset`](Self::reset).
    pub fn bind(&mut self, stream: SharedStream) {
        self.stream = Some(stream);
    }

    /// Drop the stream binding without touching the counters. Used when the
    /// product closes its data file but the table's state is still needed
    /// for label emission.
    pub fn unbind(&mut self) {
        self.stream = None;
    }

    /// Clear all per-product state: counters, offset and stream binding.
    /// Field declarations survive; the product type's shape is fixed.
    pub fn reset(&mut self) {
        self.state.reset();
        self.stream = None;
    }

    /// Encode one record and append it to the data stream.
    ///
    /// The record is fully rendered and validated before any byte is
    /// written; a failed encode leaves the stream untouched. The first
    /// successful write captures the stream position as the table's offset
    /// and fixes the record length, which every later record must match.
    ///
    /// # Errors
    ///
    /// `StateError` when no stream is bound, `ValidationError` on
    /// width/arity/kind/length violations, or an I/O error from the stream.
    pub fn add_record(&mut self, values: &[FieldValue]) -> Result<()> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| StateError::unbound(&self.name))?;

        let encoded = encode_record(&self.fields, values)?;
        if self.state.record_count() > 0 && encoded.len() != self.state.record_length() {
            return Err(
                ValidationError::record_length_mismatch(self.state.record_length(), encoded.len())
                    .into(),
            );
        }

        let position = {
            let mut stream = stream.borrow_mut();
            let position = stream.position();
            stream.write_all(&encoded)?;
            position
        };
        self.state.note_record(encoded.len(), position);
        Ok(())
    }

    /// Snapshot of everything the label needs to describe this table.
    ///
    /// A table that never wrote a record reports offset 0 and zero records.
    #[must_use]
    pub fn layout(&self) -> TableLayout {
        let layouts = field_layouts(&self.fields);
        let fields = self
            .fields
            .iter()
            .zip(layouts)
            .map(|(field, layout)| FieldEntry {
                name: field.name.clone(),
                data_type: field.data_type.clone(),
                unit: field.unit.clone(),
                description: field.description.clone(),
                format: field.format_text().to_string(),
                field_number: layout.field_number,
                field_location: layout.field_location,
                field_length: layout.field_length,
            })
            .collect();
        TableLayout {
            name: self.name.clone(),
            offset: self.state.offset().unwrap_or(0),
            records: self.state.record_count(),
            record_length: self.state.record_length(),
            record_delimiter: RECORD_DELIMITER_NAME.to_string(),
            fields,
        }
    }
}

/// Layout metadata for one table, read out at label-emission time.
///
/// All offsets are measured from the start of the data file, matching the
/// PDS4 `File_Area_Observational` offset semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub name: String,
    /// Byte offset of the first record within the data file.
    pub offset: u64,
    /// Number of records written.
    pub records: u64,
    /// Record length in bytes including the terminator.
    pub record_length: usize,
    /// Label name of the record delimiter.
    pub record_delimiter: String,
    pub fields: Vec<FieldEntry>,
}

/// One field's label metadata with its finalized byte layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub data_type: String,
    pub unit: String,
    pub description: String,
    /// Raw format string as declared.
    pub format: String,
    pub field_number: usize,
    pub field_location: usize,
    pub field_length: usize,
}
