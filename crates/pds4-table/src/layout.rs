//! Table layout accounting.
//!
//! Tracks, across repeated record writes, the record count, the table's
//! starting byte offset within the data file, and the fixed record length.
//! The accumulated state plus the per-field layout walk is everything the
//! label needs to describe the data file byte-exactly.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;
use crate::record::FIELD_DELIMITER;

/// Per-product write state of one table.
///
/// Reset between products; state must never leak from one output file into
/// the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    record_count: u64,
    record_length: usize,
    offset: Option<u64>,
}

impl TableState {
    /// Fresh state with no records written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records written since the last reset.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Fixed record length in bytes including the terminator, 0 until the
    /// first record is written.
    #[must_use]
    pub fn record_length(&self) -> usize {
        self.record_length
    }

    /// Byte offset of the table's first record within the data file, unset
    /// until the first record is written.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Clear all per-product counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a successful write. The first write fixes the record length
    /// and captures the stream position the record started at.
    pub(crate) fn note_record(&mut self, length: usize, position: u64) {
        if self.record_count == 0 {
            self.record_length = length;
            self.offset = Some(position);
        }
        self.record_count += 1;
    }
}

/// Derived byte layout of one field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// 1-based position of the field within the record.
    pub field_number: usize,
    /// 1-based starting byte of the field within the record.
    pub field_location: usize,
    /// Field length in bytes.
    pub field_length: usize,
}

/// Walk fields in declaration order and derive their byte layout.
///
/// The first field starts at byte 1; each subsequent field starts after the
/// previous field plus the two delimiter bytes. Pure and idempotent: the
/// same declarations always yield the same layout.
#[must_use]
pub fn field_layouts(fields: &[FieldDescriptor]) -> Vec<FieldLayout> {
    let mut location = 1;
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let layout = FieldLayout {
                field_number: index + 1,
                field_location: location,
                field_length: field.field_length(),
            };
            location += field.field_length() + FIELD_DELIMITER.len();
            layout
        })
        .collect()
}
