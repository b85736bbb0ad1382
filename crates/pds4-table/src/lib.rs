//! Fixed-width PDS4 character table encoding.
//!
//! This crate implements the data side of a PDS4 `Table_Character` product:
//! parsing the restricted field-format dialect, encoding records to
//! byte-exact fixed-width lines, and accounting for the layout metadata
//! (byte offsets, field locations, record length) that the XML label must
//! reproduce bit-consistently with the data actually written.
//!
//! # Example
//!
//! ```
//! use pds4_table::{DataStream, TableCharacter};
//!
//! let mut table = TableCharacter::new("OBSERVATIONS");
//! table
//!     .declare_field("%-10s", "ASCII_String", "id", "N/A", "identifier")
//!     .unwrap();
//! table
//!     .declare_field("%+6.2f", "ASCII_Real", "value", "m", "measurement")
//!     .unwrap();
//!
//! table.bind(DataStream::new(Vec::new()).shared());
//! table.add_record(&["abc".into(), 3.14.into()]).unwrap();
//!
//! let layout = table.layout();
//! assert_eq!(layout.records, 1);
//! assert_eq!(layout.record_length, 20);
//! assert_eq!(layout.fields[1].field_location, 13);
//! ```

mod error;
mod field;
mod format;
mod layout;
mod record;
mod stream;
mod table;
mod value;

pub use error::{FormatError, Result, StateError, TableError, ValidationError};
pub use field::FieldDescriptor;
pub use format::{FormatSpec, Sign, Specifier};
pub use layout::{FieldLayout, TableState, field_layouts};
pub use record::{FIELD_DELIMITER, RECORD_DELIMITER_NAME, RECORD_TERMINATOR, encode_record};
pub use stream::{DataStream, SharedStream};
pub use table::{FieldEntry, TableCharacter, TableLayout};
pub use value::FieldValue;
