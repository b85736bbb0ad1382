//! PDS4 observational product writing.
//!
//! Ties the fixed-width table encoder and the label assembler together
//! into the product lifecycle: declare the product type once, then write
//! as many data-file/label pairs of that type as needed.
//!
//! # Example
//!
//! ```no_run
//! use pds4_product::ProductObservational;
//!
//! let mut product = ProductObservational::new("template.xml").unwrap();
//! let obs = product.declare_table_character("OBSERVATIONS");
//! product
//!     .declare_field(obs, "%-10s", "ASCII_String", "id", "N/A", "identifier")
//!     .unwrap();
//! product
//!     .declare_field(obs, "%+6.2f", "ASCII_Real", "value", "m", "measurement")
//!     .unwrap();
//!
//! product.new_product("obs_001.tab").unwrap();
//! product.set_metadata("$title", "First observation").unwrap();
//! product.add_record(obs, &["abc".into(), 3.14.into()]).unwrap();
//! product.close_product().unwrap();
//! ```

mod error;
mod product;

pub use error::{ProductError, Result};
pub use product::{ProductObservational, TableHandle};

// The building blocks are part of the public surface; callers match on
// table errors and inspect layouts directly.
pub use pds4_label::{LabelError, MetadataMap};
pub use pds4_table::{FieldValue, TableError, TableLayout};
