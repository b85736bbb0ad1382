//! PDS4 XML label assembly.
//!
//! A label is produced in three passes: the user's template (a complete
//! `Product_Observational` document minus the file area) is loaded and
//! validated once per product type; at close time the
//! `File_Area_Observational` fragment is rendered from the table layout
//! snapshots and spliced in as the last child of the root; finally the
//! `$placeholder` metadata substitution runs once over the whole label
//! text.

mod error;
mod file_area;
mod metadata;
mod template;

pub use error::{LabelError, Result};
pub use file_area::render_file_area;
pub use metadata::MetadataMap;
pub use template::LabelTemplate;
