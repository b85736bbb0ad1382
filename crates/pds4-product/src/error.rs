//! Error types for the product lifecycle.

use thiserror::Error;

use pds4_label::LabelError;
use pds4_table::TableError;

/// Errors that can occur while writing a product.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Label(#[from] LabelError),

    /// `close_product` or `add_record` without an open product.
    #[error("no product is open; call new_product first")]
    NoOpenProduct,

    /// `new_product` while the previous product is still open.
    #[error("previous product {path} is still open; call close_product first")]
    ProductStillOpen { path: std::path::PathBuf },

    /// An operation referenced a table that this product does not own.
    #[error("unknown table handle")]
    UnknownTable,

    /// I/O error on the data or label file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for product operations.
pub type Result<T> = std::result::Result<T, ProductError>;
