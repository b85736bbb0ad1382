//! Error types for label assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading templates or emitting labels.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The template file could not be read.
    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The template is not well-formed XML.
    #[error("template is not well-formed XML: {source}")]
    TemplateParse { source: quick_xml::Error },

    /// The template contains no root element to append the file area to.
    #[error("template has no root element")]
    MissingRoot,

    /// The template root is an empty element and cannot take children.
    #[error("template root element is empty")]
    EmptyRoot,

    /// A metadata variable does not follow the `$name` convention.
    #[error("metadata variables must start with $ but {name} does not")]
    InvalidPlaceholder { name: String },

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The rendered label fragment was not valid UTF-8.
    #[error("label fragment is not valid UTF-8")]
    Encoding,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    pub(crate) fn template_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TemplateRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_placeholder(name: impl Into<String>) -> Self {
        Self::InvalidPlaceholder { name: name.into() }
    }
}

/// Result type alias for label operations.
pub type Result<T> = std::result::Result<T, LabelError>;
