//! Error types for table declaration and record encoding.

use thiserror::Error;

/// A declared field format string violates the restricted PDS4 format grammar.
///
/// Raised at declaration time, before any data is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format string does not start with `%`.
    #[error("field format {format:?} must start with %")]
    MissingPercent { format: String },

    /// The trailing character is not a PDS4 specifier.
    #[error(
        "field format {format:?} must end with one of the following PDS4 specifiers: d, o, f, e, E or s"
    )]
    UnknownSpecifier { format: String },

    /// The width portion is not an unsigned integer.
    #[error("field format {format:?}: the width must be an integer number")]
    InvalidWidth { format: String },

    /// The width is zero.
    #[error("field format {format:?}: the width must be positive")]
    ZeroWidth { format: String },

    /// The portion after the dot is not an unsigned integer.
    #[error(
        "field format {format:?}: if there is a dot, the dot must be followed by a precision which has to be an integer number"
    )]
    InvalidPrecision { format: String },

    /// Zero precision with a floating or exponential specifier.
    #[error("field format {format:?}: in scientific notation the precision cannot be 0")]
    ZeroPrecision { format: String },

    /// A string field precision that differs from its width.
    #[error(
        "field format {format:?}: in strings do not indicate the precision or make it equal to the width"
    )]
    StringPrecisionMismatch { format: String },

    /// Left-justification requested for a numeric field.
    #[error("field format {format:?}: the - prefix is forbidden for all numeric fields")]
    MinusOnNumeric { format: String },
}

impl FormatError {
    pub(crate) fn missing_percent(format: impl Into<String>) -> Self {
        Self::MissingPercent { format: format.into() }
    }

    pub(crate) fn unknown_specifier(format: impl Into<String>) -> Self {
        Self::UnknownSpecifier { format: format.into() }
    }

    pub(crate) fn invalid_width(format: impl Into<String>) -> Self {
        Self::InvalidWidth { format: format.into() }
    }

    pub(crate) fn zero_width(format: impl Into<String>) -> Self {
        Self::ZeroWidth { format: format.into() }
    }

    pub(crate) fn invalid_precision(format: impl Into<String>) -> Self {
        Self::InvalidPrecision { format: format.into() }
    }

    pub(crate) fn zero_precision(format: impl Into<String>) -> Self {
        Self::ZeroPrecision { format: format.into() }
    }

    pub(crate) fn string_precision_mismatch(format: impl Into<String>) -> Self {
        Self::StringPrecisionMismatch { format: format.into() }
    }

    pub(crate) fn minus_on_numeric(format: impl Into<String>) -> Self {
        Self::MinusOnNumeric { format: format.into() }
    }
}

/// A supplied record does not fit the declared table shape.
///
/// Raised at encode time; the offending record is never written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A rendered value is wider than its field. Values are never truncated.
    #[error("value {value:?} is wider than the width of field {field} which is {width}")]
    ValueTooWide {
        field: String,
        width: usize,
        value: String,
    },

    /// The record arity does not match the declared field count.
    #[error("record has {actual} values but the table declares {expected} fields")]
    ArityMismatch { expected: usize, actual: usize },

    /// A value's kind cannot be rendered by the field's specifier.
    #[error("field {field} uses the %{specifier} specifier which cannot render a {found} value")]
    ValueKind {
        field: String,
        specifier: char,
        found: &'static str,
    },

    /// A record rendered to a length different from the table's fixed length.
    #[error("record length {actual} does not match the table's fixed record length {expected}")]
    RecordLengthMismatch { expected: usize, actual: usize },
}

impl ValidationError {
    pub(crate) fn value_too_wide(
        field: impl Into<String>,
        width: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::ValueTooWide {
            field: field.into(),
            width,
            value: value.into(),
        }
    }

    pub(crate) fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    pub(crate) fn value_kind(field: impl Into<String>, specifier: char, found: &'static str) -> Self {
        Self::ValueKind {
            field: field.into(),
            specifier,
            found,
        }
    }

    pub(crate) fn record_length_mismatch(expected: usize, actual: usize) -> Self {
        Self::RecordLengthMismatch { expected, actual }
    }
}

/// An operation was invoked in a table state that does not support it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Field declarations are append-only and must precede the first write.
    #[error("table {table}: fields cannot be declared after records have been written")]
    DeclareAfterWrite { table: String },

    /// No data stream is bound to the table.
    #[error("table {table}: no data stream is bound; call bind before add_record")]
    Unbound { table: String },
}

impl StateError {
    pub(crate) fn declare_after_write(table: impl Into<String>) -> Self {
        Self::DeclareAfterWrite { table: table.into() }
    }

    pub(crate) fn unbound(table: impl Into<String>) -> Self {
        Self::Unbound { table: table.into() }
    }
}

/// Errors that can occur while building or writing a character table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    /// I/O error on the shared data stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
