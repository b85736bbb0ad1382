//! Field (column) metadata.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::format::FormatSpec;

/// Static metadata for one column of a character table.
///
/// The format string is validated when the descriptor is created and the
/// raw text is retained, because the label must reproduce it verbatim. The
/// derived layout attributes (`field_number`, `field_location`) are not
/// stored here; they are computed by [`field_layouts`](crate::field_layouts)
/// once all fields of a table are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name as it appears in the label.
    pub name: String,
    /// PDS4 data type, e.g. `ASCII_String` or `ASCII_Real`.
    pub data_type: String,
    /// Unit of measure (`"N/A"` when dimensionless).
    pub unit: String,
    /// Human-readable column description.
    pub description: String,
    format: String,
    spec: FormatSpec,
}

impl FieldDescriptor {
    /// Create a descriptor, validating the field format.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when the format string violates the
    /// restricted PDS4 grammar.
    pub fn new(
        format: &str,
        data_type: &str,
        name: &str,
        unit: &str,
        description: &str,
    ) -> Result<Self, FormatError> {
        let spec = FormatSpec::parse(format)?;
        Ok(Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            unit: unit.to_string(),
            description: description.to_string(),
            format: format.to_string(),
            spec,
        })
    }

    /// The raw format string as declared.
    #[must_use]
    pub fn format_text(&self) -> &str {
        &self.format
    }

    /// The parsed format.
    #[must_use]
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Field length in bytes, equal to the format width.
    #[must_use]
    pub fn field_length(&self) -> usize {
        self.spec.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_retains_raw_format() {
        let field =
            FieldDescriptor::new("%-10s", "ASCII_String", "id", "N/A", "identifier").unwrap();
        assert_eq!(field.format_text(), "%-10s");
        assert_eq!(field.field_length(), 10);
        assert_eq!(field.data_type, "ASCII_String");
    }

    #[test]
    fn test_descriptor_rejects_bad_format() {
        let err = FieldDescriptor::new("7.3f", "ASCII_Real", "value", "m", "measurement");
        assert!(matches!(err, Err(FormatError::MissingPercent { .. })));
    }

    #[test]
    fn test_descriptor_serializes() {
        let field =
            FieldDescriptor::new("%+7.3f", "ASCII_Real", "value", "m", "measurement").unwrap();
        let json = serde_json::to_string(&field).expect("serialize descriptor");
        let round: FieldDescriptor = serde_json::from_str(&json).expect("deserialize descriptor");
        assert_eq!(round, field);
    }
}
