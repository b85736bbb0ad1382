//! Fixed-width record encoding.

use crate::error::ValidationError;
use crate::field::FieldDescriptor;
use crate::value::FieldValue;

/// Two-character separator written between fields.
pub const FIELD_DELIMITER: &str = ", ";

/// Record terminator. PDS4 requires CRLF regardless of the host platform.
pub const RECORD_TERMINATOR: &str = "\r\n";

/// Label name of the record delimiter.
pub const RECORD_DELIMITER_NAME: &str = "Carriage-Return Line-Feed";

/// Encode one record to its exact byte sequence.
///
/// Every field is rendered and width-checked before any byte is produced,
/// so a failed encode leaves nothing to write. Values wider than their
/// declared field fail; they are never truncated.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the arity does not match the field
/// count, a value's kind cannot be rendered by its specifier, or a rendered
/// value exceeds its field width.
pub fn encode_record(
    fields: &[FieldDescriptor],
    values: &[FieldValue],
) -> Result<Vec<u8>, ValidationError> {
    if values.len() != fields.len() {
        return Err(ValidationError::arity_mismatch(fields.len(), values.len()));
    }

    let mut line = String::new();
    for (field, value) in fields.iter().zip(values) {
        let rendered = field.spec().render(value).ok_or_else(|| {
            ValidationError::value_kind(&field.name, field.spec().specifier.as_char(), value.kind())
        })?;
        if rendered.len() > field.field_length() {
            return Err(ValidationError::value_too_wide(
                &field.name,
                field.field_length(),
                rendered,
            ));
        }
        if !line.is_empty() {
            line.push_str(FIELD_DELIMITER);
        }
        line.push_str(&rendered);
    }
    line.push_str(RECORD_TERMINATOR);
    Ok(line.into_bytes())
}
