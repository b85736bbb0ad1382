//! Label metadata placeholders.
//!
//! Templates carry `$variable` placeholders that the caller fills in per
//! product. Substitution is a plain text pass over the serialized label,
//! applied exactly once after rendering; it is never interleaved with XML
//! construction.

use std::collections::BTreeMap;

use crate::error::{LabelError, Result};

/// Mapping from `$placeholder` to replacement text.
#[derive(Debug, Clone, Default)]
pub struct MetadataMap {
    entries: BTreeMap<String, String>,
}

impl MetadataMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value.
    ///
    /// # Errors
    ///
    /// Fails when the variable name does not start with `$`.
    pub fn set(&mut self, variable: &str, value: &str) -> Result<()> {
        if !variable.starts_with('$') {
            return Err(LabelError::invalid_placeholder(variable));
        }
        self.entries.insert(variable.to_string(), value.to_string());
        Ok(())
    }

    /// Number of placeholders set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no placeholders are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every placeholder in the label text.
    #[must_use]
    pub fn apply(&self, label: &str) -> String {
        let mut out = label.to_string();
        for (variable, value) in &self.entries {
            out = out.replace(variable, value);
        }
        out
    }
}
