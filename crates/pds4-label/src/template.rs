//! Label templates.
//!
//! A template is a complete `Product_Observational` document minus the
//! `File_Area_Observational` element, which is spliced in as the last child
//! of the root when the product is closed. Template text outside the
//! injection point is reproduced byte for byte, so namespace declarations
//! and user formatting survive.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{LabelError, Result};

/// A validated label template with a known injection point.
#[derive(Debug, Clone)]
pub struct LabelTemplate {
    text: String,
    insert_at: usize,
}

impl LabelTemplate {
    /// Load and validate a template file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not well-formed XML, or has
    /// no root element to append the file area to.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|err| LabelError::template_read(path, err))?;
        Self::from_xml(text)
    }

    /// Validate template text held in memory.
    ///
    /// # Errors
    ///
    /// Fails when the text is not well-formed XML or has no root element.
    pub fn from_xml(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let insert_at = find_root_close(&text)?;
        Ok(Self { text, insert_at })
    }

    /// The raw template text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Produce the label text with the file-area fragment spliced in as the
    /// last child of the root element, indented one level.
    #[must_use]
    pub fn render(&self, file_area: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + file_area.len() + 64);
        out.push_str(&self.text[..self.insert_at]);
        for line in file_area.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.text[self.insert_at..]);
        out
    }
}

/// Byte position of the root element's closing tag.
fn find_root_close(text: &str) -> Result<usize> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().check_end_names = true;
    let mut depth = 0usize;
    loop {
        let position = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|source| LabelError::TemplateParse { source })?;
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(position);
                }
            }
            Event::Empty(_) if depth == 0 => return Err(LabelError::EmptyRoot),
            Event::Eof => return Err(LabelError::MissingRoot),
            _ => {}
        }
    }
}
