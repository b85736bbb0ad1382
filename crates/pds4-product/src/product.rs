//! The observational product lifecycle.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use pds4_label::{LabelTemplate, MetadataMap, render_file_area};
use pds4_table::{DataStream, FieldValue, SharedStream, TableCharacter, TableLayout};

use crate::error::{ProductError, Result};

/// Identifies one table owned by a [`ProductObservational`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHandle(usize);

/// Writer for PDS4 observational products of one fixed type.
///
/// One `ProductObservational` is configured once (template, tables, fields)
/// and then reused to write any number of products of that type. Each
/// product is a data file plus an XML label derived from the template; the
/// per-product state of every table is reset when a new product starts, so
/// nothing leaks from one product into the next.
pub struct ProductObservational {
    template: LabelTemplate,
    tables: Vec<TableCharacter>,
    metadata: MetadataMap,
    created: Option<DateTime<Utc>>,
    open: Option<OpenProduct>,
}

struct OpenProduct {
    data_path: PathBuf,
    label_path: PathBuf,
    stream: SharedStream,
}

impl ProductObservational {
    /// Create a product writer from a label template file.
    ///
    /// # Errors
    ///
    /// Fails when the template cannot be read or is not well-formed XML.
    pub fn new(template_path: impl AsRef<Path>) -> Result<Self> {
        let template = LabelTemplate::load(template_path)?;
        Ok(Self {
            template,
            tables: Vec::new(),
            metadata: MetadataMap::new(),
            created: None,
            open: None,
        })
    }

    /// Fix the `creation_date_time` written into labels. Defaults to the
    /// wall clock at close time.
    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Declare that products of this type contain a fixed-width ASCII
    /// table with the given name.
    pub fn declare_table_character(&mut self, name: &str) -> TableHandle {
        debug!(table = name, "declare table character");
        self.tables.push(TableCharacter::new(name));
        TableHandle(self.tables.len() - 1)
    }

    /// Append a field declaration to a table.
    ///
    /// # Errors
    ///
    /// Propagates format and state errors from the table.
    pub fn declare_field(
        &mut self,
        table: TableHandle,
        format: &str,
        data_type: &str,
        name: &str,
        unit: &str,
        description: &str,
    ) -> Result<()> {
        self.table_mut(table)?
            .declare_field(format, data_type, name, unit, description)?;
        Ok(())
    }

    /// Borrow a declared table.
    ///
    /// # Errors
    ///
    /// Fails when the handle does not belong to this product.
    pub fn table(&self, handle: TableHandle) -> Result<&TableCharacter> {
        self.tables.get(handle.0).ok_or(ProductError::UnknownTable)
    }

    /// Start a new product writing to `data_file`.
    ///
    /// The label file name is derived by swapping the data file extension
    /// for `.xml`. Every table is reset and bound to the fresh data
    /// stream, and per-product metadata is cleared.
    ///
    /// # Errors
    ///
    /// Fails when the previous product is still open or the data file
    /// cannot be created.
    pub fn new_product(&mut self, data_file: impl AsRef<Path>) -> Result<()> {
        if let Some(open) = &self.open {
            return Err(ProductError::ProductStillOpen {
                path: open.data_path.clone(),
            });
        }

        let data_path = data_file.as_ref().to_path_buf();
        let label_path = data_path.with_extension("xml");
        debug!(data = %data_path.display(), label = %label_path.display(), "new product");

        let file = File::create(&data_path)?;
        let stream = DataStream::new(BufWriter::new(file)).shared();
        for table in &mut self.tables {
            table.reset();
            table.bind(Rc::clone(&stream));
        }
        self.metadata = MetadataMap::new();
        self.open = Some(OpenProduct {
            data_path,
            label_path,
            stream,
        });
        Ok(())
    }

    /// Set a `$placeholder` value for the current product's label.
    ///
    /// # Errors
    ///
    /// Fails when the variable does not start with `$`.
    pub fn set_metadata(&mut self, variable: &str, value: &str) -> Result<()> {
        self.metadata.set(variable, value)?;
        Ok(())
    }

    /// Encode one record and append it to the current data file.
    ///
    /// # Errors
    ///
    /// Propagates validation, state and I/O errors from the table.
    pub fn add_record(&mut self, table: TableHandle, values: &[FieldValue]) -> Result<()> {
        self.table_mut(table)?.add_record(values)?;
        Ok(())
    }

    /// Close the current product: release the data file, then write the
    /// label.
    ///
    /// The data stream is flushed and closed exactly once, before label
    /// emission, so the file handle is released even when writing the
    /// label fails afterwards.
    ///
    /// # Errors
    ///
    /// Fails when no product is open, the data stream cannot be flushed,
    /// or the label cannot be rendered or written.
    pub fn close_product(&mut self) -> Result<()> {
        let open = self.open.take().ok_or(ProductError::NoOpenProduct)?;

        let layouts: Vec<TableLayout> = self.tables.iter().map(TableCharacter::layout).collect();
        for table in &mut self.tables {
            table.unbind();
        }

        // Flush through the handle, then drop the last reference; the data
        // file is closed here no matter what label emission does below.
        let flushed = open.stream.borrow_mut().flush();
        drop(open.stream);
        flushed?;

        let file_name = open
            .data_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let created = self.created.unwrap_or_else(Utc::now);
        let file_area = render_file_area(&file_name, created, &layouts)?;
        let label = self.metadata.apply(&self.template.render(&file_area));
        fs::write(&open.label_path, label)?;

        debug!(
            label = %open.label_path.display(),
            tables = layouts.len(),
            "product closed"
        );
        Ok(())
    }

    fn table_mut(&mut self, handle: TableHandle) -> Result<&mut TableCharacter> {
        self.tables
            .get_mut(handle.0)
            .ok_or(ProductError::UnknownTable)
    }
}
