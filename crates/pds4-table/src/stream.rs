//! Byte-counted data stream shared between a product and its tables.
//!
//! The product owns the stream for the lifetime of one output file and
//! shares it with every table object. Writes are sequential and
//! single-threaded; the position counter is what table offsets are captured
//! from, so the stream must be the only writer of the underlying file.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A writer that tracks how many bytes it has emitted.
pub struct DataStream {
    inner: Box<dyn Write>,
    position: u64,
}

impl DataStream {
    /// Wrap a writer positioned at the start of the data file.
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            inner: Box::new(writer),
            position: 0,
        }
    }

    /// Current write position, in bytes from the start of the file.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Convert into a handle that can be shared across table objects.
    #[must_use]
    pub fn shared(self) -> SharedStream {
        Rc::new(RefCell::new(self))
    }
}

impl Write for DataStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Shared handle to a [`DataStream`]. Not `Send`; writes stay on one thread.
pub type SharedStream = Rc<RefCell<DataStream>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracks_bytes_written() {
        let mut stream = DataStream::new(Vec::new());
        assert_eq!(stream.position(), 0);
        stream.write_all(b"hello").unwrap();
        assert_eq!(stream.position(), 5);
        stream.write_all(b"\r\n").unwrap();
        assert_eq!(stream.position(), 7);
    }
}
