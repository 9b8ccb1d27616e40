//! Stream reader over a sequential byte source (spec component E).

use std::io::Read;

use crate::error::{Error, Result};
use crate::reader::source::Source;

/// Pulls tagged items out of anything implementing `Read` (a `File`, a
/// `BufReader`, a decompressed gzip stream, …).
pub struct FileSource<R> {
    inner: R,
    position: usize,
}

impl<R: Read> FileSource<R> {
    pub fn new(inner: R) -> Self {
        FileSource { inner, position: 0 }
    }
}

impl<R: Read> Source for FileSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::ShortRead,
            _ => Error::Io(e),
        })?;
        self.position += buf.len();
        Ok(())
    }

    fn read_tag(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.position += 1;
                Ok(Some(byte[0]))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn position(&self) -> usize {
        self.position
    }
}
