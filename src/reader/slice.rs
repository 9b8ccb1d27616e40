//! Stream reader over an in-memory buffer (spec component F).
//!
//! Same state machine as the file reader, but the caller is responsible
//! for the underlying allocation; `position()` after a decode call tells
//! the caller how many bytes were consumed so it can advance its own
//! cursor (spec §4.F).

use crate::error::{Error, Result};
use crate::reader::source::Source;

pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceSource { data, pos: 0 }
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl<'a> Source for SliceSource<'a> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.pos + buf.len() > self.data.len() {
            return Err(Error::ShortRead);
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }

    fn read_tag(&mut self) -> Result<Option<u8>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    fn position(&self) -> usize {
        self.pos
    }
}
