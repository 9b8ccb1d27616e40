//! `Source` unifies the file-backed and slice-backed readers (spec
//! components E and F) behind one trait so the tag-dispatch state
//! machine (spec §4.E/F) is implemented exactly once.

use crate::error::Result;

/// A sequential byte source that the decoder pulls tagged items from.
pub trait Source {
    /// Read exactly `buf.len()` bytes, or return `Error::ShortRead`.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Try to read one byte; `Ok(None)` signals a clean end of stream
    /// (used only at the point where a top-level tag is expected).
    fn read_tag(&mut self) -> Result<Option<u8>>;

    /// Bytes consumed so far. Meaningful for the slice reader (spec
    /// component F's "returns bytes consumed" contract); the file
    /// reader tracks it too so both share one accounting scheme.
    fn position(&self) -> usize;
}
