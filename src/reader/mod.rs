//! Generic tag-dispatch decode engine shared by the file and slice
//! readers (spec components E/F: "both obey the same state machine").

pub mod file;
pub mod slice;
pub mod source;

pub use file::FileSource;
pub use slice::SliceSource;
pub use source::Source;

use crate::context::ContextStack;
use crate::endian;
use crate::error::{Error, Result};
use crate::tag::{self, Context, WireKind, END_STRUCT};

/// Per-session decode handle: owns the byte source, the flip flag, and
/// the context stack. Replaces the legacy process-wide globals (spec §5,
/// §9).
pub struct Decoder<S: Source> {
    source: S,
    flip: bool,
    stack: ContextStack,
}

impl<S: Source> Decoder<S> {
    pub fn new(source: S) -> Self {
        Decoder {
            source,
            flip: false,
            stack: ContextStack::new(Context::TopLevel),
        }
    }

    pub fn flip(&self) -> bool {
        self.flip
    }

    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Verify the 4-byte magic (never flipped, spec §3.3) and negotiate
    /// byte order from the `VERSION` tag that must immediately follow.
    pub fn read_magic_and_version(&mut self, expected_magic: [u8; 4], expected_version: f32) -> Result<()> {
        let mut magic = [0u8; 4];
        self.source.read_exact(&mut magic)?;
        if magic != expected_magic {
            return Err(Error::BadMagic(magic));
        }

        let tag = self.expect_tag(Context::TopLevel)?;
        let entry = Context::TopLevel
            .lookup(tag)
            .ok_or(Error::UnknownTag { context: "TOP_LEVEL", tag })?;
        if entry.kind != WireKind::Version {
            return Err(Error::UnknownTag { context: "TOP_LEVEL", tag });
        }

        let raw = self.read_u32_raw()?;
        let v = f32::from_bits(raw);
        if v == expected_version {
            self.flip = false;
        } else if endian::flip_f32(v) == expected_version {
            self.flip = true;
        } else {
            return Err(Error::BadVersion(v));
        }
        Ok(())
    }

    /// Read the next tag byte in the given context, or `None` at a clean
    /// top-level EOF (spec §9 bullet 4: either an explicit trailing
    /// `END_STRUCT` or EOF is accepted at the top level).
    pub fn next_tag(&mut self) -> Result<Option<u8>> {
        self.source.read_tag()
    }

    fn expect_tag(&mut self, context: Context) -> Result<u8> {
        self.source
            .read_tag()?
            .ok_or(Error::UnknownTag { context: context.name(), tag: 0 })
    }

    pub fn push(&mut self, ctx: Context) {
        self.stack.push(ctx);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn current(&self) -> Context {
        self.stack.current()
    }

    pub fn lookup(&self, tag: u8) -> Option<&'static tag::TagEntry> {
        self.current().lookup(tag)
    }

    // --- raw scalar reads (native order, flipped after the fact) --------

    fn read_u32_raw(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.source.read_exact(&mut buf)?;
        Ok(u32::from_ne_bytes(buf))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let mut buf = [0u8; 1];
        self.source.read_exact(&mut buf)?;
        Ok(buf[0] as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.source.read_exact(&mut buf)?;
        let v = i16::from_ne_bytes(buf);
        Ok(if self.flip { endian::flip16(v as u16) as i16 } else { v })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.source.read_exact(&mut buf)?;
        let v = i32::from_ne_bytes(buf);
        Ok(if self.flip { endian::flip_i32(v) } else { v })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let v = self.read_u32_raw()?;
        Ok(if self.flip { endian::flip32(v) } else { v })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.source.read_exact(&mut buf)?;
        let v = f32::from_ne_bytes(buf);
        Ok(if self.flip { endian::flip_f32(v) } else { v })
    }

    /// Length-prefixed string; length includes the trailing NUL. A
    /// length of 0 (never emitted by this crate's own writer, but
    /// tolerated on read per spec §4.E/F edge cases) yields an owned
    /// empty string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let mut buf = vec![0u8; len];
        self.source.read_exact(&mut buf)?;
        // Drop the trailing NUL the length accounts for.
        buf.pop();
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn read_count(&mut self) -> Result<usize> {
        Ok(self.read_u32()? as usize)
    }

    pub fn read_long_array(&mut self) -> Result<Vec<i32>> {
        let n = self.read_count()?;
        (0..n).map(|_| self.read_i32()).collect()
    }

    pub fn read_short_array(&mut self) -> Result<Vec<i16>> {
        let n = self.read_count()?;
        (0..n).map(|_| self.read_i16()).collect()
    }

    pub fn read_float_array(&mut self) -> Result<Vec<f32>> {
        let n = self.read_count()?;
        (0..n).map(|_| self.read_f32()).collect()
    }

    pub fn read_char_array(&mut self) -> Result<Vec<i8>> {
        let n = self.read_count()?;
        (0..n).map(|_| self.read_i8()).collect()
    }

    pub fn read_string_array(&mut self) -> Result<Vec<String>> {
        let n = self.read_count()?;
        (0..n).map(|_| self.read_string()).collect()
    }

    /// Consume a structure tag's opener already matched by the caller,
    /// push `child`, and return. Pairs with `end_struct`.
    pub fn begin_struct(&mut self, child: Context) {
        self.push(child);
    }

    /// Consume the `END_STRUCT` terminator for the current context.
    pub fn end_struct(&mut self) -> Result<()> {
        let tag = self.expect_tag(self.current())?;
        if tag != END_STRUCT {
            return Err(Error::UnknownTag { context: self.current().name(), tag });
        }
        self.pop();
        Ok(())
    }
}
