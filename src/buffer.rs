//! Append-only growing write buffer (spec component D).
//!
//! Grounded on `dynio.c`'s `push()`/`send_bytes()` pair: a single
//! process-wide buffer that grows by a fixed increment and receives tag
//! bytes followed by scalar/array payloads. Here the buffer is owned by
//! an `EncodeSession` instead of living at file scope (§5, §9).

use crate::context::ContextStack;
use crate::error::{Error, Result};
use crate::tag::{self, Context, WireKind, END_STRUCT};

/// Default growth increment, matching the legacy `DG_DATA_BUFFER_SIZE`
/// class of constant rounded up to a full page-friendly size.
pub const DEFAULT_INCREMENT: usize = 64 * 1024;

/// An auto-growing byte vector that records tagged binary output.
pub struct RecordBuffer {
    data: Vec<u8>,
    increment: usize,
    stack: ContextStack,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::with_increment(DEFAULT_INCREMENT)
    }

    pub fn with_increment(increment: usize) -> Self {
        RecordBuffer {
            data: Vec::with_capacity(increment.max(1)),
            increment: increment.max(1),
            stack: ContextStack::new(Context::TopLevel),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let needed = self.data.len() + additional;
        if needed > self.data.capacity() {
            // Grow by whole increments, doubling the bump if a single
            // write is itself larger than one increment.
            let mut bump = self.increment;
            while bump < additional {
                bump = bump.saturating_mul(2);
                if bump == 0 {
                    return Err(Error::OutOfMemory);
                }
            }
            self.data.try_reserve(bump).map_err(|_| Error::OutOfMemory)?;
        }
        Ok(())
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn push_tag(&mut self, tag: u8) -> Result<()> {
        self.push_bytes(&[tag])
    }

    // --- magic / version -------------------------------------------------

    pub fn record_magic(&mut self, magic: [u8; 4]) -> Result<()> {
        self.push_bytes(&magic)
    }

    pub fn record_version(&mut self, version: f32) -> Result<()> {
        let entry = tag::tag_by_name(Context::TopLevel, "VERSION");
        self.push_tag(entry.tag)?;
        self.push_bytes(&version.to_ne_bytes())
    }

    // --- structure ---------------------------------------------------------

    pub fn begin_struct(&mut self, name: &str) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        debug_assert_eq!(entry.kind, WireKind::Structure);
        self.push_tag(entry.tag)?;
        self.stack.push(entry.child.expect("structure tag must declare a child context"));
        Ok(())
    }

    pub fn end_struct(&mut self) -> Result<()> {
        self.push_tag(END_STRUCT)?;
        self.stack.pop();
        Ok(())
    }

    pub fn current_context(&self) -> Context {
        self.stack.current()
    }

    // --- scalars -------------------------------------------------------

    pub fn record_flag(&mut self, name: &str) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)
    }

    pub fn record_char(&mut self, name: &str, v: i8) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&v.to_ne_bytes())
    }

    pub fn record_short(&mut self, name: &str, v: i16) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&v.to_ne_bytes())
    }

    pub fn record_long(&mut self, name: &str, v: i32) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&v.to_ne_bytes())
    }

    pub fn record_float(&mut self, name: &str, v: f32) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&v.to_ne_bytes())
    }

    /// Length-prefixed string; the prefix includes the trailing NUL.
    /// Skipped entirely if `s` is `None` (spec §4.D).
    pub fn record_string(&mut self, name: &str, s: Option<&str>) -> Result<()> {
        let Some(s) = s else { return Ok(()) };
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        let len = (s.len() + 1) as u32;
        self.push_bytes(&len.to_ne_bytes())?;
        self.push_bytes(s.as_bytes())?;
        self.push_bytes(&[0u8])
    }

    // --- arrays ----------------------------------------------------------

    pub fn record_long_array(&mut self, name: &str, vals: &[i32]) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(vals.len() as u32).to_ne_bytes())?;
        for v in vals {
            self.push_bytes(&v.to_ne_bytes())?;
        }
        Ok(())
    }

    pub fn record_short_array(&mut self, name: &str, vals: &[i16]) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(vals.len() as u32).to_ne_bytes())?;
        for v in vals {
            self.push_bytes(&v.to_ne_bytes())?;
        }
        Ok(())
    }

    pub fn record_float_array(&mut self, name: &str, vals: &[f32]) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(vals.len() as u32).to_ne_bytes())?;
        for v in vals {
            self.push_bytes(&v.to_ne_bytes())?;
        }
        Ok(())
    }

    pub fn record_char_array(&mut self, name: &str, vals: &[i8]) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(vals.len() as u32).to_ne_bytes())?;
        for v in vals {
            self.push_bytes(&v.to_ne_bytes())?;
        }
        Ok(())
    }

    pub fn record_string_array(&mut self, name: &str, vals: &[String]) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(vals.len() as u32).to_ne_bytes())?;
        for s in vals {
            let len = (s.len() + 1) as u32;
            self.push_bytes(&len.to_ne_bytes())?;
            self.push_bytes(s.as_bytes())?;
            self.push_bytes(&[0u8])?;
        }
        Ok(())
    }

    /// Writes only the count; the caller then emits `n` `SUBLIST`
    /// structures via `begin_struct("SUBLIST")`/`end_struct()`.
    pub fn record_list_array(&mut self, name: &str, n: usize) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)?;
        self.push_bytes(&(n as u32).to_ne_bytes())
    }

    /// Writes the untyped `DATA` marker tag (no payload of its own); the
    /// caller follows it immediately with the concrete typed-array
    /// recorder, exactly mirroring `dgRecordVoidArray` in the legacy
    /// source, which stamps the marker then re-dispatches.
    pub fn record_void_array_marker(&mut self, name: &str) -> Result<()> {
        let entry = tag::tag_by_name(self.stack.current(), name);
        self.push_tag(entry.tag)
    }
}

impl Default for RecordBuffer {
    fn default() -> Self {
        Self::new()
    }
}
