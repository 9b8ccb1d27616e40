//! Error taxonomy for the dg/df codec.
//!
//! Mirrors `goblin::error`: a small hand-rolled enum with manual `Display`
//! and `From` impls rather than an external derive crate.

use core::fmt;
use core::result;

/// Everything that can go wrong decoding or encoding a container.
#[derive(Debug)]
pub enum Error {
    /// The 4-byte magic at the start of the stream matched neither the DF
    /// nor the DG family (and, if a gzip fallback was attempted, that
    /// failed too).
    BadMagic([u8; 4]),
    /// The version float matched the expected constant in neither byte
    /// order.
    BadVersion(f32),
    /// A tag byte had no entry in the current context's table.
    UnknownTag { context: &'static str, tag: u8 },
    /// A `LIST_DATA` slot was not introduced by a `SUBLIST` structure tag.
    UnexpectedTag { expected: &'static str, found: u8 },
    /// A DF declared count (`NOBS_PERIODS`, `NCELL_INFOS`, `NSP_CHANNELS`)
    /// was exceeded by the number of child structures actually present.
    TooManyChildren { context: &'static str, declared: usize },
    /// A fixed-size coordinate/window array tag carried the wrong element
    /// count.
    InvalidFixedArray { tag: &'static str, expected: usize, got: usize },
    /// The underlying byte source ended before a payload was fully read.
    ShortRead,
    /// I/O failure in the underlying source or sink.
    Io(std::io::Error),
    /// A write buffer failed to grow.
    OutOfMemory,
    /// The gzip or LZ4-frame envelope could not be decoded.
    DecompressError(String),
    /// The output sink rejected bytes during a record session.
    WriteError(String),
    /// The decode was explicitly aborted by the caller.
    Aborted,
}

pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadMagic(m) => write!(f, "bad magic number: {m:02x?}"),
            Error::BadVersion(v) => write!(f, "version {v} matched neither byte order"),
            Error::UnknownTag { context, tag } => {
                write!(f, "unknown tag 0x{tag:02x} in context {context}")
            }
            Error::UnexpectedTag { expected, found } => {
                write!(f, "expected {expected}, found tag 0x{found:02x}")
            }
            Error::TooManyChildren { context, declared } => {
                write!(f, "{context}: more children than the declared count {declared}")
            }
            Error::InvalidFixedArray { tag, expected, got } => {
                write!(f, "{tag}: expected {expected} elements, got {got}")
            }
            Error::ShortRead => write!(f, "short read: expected more bytes than the source had"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::OutOfMemory => write!(f, "allocation failed while growing the write buffer"),
            Error::DecompressError(msg) => write!(f, "decompression failed: {msg}"),
            Error::WriteError(msg) => write!(f, "write failed: {msg}"),
            Error::Aborted => write!(f, "decode aborted"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::ShortRead,
            _ => Error::Io(e),
        }
    }
}
