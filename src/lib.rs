//! Tagged binary container codec and dynamic-list/dynamic-group data
//! model for heterogeneous, hierarchical records.
//!
//! Two container families share one tag-dispatch engine: `dg` (a
//! generic named group of named typed lists) and `df` (a fixed
//! neurophysiology-session schema). Both are reachable through a
//! [`buffer::RecordBuffer`] writer and either a [`reader::FileSource`] or
//! [`reader::SliceSource`] reader; [`ascii`] dumps either one as text and
//! [`compress`]/[`open`] add gzip/LZ4-frame envelopes and path dispatch.

pub mod ascii;
pub mod buffer;
pub mod compress;
pub mod context;
pub mod df;
pub mod dg;
pub mod dyngroup;
pub mod dynlist;
pub mod endian;
pub mod error;
pub mod open;
pub mod options;
pub mod reader;
pub mod tag;

pub use df::DataFile;
pub use dyngroup::DynGroup;
pub use dynlist::{DataType, DynList, DynValues};
pub use error::{Error, Result};
pub use open::{open_dg, open_df};
