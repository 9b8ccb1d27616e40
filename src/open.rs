//! Convenience entry points tying suffix dispatch, compression sniffing
//! and the binary decoder together (spec §4.L `open_dg`/`open_df`).

use std::path::{Path, PathBuf};

use crate::compress::{self, Envelope};
use crate::df::{self, DataFile};
use crate::dg;
use crate::dyngroup::DynGroup;
use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::reader::SliceSource;

/// Open a `.dg`/`.dgz`/`.lz4` file (or a bare stem, trying `.dg` then
/// `.dgz`) and decode it into a `DynGroup` (spec §4.L `open_dg`).
pub fn open_dg(path: impl AsRef<Path>) -> Result<DynGroup> {
    let bytes = read_by_suffix(path.as_ref(), &["dg", "dgz"])?;
    dg::decode_group(SliceSource::new(&bytes))
}

/// Same dispatch as [`open_dg`] but for the DF container (spec §4.L
/// `open_df`).
pub fn open_df(path: impl AsRef<Path>) -> Result<DataFile> {
    open_df_with_options(path, ParseOptions::default())
}

pub fn open_df_with_options(path: impl AsRef<Path>, options: ParseOptions) -> Result<DataFile> {
    let bytes = read_by_suffix(path.as_ref(), &["df", "dfz"])?;
    df::decode_data_file_with_options(SliceSource::new(&bytes), options)
}

/// Resolve `path` to a concrete, readable file: if it names an existing
/// file, use its own suffix; otherwise try each of `stem_suffixes` in
/// order against the bare path (spec §4.L edge case: a stem-only path
/// tries `.dg` then `.dgz`, or `.df` then `.dfz`).
fn read_by_suffix(path: &Path, stem_suffixes: &[&str]) -> Result<Vec<u8>> {
    if path.exists() {
        let envelope = compress::envelope_for_path(path);
        return compress::read_decompressed(path, envelope);
    }
    for suffix in stem_suffixes {
        let mut candidate = PathBuf::from(path);
        candidate.set_extension(suffix);
        if candidate.exists() {
            let envelope = compress::envelope_for_path(&candidate);
            return compress::read_decompressed(&candidate, envelope);
        }
    }
    Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("no file found for {} (tried suffixes {:?})", path.display(), stem_suffixes),
    )))
}

/// Sniff which envelope a file actually uses regardless of its extension,
/// by trying to read the magic through each candidate envelope in turn
/// (spec §4.L). Falls back to the suffix-derived guess on ambiguity.
pub fn sniff_envelope(path: &Path) -> Envelope {
    let guess = compress::envelope_for_path(path);
    if compress::peek_magic(path, guess).is_ok() {
        return guess;
    }
    for candidate in [Envelope::Raw, Envelope::Gzip, Envelope::Lz4Frame] {
        if candidate != guess && compress::peek_magic(path, candidate).is_ok() {
            return candidate;
        }
    }
    guess
}
