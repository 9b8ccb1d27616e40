//! Compression envelopes (spec component L, §4.L).
//!
//! Gzip via `flate2`, LZ4-frame via `lz4_flex`. Grounded on the pack's own
//! precedent for these crates (`other_examples/manifests/future-file-format-F3`
//! for `lz4_flex::frame`, several manifests under `other_examples/manifests`
//! for `flate2`).

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use lz4_flex::frame::{FrameDecoder, FrameEncoder, FrameInfo};

use crate::error::{Error, Result};

/// Bit 3 of the frame descriptor's FLG byte (the 5th byte of a frame,
/// right after the 4-byte magic number) marks whether `contentSize` is
/// present, per the LZ4 frame format.
const FLG_CONTENT_SIZE_BIT: u8 = 0b0000_1000;

/// Check that an LZ4 frame's header declares `contentSize`, then rewind
/// so the caller can decode the frame from the start. `lz4_flex` parses
/// `contentSize` when present but stays silent when it's absent, so this
/// crate enforces the requirement itself by reading the FLG byte.
fn require_lz4_content_size(file: &mut File) -> Result<()> {
    let mut header = [0u8; 5];
    file.read_exact(&mut header)
        .map_err(|e| Error::DecompressError(e.to_string()))?;
    file.seek(SeekFrom::Start(0))
        .map_err(|e| Error::DecompressError(e.to_string()))?;
    if header[4] & FLG_CONTENT_SIZE_BIT == 0 {
        return Err(Error::DecompressError("missing contentSize".to_string()));
    }
    Ok(())
}

/// How a file on disk is wrapped, decided by suffix dispatch (spec §4.L).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Raw,
    Gzip,
    Lz4Frame,
}

/// Suffix dispatch used by `open_dg`/`open_df`: `.dgz`/`.dfz` are gzip,
/// `.lz4`/`.LZ4` are LZ4-frame, anything else (including no suffix) is raw.
pub fn envelope_for_path(path: &Path) -> Envelope {
    match path.extension().and_then(|e| e.to_str()) {
        Some("dgz") | Some("dfz") | Some("gz") => Envelope::Gzip,
        Some("lz4") | Some("LZ4") => Envelope::Lz4Frame,
        _ => Envelope::Raw,
    }
}

/// Decompress `path` fully into memory according to its envelope. Gzip and
/// raw files are read directly; `Envelope::Raw` still goes through this
/// path unchanged so callers don't need to branch themselves.
pub fn read_decompressed(path: &Path, envelope: Envelope) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    match envelope {
        Envelope::Raw => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        }
        Envelope::Gzip => {
            let mut decoder = GzDecoder::new(file);
            let mut buf = Vec::new();
            decoder
                .read_to_end(&mut buf)
                .map_err(|e| Error::DecompressError(e.to_string()))?;
            Ok(buf)
        }
        Envelope::Lz4Frame => {
            require_lz4_content_size(&mut file)?;
            let mut decoder = FrameDecoder::new(&mut file);
            let mut buf = Vec::new();
            decoder
                .read_to_end(&mut buf)
                .map_err(|e| Error::DecompressError(e.to_string()))?;
            Ok(buf)
        }
    }
}

/// Write `bytes` to `path`, wrapping in the requested envelope. Gzip goes
/// through a tempfile so a partially written file never clobbers an
/// existing one on encode failure (spec §4.L).
pub fn write_compressed(path: &Path, bytes: &[u8], envelope: Envelope) -> Result<()> {
    match envelope {
        Envelope::Raw => {
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            Ok(())
        }
        Envelope::Gzip => {
            let mut tmp = tempfile::NamedTempFile::new_in(
                path.parent().unwrap_or_else(|| Path::new(".")),
            )?;
            {
                let mut encoder = GzEncoder::new(&mut tmp, Compression::default());
                encoder
                    .write_all(bytes)
                    .map_err(|e| Error::WriteError(e.to_string()))?;
                encoder.finish().map_err(|e| Error::WriteError(e.to_string()))?;
            }
            tmp.persist(path).map_err(|e| Error::WriteError(e.to_string()))?;
            Ok(())
        }
        Envelope::Lz4Frame => {
            let file = File::create(path)?;
            let frame_info = FrameInfo::new().content_size(Some(bytes.len() as u64));
            let mut encoder = FrameEncoder::with_frame_info(frame_info, file);
            encoder
                .write_all(bytes)
                .map_err(|e| Error::WriteError(e.to_string()))?;
            encoder.finish().map_err(|e| Error::WriteError(e.to_string()))?;
            Ok(())
        }
    }
}

/// Sniff the magic at the start of `path` without fully decompressing,
/// used when a stem-only path is given and both `.dg`/`.dgz` (or
/// `.df`/`.dfz`) must be tried (spec §4.L `open_dg`/`open_df`).
pub fn peek_magic(path: &Path, envelope: Envelope) -> Result<[u8; 4]> {
    let mut magic = [0u8; 4];
    match envelope {
        Envelope::Raw => {
            let mut file = File::open(path)?;
            file.read_exact(&mut magic)?;
        }
        Envelope::Gzip => {
            let file = File::open(path)?;
            let mut decoder = GzDecoder::new(file);
            decoder
                .read_exact(&mut magic)
                .map_err(|e| Error::DecompressError(e.to_string()))?;
        }
        Envelope::Lz4Frame => {
            let mut file = File::open(path)?;
            require_lz4_content_size(&mut file)?;
            let mut decoder = FrameDecoder::new(file);
            decoder
                .read_exact(&mut magic)
                .map_err(|e| Error::DecompressError(e.to_string()))?;
        }
    }
    Ok(magic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dgz");
        let payload = b"hello dg world".to_vec();
        write_compressed(&path, &payload, Envelope::Gzip).unwrap();
        let back = read_decompressed(&path, Envelope::Gzip).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn lz4_frame_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.lz4");
        let payload = vec![7u8; 4096];
        write_compressed(&path, &payload, Envelope::Lz4Frame).unwrap();
        let back = read_decompressed(&path, Envelope::Lz4Frame).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn lz4_frame_missing_content_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.lz4");
        let file = File::create(&path).unwrap();
        let mut encoder = FrameEncoder::with_frame_info(FrameInfo::new(), file);
        encoder.write_all(b"no content size here").unwrap();
        encoder.finish().unwrap();

        let err = read_decompressed(&path, Envelope::Lz4Frame).unwrap_err();
        assert!(matches!(err, Error::DecompressError(_)));
    }

    #[test]
    fn envelope_dispatch_follows_suffix() {
        assert_eq!(envelope_for_path(Path::new("a.dgz")), Envelope::Gzip);
        assert_eq!(envelope_for_path(Path::new("a.lz4")), Envelope::Lz4Frame);
        assert_eq!(envelope_for_path(Path::new("a.dg")), Envelope::Raw);
    }

    #[test]
    fn raw_round_trips_via_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dg");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"xyz").unwrap();
        drop(f);
        let back = read_decompressed(&path, Envelope::Raw).unwrap();
        assert_eq!(back, b"xyz");
    }
}
