//! ISO base media (MP4 / MOV) creation time.
//!
//! Walks `moov` -> `mvhd` and reads its creation time, which cameras set to the
//! moment encoding started. Seconds are counted from 1904-01-01 UTC.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::errors::{RenamerError, Result};

const QT_TO_UNIX_OFFSET: i64 = 2_082_844_800;

#[derive(Debug, Clone, Copy)]
struct AtomRange {
    data_start: u64,
    data_end: u64,
}

/// Creation time of the movie in Unix seconds.
///
/// `Ok(None)` when the file has no `moov/mvhd` or the field is zero (unset).
pub fn creation_seconds(path: &Path) -> Result<Option<i64>> {
    let mut file = File::open(path).map_err(RenamerError::io("open video", path))?;
    let len = file
        .metadata()
        .map_err(RenamerError::io("stat video", path))?
        .len();
    mvhd_creation_seconds(&mut file, len).map_err(RenamerError::io("read video container", path))
}

/// Same as `creation_seconds`, over any seekable reader of `len` bytes.
pub fn mvhd_creation_seconds<R: Read + Seek>(reader: &mut R, len: u64) -> io::Result<Option<i64>> {
    let Some(moov) = find_atom(reader, 0, len, *b"moov")? else {
        return Ok(None);
    };
    let Some(mvhd) = find_atom(reader, moov.data_start, moov.data_end, *b"mvhd")? else {
        return Ok(None);
    };

    reader.seek(SeekFrom::Start(mvhd.data_start))?;
    let mut ver_flags = [0u8; 4];
    reader.read_exact(&mut ver_flags)?;
    let qt_seconds = if ver_flags[0] == 1 {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        u64::from_be_bytes(buf)
    } else {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        u32::from_be_bytes(buf) as u64
    };

    if qt_seconds == 0 {
        return Ok(None);
    }
    Ok(i64::try_from(qt_seconds).ok().map(|s| s - QT_TO_UNIX_OFFSET))
}

fn find_atom<R: Read + Seek>(
    reader: &mut R,
    start: u64,
    end: u64,
    atom_type: [u8; 4],
) -> io::Result<Option<AtomRange>> {
    let mut offset = start;
    while offset + 8 <= end {
        reader.seek(SeekFrom::Start(offset))?;
        let mut header = [0u8; 8];
        reader.read_exact(&mut header)?;
        let mut atom_size = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as u64;
        let atom_kind = [header[4], header[5], header[6], header[7]];
        let mut header_size = 8u64;

        if atom_size == 1 {
            let mut ext = [0u8; 8];
            reader.read_exact(&mut ext)?;
            atom_size = u64::from_be_bytes(ext);
            header_size = 16;
        } else if atom_size == 0 {
            // extends to end of enclosing range
            atom_size = end.saturating_sub(offset);
        }
        if atom_size < header_size {
            return Ok(None);
        }
        let atom_end = offset.saturating_add(atom_size).min(end);

        if atom_kind == atom_type {
            return Ok(Some(AtomRange {
                data_start: offset + header_size,
                data_end: atom_end,
            }));
        }
        offset = atom_end;
    }
    Ok(None)
}
