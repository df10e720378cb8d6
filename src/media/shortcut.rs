//! Shortcut resolution.
//!
//! A shortcut is either a symbolic link or a Windows shell link (`.lnk`). For
//! shell links the target is read from the `LinkInfo` structure
//! (`LocalBasePath` + `CommonPathSuffix`, Unicode variants preferred).

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::{RenamerError, Result};

const HEADER_SIZE: u32 = 0x4C;
const HAS_LINK_TARGET_ID_LIST: u32 = 0x1;
const HAS_LINK_INFO: u32 = 0x2;
const VOLUME_ID_AND_LOCAL_BASE_PATH: u32 = 0x1;
// Shell links are tiny; anything bigger is not one.
const MAX_LNK_BYTES: u64 = 1 << 20;

/// Capability: find the file a shortcut points at.
pub trait ShortcutResolver {
    fn resolve(&self, link: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShortcutResolver;

impl ShortcutResolver for SystemShortcutResolver {
    fn resolve(&self, link: &Path) -> Result<PathBuf> {
        let meta = fs::symlink_metadata(link).map_err(RenamerError::io("stat shortcut", link))?;
        if meta.file_type().is_symlink() {
            return dunce::canonicalize(link).map_err(RenamerError::io("follow shortcut", link));
        }

        let mut bytes = Vec::new();
        fs::File::open(link)
            .and_then(|f| f.take(MAX_LNK_BYTES).read_to_end(&mut bytes))
            .map_err(RenamerError::io("read shortcut", link))?;
        lnk_target(&bytes)
            .map(PathBuf::from)
            .ok_or_else(|| RenamerError::ShortcutUnresolved(link.to_path_buf()))
    }
}

fn u16_at(b: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(b.get(at..at + 2)?.try_into().ok()?))
}

fn u32_at(b: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(b.get(at..at + 4)?.try_into().ok()?))
}

fn ansi_z(b: &[u8], at: usize) -> Option<String> {
    let rest = b.get(at..)?;
    let end = rest.iter().position(|&c| c == 0)?;
    Some(String::from_utf8_lossy(&rest[..end]).into_owned())
}

fn utf16_z(b: &[u8], at: usize) -> Option<String> {
    let rest = b.get(at..)?;
    let units: Vec<u16> = rest
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .take_while(|&u| u != 0)
        .collect();
    String::from_utf16(&units).ok()
}

/// Extract the local target path from the bytes of a shell link.
pub fn lnk_target(bytes: &[u8]) -> Option<String> {
    if u32_at(bytes, 0)? != HEADER_SIZE {
        return None;
    }
    let flags = u32_at(bytes, 20)?;
    if flags & HAS_LINK_INFO == 0 {
        return None;
    }

    let mut offset = HEADER_SIZE as usize;
    if flags & HAS_LINK_TARGET_ID_LIST != 0 {
        offset += 2 + u16_at(bytes, offset)? as usize;
    }

    let info = bytes.get(offset..)?;
    let info_header_size = u32_at(info, 4)?;
    let info_flags = u32_at(info, 8)?;
    if info_flags & VOLUME_ID_AND_LOCAL_BASE_PATH == 0 {
        return None;
    }

    let unicode = if info_header_size >= 0x24 {
        let base_u = u32_at(info, 28)? as usize;
        let suffix_u = u32_at(info, 32)? as usize;
        (base_u != 0).then(|| {
            let base = utf16_z(info, base_u)?;
            let suffix = if suffix_u != 0 { utf16_z(info, suffix_u)? } else { String::new() };
            Some(base + &suffix)
        })
    } else {
        None
    };
    if let Some(path) = unicode.flatten() {
        return Some(path);
    }

    let base = ansi_z(info, u32_at(info, 16)? as usize)?;
    let suffix_off = u32_at(info, 24)? as usize;
    let suffix = if suffix_off != 0 { ansi_z(info, suffix_off)? } else { String::new() };
    Some(base + &suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal shell link: header, no ID list, LinkInfo with an ANSI local base path.
    fn ansi_link(target: &str) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend(HEADER_SIZE.to_le_bytes());
        b.extend([0u8; 16]); // LinkCLSID
        b.extend(HAS_LINK_INFO.to_le_bytes());
        b.resize(HEADER_SIZE as usize, 0);

        let header = 0x1Cu32;
        let base_off = header;
        let suffix_off = base_off + target.len() as u32 + 1;
        let size = suffix_off + 1;
        b.extend(size.to_le_bytes());
        b.extend(header.to_le_bytes());
        b.extend(VOLUME_ID_AND_LOCAL_BASE_PATH.to_le_bytes());
        b.extend(0u32.to_le_bytes()); // VolumeIDOffset
        b.extend(base_off.to_le_bytes());
        b.extend(0u32.to_le_bytes()); // CommonNetworkRelativeLinkOffset
        b.extend(suffix_off.to_le_bytes());
        b.extend(target.as_bytes());
        b.push(0);
        b.push(0); // empty suffix
        b
    }

    #[test]
    fn reads_ansi_local_base_path() {
        let bytes = ansi_link(r"D:\Photos\IMG_4275.JPG");
        assert_eq!(lnk_target(&bytes).as_deref(), Some(r"D:\Photos\IMG_4275.JPG"));
    }

    #[test]
    fn skips_target_id_list() {
        let mut bytes = ansi_link(r"C:\x.mp4");
        // Insert a 6-byte ID list right after the header.
        let flags = HAS_LINK_INFO | HAS_LINK_TARGET_ID_LIST;
        bytes[20..24].copy_from_slice(&flags.to_le_bytes());
        let mut id_list = 4u16.to_le_bytes().to_vec();
        id_list.extend([9u8; 4]);
        let tail = bytes.split_off(HEADER_SIZE as usize);
        bytes.extend(id_list);
        bytes.extend(tail);
        assert_eq!(lnk_target(&bytes).as_deref(), Some(r"C:\x.mp4"));
    }

    #[test]
    fn rejects_non_links() {
        assert_eq!(lnk_target(b"plain text"), None);
        assert_eq!(lnk_target(&[]), None);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks() {
        let td = tempfile::tempdir().unwrap();
        let target = td.path().join("IMG_4275.JPG");
        fs::write(&target, b"jpg").unwrap();
        let link = td.path().join("IMG_4275 - Shortcut.lnk");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let resolved = SystemShortcutResolver.resolve(&link).unwrap();
        assert_eq!(resolved, dunce::canonicalize(&target).unwrap());
    }

    #[test]
    fn plain_file_is_unresolved() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("x - Shortcut.lnk");
        fs::write(&p, b"nope").unwrap();
        let err = SystemShortcutResolver.resolve(&p).unwrap_err();
        assert_eq!(err.kind(), "shortcut_unresolved");
    }
}
