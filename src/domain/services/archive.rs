//! Archive container writer
//!
//! Builds a single-entry, store-only ZIP archive. The output depends only on
//! the entry name and content, so the same input always yields the same bytes.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! local file header (30 + n) | content | central directory record (46 + n) | end record (22)
//! ```

use super::crc32::crc32;
use thiserror::Error;

pub const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
pub const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
pub const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x0605_4b50;

/// "2.0": the minimum version for a stored entry
const VERSION: u16 = 20;
const METHOD_STORE: u16 = 0;
const FLAGS: u16 = 0;
const MOD_TIME: u16 = 0;
/// 1980-01-01, the MS-DOS epoch
const MOD_DATE: u16 = (1 << 5) | 1;

const LOCAL_HEADER_LEN: usize = 30;
const CENTRAL_HEADER_LEN: usize = 46;
const END_RECORD_LEN: usize = 22;

/// Errors that prevent an entry from fitting a ZIP32 archive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    #[error("Entry name is {0} bytes; the limit is 65535")]
    NameTooLong(usize),

    #[error("Entry name is empty")]
    EmptyName,

    #[error("Entry content is {0} bytes; the limit is 4294967295")]
    ContentTooLarge(usize),
}

/// A stored entry, with its checksum computed over the exact stored bytes
struct ArchiveEntry<'a> {
    name: &'a [u8],
    content: &'a [u8],
    crc: u32,
    length: u32,
}

impl<'a> ArchiveEntry<'a> {
    fn new(name: &'a str, content: &'a [u8]) -> Result<Self, ArchiveError> {
        let name = name.as_bytes();
        if name.is_empty() {
            return Err(ArchiveError::EmptyName);
        }
        if name.len() > u16::MAX as usize {
            return Err(ArchiveError::NameTooLong(name.len()));
        }
        let length =
            u32::try_from(content.len()).map_err(|_| ArchiveError::ContentTooLarge(content.len()))?;

        Ok(Self {
            name,
            content,
            crc: crc32(content),
            length,
        })
    }

    fn name_len(&self) -> u16 {
        self.name.len() as u16
    }

    /// Fields shared verbatim by the local and central headers
    fn put_common(&self, out: &mut Vec<u8>) {
        put_u16(out, FLAGS);
        put_u16(out, METHOD_STORE);
        put_u16(out, MOD_TIME);
        put_u16(out, MOD_DATE);
        put_u32(out, self.crc);
        put_u32(out, self.length); // compressed
        put_u32(out, self.length); // uncompressed
        put_u16(out, self.name_len());
        put_u16(out, 0); // extra field length
    }

    fn local_header(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LOCAL_HEADER_LEN + self.name.len());
        put_u32(&mut out, LOCAL_HEADER_SIGNATURE);
        put_u16(&mut out, VERSION);
        self.put_common(&mut out);
        out.extend_from_slice(self.name);
        out
    }

    fn central_header(&self, local_offset: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(CENTRAL_HEADER_LEN + self.name.len());
        put_u32(&mut out, CENTRAL_HEADER_SIGNATURE);
        put_u16(&mut out, VERSION); // made by
        put_u16(&mut out, VERSION); // needed to extract
        self.put_common(&mut out);
        put_u16(&mut out, 0); // comment length
        put_u16(&mut out, 0); // disk number start
        put_u16(&mut out, 0); // internal attributes
        put_u32(&mut out, 0); // external attributes
        put_u32(&mut out, local_offset);
        out.extend_from_slice(self.name);
        out
    }
}

/// Builds a store-only archive holding `content` under `name`
pub fn build_archive(name: &str, content: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let entry = ArchiveEntry::new(name, content)?;

    let local = entry.local_header();
    let central = entry.central_header(0);

    // Offsets must fit in 32 bits as well; a name < 64 KiB plus a content
    // < 4 GiB can still overflow, so check the sum.
    let central_offset = u32::try_from(local.len() + entry.content.len())
        .map_err(|_| ArchiveError::ContentTooLarge(entry.content.len()))?;

    let mut out =
        Vec::with_capacity(local.len() + entry.content.len() + central.len() + END_RECORD_LEN);
    out.extend_from_slice(&local);
    out.extend_from_slice(entry.content);
    out.extend_from_slice(&central);

    put_u32(&mut out, END_OF_CENTRAL_DIR_SIGNATURE);
    put_u16(&mut out, 0); // this disk
    put_u16(&mut out, 0); // disk with central directory
    put_u16(&mut out, 1); // entries on this disk
    put_u16(&mut out, 1); // total entries
    put_u32(&mut out, central.len() as u32);
    put_u32(&mut out, central_offset);
    put_u16(&mut out, 0); // comment length

    debug_assert_eq!(out.len(), archive_len(name.len(), content.len()));
    Ok(out)
}

/// Total archive size for a given name and content length
pub fn archive_len(name_len: usize, content_len: usize) -> usize {
    LOCAL_HEADER_LEN + CENTRAL_HEADER_LEN + END_RECORD_LEN + 2 * name_len + content_len
}

#[inline]
fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
