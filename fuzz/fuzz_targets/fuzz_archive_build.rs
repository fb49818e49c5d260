#![no_main]

use libfuzzer_sys::fuzz_target;

use zip4::domain::services::archive::{archive_len, LOCAL_HEADER_SIGNATURE};
use zip4::domain::services::{build_archive, crc32};

// Byte layout:
// - Byte 0 → name length (0..=255)
// - Next `name length` bytes → entry name (lossy UTF-8)
// - Remaining bytes → entry content
fuzz_target!(|data: &[u8]| {
    let Some((&name_len, rest)) = data.split_first() else {
        return;
    };
    let name_len = (name_len as usize).min(rest.len());
    let name = String::from_utf8_lossy(&rest[..name_len]);
    let content = &rest[name_len..];

    let Ok(archive) = build_archive(&name, content) else {
        assert!(name.is_empty());
        return;
    };

    assert_eq!(archive.len(), archive_len(name.len(), content.len()));
    assert_eq!(&archive[..4], &LOCAL_HEADER_SIGNATURE.to_le_bytes());
    // CRC-32 sits at offset 14 of the local header
    assert_eq!(&archive[14..18], &crc32(content).to_le_bytes());
    let data_start = 30 + name.len();
    assert_eq!(&archive[data_start..data_start + content.len()], content);
});
