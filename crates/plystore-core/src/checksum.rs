// crates/plystore-core/src/checksum.rs
//
// Record integrity (crc32) and stable document ids (truncated blake3, lowercase hex).

/// Hex digits kept from the blake3 digest: 16 bytes.
pub const DOCUMENT_ID_HEX_LEN: usize = 32;

pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Stable identifier of a rendered document.
pub fn document_id_hex(rendered: &[u8]) -> String {
    let digest = blake3::hash(rendered).to_hex();
    digest[..DOCUMENT_ID_HEX_LEN].to_owned()
}
